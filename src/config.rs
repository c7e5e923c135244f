//! Calculator defaults and server settings, loaded from TOML.
//!
//! Every section is optional; missing sections and fields fall back to the
//! defaults of the field form:
//!
//! ```toml
//! [liming]
//! target_saturation = 70.0
//! prnt = 80.0
//!
//! [sprayer]
//! nozzle_flow = 0.8
//! speed_kmh = 5.0
//!
//! [server]
//! port = 8080
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AgroError;
use crate::models::{
    LimingTarget, SpeedInput, SpeedMode, SprayerSetup, DEFAULT_PRNT, DEFAULT_TARGET_SATURATION,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub liming: LimingDefaults,
    pub sprayer: SprayerDefaults,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimingDefaults {
    /// Desired base saturation V%
    pub target_saturation: f64,
    /// PRNT of the liming material, percent
    pub prnt: f64,
}

impl Default for LimingDefaults {
    fn default() -> Self {
        Self {
            target_saturation: DEFAULT_TARGET_SATURATION,
            prnt: DEFAULT_PRNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SprayerDefaults {
    /// L/min per nozzle
    pub nozzle_flow: f64,
    /// cm between nozzles
    pub nozzle_spacing: f64,
    /// Litres
    pub tank_capacity: f64,
    /// Panel speed in km/h
    pub speed_kmh: f64,
    /// Timed-run distance in metres
    pub distance_m: f64,
    /// Timed-run duration in seconds
    pub elapsed_s: f64,
    /// Lowest accepted panel speed
    pub min_speed_kmh: f64,
    /// Highest accepted panel speed
    pub max_speed_kmh: f64,
}

impl Default for SprayerDefaults {
    fn default() -> Self {
        Self {
            nozzle_flow: 0.8,
            nozzle_spacing: 50.0,
            tank_capacity: 600.0,
            speed_kmh: 5.0,
            distance_m: 50.0,
            elapsed_s: 30.0,
            min_speed_kmh: 2.0,
            max_speed_kmh: 25.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Read and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AgroError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, AgroError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, AgroError> {
        toml::to_string_pretty(self).map_err(|e| AgroError::ParseError(e.to_string()))
    }

    /// Reject defaults the calculators could never accept.
    pub fn validate(&self) -> Result<(), AgroError> {
        self.liming_target().validate()?;

        let s = &self.sprayer;
        if !(s.min_speed_kmh > 0.0 && s.min_speed_kmh <= s.max_speed_kmh) {
            return Err(AgroError::ValidationError(format!(
                "sprayer speed range is invalid: {}..={} km/h",
                s.min_speed_kmh, s.max_speed_kmh
            )));
        }
        self.sprayer_setup(SpeedMode::Direct)
            .validate(s.min_speed_kmh, s.max_speed_kmh)?;
        self.sprayer_setup(SpeedMode::Timed)
            .validate(s.min_speed_kmh, s.max_speed_kmh)?;
        if !(s.elapsed_s.is_finite() && s.elapsed_s > 0.0) {
            return Err(AgroError::ValidationError(format!(
                "default elapsed time must be positive, got {}",
                s.elapsed_s
            )));
        }
        Ok(())
    }

    pub fn liming_target(&self) -> LimingTarget {
        LimingTarget::new(self.liming.target_saturation, self.liming.prnt)
    }

    /// Default sprayer setup for the given speed mode.
    pub fn sprayer_setup(&self, mode: SpeedMode) -> SprayerSetup {
        let s = &self.sprayer;
        let speed = match mode {
            SpeedMode::Direct => SpeedInput::Direct {
                speed_kmh: s.speed_kmh,
            },
            SpeedMode::Timed => SpeedInput::Timed {
                distance_m: s.distance_m,
                elapsed_s: s.elapsed_s,
            },
        };
        SprayerSetup {
            nozzle_flow: s.nozzle_flow,
            nozzle_spacing: s.nozzle_spacing,
            tank_capacity: s.tank_capacity,
            speed,
        }
    }
}
