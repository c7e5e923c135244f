use serde::{Deserialize, Serialize};

use crate::error::AgroError;

/// How travel speed is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedMode {
    /// Read from the tractor panel
    Direct,
    /// Timed over a measured distance in the field
    Timed,
}

impl std::fmt::Display for SpeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeedMode::Direct => write!(f, "direct"),
            SpeedMode::Timed => write!(f, "timed"),
        }
    }
}

impl std::str::FromStr for SpeedMode {
    type Err = AgroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" | "d" | "panel" => Ok(SpeedMode::Direct),
            "timed" | "t" | "field" => Ok(SpeedMode::Timed),
            _ => Err(AgroError::ParseError(format!("Unknown speed mode: '{s}'"))),
        }
    }
}

/// Travel speed input, either entered directly or measured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SpeedInput {
    Direct {
        speed_kmh: f64,
    },
    Timed {
        /// Distance travelled in metres
        distance_m: f64,
        /// Time taken in seconds
        elapsed_s: f64,
    },
}

impl SpeedInput {
    pub fn mode(&self) -> SpeedMode {
        match self {
            SpeedInput::Direct { .. } => SpeedMode::Direct,
            SpeedInput::Timed { .. } => SpeedMode::Timed,
        }
    }

    /// Resolve to km/h. Fails for timed input with a non-positive elapsed time.
    pub fn resolve(&self) -> Result<f64, AgroError> {
        match *self {
            SpeedInput::Direct { speed_kmh } => {
                crate::calc::resolve_speed(SpeedMode::Direct, speed_kmh, 0.0, 0.0)
            }
            SpeedInput::Timed {
                distance_m,
                elapsed_s,
            } => crate::calc::resolve_speed(SpeedMode::Timed, 0.0, distance_m, elapsed_s),
        }
    }
}

/// Sprayer equipment and operating speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SprayerSetup {
    /// Flow of a single nozzle in L/min
    pub nozzle_flow: f64,
    /// Distance between nozzles on the boom in cm
    pub nozzle_spacing: f64,
    /// Tank volume in litres
    pub tank_capacity: f64,
    pub speed: SpeedInput,
}

impl SprayerSetup {
    /// Validate equipment values and, for direct speed, the panel range.
    pub fn validate(&self, min_speed_kmh: f64, max_speed_kmh: f64) -> Result<(), AgroError> {
        if !self.nozzle_flow.is_finite() || self.nozzle_flow < 0.0 {
            return Err(AgroError::ValidationError(format!(
                "nozzle flow must be non-negative, got {}",
                self.nozzle_flow
            )));
        }
        if !(self.nozzle_spacing.is_finite() && self.nozzle_spacing > 0.0) {
            return Err(AgroError::ValidationError(format!(
                "nozzle spacing must be positive, got {}",
                self.nozzle_spacing
            )));
        }
        if !self.tank_capacity.is_finite() || self.tank_capacity < 0.0 {
            return Err(AgroError::ValidationError(format!(
                "tank capacity must be non-negative, got {}",
                self.tank_capacity
            )));
        }
        match self.speed {
            SpeedInput::Direct { speed_kmh } => {
                if !(min_speed_kmh..=max_speed_kmh).contains(&speed_kmh) {
                    return Err(AgroError::ValidationError(format!(
                        "speed must be in {min_speed_kmh}..={max_speed_kmh} km/h, got {speed_kmh}"
                    )));
                }
            }
            SpeedInput::Timed { distance_m, .. } => {
                if !distance_m.is_finite() || distance_m < 0.0 {
                    return Err(AgroError::ValidationError(format!(
                        "distance must be non-negative, got {distance_m}"
                    )));
                }
            }
        }
        Ok(())
    }
}
