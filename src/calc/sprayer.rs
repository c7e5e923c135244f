use serde::{Deserialize, Serialize};

use crate::error::AgroError;
use crate::models::SpeedMode;

/// Folds L/min → L/h (×60) and cm·km → ha (×1000) into one factor.
pub const VOLUME_FACTOR: f64 = 60_000.0;
/// m/s → km/h.
pub const MS_TO_KMH: f64 = 3.6;
/// Volumes below this (L/ha) risk poor coverage.
pub const LOW_VOLUME_BELOW: f64 = 100.0;
/// Volumes above this (L/ha) risk runoff.
pub const HIGH_VOLUME_ABOVE: f64 = 250.0;

/// Resolve travel speed in km/h from either input mode.
///
/// In `Timed` mode `elapsed_time` must be positive; otherwise no speed is
/// produced and the caller must not continue to volume or autonomy.
pub fn resolve_speed(
    mode: SpeedMode,
    direct_speed: f64,
    distance: f64,
    elapsed_time: f64,
) -> Result<f64, AgroError> {
    match mode {
        SpeedMode::Direct => Ok(direct_speed),
        SpeedMode::Timed => {
            if elapsed_time.is_nan() || elapsed_time <= 0.0 {
                tracing::warn!(elapsed_time, "rejected timed speed with non-positive time");
                return Err(AgroError::InvalidInput(format!(
                    "elapsed time must be greater than zero, got {elapsed_time}"
                )));
            }
            let speed = distance / elapsed_time * MS_TO_KMH;
            tracing::debug!(distance, elapsed_time, speed, "derived speed from timed run");
            Ok(speed)
        }
    }
}

/// Application volume in L/ha: `flow * 60000 / (speed * spacing)`.
///
/// # Examples
///
/// ```
/// use agronomic_calculator::calc::compute_spray_volume;
///
/// let volume = compute_spray_volume(0.8, 5.0, 50.0).unwrap();
/// assert!((volume - 192.0).abs() < 1e-9);
/// ```
pub fn compute_spray_volume(
    nozzle_flow: f64,
    speed_kmh: f64,
    nozzle_spacing: f64,
) -> Result<f64, AgroError> {
    if speed_kmh.is_nan() || speed_kmh <= 0.0 {
        return Err(AgroError::InvalidInput(format!(
            "speed must be greater than zero, got {speed_kmh}"
        )));
    }
    if nozzle_spacing.is_nan() || nozzle_spacing <= 0.0 {
        return Err(AgroError::InvalidInput(format!(
            "nozzle spacing must be greater than zero, got {nozzle_spacing}"
        )));
    }
    let volume = nozzle_flow * VOLUME_FACTOR / (speed_kmh * nozzle_spacing);
    Ok(volume.max(0.0))
}

/// Hectares covered by one full tank; 0 when the volume is not positive.
pub fn compute_autonomy(tank_capacity: f64, volume_per_ha: f64) -> f64 {
    if volume_per_ha > 0.0 {
        (tank_capacity / volume_per_ha).max(0.0)
    } else {
        tracing::debug!("application volume is zero, autonomy cannot be estimated");
        0.0
    }
}

/// Coverage band of an application volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeBand {
    /// Below 100 L/ha
    Low,
    /// 100 to 250 L/ha inclusive
    Ideal,
    /// Above 250 L/ha
    High,
}

impl VolumeBand {
    pub fn classify(volume_per_ha: f64) -> Self {
        if volume_per_ha < LOW_VOLUME_BELOW {
            VolumeBand::Low
        } else if volume_per_ha <= HIGH_VOLUME_ABOVE {
            VolumeBand::Ideal
        } else {
            VolumeBand::High
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            VolumeBand::Low => "Low volume (check coverage)",
            VolumeBand::Ideal => "Ideal volume",
            VolumeBand::High => "High volume (runoff risk)",
        }
    }
}

impl std::fmt::Display for VolumeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolumeBand::Low => write!(f, "Low"),
            VolumeBand::Ideal => write!(f, "Ideal"),
            VolumeBand::High => write!(f, "High"),
        }
    }
}

/// Calibration outcome for one sprayer setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SprayResult {
    pub volume_per_ha: f64,
    pub autonomy_ha: f64,
    pub band: VolumeBand,
}

impl SprayResult {
    pub fn compute(
        nozzle_flow: f64,
        speed_kmh: f64,
        nozzle_spacing: f64,
        tank_capacity: f64,
    ) -> Result<Self, AgroError> {
        let volume_per_ha = compute_spray_volume(nozzle_flow, speed_kmh, nozzle_spacing)?;
        Ok(Self {
            volume_per_ha,
            autonomy_ha: compute_autonomy(tank_capacity, volume_per_ha),
            band: VolumeBand::classify(volume_per_ha),
        })
    }
}

impl std::fmt::Display for SprayResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.1} L/ha ({}), {:.1} ha per tank",
            self.volume_per_ha, self.band, self.autonomy_ha
        )
    }
}
