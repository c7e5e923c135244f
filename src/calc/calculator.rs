use serde::{Deserialize, Serialize};

use crate::calc::{FertilizationAdvice, LimingRecommendation, SprayResult};
use crate::config::Config;
use crate::error::AgroError;
use crate::models::{LimingTarget, SoilAnalysis, SoilState, SpeedMode, SprayerSetup};

/// Everything the liming form shows for one soil sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimingReport {
    pub analysis: SoilAnalysis,
    pub target: LimingTarget,
    pub state: SoilState,
    /// Current minus target saturation, percentage points
    pub saturation_delta: f64,
    pub recommendation: LimingRecommendation,
    pub fertilization: FertilizationAdvice,
    /// True when the soil is already at or above the target
    pub already_corrected: bool,
}

/// Everything the sprayer form shows for one setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprayerReport {
    pub setup: SprayerSetup,
    pub speed_mode: SpeedMode,
    pub speed_kmh: f64,
    pub result: SprayResult,
}

/// One line of a batch run: a report, or the reason the sample failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub sample_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<LimingReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Validating front door to the calculation functions.
///
/// Holds only immutable configuration, so one instance can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    config: Config,
}

impl Calculator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Liming target from the configured defaults.
    pub fn default_target(&self) -> LimingTarget {
        self.config.liming_target()
    }

    /// Sprayer setup from the configured defaults.
    pub fn default_setup(&self, mode: SpeedMode) -> SprayerSetup {
        self.config.sprayer_setup(mode)
    }

    /// Validate the inputs and compute the full liming report.
    pub fn liming(
        &self,
        analysis: &SoilAnalysis,
        target: &LimingTarget,
    ) -> Result<LimingReport, AgroError> {
        analysis.validate()?;
        target.validate()?;

        let state = analysis.soil_state();
        let recommendation =
            LimingRecommendation::compute(&state, target.target_saturation, target.prnt)?;
        let fertilization = FertilizationAdvice::classify(analysis.phosphorus, analysis.potassium);

        tracing::info!(
            sample = %analysis.label(),
            saturation = state.current_saturation,
            need = recommendation.needed_tons_per_ha,
            "liming calculated"
        );

        Ok(LimingReport {
            analysis: analysis.clone(),
            target: *target,
            state,
            saturation_delta: state.current_saturation - target.target_saturation,
            already_corrected: !recommendation.is_needed(),
            recommendation,
            fertilization,
        })
    }

    /// Validate the setup, resolve speed and compute volume and autonomy.
    pub fn sprayer(&self, setup: &SprayerSetup) -> Result<SprayerReport, AgroError> {
        let limits = &self.config.sprayer;
        setup.validate(limits.min_speed_kmh, limits.max_speed_kmh)?;

        let speed_kmh = setup.speed.resolve()?;
        if speed_kmh <= 0.0 {
            return Err(AgroError::InvalidInput(format!(
                "speed must be greater than zero to calibrate, got {speed_kmh:.1} km/h"
            )));
        }
        let result = SprayResult::compute(
            setup.nozzle_flow,
            speed_kmh,
            setup.nozzle_spacing,
            setup.tank_capacity,
        )?;

        tracing::info!(
            mode = %setup.speed.mode(),
            speed_kmh,
            volume = result.volume_per_ha,
            band = %result.band,
            "sprayer calibrated"
        );

        Ok(SprayerReport {
            setup: *setup,
            speed_mode: setup.speed.mode(),
            speed_kmh,
            result,
        })
    }

    /// Liming reports for many samples; failures are recorded per entry.
    pub fn batch(&self, samples: &[SoilAnalysis], target: &LimingTarget) -> Vec<BatchEntry> {
        samples
            .iter()
            .enumerate()
            .map(|(i, analysis)| {
                let sample_id = analysis
                    .sample_id
                    .clone()
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| format!("#{}", i + 1));
                match self.liming(analysis, target) {
                    Ok(report) => BatchEntry {
                        sample_id,
                        report: Some(report),
                        error: None,
                    },
                    Err(e) => {
                        tracing::warn!(sample = %sample_id, error = %e, "sample skipped");
                        BatchEntry {
                            sample_id,
                            report: None,
                            error: Some(e.to_string()),
                        }
                    }
                }
            })
            .collect()
    }
}
