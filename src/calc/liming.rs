use serde::{Deserialize, Serialize};

use crate::error::AgroError;
use crate::models::{SoilAnalysis, SoilState};

/// Compute base sum, CEC and current base saturation.
///
/// # Examples
///
/// ```
/// use agronomic_calculator::calc::compute_soil_state;
///
/// let state = compute_soil_state(0.2, 2.0, 1.0, 3.0);
/// assert!((state.base_sum - 3.2).abs() < 1e-9);
/// assert!((state.cec - 6.2).abs() < 1e-9);
/// assert!((state.current_saturation - 51.6).abs() < 0.05);
/// ```
pub fn compute_soil_state(k: f64, ca: f64, mg: f64, acidity: f64) -> SoilState {
    let base_sum = (k + ca + mg).max(0.0);
    let cec = (base_sum + acidity).max(0.0);
    let current_saturation = if cec > 0.0 {
        100.0 * base_sum / cec
    } else {
        tracing::debug!("CEC is zero, base saturation reported as 0");
        0.0
    };
    SoilState {
        base_sum,
        cec,
        current_saturation,
    }
}

/// Liming need in t/ha by the base-saturation method:
/// `NC = (V2 - V1) * CEC / PRNT`, never negative.
///
/// Fails with `AgroError::InvalidInput` when `prnt` is not strictly positive.
pub fn compute_liming_need(
    state: &SoilState,
    target_saturation: f64,
    prnt: f64,
) -> Result<f64, AgroError> {
    if prnt.is_nan() || prnt <= 0.0 {
        tracing::warn!(prnt, "rejected liming calculation with non-positive PRNT");
        return Err(AgroError::InvalidInput(format!(
            "PRNT must be greater than zero, got {prnt}"
        )));
    }
    let need = (target_saturation - state.current_saturation) * state.cec / prnt;
    tracing::debug!(
        target_saturation,
        prnt,
        current = state.current_saturation,
        raw_need = need,
        "computed liming need"
    );
    Ok(need.max(0.0))
}

impl SoilAnalysis {
    /// Exchange-complex state of this sample.
    pub fn soil_state(&self) -> SoilState {
        compute_soil_state(self.potassium, self.calcium, self.magnesium, self.acidity)
    }
}

/// Recommended liming rate for a given material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimingRecommendation {
    /// Tons of liming material per hectare
    pub needed_tons_per_ha: f64,
    /// PRNT the rate was computed for
    pub prnt: f64,
}

impl LimingRecommendation {
    pub fn compute(
        state: &SoilState,
        target_saturation: f64,
        prnt: f64,
    ) -> Result<Self, AgroError> {
        Ok(Self {
            needed_tons_per_ha: compute_liming_need(state, target_saturation, prnt)?,
            prnt,
        })
    }

    /// Whether any lime should be applied.
    pub fn is_needed(&self) -> bool {
        self.needed_tons_per_ha > 0.0
    }

    /// Rate rescaled for a material with a different PRNT.
    pub fn for_prnt(&self, prnt: f64) -> Result<Self, AgroError> {
        if prnt.is_nan() || prnt <= 0.0 {
            return Err(AgroError::InvalidInput(format!(
                "PRNT must be greater than zero, got {prnt}"
            )));
        }
        Ok(Self {
            needed_tons_per_ha: self.needed_tons_per_ha * self.prnt / prnt,
            prnt,
        })
    }
}

impl std::fmt::Display for LimingRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_needed() {
            write!(
                f,
                "{:.2} t/ha of lime at PRNT {:.0}%",
                self.needed_tons_per_ha, self.prnt
            )
        } else {
            write!(f, "no lime needed")
        }
    }
}
