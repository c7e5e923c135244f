use serde::{Deserialize, Serialize};

use crate::error::AgroError;

/// Default desired base saturation (V%) when none is given.
pub const DEFAULT_TARGET_SATURATION: f64 = 70.0;
/// Default PRNT (%) of the liming material.
pub const DEFAULT_PRNT: f64 = 80.0;

/// Laboratory soil analysis for a single sample.
///
/// Cations and acidity are in cmol/dm³, phosphorus in mg/dm³.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SoilAnalysis {
    /// Optional sample or field identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
    /// Exchangeable potassium (K)
    pub potassium: f64,
    /// Exchangeable calcium (Ca)
    pub calcium: f64,
    /// Exchangeable magnesium (Mg)
    pub magnesium: f64,
    /// Potential acidity (H+Al)
    pub acidity: f64,
    /// Available phosphorus (P), advisory only; `None` when not measured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phosphorus: Option<f64>,
}

impl SoilAnalysis {
    /// Create an analysis without phosphorus or sample id.
    pub fn new(potassium: f64, calcium: f64, magnesium: f64, acidity: f64) -> Self {
        Self {
            sample_id: None,
            potassium,
            calcium,
            magnesium,
            acidity,
            phosphorus: None,
        }
    }

    /// Builder-style setter for phosphorus.
    pub fn with_phosphorus(mut self, phosphorus: f64) -> Self {
        self.phosphorus = Some(phosphorus);
        self
    }

    /// Builder-style setter for the sample id.
    pub fn with_sample_id(mut self, id: impl Into<String>) -> Self {
        self.sample_id = Some(id.into());
        self
    }

    /// Human-readable label used in messages and tables.
    pub fn label(&self) -> String {
        match &self.sample_id {
            Some(id) if !id.trim().is_empty() => id.clone(),
            _ => "unnamed".to_string(),
        }
    }

    /// Validate the analysis. Returns `AgroError::ValidationError` on failure.
    pub fn validate(&self) -> Result<(), AgroError> {
        let fields = [
            ("potassium", Some(self.potassium)),
            ("calcium", Some(self.calcium)),
            ("magnesium", Some(self.magnesium)),
            ("acidity", Some(self.acidity)),
            ("phosphorus", self.phosphorus),
        ];
        for (name, value) in fields {
            let Some(value) = value else { continue };
            if !value.is_finite() || value < 0.0 {
                return Err(AgroError::ValidationError(format!(
                    "Sample {}: {name} must be a non-negative number, got {value}",
                    self.label()
                )));
            }
        }
        Ok(())
    }
}

/// Liming goal: desired base saturation and the PRNT of the material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimingTarget {
    /// Desired base saturation, percent
    pub target_saturation: f64,
    /// Relative total neutralizing power, percent
    pub prnt: f64,
}

impl Default for LimingTarget {
    fn default() -> Self {
        Self {
            target_saturation: DEFAULT_TARGET_SATURATION,
            prnt: DEFAULT_PRNT,
        }
    }
}

impl LimingTarget {
    pub fn new(target_saturation: f64, prnt: f64) -> Self {
        Self {
            target_saturation,
            prnt,
        }
    }

    /// Check target in `0..=100` and PRNT in `(0, 100]`.
    pub fn validate(&self) -> Result<(), AgroError> {
        if !(0.0..=100.0).contains(&self.target_saturation) {
            return Err(AgroError::ValidationError(format!(
                "target saturation must be in 0..=100, got {}",
                self.target_saturation
            )));
        }
        if !(self.prnt > 0.0 && self.prnt <= 100.0) {
            return Err(AgroError::ValidationError(format!(
                "PRNT must be in (0, 100], got {}",
                self.prnt
            )));
        }
        Ok(())
    }
}

/// Derived exchange-complex state of a soil sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilState {
    /// Sum of bases K + Ca + Mg (cmol/dm³)
    pub base_sum: f64,
    /// Cation exchange capacity, base sum + H+Al (cmol/dm³)
    pub cec: f64,
    /// Current base saturation V%; 0 when CEC is 0
    pub current_saturation: f64,
}

impl std::fmt::Display for SoilState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SB {:.2} cmol/dm³, CEC {:.2} cmol/dm³, V {:.1}%",
            self.base_sum, self.cec, self.current_saturation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SoilAnalysis {
        SoilAnalysis::new(0.2, 2.0, 1.0, 3.0).with_phosphorus(12.0)
    }

    #[test]
    fn test_valid_analysis() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_all_zero_analysis_is_valid() {
        assert!(SoilAnalysis::default().validate().is_ok());
    }

    #[test]
    fn test_negative_calcium_rejected() {
        let mut a = sample();
        a.calcium = -1.0;
        let err = a.validate().unwrap_err();
        assert!(err.to_string().contains("calcium must be a non-negative number"));
    }

    #[test]
    fn test_nan_acidity_rejected() {
        let mut a = sample();
        a.acidity = f64::NAN;
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_negative_phosphorus_rejected() {
        let a = sample().with_phosphorus(-0.5);
        let err = a.validate().unwrap_err();
        assert!(err.to_string().contains("phosphorus"));
    }

    #[test]
    fn test_label_uses_sample_id() {
        let a = sample().with_sample_id("Field 7");
        assert_eq!(a.label(), "Field 7");
        assert_eq!(sample().label(), "unnamed");
    }

    #[test]
    fn test_error_message_names_sample() {
        let mut a = sample().with_sample_id("A-12");
        a.potassium = -0.1;
        let err = a.validate().unwrap_err();
        assert!(err.to_string().contains("Sample A-12"));
    }

    #[test]
    fn test_default_target() {
        let t = LimingTarget::default();
        assert_eq!(t.target_saturation, 70.0);
        assert_eq!(t.prnt, 80.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_target_above_100_rejected() {
        let t = LimingTarget::new(105.0, 80.0);
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_zero_prnt_rejected() {
        let err = LimingTarget::new(70.0, 0.0).validate().unwrap_err();
        assert!(err.to_string().contains("PRNT must be in (0, 100]"));
    }

    #[test]
    fn test_prnt_of_100_accepted() {
        assert!(LimingTarget::new(60.0, 100.0).validate().is_ok());
    }

    #[test]
    fn test_phosphorus_absent_when_missing_in_json() {
        let json = r#"{"potassium":0.2,"calcium":2.0,"magnesium":1.0,"acidity":3.0}"#;
        let a: SoilAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(a.phosphorus, None);
        assert!(a.sample_id.is_none());
        assert!(a.validate().is_ok());
        assert!(!serde_json::to_string(&a).unwrap().contains("phosphorus"));
    }

    #[test]
    fn test_soil_state_display_precision() {
        let s = SoilState {
            base_sum: 3.2,
            cec: 6.2,
            current_saturation: 51.612903,
        };
        assert_eq!(s.to_string(), "SB 3.20 cmol/dm³, CEC 6.20 cmol/dm³, V 51.6%");
    }
}
