use serde::{Deserialize, Serialize};

/// Phosphorus (mg/dm³) at or above this is Medium.
pub const PHOSPHORUS_MEDIUM_FROM: f64 = 10.0;
/// Phosphorus (mg/dm³) at or above this is Adequate.
pub const PHOSPHORUS_ADEQUATE_FROM: f64 = 20.0;
/// Potassium (cmol/dm³) at or above this is Medium.
pub const POTASSIUM_MEDIUM_FROM: f64 = 0.15;
/// Potassium (cmol/dm³) at or above this is Adequate.
pub const POTASSIUM_ADEQUATE_FROM: f64 = 0.30;

/// Availability tier of a nutrient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientLevel {
    Low,
    Medium,
    Adequate,
}

impl std::fmt::Display for NutrientLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NutrientLevel::Low => write!(f, "Low"),
            NutrientLevel::Medium => write!(f, "Medium"),
            NutrientLevel::Adequate => write!(f, "Adequate"),
        }
    }
}

fn tier(value: f64, medium_from: f64, adequate_from: f64) -> NutrientLevel {
    if value < medium_from {
        NutrientLevel::Low
    } else if value < adequate_from {
        NutrientLevel::Medium
    } else {
        NutrientLevel::Adequate
    }
}

pub fn classify_phosphorus(phosphorus: f64) -> NutrientLevel {
    tier(phosphorus, PHOSPHORUS_MEDIUM_FROM, PHOSPHORUS_ADEQUATE_FROM)
}

pub fn classify_potassium(potassium: f64) -> NutrientLevel {
    tier(potassium, POTASSIUM_MEDIUM_FROM, POTASSIUM_ADEQUATE_FROM)
}

/// Classify phosphorus and potassium. Thresholds belong to the upper tier.
///
/// # Examples
///
/// ```
/// use agronomic_calculator::calc::{classify_fertilization, NutrientLevel};
///
/// let (p, k) = classify_fertilization(10.0, 0.30);
/// assert_eq!(p, NutrientLevel::Medium);
/// assert_eq!(k, NutrientLevel::Adequate);
/// ```
pub fn classify_fertilization(phosphorus: f64, potassium: f64) -> (NutrientLevel, NutrientLevel) {
    (classify_phosphorus(phosphorus), classify_potassium(potassium))
}

/// Fertilization guidance for a soil sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertilizationAdvice {
    /// `None` when the sample has no phosphorus result
    pub phosphorus: Option<NutrientLevel>,
    pub potassium: NutrientLevel,
}

impl FertilizationAdvice {
    pub fn classify(phosphorus: Option<f64>, potassium: f64) -> Self {
        Self {
            phosphorus: phosphorus.map(classify_phosphorus),
            potassium: classify_potassium(potassium),
        }
    }

    pub fn phosphorus_message(&self) -> &'static str {
        match self.phosphorus {
            Some(NutrientLevel::Low) => "Low phosphorus: apply a corrective phosphate dose before planting.",
            Some(NutrientLevel::Medium) => "Medium phosphorus: maintenance phosphate application recommended.",
            Some(NutrientLevel::Adequate) => "Adequate phosphorus: replacement dose for crop export only.",
            None => "Phosphorus not measured: no phosphate guidance.",
        }
    }

    pub fn potassium_message(&self) -> &'static str {
        match self.potassium {
            NutrientLevel::Low => "Low potassium: apply corrective potash, split if the dose is high.",
            NutrientLevel::Medium => "Medium potassium: maintenance potash application recommended.",
            NutrientLevel::Adequate => "Adequate potassium: replacement dose for crop export only.",
        }
    }
}
