mod calculator;
mod fertilization;
mod liming;
mod sprayer;

pub use calculator::{BatchEntry, Calculator, LimingReport, SprayerReport};
pub use fertilization::{
    classify_fertilization, classify_phosphorus, classify_potassium, FertilizationAdvice,
    NutrientLevel, PHOSPHORUS_ADEQUATE_FROM, PHOSPHORUS_MEDIUM_FROM, POTASSIUM_ADEQUATE_FROM,
    POTASSIUM_MEDIUM_FROM,
};
pub use liming::{compute_liming_need, compute_soil_state, LimingRecommendation};
pub use sprayer::{
    compute_autonomy, compute_spray_volume, resolve_speed, SprayResult, VolumeBand,
    HIGH_VOLUME_ABOVE, LOW_VOLUME_BELOW, MS_TO_KMH, VOLUME_FACTOR,
};
