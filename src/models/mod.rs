mod soil;
mod sprayer;

pub use soil::{LimingTarget, SoilAnalysis, SoilState, DEFAULT_PRNT, DEFAULT_TARGET_SATURATION};
pub use sprayer::{SpeedInput, SpeedMode, SprayerSetup};
