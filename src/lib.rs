pub mod calc;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

#[cfg(feature = "web")]
pub mod web;

pub use calc::Calculator;
pub use config::Config;
pub use error::AgroError;
pub use io::{ReportWriter, SampleReader};
pub use models::{LimingTarget, SoilAnalysis, SoilState, SpeedInput, SpeedMode, SprayerSetup};
