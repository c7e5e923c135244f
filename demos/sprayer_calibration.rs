//! Sprayer example: calibrate from the panel speed and from a timed run.
//!
//! Run from the project root:
//!   cargo run --example sprayer_calibration

use agronomic_calculator::{
    visualization::{print_sprayer_report, print_volume_gauge},
    Calculator, SpeedInput, SpeedMode, SprayerSetup,
};

fn main() {
    let calc = Calculator::default();

    // Panel speed from the configured defaults
    let panel = calc
        .sprayer(&calc.default_setup(SpeedMode::Direct))
        .expect("Calibration failed");
    print_sprayer_report(&panel);
    print_volume_gauge(panel.result.volume_per_ha);

    // 50 m covered in 36 s with finer nozzles
    let timed = SprayerSetup {
        nozzle_flow: 0.6,
        speed: SpeedInput::Timed {
            distance_m: 50.0,
            elapsed_s: 36.0,
        },
        ..calc.default_setup(SpeedMode::Timed)
    };
    let report = calc.sprayer(&timed).expect("Calibration failed");
    print_sprayer_report(&report);
    print_volume_gauge(report.result.volume_per_ha);

    // A zero-second run cannot produce a speed
    let broken = SprayerSetup {
        speed: SpeedInput::Timed {
            distance_m: 50.0,
            elapsed_s: 0.0,
        },
        ..timed
    };
    match calc.sprayer(&broken) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("\nRejected: {e}"),
    }
}
