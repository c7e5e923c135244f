//! Liming example: base saturation, lime rate and fertilization guidance
//! for a single soil analysis.
//!
//! Run from the project root:
//!   cargo run --example liming_report

use agronomic_calculator::{
    visualization::{
        print_fertilization_table, print_liming_recommendation, print_saturation_gauge,
        print_soil_summary,
    },
    Calculator, LimingTarget, SoilAnalysis,
};

fn main() {
    let calc = Calculator::default();
    let analysis = SoilAnalysis::new(0.2, 2.0, 1.0, 3.0)
        .with_phosphorus(12.0)
        .with_sample_id("North terrace");

    let report = calc
        .liming(&analysis, &calc.default_target())
        .expect("Liming calculation failed");

    print_soil_summary(&report);
    print_saturation_gauge(&report.state, report.target.target_saturation);
    print_liming_recommendation(&report);
    print_fertilization_table(&report.fertilization);

    // Same soil, different materials
    println!("\nLime rate by PRNT:");
    for prnt in [60.0, 80.0, 100.0] {
        let r = calc
            .liming(&analysis, &LimingTarget::new(70.0, prnt))
            .expect("Liming calculation failed");
        println!("  {}", r.recommendation);
    }
}
