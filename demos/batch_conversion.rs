//! Batch example: read lab results from CSV, compute liming for every
//! sample and export the results as JSON and CSV.
//!
//! Run from the project root:
//!   cargo run --example batch_conversion

use std::path::Path;

use agronomic_calculator::{
    io::{CsvFormat, JsonFormat, ReportWriter, SampleReader},
    visualization::print_batch_table,
    Calculator,
};

fn main() {
    let input = Path::new("data/samples/soil_samples.csv");
    let samples = CsvFormat.read(input).expect("Failed to read CSV file");
    println!("Loaded {} samples from {}", samples.len(), input.display());

    let calc = Calculator::default();
    let entries = calc.batch(&samples, &calc.default_target());
    print_batch_table(&entries);

    let json_path = Path::new("batch_results.json");
    JsonFormat { pretty: true }
        .write(&entries, json_path)
        .expect("Failed to write JSON");
    println!("Wrote {}", json_path.display());

    let csv_path = Path::new("batch_results.csv");
    CsvFormat
        .write(&entries, csv_path)
        .expect("Failed to write CSV");
    println!("Wrote {}", csv_path.display());

    let _ = std::fs::remove_file(json_path);
    let _ = std::fs::remove_file(csv_path);
    println!("Cleaned up output files");
}
