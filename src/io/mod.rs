mod csv_io;
mod json_io;

use std::path::Path;

use crate::calc::BatchEntry;
use crate::error::AgroError;
use crate::models::SoilAnalysis;

pub use csv_io::{read_csv, read_csv_from_bytes, write_csv, write_samples_csv};
pub use json_io::{read_json, read_json_from_bytes, write_json};

/// Trait for reading soil samples from a file.
pub trait SampleReader {
    fn read(&self, path: &Path) -> Result<Vec<SoilAnalysis>, AgroError>;
}

/// Trait for writing batch results to a file.
pub trait ReportWriter {
    fn write(&self, entries: &[BatchEntry], path: &Path) -> Result<(), AgroError>;
}

/// CSV format reader/writer.
pub struct CsvFormat;

impl SampleReader for CsvFormat {
    fn read(&self, path: &Path) -> Result<Vec<SoilAnalysis>, AgroError> {
        read_csv(path)
    }
}

impl ReportWriter for CsvFormat {
    fn write(&self, entries: &[BatchEntry], path: &Path) -> Result<(), AgroError> {
        write_csv(entries, path)
    }
}

/// JSON format reader/writer.
#[derive(Default)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl SampleReader for JsonFormat {
    fn read(&self, path: &Path) -> Result<Vec<SoilAnalysis>, AgroError> {
        read_json(path)
    }
}

impl ReportWriter for JsonFormat {
    fn write(&self, entries: &[BatchEntry], path: &Path) -> Result<(), AgroError> {
        write_json(entries, path, self.pretty)
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Pick a reader from the file extension.
pub fn reader_for(path: &Path) -> Result<Box<dyn SampleReader>, AgroError> {
    match extension(path).as_str() {
        "csv" => Ok(Box::new(CsvFormat)),
        "json" => Ok(Box::new(JsonFormat::default())),
        ext => Err(AgroError::ParseError(format!(
            "Unsupported input format: .{ext}. Use .csv or .json"
        ))),
    }
}

/// Pick a writer from the file extension.
pub fn writer_for(path: &Path, pretty: bool) -> Result<Box<dyn ReportWriter>, AgroError> {
    match extension(path).as_str() {
        "csv" => Ok(Box::new(CsvFormat)),
        "json" => Ok(Box::new(JsonFormat { pretty })),
        ext => Err(AgroError::ParseError(format!(
            "Unsupported output format: .{ext}. Use .csv or .json"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::Calculator;
    use crate::models::LimingTarget;

    fn samples() -> Vec<SoilAnalysis> {
        vec![
            SoilAnalysis::new(0.2, 2.0, 1.0, 3.0)
                .with_phosphorus(12.0)
                .with_sample_id("North"),
            SoilAnalysis::new(0.5, 4.0, 2.0, 1.0)
                .with_phosphorus(25.0)
                .with_sample_id("South"),
        ]
    }

    #[test]
    fn test_reader_for_extension() {
        assert!(reader_for(Path::new("lab.csv")).is_ok());
        assert!(reader_for(Path::new("lab.JSON")).is_ok());
        let err = reader_for(Path::new("lab.xlsx")).err().unwrap();
        assert!(err.to_string().contains("Unsupported input format: .xlsx"));
    }

    #[test]
    fn test_writer_for_extension() {
        assert!(writer_for(Path::new("out.csv"), false).is_ok());
        assert!(writer_for(Path::new("out.json"), true).is_ok());
        assert!(writer_for(Path::new("out"), false).is_err());
    }

    #[test]
    fn test_json_trait_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.json");
        std::fs::write(&path, serde_json::to_string(&samples()).unwrap()).unwrap();

        let reader: &dyn SampleReader = &JsonFormat::default();
        assert_eq!(reader.read(&path).unwrap(), samples());
    }

    #[test]
    fn test_csv_trait_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        write_samples_csv(&samples(), &path).unwrap();

        let reader = reader_for(&path).unwrap();
        assert_eq!(reader.read(&path).unwrap(), samples());
    }

    #[test]
    fn test_trait_write_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let entries = Calculator::default().batch(&samples(), &LimingTarget::default());

        for name in ["results.csv", "results.json"] {
            let path = dir.path().join(name);
            let writer = writer_for(&path, true).unwrap();
            writer.write(&entries, &path).unwrap();
            let content = std::fs::read_to_string(&path).unwrap();
            assert!(content.contains("North"));
            assert!(content.contains("South"));
        }
    }
}
