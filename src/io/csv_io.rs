use std::io::Read;
use std::path::Path;

use crate::calc::{BatchEntry, NutrientLevel};
use crate::error::AgroError;
use crate::models::SoilAnalysis;

/// CSV row structure for soil samples.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct SoilRow {
    #[serde(default)]
    sample_id: Option<String>,
    potassium: f64,
    calcium: f64,
    magnesium: f64,
    acidity: f64,
    #[serde(default)]
    phosphorus: Option<f64>,
}

/// Flat CSV row for batch results.
#[derive(Debug, serde::Serialize)]
struct BatchRow<'a> {
    sample_id: &'a str,
    potassium: Option<f64>,
    calcium: Option<f64>,
    magnesium: Option<f64>,
    acidity: Option<f64>,
    phosphorus: Option<f64>,
    base_sum: Option<f64>,
    cec: Option<f64>,
    current_saturation: Option<f64>,
    target_saturation: Option<f64>,
    prnt: Option<f64>,
    lime_t_ha: Option<f64>,
    phosphorus_level: Option<NutrientLevel>,
    potassium_level: Option<NutrientLevel>,
    error: Option<&'a str>,
}

impl<'a> BatchRow<'a> {
    fn from_entry(entry: &'a BatchEntry) -> Self {
        let report = entry.report.as_ref();
        Self {
            sample_id: &entry.sample_id,
            potassium: report.map(|r| r.analysis.potassium),
            calcium: report.map(|r| r.analysis.calcium),
            magnesium: report.map(|r| r.analysis.magnesium),
            acidity: report.map(|r| r.analysis.acidity),
            phosphorus: report.and_then(|r| r.analysis.phosphorus),
            base_sum: report.map(|r| r.state.base_sum),
            cec: report.map(|r| r.state.cec),
            current_saturation: report.map(|r| r.state.current_saturation),
            target_saturation: report.map(|r| r.target.target_saturation),
            prnt: report.map(|r| r.target.prnt),
            lime_t_ha: report.map(|r| r.recommendation.needed_tons_per_ha),
            phosphorus_level: report.and_then(|r| r.fertilization.phosphorus),
            potassium_level: report.map(|r| r.fertilization.potassium),
            error: entry.error.as_deref(),
        }
    }
}

/// Prefix a validation message with the 1-based data row number.
fn at_row(row: usize, err: AgroError) -> AgroError {
    match err {
        AgroError::ValidationError(msg) => AgroError::ValidationError(format!("row {row}: {msg}")),
        other => other,
    }
}

fn parse_csv_records<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> Result<Vec<SoilAnalysis>, AgroError> {
    let mut samples = Vec::new();

    for (i, result) in rdr.deserialize().enumerate() {
        let row: SoilRow = result?;
        let analysis = SoilAnalysis {
            sample_id: row.sample_id.filter(|id| !id.is_empty()),
            potassium: row.potassium,
            calcium: row.calcium,
            magnesium: row.magnesium,
            acidity: row.acidity,
            phosphorus: row.phosphorus,
        };
        analysis.validate().map_err(|e| at_row(i + 1, e))?;
        samples.push(analysis);
    }

    if samples.is_empty() {
        return Err(AgroError::InsufficientData(
            "no soil samples found in CSV input".to_string(),
        ));
    }
    tracing::debug!(count = samples.len(), "parsed soil samples from CSV");
    Ok(samples)
}

/// Read soil samples from a CSV file.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<SoilAnalysis>, AgroError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;

    parse_csv_records(&mut rdr)
}

/// Read soil samples from CSV bytes.
pub fn read_csv_from_bytes(data: &[u8]) -> Result<Vec<SoilAnalysis>, AgroError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    parse_csv_records(&mut rdr)
}

/// Write soil samples to a CSV file in the layout `read_csv` accepts.
pub fn write_samples_csv(
    samples: &[SoilAnalysis],
    path: impl AsRef<Path>,
) -> Result<(), AgroError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for s in samples {
        wtr.serialize(SoilRow {
            sample_id: s.sample_id.clone(),
            potassium: s.potassium,
            calcium: s.calcium,
            magnesium: s.magnesium,
            acidity: s.acidity,
            phosphorus: s.phosphorus,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write batch results to a CSV file, one row per sample.
pub fn write_csv(entries: &[BatchEntry], path: impl AsRef<Path>) -> Result<(), AgroError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for entry in entries {
        wtr.serialize(BatchRow::from_entry(entry))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::Calculator;
    use crate::models::LimingTarget;

    const HEADER: &str = "sample_id,potassium,calcium,magnesium,acidity,phosphorus";

    #[test]
    fn test_read_csv_from_bytes() {
        let data = format!("{HEADER}\nA,0.2,2.0,1.0,3.0,12\nB,0.5,4.0,2.0,1.0,25\n");
        let samples = read_csv_from_bytes(data.as_bytes()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].sample_id.as_deref(), Some("A"));
        assert_eq!(samples[1].phosphorus, Some(25.0));
    }

    #[test]
    fn test_optional_columns_missing() {
        let data = "potassium,calcium,magnesium,acidity\n0.2,2.0,1.0,3.0\n";
        let samples = read_csv_from_bytes(data.as_bytes()).unwrap();
        assert_eq!(samples.len(), 1);
        assert!(samples[0].sample_id.is_none());
        assert_eq!(samples[0].phosphorus, None);
    }

    #[test]
    fn test_empty_optional_fields() {
        let data = format!("{HEADER}\n,0.2,2.0,1.0,3.0,\n");
        let samples = read_csv_from_bytes(data.as_bytes()).unwrap();
        assert!(samples[0].sample_id.is_none());
        assert_eq!(samples[0].phosphorus, None);
    }

    #[test]
    fn test_whitespace_trimmed() {
        let data = format!("{HEADER}\n  A , 0.2 , 2.0 ,1.0, 3.0 , 7 \n");
        let samples = read_csv_from_bytes(data.as_bytes()).unwrap();
        assert_eq!(samples[0].sample_id.as_deref(), Some("A"));
        assert_eq!(samples[0].phosphorus, Some(7.0));
    }

    #[test]
    fn test_negative_value_names_row() {
        let data = format!("{HEADER}\nA,0.2,2.0,1.0,3.0,12\nB,0.5,-4.0,2.0,1.0,25\n");
        let err = read_csv_from_bytes(data.as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 2"));
        assert!(msg.contains("calcium"));
    }

    #[test]
    fn test_non_numeric_value() {
        let data = format!("{HEADER}\nA,abc,2.0,1.0,3.0,12\n");
        let err = read_csv_from_bytes(data.as_bytes()).unwrap_err();
        assert!(matches!(err, AgroError::Csv(_)));
    }

    #[test]
    fn test_header_only_is_insufficient() {
        let err = read_csv_from_bytes(format!("{HEADER}\n").as_bytes()).unwrap_err();
        assert!(matches!(err, AgroError::InsufficientData(_)));
    }

    #[test]
    fn test_samples_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        let samples = vec![
            SoilAnalysis::new(0.2, 2.0, 1.0, 3.0)
                .with_phosphorus(12.0)
                .with_sample_id("North"),
            SoilAnalysis::new(0.5, 4.0, 2.0, 1.0),
        ];
        write_samples_csv(&samples, &path).unwrap();
        let loaded = read_csv(&path).unwrap();
        assert_eq!(loaded, samples);
    }

    #[test]
    fn test_write_batch_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let samples = vec![
            SoilAnalysis::new(0.2, 2.0, 1.0, 3.0).with_sample_id("A"),
            SoilAnalysis::new(-1.0, 2.0, 1.0, 3.0).with_sample_id("B"),
        ];
        let entries = Calculator::default().batch(&samples, &LimingTarget::default());
        write_csv(&entries, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("sample_id,potassium"));
        assert!(header.ends_with("error"));
        let first = lines.next().unwrap();
        assert!(first.starts_with("A,0.2,"));
        assert!(first.contains("medium"));
        let second = lines.next().unwrap();
        assert!(second.starts_with("B,,"));
        assert!(second.contains("Validation error"));
    }
}
