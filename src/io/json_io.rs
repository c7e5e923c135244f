use std::path::Path;

use crate::calc::BatchEntry;
use crate::error::AgroError;
use crate::models::SoilAnalysis;

fn validate_samples(samples: Vec<SoilAnalysis>) -> Result<Vec<SoilAnalysis>, AgroError> {
    if samples.is_empty() {
        return Err(AgroError::InsufficientData(
            "no soil samples found in JSON input".to_string(),
        ));
    }
    for (i, sample) in samples.iter().enumerate() {
        sample.validate().map_err(|e| match e {
            AgroError::ValidationError(msg) => {
                AgroError::ValidationError(format!("item {}: {msg}", i + 1))
            }
            other => other,
        })?;
    }
    Ok(samples)
}

/// Read soil samples (a JSON array) from a file.
pub fn read_json(path: impl AsRef<Path>) -> Result<Vec<SoilAnalysis>, AgroError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let samples: Vec<SoilAnalysis> = serde_json::from_str(&content)?;
    validate_samples(samples)
}

/// Read soil samples from JSON bytes.
pub fn read_json_from_bytes(data: &[u8]) -> Result<Vec<SoilAnalysis>, AgroError> {
    let content = std::str::from_utf8(data)
        .map_err(|e| AgroError::ParseError(format!("Invalid UTF-8: {e}")))?;
    let samples: Vec<SoilAnalysis> = serde_json::from_str(content)?;
    validate_samples(samples)
}

/// Write batch results to a JSON file.
pub fn write_json(
    entries: &[BatchEntry],
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), AgroError> {
    let content = if pretty {
        serde_json::to_string_pretty(entries)?
    } else {
        serde_json::to_string(entries)?
    };
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}
