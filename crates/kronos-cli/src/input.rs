//! Input file loading.

use crate::error::{CliError, Result};
use kronos_domain::{CorrelationResult, Interaction};
use kronos_sdk::AnalyzeResponse;
use std::fs;
use std::path::Path;

/// Read interaction records from a JSON array file.
pub fn load_interactions(path: &Path) -> Result<Vec<Interaction>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e)))?;
    let interactions: Vec<Interaction> = serde_json::from_str(&contents)?;
    tracing::debug!(path = %path.display(), records = interactions.len(), "Loaded interactions");
    Ok(interactions)
}

/// Read correlation results from a JSON file holding an envelope or a bare array.
pub fn load_results(path: &Path) -> Result<Vec<CorrelationResult>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e)))?;
    let results = AnalyzeResponse::parse_results(&contents)?;
    tracing::debug!(path = %path.display(), results = results.len(), "Loaded correlation results");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_interactions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(
            &path,
            r#"[
                {"sourceNumber": "3001234567", "targetNumber": "3009876543",
                 "timestamp": "2024-03-01T10:00:00Z", "operator": "Claro",
                 "startCellId": "51203", "interactionType": "call"},
                {"sourceNumber": "3007777777", "targetNumber": null,
                 "timestamp": "2024-03-01T10:05:00Z", "operator": "Movistar",
                 "interactionType": "data", "durationSeconds": 120}
            ]"#,
        )
        .unwrap();

        let records = load_interactions(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].start_cell_id.as_deref(), Some("51203"));
        assert!(records[1].secondary_party().is_none());
    }

    #[test]
    fn test_load_results_envelope() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.json");
        fs::write(
            &path,
            r#"{"success": true, "data": [{"targetNumber": "3001234567", "occurrences": 3, "confidence": 0.9}]}"#,
        )
        .unwrap();

        let results = load_results(&path).unwrap();
        assert_eq!(results[0].target_number, "3001234567");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_interactions(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
