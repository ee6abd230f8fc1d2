//! Correlation result module - the backend's per-number output

use crate::cell::{CellId, CellIdNormalizationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One number's correlation record as returned by `analyzeCorrelation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResult {
    /// Number the record describes
    pub target_number: String,

    /// Operator attributed to the number
    #[serde(default)]
    pub operator: String,

    /// How many times the number was observed in the analyzed period
    pub occurrences: u32,

    /// Cells the number was observed at, as reported
    #[serde(default, deserialize_with = "deserialize_cells")]
    pub related_cells: Vec<String>,

    /// Backend confidence in [0, 1]
    pub confidence: f64,

    /// First observation
    #[serde(default)]
    pub first_detection: Option<DateTime<Utc>>,

    /// Last observation
    #[serde(default)]
    pub last_detection: Option<DateTime<Utc>>,
}

impl CorrelationResult {
    /// Create a record without detection timestamps
    pub fn new(
        target_number: impl Into<String>,
        operator: impl Into<String>,
        occurrences: u32,
        related_cells: Vec<String>,
        confidence: f64,
    ) -> Self {
        Self {
            target_number: target_number.into(),
            operator: operator.into(),
            occurrences,
            related_cells,
            confidence,
            first_detection: None,
            last_detection: None,
        }
    }

    /// Canonicalize every related cell
    ///
    /// Fails on the first malformed id.
    pub fn canonical_cells(&self, strip_leading_zeros: bool) -> Result<Vec<CellId>, CellIdNormalizationError> {
        self.related_cells
            .iter()
            .map(|raw| CellId::parse(raw, strip_leading_zeros))
            .collect()
    }

    /// Check that confidence is a number in [0, 1]
    pub fn validate_confidence(&self) -> Result<(), CellIdNormalizationError> {
        if self.confidence.is_nan() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(CellIdNormalizationError::InvalidConfidence(self.confidence));
        }
        Ok(())
    }
}

/// Accept cells as JSON strings or numbers
fn deserialize_cells<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCell {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    let raw: Option<Vec<RawCell>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|cell| match cell {
            RawCell::Text(s) => s,
            RawCell::Unsigned(n) => n.to_string(),
            RawCell::Signed(n) => n.to_string(),
        })
        .collect())
}
