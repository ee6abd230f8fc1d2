//! Response envelope of `analyzeCorrelation`.

use crate::error::SdkError;
use kronos_domain::CorrelationResult;
use serde::{Deserialize, Serialize};

/// `{ success, data, error }` wrapper returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Whether the analysis ran
    pub success: bool,

    /// Per-number results; absent on failure
    #[serde(default)]
    pub data: Option<Vec<CorrelationResult>>,

    /// Failure message
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalyzeResponse {
    /// Unwrap the envelope
    ///
    /// A successful envelope without `data` yields an empty list.
    pub fn into_result(self) -> Result<Vec<CorrelationResult>, SdkError> {
        if self.success {
            Ok(self.data.unwrap_or_default())
        } else {
            Err(SdkError::BackendError(
                self.error.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }

    /// Parse either an envelope or a bare result array
    pub fn parse_results(json: &str) -> Result<Vec<CorrelationResult>, SdkError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_array() {
            Ok(serde_json::from_value(value)?)
        } else {
            serde_json::from_value::<AnalyzeResponse>(value)?.into_result()
        }
    }
}
