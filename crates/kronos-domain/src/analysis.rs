//! Analysis module - identity of a derivation run and the backend request shape

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for one analysis run, based on UUIDv7
///
/// UUIDv7 gives chronological ordering, which lets a session decide which of
/// two runs was requested last without a shared counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(uuid::Uuid);

impl AnalysisId {
    /// Generate a new UUIDv7-based AnalysisId
    ///
    /// # Examples
    ///
    /// ```
    /// use kronos_domain::AnalysisId;
    ///
    /// let a = AnalysisId::new();
    /// let b = AnalysisId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters of a backend `analyzeCorrelation` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Mission whose records are analyzed
    pub mission_id: String,

    /// Inclusive start of the analyzed period
    pub date_range_start: DateTime<Utc>,

    /// Inclusive end of the analyzed period
    pub date_range_end: DateTime<Utc>,

    /// Minimum number of matches the backend requires per result
    pub min_matches: u32,
}

impl AnalysisRequest {
    /// Create a new request
    pub fn new(
        mission_id: impl Into<String>,
        date_range_start: DateTime<Utc>,
        date_range_end: DateTime<Utc>,
        min_matches: u32,
    ) -> Self {
        Self {
            mission_id: mission_id.into(),
            date_range_start,
            date_range_end,
            min_matches,
        }
    }

    /// Check the request before it leaves the process
    pub fn validate(&self) -> Result<(), String> {
        if self.mission_id.trim().is_empty() {
            return Err("Mission id cannot be empty".to_string());
        }
        if self.date_range_start > self.date_range_end {
            return Err(format!(
                "Date range start {} is after end {}",
                self.date_range_start, self.date_range_end
            ));
        }
        if self.min_matches == 0 {
            return Err("Minimum matches must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_analysis_id_chronological() {
        let id1 = AnalysisId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = AnalysisId::new();
        assert!(id1 < id2, "Earlier UUIDv7 should sort first");
    }

    #[test]
    fn test_analysis_id_display() {
        let id = AnalysisId::new();
        let text = id.to_string();
        assert_eq!(text.len(), 36);
        assert_eq!(text.matches('-').count(), 4);
    }

    #[test]
    fn test_request_validation() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();

        assert!(AnalysisRequest::new("m-1", start, end, 1).validate().is_ok());
        assert!(AnalysisRequest::new("  ", start, end, 1).validate().is_err());
        assert!(AnalysisRequest::new("m-1", end, start, 1).validate().is_err());
        assert!(AnalysisRequest::new("m-1", start, end, 0).validate().is_err());
    }

    #[test]
    fn test_request_wire_names() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let json = serde_json::to_value(AnalysisRequest::new("m-1", start, start, 3)).unwrap();
        assert_eq!(json["missionId"], "m-1");
        assert_eq!(json["minMatches"], 3);
        assert!(json.get("dateRangeStart").is_some());
    }
}
