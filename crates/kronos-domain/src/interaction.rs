//! Interaction module - the input record of every analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Kind of recorded interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    /// Voice call between two parties
    Call,

    /// Data session; may have no secondary party
    Data,
}

impl InteractionType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionType::Call => "call",
            InteractionType::Data => "data",
        }
    }

    /// Parse an interaction type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "call" => Some(InteractionType::Call),
            "data" => Some(InteractionType::Data),
            _ => None,
        }
    }

    /// All interaction types
    pub fn all() -> [InteractionType; 2] {
        [InteractionType::Call, InteractionType::Data]
    }
}

impl std::str::FromStr for InteractionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid interaction type: {}", s))
    }
}

/// A single recorded call or data session
///
/// Supplied wholesale per analysis run and never mutated. A `Data` record may
/// carry no secondary party; such records still count toward the reporter's
/// frequency but never produce an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    /// Number that initiated the interaction
    pub source_number: String,

    /// Secondary party, if any
    #[serde(default)]
    pub target_number: Option<String>,

    /// When the interaction was recorded
    pub timestamp: DateTime<Utc>,

    /// Duration in seconds
    #[serde(default)]
    pub duration_seconds: u32,

    /// Operator that reported the record
    pub operator: String,

    /// Cell where the interaction started
    #[serde(default)]
    pub start_cell_id: Option<String>,

    /// Cell where the interaction ended
    #[serde(default)]
    pub end_cell_id: Option<String>,

    /// Call or data
    pub interaction_type: InteractionType,

    /// Field observation point label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hunter_point: Option<String>,

    /// Field observation latitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hunter_lat: Option<f64>,

    /// Field observation longitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hunter_lon: Option<f64>,
}

impl Interaction {
    /// Create a call between two numbers
    pub fn call(
        source: impl Into<String>,
        target: impl Into<String>,
        timestamp: DateTime<Utc>,
        operator: impl Into<String>,
    ) -> Self {
        Self {
            source_number: source.into(),
            target_number: Some(target.into()),
            timestamp,
            duration_seconds: 0,
            operator: operator.into(),
            start_cell_id: None,
            end_cell_id: None,
            interaction_type: InteractionType::Call,
            hunter_point: None,
            hunter_lat: None,
            hunter_lon: None,
        }
    }

    /// Create a data session, optionally with a secondary party
    pub fn data(
        source: impl Into<String>,
        target: Option<String>,
        timestamp: DateTime<Utc>,
        operator: impl Into<String>,
    ) -> Self {
        Self {
            target_number: target,
            interaction_type: InteractionType::Data,
            ..Self::call(source, String::new(), timestamp, operator)
        }
    }

    /// Attach start and end cells
    pub fn with_cells(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_cell_id = start.map(str::to_string);
        self.end_cell_id = end.map(str::to_string);
        self
    }

    /// The secondary party, treating empty or blank strings as absent
    pub fn secondary_party(&self) -> Option<&str> {
        self.target_number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    /// Total order over records, earliest first
    ///
    /// Compares every field, so sorting by it gives one sequence for any
    /// permutation of the same records.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.source_number.trim().cmp(other.source_number.trim()))
            .then_with(|| self.secondary_party().cmp(&other.secondary_party()))
            .then_with(|| self.start_cell_id.cmp(&other.start_cell_id))
            .then_with(|| self.end_cell_id.cmp(&other.end_cell_id))
            .then_with(|| self.duration_seconds.cmp(&other.duration_seconds))
            .then_with(|| self.interaction_type.cmp(&other.interaction_type))
            .then_with(|| self.operator.cmp(&other.operator))
            .then_with(|| self.source_number.cmp(&other.source_number))
            .then_with(|| self.target_number.cmp(&other.target_number))
            .then_with(|| self.hunter_point.cmp(&other.hunter_point))
            .then_with(|| cmp_coordinate(self.hunter_lat, other.hunter_lat))
            .then_with(|| cmp_coordinate(self.hunter_lon, other.hunter_lon))
    }
}

fn cmp_coordinate(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}
