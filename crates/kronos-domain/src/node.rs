//! Participant node module

use crate::CorrelationTier;
use serde::{Deserialize, Serialize};

/// Operator label for numbers no record attributes to an operator
pub const UNKNOWN_OPERATOR: &str = "Desconocido";

/// A phone number seen during an analysis
///
/// Created once per analysis pass and never mutated; a new analysis
/// re-derives every node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantNode {
    /// Phone number
    pub id: String,

    /// Operator attributed to this number
    pub operator: String,

    /// Number of interactions this number appears in
    pub interaction_count: u32,

    /// Correlation tier relative to the target
    pub correlation_tier: CorrelationTier,

    /// Whether this node is the analyzed number
    pub is_target: bool,
}

impl ParticipantNode {
    /// Create a new node
    pub fn new(
        id: impl Into<String>,
        operator: impl Into<String>,
        interaction_count: u32,
        correlation_tier: CorrelationTier,
    ) -> Self {
        Self {
            id: id.into(),
            operator: operator.into(),
            interaction_count,
            is_target: correlation_tier == CorrelationTier::Target,
            correlation_tier,
        }
    }
}
