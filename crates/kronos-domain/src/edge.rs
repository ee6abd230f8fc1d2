//! Edge module - directed links between participants
//!
//! Direction always encodes who initiated toward whom. A reciprocal pair of
//! interactions is two edges, never one undirected edge.

use crate::InteractionType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Interaction kind carried by an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Built from calls only
    Call,

    /// Built from data sessions only
    Data,

    /// Aggregated from both calls and data sessions
    Mixed,
}

impl EdgeKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Call => "call",
            EdgeKind::Data => "data",
            EdgeKind::Mixed => "mixed",
        }
    }

    /// Combine two kinds during aggregation
    pub fn combine(self, other: EdgeKind) -> EdgeKind {
        if self == other {
            self
        } else {
            EdgeKind::Mixed
        }
    }

    /// Whether this kind passes an interaction type selection
    ///
    /// A mixed edge matches when either of its constituent types is selected.
    pub fn matches(&self, selected: &BTreeSet<InteractionType>) -> bool {
        match self {
            EdgeKind::Call => selected.contains(&InteractionType::Call),
            EdgeKind::Data => selected.contains(&InteractionType::Data),
            EdgeKind::Mixed => !selected.is_empty(),
        }
    }
}

impl From<InteractionType> for EdgeKind {
    fn from(kind: InteractionType) -> Self {
        match kind {
            InteractionType::Call => EdgeKind::Call,
            InteractionType::Data => EdgeKind::Data,
        }
    }
}

/// A directed edge between two participant numbers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEdge {
    /// Stable identifier, unique within one derived graph
    pub id: String,

    /// Initiating number
    pub source: String,

    /// Receiving number
    pub target: String,

    /// Cells the interaction was observed at, start first
    pub shared_cell_ids: Vec<String>,

    /// Always true; edges are never collapsed into undirected links
    pub is_directional: bool,

    /// Interaction kind
    pub interaction_type: EdgeKind,

    /// Number of interactions folded into this edge
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl InteractionEdge {
    /// Create a new single-interaction edge
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        shared_cell_ids: Vec<String>,
        interaction_type: EdgeKind,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            shared_cell_ids,
            is_directional: true,
            interaction_type,
            weight: 1,
        }
    }

    /// Whether this edge touches the given number
    pub fn touches(&self, number: &str) -> bool {
        self.source == number || self.target == number
    }

    /// Whether this edge runs opposite to another one over the same pair
    pub fn is_reciprocal_of(&self, other: &InteractionEdge) -> bool {
        self.source == other.target && self.target == other.source
    }
}
