//! View filtering
//!
//! Filter state is an immutable value. Every transition returns a new state,
//! and [`apply`] re-evaluates it against the derived graph without touching
//! the graph itself.

use crate::PipelineError;
use kronos_domain::{CorrelationTier, InteractionEdge, InteractionType, ParticipantNode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// User-selected visibility filters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewFilterState {
    correlation_levels: BTreeSet<CorrelationTier>,
    operators: BTreeSet<String>,
    interaction_types: BTreeSet<InteractionType>,
    min_interactions: u32,
    show_labels: bool,
    show_directions: bool,
}

impl Default for ViewFilterState {
    /// Everything visible: all tiers, all operators, both types, min 1
    fn default() -> Self {
        Self {
            correlation_levels: CorrelationTier::all().into_iter().collect(),
            operators: BTreeSet::new(),
            interaction_types: InteractionType::all().into_iter().collect(),
            min_interactions: 1,
            show_labels: true,
            show_directions: true,
        }
    }
}

impl ViewFilterState {
    /// Selected tiers
    pub fn correlation_levels(&self) -> &BTreeSet<CorrelationTier> {
        &self.correlation_levels
    }

    /// Selected operators; empty means all
    pub fn operators(&self) -> &BTreeSet<String> {
        &self.operators
    }

    /// Selected interaction types
    pub fn interaction_types(&self) -> &BTreeSet<InteractionType> {
        &self.interaction_types
    }

    /// Minimum interaction count
    pub fn min_interactions(&self) -> u32 {
        self.min_interactions
    }

    /// Whether node labels are shown
    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    /// Whether edge arrows are shown
    pub fn show_directions(&self) -> bool {
        self.show_directions
    }

    /// Replace the tier selection
    pub fn with_levels(&self, levels: impl IntoIterator<Item = CorrelationTier>) -> Self {
        Self {
            correlation_levels: levels.into_iter().collect(),
            ..self.clone()
        }
    }

    /// Add or remove one tier
    pub fn toggle_level(&self, tier: CorrelationTier) -> Self {
        let mut next = self.clone();
        if !next.correlation_levels.remove(&tier) {
            next.correlation_levels.insert(tier);
        }
        next
    }

    /// Replace the operator selection; empty means all
    pub fn with_operators<S: Into<String>>(&self, operators: impl IntoIterator<Item = S>) -> Self {
        Self {
            operators: operators.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    /// Add or remove one operator
    pub fn toggle_operator(&self, operator: &str) -> Self {
        let mut next = self.clone();
        if !next.operators.remove(operator) {
            next.operators.insert(operator.to_string());
        }
        next
    }

    /// Replace the interaction type selection
    pub fn with_interaction_types(&self, types: impl IntoIterator<Item = InteractionType>) -> Self {
        Self {
            interaction_types: types.into_iter().collect(),
            ..self.clone()
        }
    }

    /// Add or remove one interaction type
    pub fn toggle_interaction_type(&self, kind: InteractionType) -> Self {
        let mut next = self.clone();
        if !next.interaction_types.remove(&kind) {
            next.interaction_types.insert(kind);
        }
        next
    }

    /// Set the minimum interaction count
    ///
    /// # Errors
    /// Returns [`PipelineError::InvalidFilter`] for 0
    pub fn with_min_interactions(&self, min: u32) -> Result<Self, PipelineError> {
        if min == 0 {
            return Err(PipelineError::InvalidFilter(
                "Minimum interactions must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            min_interactions: min,
            ..self.clone()
        })
    }

    /// Show or hide labels
    pub fn with_labels(&self, show: bool) -> Self {
        Self {
            show_labels: show,
            ..self.clone()
        }
    }

    /// Show or hide edge directions
    pub fn with_directions(&self, show: bool) -> Self {
        Self {
            show_directions: show,
            ..self.clone()
        }
    }

    /// Check a state that came from outside (e.g. a reloaded export)
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.min_interactions == 0 {
            return Err(PipelineError::InvalidFilter(
                "Minimum interactions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a node passes every node-level filter
    pub fn admits_node(&self, node: &ParticipantNode) -> bool {
        self.correlation_levels.contains(&node.correlation_tier)
            && node.interaction_count >= self.min_interactions
            && (self.operators.is_empty() || self.operators.contains(&node.operator))
    }
}

/// Total and visible counts for "N of M" display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    /// Nodes before filtering
    pub total_nodes: usize,

    /// Nodes after filtering
    pub visible_nodes: usize,

    /// Edges before filtering
    pub total_edges: usize,

    /// Edges after filtering
    pub visible_edges: usize,

    /// Visible nodes per tier
    pub visible_by_tier: BTreeMap<CorrelationTier, usize>,
}

/// Filtered graph handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphView {
    /// Nodes passing the filters, in input order
    pub visible_nodes: Vec<ParticipantNode>,

    /// Edges whose endpoints are visible and whose kind is selected
    pub visible_edges: Vec<InteractionEdge>,

    /// Counts
    pub stats: GraphStats,
}

impl GraphView {
    /// Whether the filters hid every node
    pub fn is_empty(&self) -> bool {
        self.visible_nodes.is_empty()
    }
}

/// Apply filters to a derived graph
///
/// Pure: the same inputs always give the same output, and the inputs are not
/// modified. A view with no visible nodes is valid output.
pub fn apply(nodes: &[ParticipantNode], edges: &[InteractionEdge], filters: &ViewFilterState) -> GraphView {
    let visible_nodes: Vec<ParticipantNode> = nodes
        .iter()
        .filter(|node| filters.admits_node(node))
        .cloned()
        .collect();

    let visible_ids: HashSet<&str> = visible_nodes.iter().map(|n| n.id.as_str()).collect();

    let visible_edges: Vec<InteractionEdge> = edges
        .iter()
        .filter(|edge| {
            visible_ids.contains(edge.source.as_str())
                && visible_ids.contains(edge.target.as_str())
                && edge.interaction_type.matches(&filters.interaction_types)
        })
        .cloned()
        .collect();

    let mut visible_by_tier = BTreeMap::new();
    for node in &visible_nodes {
        *visible_by_tier.entry(node.correlation_tier).or_insert(0) += 1;
    }

    let stats = GraphStats {
        total_nodes: nodes.len(),
        visible_nodes: visible_nodes.len(),
        total_edges: edges.len(),
        visible_edges: visible_edges.len(),
        visible_by_tier,
    };

    GraphView {
        visible_nodes,
        visible_edges,
        stats,
    }
}

/// Undo/redo history of filter states
#[derive(Debug, Clone)]
pub struct FilterHistory {
    past: Vec<ViewFilterState>,
    current: ViewFilterState,
    future: Vec<ViewFilterState>,
    limit: usize,
}

impl FilterHistory {
    /// Start a history at the given state, keeping at most `limit` undo steps
    pub fn new(initial: ViewFilterState, limit: usize) -> Self {
        Self {
            past: Vec::new(),
            current: initial,
            future: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Current state
    pub fn current(&self) -> &ViewFilterState {
        &self.current
    }

    /// Move to a new state; clears the redo stack
    ///
    /// Pushing a state equal to the current one is a no-op.
    pub fn push(&mut self, next: ViewFilterState) {
        if next == self.current {
            return;
        }
        self.past.push(std::mem::replace(&mut self.current, next));
        if self.past.len() > self.limit {
            self.past.remove(0);
        }
        self.future.clear();
    }

    /// Step back; returns false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.past.pop() {
            Some(previous) => {
                self.future.push(std::mem::replace(&mut self.current, previous));
                true
            }
            None => false,
        }
    }

    /// Step forward; returns false when there is nothing to redo
    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(next) => {
                self.past.push(std::mem::replace(&mut self.current, next));
                true
            }
            None => false,
        }
    }
}
