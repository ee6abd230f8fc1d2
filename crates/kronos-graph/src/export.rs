//! Graph export
//!
//! An export carries the visible subgraph together with the filters that
//! produced it, so that reloading it yields the same view.

use crate::pipeline::DerivedGraph;
use crate::view::{self, GraphStats, GraphView, ViewFilterState};
use crate::{PipelineError, PipelineWarning};
use kronos_domain::{AnalysisId, InteractionEdge, ParticipantNode};
use serde::{Deserialize, Serialize};

/// Serialized snapshot of a filtered graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphExport {
    /// Run the graph came from
    pub analysis_id: AnalysisId,

    /// Analyzed number
    pub target: String,

    /// Filters active at export time
    pub filters: ViewFilterState,

    /// Visible nodes
    pub nodes: Vec<ParticipantNode>,

    /// Visible edges
    pub edges: Vec<InteractionEdge>,

    /// Counts at export time, totals included
    pub stats: GraphStats,

    /// Warnings raised while deriving the graph
    #[serde(default)]
    pub warnings: Vec<PipelineWarning>,
}

impl GraphExport {
    /// Snapshot a view of a derived graph
    pub fn from_view(graph: &DerivedGraph, filters: &ViewFilterState, view: &GraphView) -> Self {
        Self {
            analysis_id: graph.analysis_id,
            target: graph.target.clone(),
            filters: filters.clone(),
            nodes: view.visible_nodes.clone(),
            edges: view.visible_edges.clone(),
            stats: view.stats.clone(),
            warnings: graph.warnings.clone(),
        }
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String, PipelineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse an export and check its filter state
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        let export: Self = serde_json::from_str(json)?;
        export.filters.validate()?;
        Ok(export)
    }

    /// Rebuild the view the export was taken from
    ///
    /// The exported sets already passed `filters`, so re-applying them keeps
    /// every node and edge. Totals come from the stored stats since the
    /// hidden part of the graph is not exported.
    pub fn reload(&self) -> GraphView {
        let mut view = view::apply(&self.nodes, &self.edges, &self.filters);
        view.stats.total_nodes = self.stats.total_nodes;
        view.stats.total_edges = self.stats.total_edges;
        view
    }
}
