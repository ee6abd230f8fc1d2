//! Pipeline orchestration: ingest → classify → build edges → (merge)

use crate::classify::{classify, InteractionOperatorIndex};
use crate::config::PipelineConfig;
use crate::edges;
use crate::ingest::ingest;
use crate::related::{RelatedSet, RelatedSetFilter};
use crate::view::{self, GraphView, ViewFilterState};
use crate::{PipelineError, PipelineWarning};
use kronos_domain::{AnalysisId, CorrelationResult, Interaction, InteractionEdge, ParticipantNode};
use serde::{Deserialize, Serialize};

/// Immutable node/edge graph for one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedGraph {
    /// Run that produced this graph
    pub analysis_id: AnalysisId,

    /// Analyzed number
    pub target: String,

    /// Participants, sorted by id
    pub nodes: Vec<ParticipantNode>,

    /// Directed edges
    pub edges: Vec<InteractionEdge>,

    /// Data-quality signals raised during derivation
    pub warnings: Vec<PipelineWarning>,
}

impl DerivedGraph {
    /// The target's node
    pub fn target_node(&self) -> Option<&ParticipantNode> {
        self.nodes.iter().find(|n| n.is_target)
    }

    /// Look up a node by number
    pub fn node(&self, number: &str) -> Option<&ParticipantNode> {
        self.nodes.iter().find(|n| n.id == number)
    }

    /// Distinct operators among the nodes, sorted
    pub fn operators(&self) -> Vec<String> {
        let mut operators: Vec<String> = self.nodes.iter().map(|n| n.operator.clone()).collect();
        operators.sort();
        operators.dedup();
        operators
    }

    /// One-paragraph summary for logs and terminals
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Analysis {}", self.analysis_id),
            format!("Target: {}", self.target),
            format!("Nodes: {}", self.nodes.len()),
            format!("Edges: {}", self.edges.len()),
        ];
        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warning in &self.warnings {
                lines.push(format!("  {}", warning));
            }
        }
        lines.join("\n")
    }
}

/// Runs the derivation and filter stages with one configuration
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use kronos_domain::Interaction;
/// use kronos_graph::{CorrelationPipeline, PipelineConfig, ViewFilterState};
///
/// let ts = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
/// let records = vec![Interaction::call("3001234567", "3009876543", ts, "Claro")];
///
/// let pipeline = CorrelationPipeline::new(PipelineConfig::default()).unwrap();
/// let graph = pipeline.derive(&records, "3001234567").unwrap();
/// let view = pipeline.view(&graph, &ViewFilterState::default());
/// assert_eq!(view.stats.visible_nodes, 2);
/// ```
#[derive(Debug, Clone)]
pub struct CorrelationPipeline {
    config: PipelineConfig,
    related: RelatedSetFilter,
}

impl CorrelationPipeline {
    /// Create a pipeline after validating the configuration
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            related: RelatedSetFilter::new(config.related.clone()),
            config,
        })
    }

    /// Create a pipeline with default configuration
    pub fn default_config() -> Self {
        let config = PipelineConfig::default();
        Self {
            related: RelatedSetFilter::new(config.related.clone()),
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Derive the node/edge graph for a target
    ///
    /// # Errors
    ///
    /// - [`PipelineError::EmptyDataset`] when `interactions` is empty
    /// - [`PipelineError::InvalidInteraction`] for unusable records
    /// - [`PipelineError::TargetNotFound`] when the target never appears and
    ///   `strict_target` is set; otherwise the run continues with a warning
    pub fn derive(&self, interactions: &[Interaction], target: &str) -> Result<DerivedGraph, PipelineError> {
        self.derive_as(AnalysisId::new(), interactions, target)
    }

    /// Derive under an id issued elsewhere, e.g. by
    /// [`AnalysisSession::begin`](crate::AnalysisSession::begin)
    pub fn derive_as(
        &self,
        analysis_id: AnalysisId,
        interactions: &[Interaction],
        target: &str,
    ) -> Result<DerivedGraph, PipelineError> {
        let target = target.trim();
        let ingested = ingest(interactions, target)?;

        let mut warnings = Vec::new();
        if !ingested.target_observed(target) {
            if self.config.strict_target {
                return Err(PipelineError::TargetNotFound(target.to_string()));
            }
            tracing::warn!(target_number = target, "Target number not observed in any interaction");
            warnings.push(PipelineWarning::TargetNotFound {
                target: target.to_string(),
            });
        }

        let operators = InteractionOperatorIndex::from_interactions(interactions);
        let nodes = classify(
            &ingested.frequency,
            target,
            &operators,
            &ingested.direct_contacts,
            &self.config.tiers,
        );

        let mut edges = edges::build(&ingested.edge_source_interactions);
        if self.config.merge_parallel_edges {
            edges = edges::merge_parallel(&edges);
        }

        let graph = DerivedGraph {
            analysis_id,
            target: target.to_string(),
            nodes,
            edges,
            warnings,
        };

        tracing::info!(
            analysis_id = %graph.analysis_id,
            target_number = target,
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "Derived correlation graph"
        );

        Ok(graph)
    }

    /// Expand a target's correlation record into its related network
    pub fn expand_related(&self, target: &CorrelationResult, candidates: &[CorrelationResult]) -> RelatedSet {
        self.related.expand(target, candidates)
    }

    /// Apply view filters to a derived graph
    pub fn view(&self, graph: &DerivedGraph, filters: &ViewFilterState) -> GraphView {
        view::apply(&graph.nodes, &graph.edges, filters)
    }
}
