//! Analysis session: keeps only the latest requested run
//!
//! When a new analysis is requested while an older one is still being
//! derived, the older result must be dropped rather than merged into what is
//! on screen.

use crate::pipeline::DerivedGraph;
use kronos_domain::AnalysisId;

/// Tracks the latest analysis request and its accepted graph
#[derive(Debug, Default)]
pub struct AnalysisSession {
    pending: Option<AnalysisId>,
    current: Option<DerivedGraph>,
    discarded: usize,
}

impl AnalysisSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new analysis request; earlier in-flight requests become stale
    pub fn begin(&mut self) -> AnalysisId {
        let id = AnalysisId::new();
        self.begin_with(id);
        id
    }

    /// Register a request under a caller-provided id
    pub fn begin_with(&mut self, id: AnalysisId) {
        if let Some(previous) = self.pending.replace(id) {
            tracing::debug!(%previous, next = %id, "Superseding in-flight analysis");
        }
    }

    /// Offer a finished graph
    ///
    /// The graph replaces the current one only if it belongs to the latest
    /// request. Returns whether it was accepted.
    pub fn complete(&mut self, graph: DerivedGraph) -> bool {
        if self.pending != Some(graph.analysis_id) {
            self.discarded += 1;
            tracing::info!(
                analysis_id = %graph.analysis_id,
                "Discarding stale analysis result"
            );
            return false;
        }

        self.pending = None;
        tracing::info!(analysis_id = %graph.analysis_id, "Accepted analysis result");
        self.current = Some(graph);
        true
    }

    /// Accepted graph, if any
    pub fn current(&self) -> Option<&DerivedGraph> {
        self.current.as_ref()
    }

    /// Whether a request is waiting for its result
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of stale results dropped so far
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(id: AnalysisId, target: &str) -> DerivedGraph {
        DerivedGraph {
            analysis_id: id,
            target: target.to_string(),
            nodes: vec![],
            edges: vec![],
            warnings: vec![],
        }
    }

    #[test]
    fn test_latest_result_accepted() {
        let mut session = AnalysisSession::new();
        let id = session.begin();

        assert!(session.is_pending());
        assert!(session.complete(graph(id, "a")));
        assert_eq!(session.current().unwrap().target, "a");
        assert!(!session.is_pending());
    }

    #[test]
    fn test_stale_result_discarded() {
        let mut session = AnalysisSession::new();
        let first = session.begin();
        let second = session.begin();

        assert!(!session.complete(graph(first, "old")));
        assert!(session.current().is_none());
        assert_eq!(session.discarded(), 1);

        assert!(session.complete(graph(second, "new")));
        assert_eq!(session.current().unwrap().target, "new");
    }

    #[test]
    fn test_result_after_newer_accepted_is_discarded() {
        let mut session = AnalysisSession::new();
        let first = session.begin();
        let second = session.begin();
        assert!(session.complete(graph(second, "new")));

        assert!(!session.complete(graph(first, "old")));
        assert_eq!(session.current().unwrap().target, "new");
    }

    #[test]
    fn test_unrequested_result_discarded() {
        let mut session = AnalysisSession::new();
        assert!(!session.complete(graph(AnalysisId::new(), "x")));
        assert!(session.current().is_none());
    }
}
