//! Related-set expansion
//!
//! Decides which numbers without a direct edge to the target still belong in
//! the broadened "related network" view. Admission is a strict conjunction
//! of shared cell, occurrence and confidence conditions. Anything that cannot
//! be compared safely is excluded.

use crate::config::RelatedSetConfig;
use crate::PipelineWarning;
use kronos_domain::{CellId, CorrelationResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Why a candidate was left out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExclusionReason {
    /// Too few cells in common with the target
    InsufficientSharedCells {
        /// Cells in common
        shared: usize,
        /// Required minimum
        required: usize,
    },

    /// Too few occurrences
    InsufficientOccurrences {
        /// Candidate occurrences
        occurrences: u32,
        /// Required minimum
        required: u32,
    },

    /// Confidence below the minimum
    LowConfidence {
        /// Candidate confidence
        confidence: f64,
        /// Required minimum
        required: f64,
    },

    /// A cell id or the confidence could not be normalized
    Malformed {
        /// Description of the problem
        detail: String,
    },

    /// Candidate carries the target's own number
    DuplicateTarget,

    /// Cut off by the configured member cap
    Truncated,
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::InsufficientSharedCells { shared, required } => {
                write!(f, "{} shared cell(s), {} required", shared, required)
            }
            ExclusionReason::InsufficientOccurrences { occurrences, required } => {
                write!(f, "{} occurrence(s), {} required", occurrences, required)
            }
            ExclusionReason::LowConfidence { confidence, required } => {
                write!(f, "confidence {:.2} below {:.2}", confidence, required)
            }
            ExclusionReason::Malformed { detail } => write!(f, "malformed: {}", detail),
            ExclusionReason::DuplicateTarget => write!(f, "duplicate of the target"),
            ExclusionReason::Truncated => write!(f, "over the member cap"),
        }
    }
}

/// A candidate that was not admitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exclusion {
    /// Candidate number
    pub number: String,

    /// First failed condition
    pub reason: ExclusionReason,
}

/// Outcome of [`RelatedSetFilter::expand`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedSet {
    members: Vec<CorrelationResult>,
    exclusions: Vec<Exclusion>,
    warnings: Vec<PipelineWarning>,
}

impl RelatedSet {
    /// Admitted records; the target's own record comes first
    pub fn members(&self) -> &[CorrelationResult] {
        &self.members
    }

    /// Candidates that were left out, with the reason
    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }

    /// Data-quality signals raised during expansion
    pub fn warnings(&self) -> &[PipelineWarning] {
        &self.warnings
    }

    /// Admitted members other than the target
    pub fn related_count(&self) -> usize {
        self.members.len().saturating_sub(1)
    }

    /// Whether the set exceeded the sanity threshold
    pub fn is_oversized(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, PipelineWarning::OversizedRelatedSet { .. }))
    }

    /// Consume into the admitted records
    pub fn into_members(self) -> Vec<CorrelationResult> {
        self.members
    }
}

/// Applies the related-set admission rule
#[derive(Debug, Clone, Default)]
pub struct RelatedSetFilter {
    config: RelatedSetConfig,
}

impl RelatedSetFilter {
    /// Create a filter with the given thresholds
    pub fn new(config: RelatedSetConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use
    pub fn config(&self) -> &RelatedSetConfig {
        &self.config
    }

    /// Expand the target's record into its related network
    ///
    /// The target is always a member. A candidate is admitted iff it shares at
    /// least `min_shared_cells` canonical cells with the target AND has at
    /// least `min_occurrences` occurrences AND at least `min_confidence`
    /// confidence.
    pub fn expand(&self, target: &CorrelationResult, candidates: &[CorrelationResult]) -> RelatedSet {
        let mut warnings = Vec::new();
        let mut exclusions = Vec::new();

        let target_cells = self.target_cells(target, &mut warnings);

        let mut admitted: Vec<&CorrelationResult> = Vec::new();
        for candidate in candidates {
            match self.evaluate(target, &target_cells, candidate) {
                Ok(()) => admitted.push(candidate),
                Err(reason) => {
                    if let ExclusionReason::Malformed { detail } = &reason {
                        tracing::warn!(
                            number = %candidate.target_number,
                            %detail,
                            "Excluding candidate with malformed data"
                        );
                        warnings.push(PipelineWarning::CellIdNormalization {
                            number: candidate.target_number.clone(),
                            detail: detail.clone(),
                        });
                    }
                    exclusions.push(Exclusion {
                        number: candidate.target_number.clone(),
                        reason,
                    });
                }
            }
        }

        let admitted_count = admitted.len();
        let mut truncated = false;
        if let Some(cap) = self.config.max_members {
            if admitted.len() > cap {
                admitted.sort_by(|a, b| {
                    b.confidence
                        .partial_cmp(&a.confidence)
                        .unwrap_or(Ordering::Equal)
                        .then_with(|| a.target_number.cmp(&b.target_number))
                });
                for dropped in admitted.split_off(cap) {
                    exclusions.push(Exclusion {
                        number: dropped.target_number.clone(),
                        reason: ExclusionReason::Truncated,
                    });
                }
                truncated = true;
            }
        }

        if admitted_count > self.config.sanity_threshold || truncated {
            tracing::warn!(
                size = admitted_count,
                threshold = self.config.sanity_threshold,
                truncated,
                target_number = %target.target_number,
                "Related set exceeds sanity threshold"
            );
            warnings.push(PipelineWarning::OversizedRelatedSet {
                size: admitted_count,
                threshold: self.config.sanity_threshold,
                truncated,
            });
        }

        let mut members = Vec::with_capacity(admitted.len() + 1);
        members.push(target.clone());
        members.extend(admitted.into_iter().cloned());

        tracing::debug!(
            candidates = candidates.len(),
            members = members.len(),
            excluded = exclusions.len(),
            "Expanded related set"
        );

        RelatedSet {
            members,
            exclusions,
            warnings,
        }
    }

    /// Canonical target cells; malformed ones are dropped with a warning
    fn target_cells(&self, target: &CorrelationResult, warnings: &mut Vec<PipelineWarning>) -> HashSet<CellId> {
        let mut cells = HashSet::new();
        for raw in &target.related_cells {
            match CellId::parse(raw, self.config.strip_leading_zeros) {
                Ok(cell) => {
                    cells.insert(cell);
                }
                Err(e) => {
                    tracing::warn!(number = %target.target_number, error = %e, "Dropping malformed target cell");
                    warnings.push(PipelineWarning::CellIdNormalization {
                        number: target.target_number.clone(),
                        detail: e.to_string(),
                    });
                }
            }
        }
        cells
    }

    /// Check one candidate; returns the first failed condition
    fn evaluate(
        &self,
        target: &CorrelationResult,
        target_cells: &HashSet<CellId>,
        candidate: &CorrelationResult,
    ) -> Result<(), ExclusionReason> {
        if candidate.target_number.trim() == target.target_number.trim() {
            return Err(ExclusionReason::DuplicateTarget);
        }

        candidate
            .validate_confidence()
            .map_err(|e| ExclusionReason::Malformed { detail: e.to_string() })?;

        let candidate_cells: HashSet<CellId> = candidate
            .canonical_cells(self.config.strip_leading_zeros)
            .map_err(|e| ExclusionReason::Malformed { detail: e.to_string() })?
            .into_iter()
            .collect();

        let shared = candidate_cells.intersection(target_cells).count();
        if shared < self.config.min_shared_cells {
            return Err(ExclusionReason::InsufficientSharedCells {
                shared,
                required: self.config.min_shared_cells,
            });
        }

        if candidate.occurrences < self.config.min_occurrences {
            return Err(ExclusionReason::InsufficientOccurrences {
                occurrences: candidate.occurrences,
                required: self.config.min_occurrences,
            });
        }

        if candidate.confidence < self.config.min_confidence {
            return Err(ExclusionReason::LowConfidence {
                confidence: candidate.confidence,
                required: self.config.min_confidence,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(number: &str, cells: &[&str], occurrences: u32, confidence: f64) -> CorrelationResult {
        CorrelationResult::new(
            number,
            "Claro",
            occurrences,
            cells.iter().map(|c| c.to_string()).collect(),
            confidence,
        )
    }

    fn target() -> CorrelationResult {
        record("3001234567", &["51203", "51438"], 10, 0.95)
    }

    #[test]
    fn test_target_always_included() {
        let set = RelatedSetFilter::default().expand(&target(), &[]);
        assert_eq!(set.members().len(), 1);
        assert_eq!(set.members()[0].target_number, "3001234567");
        assert_eq!(set.related_count(), 0);
    }

    #[test]
    fn test_shared_cell_alone_is_not_enough() {
        let candidate = record("3005555555", &["51203"], 1, 0.9);
        let set = RelatedSetFilter::default().expand(&target(), &[candidate]);

        assert_eq!(set.members().len(), 1);
        assert_eq!(
            set.exclusions()[0].reason,
            ExclusionReason::InsufficientOccurrences { occurrences: 1, required: 2 }
        );
    }

    #[test]
    fn test_each_condition_excludes() {
        let candidates = vec![
            record("no-cell", &["99999"], 5, 0.9),
            record("few-occ", &["51203"], 1, 0.9),
            record("low-conf", &["51438"], 5, 0.49),
            record("passes", &["51438"], 2, 0.5),
        ];
        let set = RelatedSetFilter::default().expand(&target(), &candidates);

        let members: Vec<&str> = set.members().iter().map(|m| m.target_number.as_str()).collect();
        assert_eq!(members, vec!["3001234567", "passes"]);
        assert_eq!(set.exclusions().len(), 3);
    }

    #[test]
    fn test_canonical_comparison() {
        let candidate = record("padded", &[" 51203 "], 3, 0.8);
        let set = RelatedSetFilter::default().expand(&target(), &[candidate]);
        assert_eq!(set.related_count(), 1);

        let zero_padded = record("zeros", &["051203"], 3, 0.8);
        let set = RelatedSetFilter::default().expand(&target(), &[zero_padded.clone()]);
        assert_eq!(set.related_count(), 0);

        let config = RelatedSetConfig {
            strip_leading_zeros: true,
            ..Default::default()
        };
        let set = RelatedSetFilter::new(config).expand(&target(), &[zero_padded]);
        assert_eq!(set.related_count(), 1);
    }

    #[test]
    fn test_malformed_candidate_fails_closed() {
        let candidates = vec![
            record("bad-cell", &["51203", "51 438"], 5, 0.9),
            record("bad-conf", &["51203"], 5, f64::NAN),
        ];
        let set = RelatedSetFilter::default().expand(&target(), &candidates);

        assert_eq!(set.related_count(), 0);
        assert_eq!(set.warnings().len(), 2);
        assert!(set
            .exclusions()
            .iter()
            .all(|e| matches!(e.reason, ExclusionReason::Malformed { .. })));
    }

    #[test]
    fn test_duplicate_target_skipped() {
        let set = RelatedSetFilter::default().expand(&target(), &[target()]);
        assert_eq!(set.members().len(), 1);
        assert_eq!(set.exclusions()[0].reason, ExclusionReason::DuplicateTarget);
    }

    #[test]
    fn test_oversized_signalled_not_truncated() {
        let config = RelatedSetConfig {
            sanity_threshold: 3,
            ..Default::default()
        };
        let candidates: Vec<_> = (0..5)
            .map(|i| record(&format!("n{}", i), &["51203"], 4, 0.8))
            .collect();
        let set = RelatedSetFilter::new(config).expand(&target(), &candidates);

        assert_eq!(set.related_count(), 5);
        assert!(set.is_oversized());
        assert!(set.warnings().contains(&PipelineWarning::OversizedRelatedSet {
            size: 5,
            threshold: 3,
            truncated: false,
        }));
    }

    #[test]
    fn test_cap_truncates_by_confidence_and_signals() {
        let config = RelatedSetConfig {
            max_members: Some(2),
            ..Default::default()
        };
        let candidates = vec![
            record("a", &["51203"], 4, 0.6),
            record("b", &["51203"], 4, 0.9),
            record("c", &["51203"], 4, 0.7),
        ];
        let set = RelatedSetFilter::new(config).expand(&target(), &candidates);

        let members: Vec<&str> = set.members().iter().map(|m| m.target_number.as_str()).collect();
        assert_eq!(members, vec!["3001234567", "b", "c"]);
        assert!(set.is_oversized());
        assert_eq!(set.exclusions()[0].reason, ExclusionReason::Truncated);
    }

    #[test]
    fn test_exclusion_reason_display() {
        let reason = ExclusionReason::InsufficientOccurrences { occurrences: 1, required: 2 };
        assert_eq!(reason.to_string(), "1 occurrence(s), 2 required");
        assert_eq!(ExclusionReason::Truncated.to_string(), "over the member cap");
    }
}
