//! Pipeline configuration
//!
//! Tier cutoffs and related-set thresholds come from the clearest worked
//! cases available; they are configuration so a backend using different
//! cutoffs can be matched without code changes.

use crate::PipelineError;
use serde::{Deserialize, Serialize};

/// Interaction-count cutoffs for correlation tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    /// Minimum interactions for the `high` tier
    pub high: u32,

    /// Minimum interactions for the `medium` tier
    pub medium: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self { high: 5, medium: 3 }
    }
}

/// Thresholds for admitting candidates into the related network
///
/// All three admission conditions must hold at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedSetConfig {
    /// Minimum number of cells shared with the target
    pub min_shared_cells: usize,

    /// Minimum occurrences of the candidate
    pub min_occurrences: u32,

    /// Minimum backend confidence of the candidate
    pub min_confidence: f64,

    /// Member count above which an oversized warning is raised
    pub sanity_threshold: usize,

    /// Optional hard cap on admitted members (excluding the target)
    /// Default: none; truncation is always signalled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_members: Option<usize>,

    /// Strip leading zeros from every cell id before comparing
    pub strip_leading_zeros: bool,
}

impl Default for RelatedSetConfig {
    fn default() -> Self {
        Self {
            min_shared_cells: 1,
            min_occurrences: 2,
            min_confidence: 0.5,
            sanity_threshold: 50,
            max_members: None,
            strip_leading_zeros: false,
        }
    }
}

/// Configuration for a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Tier cutoffs
    #[serde(default)]
    pub tiers: TierThresholds,

    /// Related-set admission rules
    #[serde(default)]
    pub related: RelatedSetConfig,

    /// Fold same-direction parallel edges into one
    /// Default: false (one edge per interaction)
    #[serde(default)]
    pub merge_parallel_edges: bool,

    /// Treat a target with no observed interactions as an error
    /// Default: false (synthesize the node and warn)
    #[serde(default)]
    pub strict_target: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tiers: TierThresholds::default(),
            related: RelatedSetConfig::default(),
            merge_parallel_edges: false,
            strict_target: false,
        }
    }
}

impl PipelineConfig {
    /// Strict configuration: higher admission bar, capped related set, missing target is fatal
    pub fn strict() -> Self {
        Self {
            tiers: TierThresholds::default(),
            related: RelatedSetConfig {
                min_shared_cells: 2,
                min_occurrences: 3,
                min_confidence: 0.7,
                sanity_threshold: 25,
                max_members: Some(50),
                strip_leading_zeros: false,
            },
            merge_parallel_edges: false,
            strict_target: true,
        }
    }

    /// Lenient configuration for exploratory work on sparse data
    pub fn lenient() -> Self {
        Self {
            tiers: TierThresholds { high: 4, medium: 2 },
            related: RelatedSetConfig {
                min_shared_cells: 1,
                min_occurrences: 1,
                min_confidence: 0.3,
                sanity_threshold: 100,
                max_members: None,
                strip_leading_zeros: true,
            },
            merge_parallel_edges: true,
            strict_target: false,
        }
    }

    /// Reject inconsistent thresholds
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.tiers.medium == 0 {
            return Err(PipelineError::InvalidConfig(
                "Medium tier threshold must be at least 1".to_string(),
            ));
        }
        if self.tiers.high < self.tiers.medium {
            return Err(PipelineError::InvalidConfig(format!(
                "High tier threshold {} is below medium threshold {}",
                self.tiers.high, self.tiers.medium
            )));
        }
        if self.related.min_shared_cells == 0 {
            return Err(PipelineError::InvalidConfig(
                "Related set requires at least one shared cell".to_string(),
            ));
        }
        let confidence = self.related.min_confidence;
        if confidence.is_nan() || !(0.0..=1.0).contains(&confidence) {
            return Err(PipelineError::InvalidConfig(format!(
                "Minimum confidence {} is outside [0.0, 1.0]",
                confidence
            )));
        }
        Ok(())
    }
}
