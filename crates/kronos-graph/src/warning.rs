//! Non-fatal data-quality signals

use serde::{Deserialize, Serialize};
use std::fmt;

/// A problem the pipeline worked around but the caller must surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PipelineWarning {
    /// The target number was never observed; its node was synthesized with count 0
    TargetNotFound {
        /// Requested target number
        target: String,
    },

    /// A candidate or cell was dropped because an identifier was malformed
    CellIdNormalization {
        /// Number whose record carried the malformed value
        number: String,
        /// Human-readable description of the problem
        detail: String,
    },

    /// The related set is larger than the sanity threshold
    OversizedRelatedSet {
        /// Admitted members, excluding the target
        size: usize,
        /// Configured sanity threshold
        threshold: usize,
        /// Whether members were cut off by a configured cap
        truncated: bool,
    },
}

impl fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineWarning::TargetNotFound { target } => {
                write!(f, "Target {} has no observed interactions", target)
            }
            PipelineWarning::CellIdNormalization { number, detail } => {
                write!(f, "Malformed data for {}: {}", number, detail)
            }
            PipelineWarning::OversizedRelatedSet {
                size,
                threshold,
                truncated,
            } => {
                write!(
                    f,
                    "Related set has {} members (sanity threshold {})",
                    size, threshold
                )?;
                if *truncated {
                    write!(f, ", truncated")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let warning = PipelineWarning::OversizedRelatedSet {
            size: 254,
            threshold: 50,
            truncated: false,
        };
        assert_eq!(
            warning.to_string(),
            "Related set has 254 members (sanity threshold 50)"
        );
    }

    #[test]
    fn test_tagged_json() {
        let warning = PipelineWarning::TargetNotFound {
            target: "3001".to_string(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "targetNotFound");
    }
}
