//! Tier module - strength of association relative to the target

use serde::{Deserialize, Serialize};

/// Correlation tier of a participant node
///
/// Ordered from lowest to highest specificity, so `Target` compares greatest:
/// - Indirect: reachable only transitively, never in direct contact with the target
/// - Low: at least one interaction
/// - Medium: at or above the medium threshold
/// - High: at or above the high threshold
/// - Target: the analyzed number itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationTier {
    /// No direct interaction with the target
    Indirect,

    /// Few direct interactions
    Low,

    /// Moderate interaction count
    Medium,

    /// Heavy interaction count
    High,

    /// The analyzed number
    Target,
}

impl CorrelationTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationTier::Indirect => "indirect",
            CorrelationTier::Low => "low",
            CorrelationTier::Medium => "medium",
            CorrelationTier::High => "high",
            CorrelationTier::Target => "target",
        }
    }

    /// Parse a tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "indirect" => Some(CorrelationTier::Indirect),
            "low" => Some(CorrelationTier::Low),
            "medium" => Some(CorrelationTier::Medium),
            "high" => Some(CorrelationTier::High),
            "target" => Some(CorrelationTier::Target),
            _ => None,
        }
    }

    /// All tiers, highest first
    pub fn all() -> [CorrelationTier; 5] {
        [
            CorrelationTier::Target,
            CorrelationTier::High,
            CorrelationTier::Medium,
            CorrelationTier::Low,
            CorrelationTier::Indirect,
        ]
    }
}

impl std::fmt::Display for CorrelationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CorrelationTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid tier: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(CorrelationTier::Target > CorrelationTier::High);
        assert!(CorrelationTier::High > CorrelationTier::Medium);
        assert!(CorrelationTier::Medium > CorrelationTier::Low);
        assert!(CorrelationTier::Low > CorrelationTier::Indirect);
    }

    #[test]
    fn test_tier_parse_roundtrip() {
        for tier in CorrelationTier::all() {
            assert_eq!(CorrelationTier::parse(tier.as_str()), Some(tier));
        }
        assert_eq!("HIGH".parse::<CorrelationTier>(), Ok(CorrelationTier::High));
        assert!("strong".parse::<CorrelationTier>().is_err());
    }
}
