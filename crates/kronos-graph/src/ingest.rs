//! Interaction ingestion: frequency counting and edge-source selection

use crate::PipelineError;
use kronos_domain::Interaction;
use std::collections::{BTreeSet, HashMap};

/// Output of [`ingest`]
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutput {
    /// Appearances per number, as source or as secondary party
    pub frequency: HashMap<String, u32>,

    /// Records with a secondary party, in input order
    pub edge_source_interactions: Vec<Interaction>,

    /// Numbers that share at least one record with the target
    pub direct_contacts: BTreeSet<String>,
}

impl IngestOutput {
    /// Whether the target appeared in any record
    pub fn target_observed(&self, target: &str) -> bool {
        self.frequency.contains_key(target.trim())
    }
}

/// Count participants and select the records that can produce edges
///
/// A record's secondary party is counted only when present and non-blank;
/// records without one stay in the counts but are not edge sources. The
/// target is compared after trimming, like every recorded number.
///
/// # Errors
///
/// - [`PipelineError::EmptyDataset`] when `interactions` is empty
/// - [`PipelineError::InvalidInteraction`] when a record has a blank source number
///
/// # Examples
///
/// ```
/// use kronos_graph::ingest::ingest;
///
/// assert!(ingest(&[], "3001234567").is_err());
/// ```
pub fn ingest(interactions: &[Interaction], target: &str) -> Result<IngestOutput, PipelineError> {
    if interactions.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }
    let target = target.trim();

    let mut frequency: HashMap<String, u32> = HashMap::new();
    let mut edge_source_interactions = Vec::new();
    let mut direct_contacts = BTreeSet::new();

    for (index, interaction) in interactions.iter().enumerate() {
        let source = interaction.source_number.trim();
        if source.is_empty() {
            return Err(PipelineError::InvalidInteraction {
                index,
                reason: "source number is empty".to_string(),
            });
        }

        *frequency.entry(source.to_string()).or_insert(0) += 1;

        let Some(secondary) = interaction.secondary_party() else {
            continue;
        };

        *frequency.entry(secondary.to_string()).or_insert(0) += 1;
        edge_source_interactions.push(interaction.clone());

        if source == target && secondary != target {
            direct_contacts.insert(secondary.to_string());
        } else if secondary == target && source != target {
            direct_contacts.insert(source.to_string());
        }
    }

    tracing::debug!(
        records = interactions.len(),
        participants = frequency.len(),
        edge_sources = edge_source_interactions.len(),
        direct_contacts = direct_contacts.len(),
        "Ingested interactions"
    );

    Ok(IngestOutput {
        frequency,
        edge_source_interactions,
        direct_contacts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn call(source: &str, target: &str) -> Interaction {
        Interaction::call(source, target, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(), "Claro")
    }

    fn data(source: &str, target: Option<&str>) -> Interaction {
        Interaction::data(
            source,
            target.map(str::to_string),
            Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap(),
            "Claro",
        )
    }

    #[test]
    fn test_empty_dataset() {
        assert!(matches!(ingest(&[], "123"), Err(PipelineError::EmptyDataset)));
    }

    #[test]
    fn test_counts_both_parties() {
        let out = ingest(&[call("a", "b"), call("b", "a"), call("a", "c")], "a").unwrap();

        assert_eq!(out.frequency["a"], 3);
        assert_eq!(out.frequency["b"], 2);
        assert_eq!(out.frequency["c"], 1);
        assert_eq!(out.edge_source_interactions.len(), 3);
    }

    #[test]
    fn test_missing_secondary_party() {
        let records = vec![data("a", None), data("a", Some("")), data("a", Some("b"))];
        let out = ingest(&records, "a").unwrap();

        assert_eq!(out.frequency["a"], 3);
        assert_eq!(out.frequency["b"], 1);
        assert_eq!(out.frequency.len(), 2);
        assert_eq!(out.edge_source_interactions.len(), 1);
    }

    #[test]
    fn test_padded_target() {
        let out = ingest(&[call("a", "b"), call("c", "a")], "  a ").unwrap();

        assert!(out.target_observed(" a"));
        assert_eq!(out.direct_contacts.len(), 2);
        assert!(out.direct_contacts.contains("b"));
        assert!(out.direct_contacts.contains("c"));
    }

    #[test]
    fn test_direct_contacts() {
        let records = vec![call("a", "b"), call("c", "a"), call("b", "d"), data("e", None)];
        let out = ingest(&records, "a").unwrap();

        let expected: BTreeSet<String> = ["b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(out.direct_contacts, expected);
        assert!(out.target_observed("a"));
        assert!(!out.target_observed("z"));
    }

    #[test]
    fn test_blank_source_rejected() {
        let result = ingest(&[call("a", "b"), call("  ", "b")], "a");
        assert!(matches!(
            result,
            Err(PipelineError::InvalidInteraction { index: 1, .. })
        ));
    }
}
