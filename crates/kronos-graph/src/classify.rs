//! Node classification: operator resolution and correlation tiers

use crate::config::TierThresholds;
use kronos_domain::{CorrelationTier, Interaction, OperatorLookup, ParticipantNode, UNKNOWN_OPERATOR};
use std::collections::{BTreeSet, HashMap};

/// Operator lookup backed by the analyzed records
///
/// A number resolves to the operator of the earliest record that mentions it,
/// as source or as secondary party. Records are visited in canonical order,
/// so the result does not depend on input order.
#[derive(Debug, Clone, Default)]
pub struct InteractionOperatorIndex {
    operators: HashMap<String, String>,
}

impl InteractionOperatorIndex {
    /// Build the index from the records in canonical order
    pub fn from_interactions(interactions: &[Interaction]) -> Self {
        let mut ordered: Vec<&Interaction> = interactions.iter().collect();
        ordered.sort_by(|a, b| a.canonical_cmp(b));

        let mut operators = HashMap::new();
        for interaction in ordered {
            let operator = interaction.operator.trim();
            if operator.is_empty() {
                continue;
            }

            let source = interaction.source_number.trim();
            let parties = std::iter::once(source).chain(interaction.secondary_party());
            for number in parties {
                operators
                    .entry(number.to_string())
                    .or_insert_with(|| operator.to_string());
            }
        }

        Self { operators }
    }
}

impl OperatorLookup for InteractionOperatorIndex {
    fn operator_for(&self, number: &str) -> Option<String> {
        self.operators.get(number).cloned()
    }
}

/// Assign a tier from an interaction count
///
/// Does not handle the target or indirect cases; see [`classify`].
pub fn tier_for_count(count: u32, thresholds: &TierThresholds) -> CorrelationTier {
    if count >= thresholds.high {
        CorrelationTier::High
    } else if count >= thresholds.medium {
        CorrelationTier::Medium
    } else {
        CorrelationTier::Low
    }
}

/// Build one node per counted number, plus the target
///
/// The target is always tier `Target`, and is synthesized with count 0 if it
/// never appeared. Other numbers that never share a record with the target
/// are `Indirect`; the rest are tiered by count. Nodes are returned sorted
/// by id.
pub fn classify<L: OperatorLookup + ?Sized>(
    frequency: &HashMap<String, u32>,
    target: &str,
    operator_lookup: &L,
    direct_contacts: &BTreeSet<String>,
    thresholds: &TierThresholds,
) -> Vec<ParticipantNode> {
    let resolve = |number: &str| {
        operator_lookup
            .operator_for(number)
            .unwrap_or_else(|| UNKNOWN_OPERATOR.to_string())
    };

    let mut nodes: Vec<ParticipantNode> = frequency
        .iter()
        .map(|(number, &count)| {
            let tier = if number == target {
                CorrelationTier::Target
            } else if !direct_contacts.contains(number) {
                CorrelationTier::Indirect
            } else {
                tier_for_count(count, thresholds)
            };
            ParticipantNode::new(number.clone(), resolve(number.as_str()), count, tier)
        })
        .collect();

    if !frequency.contains_key(target) {
        nodes.push(ParticipantNode::new(
            target,
            resolve(target),
            0,
            CorrelationTier::Target,
        ));
    }

    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    tracing::debug!(nodes = nodes.len(), target_number = target, "Classified participants");
    nodes
}
