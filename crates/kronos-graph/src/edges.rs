//! Edge derivation and optional parallel-edge merging

use kronos_domain::{EdgeKind, Interaction, InteractionEdge};
use std::collections::HashMap;

/// Ordered, duplicate-free cells of one record: start first, then end
///
/// Blank entries are dropped; a missing end cell never drops the start cell.
pub fn shared_cells(interaction: &Interaction) -> Vec<String> {
    let mut cells: Vec<String> = Vec::with_capacity(2);
    for cell in [&interaction.start_cell_id, &interaction.end_cell_id] {
        let Some(cell) = cell.as_deref().map(str::trim).filter(|c| !c.is_empty()) else {
            continue;
        };
        if !cells.iter().any(|c| c == cell) {
            cells.push(cell.to_string());
        }
    }
    cells
}

/// Build one directed edge per record with a secondary party
///
/// Edge ids are `"{source}->{target}#{ordinal}"`, where the ordinal counts
/// records of the same ordered pair in canonical record order. Ids therefore
/// do not depend on input order.
pub fn build(edge_source_interactions: &[Interaction]) -> Vec<InteractionEdge> {
    let mut records: Vec<(&str, &str, &Interaction)> = edge_source_interactions
        .iter()
        .filter_map(|i| i.secondary_party().map(|t| (i.source_number.trim(), t, i)))
        .collect();

    records.sort_by(|(sa, ta, a), (sb, tb, b)| {
        sa.cmp(sb)
            .then_with(|| ta.cmp(tb))
            .then_with(|| a.canonical_cmp(b))
    });

    let mut ordinals: HashMap<(&str, &str), usize> = HashMap::new();
    let edges: Vec<InteractionEdge> = records
        .into_iter()
        .map(|(source, target, interaction)| {
            let ordinal = ordinals.entry((source, target)).or_insert(0);
            let id = format!("{}->{}#{}", source, target, ordinal);
            *ordinal += 1;

            InteractionEdge::new(
                id,
                source,
                target,
                shared_cells(interaction),
                EdgeKind::from(interaction.interaction_type),
            )
        })
        .collect();

    tracing::debug!(edges = edges.len(), "Built interaction edges");
    edges
}

/// Fold same-direction parallel edges into one edge per ordered pair
///
/// Reverse-direction edges stay separate. Cells are unioned in first-seen
/// order, kinds combine to `Mixed` when calls and data meet, weights add up.
/// Merged ids are `"{source}->{target}"`.
pub fn merge_parallel(edges: &[InteractionEdge]) -> Vec<InteractionEdge> {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut merged: HashMap<(String, String), InteractionEdge> = HashMap::new();

    for edge in edges {
        let key = (edge.source.clone(), edge.target.clone());
        match merged.get_mut(&key) {
            Some(existing) => {
                for cell in &edge.shared_cell_ids {
                    if !existing.shared_cell_ids.contains(cell) {
                        existing.shared_cell_ids.push(cell.clone());
                    }
                }
                existing.interaction_type = existing.interaction_type.combine(edge.interaction_type);
                existing.weight += edge.weight;
            }
            None => {
                let mut first = edge.clone();
                first.id = format!("{}->{}", edge.source, edge.target);
                order.push(key.clone());
                merged.insert(key, first);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| merged.remove(&key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use kronos_domain::InteractionType;

    fn call_at(source: &str, target: &str, minute: i64) -> Interaction {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        Interaction::call(source, target, base + Duration::minutes(minute), "Claro")
    }

    #[test]
    fn test_shared_cells_order_and_dedup() {
        let both = call_at("a", "b", 0).with_cells(Some("51203"), Some("51438"));
        assert_eq!(shared_cells(&both), vec!["51203", "51438"]);

        let same = call_at("a", "b", 0).with_cells(Some("51203"), Some("51203"));
        assert_eq!(shared_cells(&same), vec!["51203"]);

        let start_only = call_at("a", "b", 0).with_cells(Some("51203"), None);
        assert_eq!(shared_cells(&start_only), vec!["51203"]);

        let end_only = call_at("a", "b", 0).with_cells(Some(" "), Some("51438"));
        assert_eq!(shared_cells(&end_only), vec!["51438"]);
    }

    #[test]
    fn test_reciprocal_calls_stay_separate() {
        let edges = build(&[call_at("a", "b", 0), call_at("b", "a", 1)]);

        assert_eq!(edges.len(), 2);
        assert!(edges[0].is_reciprocal_of(&edges[1]));
        assert!(edges.iter().all(|e| e.is_directional));
    }

    #[test]
    fn test_ids_unique_and_order_independent() {
        let records = vec![call_at("a", "b", 5), call_at("a", "b", 0), call_at("b", "a", 2)];
        let mut reversed = records.clone();
        reversed.reverse();

        let first = build(&records);
        let second = build(&reversed);
        assert_eq!(first, second);

        let ids: Vec<&str> = first.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a->b#0", "a->b#1", "b->a#0"]);
    }

    #[test]
    fn test_records_without_secondary_skipped() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let edges = build(&[Interaction::data("a", None, ts, "Claro")]);
        assert!(edges.is_empty());
    }

    #[test]
    fn test_merge_parallel() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let records = vec![
            call_at("a", "b", 0).with_cells(Some("1"), None),
            Interaction::data("a", Some("b".to_string()), ts, "Claro").with_cells(Some("2"), Some("1")),
            call_at("b", "a", 3),
        ];
        let merged = merge_parallel(&build(&records));

        assert_eq!(merged.len(), 2);
        let ab = merged.iter().find(|e| e.source == "a").unwrap();
        assert_eq!(ab.id, "a->b");
        assert_eq!(ab.weight, 2);
        assert_eq!(ab.interaction_type, EdgeKind::Mixed);
        assert_eq!(ab.shared_cell_ids.len(), 2);

        let ba = merged.iter().find(|e| e.source == "b").unwrap();
        assert_eq!(ba.weight, 1);
        assert_eq!(ba.interaction_type, EdgeKind::from(InteractionType::Call));
    }
}
