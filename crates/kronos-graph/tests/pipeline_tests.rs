//! Integration tests for kronos-graph
//!
//! These tests run whole analyses through the public API: derivation,
//! related-set expansion, filtering, export and session handling.

use chrono::{DateTime, Duration, TimeZone, Utc};
use kronos_domain::{CorrelationResult, CorrelationTier, EdgeKind, Interaction, InteractionType};
use kronos_graph::{
    AnalysisSession, CorrelationPipeline, ExclusionReason, FilterHistory, GraphExport, PipelineConfig,
    PipelineError, PipelineWarning, ViewFilterState,
};

const TARGET: &str = "3001234567";

fn at(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap() + Duration::minutes(minute)
}

/// Six records: four two-party calls and two data sessions without a peer
fn mission_records() -> Vec<Interaction> {
    vec![
        Interaction::call(TARGET, "3009876543", at(0), "Claro").with_cells(Some("51203"), Some("51438")),
        Interaction::call("3009876543", TARGET, at(5), "Claro").with_cells(Some("51203"), None),
        Interaction::call(TARGET, "3005555555", at(10), "Claro"),
        Interaction::call("3007777777", TARGET, at(15), "Movistar"),
        Interaction::data("3007777777", None, at(20), "Movistar"),
        Interaction::data("3008888888", None, at(25), "Tigo"),
    ]
}

#[test]
fn test_worked_mission() {
    let pipeline = CorrelationPipeline::default_config();
    let graph = pipeline.derive(&mission_records(), TARGET).unwrap();

    assert_eq!(graph.nodes.len(), 5);
    assert_eq!(graph.edges.len(), 4);
    assert!(graph.warnings.is_empty());

    let target = graph.target_node().unwrap();
    assert_eq!(target.id, TARGET);
    assert_eq!(target.correlation_tier, CorrelationTier::Target);
    assert_eq!(target.interaction_count, 4);

    let reciprocal = graph.node("3009876543").unwrap();
    assert_eq!(reciprocal.interaction_count, 2);
    assert_eq!(reciprocal.correlation_tier, CorrelationTier::Low);

    let data_only = graph.node("3008888888").unwrap();
    assert_eq!(data_only.correlation_tier, CorrelationTier::Indirect);
    assert_eq!(data_only.operator, "Tigo");

    let outbound = graph.edges.iter().find(|e| e.id == "3001234567->3009876543#0").unwrap();
    assert_eq!(outbound.shared_cell_ids, vec!["51203", "51438"]);
    assert!(outbound.is_directional);

    let inbound = graph.edges.iter().find(|e| e.id == "3009876543->3001234567#0").unwrap();
    assert!(inbound.is_reciprocal_of(outbound));
}

#[test]
fn test_worked_mission_medium_threshold_configurable() {
    let mut config = PipelineConfig::default();
    config.tiers.medium = 2;
    let graph = CorrelationPipeline::new(config)
        .unwrap()
        .derive(&mission_records(), TARGET)
        .unwrap();

    assert_eq!(
        graph.node("3009876543").unwrap().correlation_tier,
        CorrelationTier::Medium
    );
}

#[test]
fn test_empty_dataset() {
    let result = CorrelationPipeline::default_config().derive(&[], "123");
    assert!(matches!(result, Err(PipelineError::EmptyDataset)));
}

#[test]
fn test_blank_source_rejected() {
    let mut records = mission_records();
    records[2].source_number = "   ".to_string();

    match CorrelationPipeline::default_config().derive(&records, TARGET) {
        Err(PipelineError::InvalidInteraction { index, .. }) => assert_eq!(index, 2),
        other => panic!("Unexpected result: {:?}", other),
    }
}

#[test]
fn test_related_low_occurrence_excluded() {
    let target = CorrelationResult::new(
        TARGET,
        "Claro",
        5,
        vec!["51203".to_string(), "51438".to_string()],
        0.95,
    );
    let candidate = CorrelationResult::new("3009876543", "Claro", 1, vec!["51203".to_string()], 0.9);

    let related = CorrelationPipeline::default_config().expand_related(&target, &[candidate]);

    assert_eq!(related.related_count(), 0);
    assert_eq!(related.members().len(), 1);
    assert_eq!(related.members()[0].target_number, TARGET);
    assert_eq!(
        related.exclusions()[0].reason,
        ExclusionReason::InsufficientOccurrences {
            occurrences: 1,
            required: 2
        }
    );
}

#[test]
fn test_related_numeric_cells_from_backend() {
    let json = r#"[
        {"targetNumber": "3001234567", "operator": "Claro", "occurrences": 4,
         "relatedCells": ["51203", "51438"], "confidence": 0.9},
        {"targetNumber": "3005555555", "operator": "Movistar", "occurrences": 3,
         "relatedCells": [51203], "confidence": 0.7}
    ]"#;
    let records: Vec<CorrelationResult> = serde_json::from_str(json).unwrap();

    let related = CorrelationPipeline::default_config().expand_related(&records[0], &records);

    let numbers: Vec<&str> = related.members().iter().map(|m| m.target_number.as_str()).collect();
    assert_eq!(numbers, vec![TARGET, "3005555555"]);
    assert_eq!(related.exclusions()[0].reason, ExclusionReason::DuplicateTarget);
}

#[test]
fn test_filter_then_export_then_reload() {
    let pipeline = CorrelationPipeline::default_config();
    let graph = pipeline.derive(&mission_records(), TARGET).unwrap();

    let mut history = FilterHistory::new(ViewFilterState::default(), 20);
    history.push(history.current().toggle_level(CorrelationTier::Indirect));
    history.push(history.current().with_interaction_types([InteractionType::Call]));

    let view = pipeline.view(&graph, history.current());
    assert_eq!(view.stats.visible_nodes, 4);
    assert_eq!(view.stats.total_nodes, 5);
    assert_eq!(view.stats.visible_edges, 4);
    assert!(view.visible_edges.iter().all(|e| e.interaction_type == EdgeKind::Call));

    let export = GraphExport::from_view(&graph, history.current(), &view);
    let restored = GraphExport::from_json(&export.to_json().unwrap()).unwrap();
    assert_eq!(restored.reload(), view);

    assert!(history.undo());
    assert!(history.undo());
    assert!(!history.undo());
    assert_eq!(pipeline.view(&graph, history.current()).stats.visible_nodes, 5);
}

#[test]
fn test_operators_stable_when_records_reordered() {
    let records = vec![
        Interaction::call(TARGET, "3009876543", at(0), "Claro"),
        Interaction::call("3009876543", TARGET, at(0), "Movistar"),
    ];
    let mut reversed = records.clone();
    reversed.reverse();

    let pipeline = CorrelationPipeline::default_config();
    let forward = pipeline.derive(&records, TARGET).unwrap();
    let backward = pipeline.derive(&reversed, TARGET).unwrap();
    assert_eq!(forward.nodes, backward.nodes);
    assert_eq!(forward.edges, backward.edges);

    let filters = ViewFilterState::default().with_operators(["Claro"]);
    assert_eq!(pipeline.view(&forward, &filters), pipeline.view(&backward, &filters));
}

#[test]
fn test_operator_filter_hides_edges_to_hidden_nodes() {
    let pipeline = CorrelationPipeline::default_config();
    let graph = pipeline.derive(&mission_records(), TARGET).unwrap();

    let filters = ViewFilterState::default().with_operators(["Claro"]);
    let view = pipeline.view(&graph, &filters);

    assert!(view.visible_nodes.iter().all(|n| n.operator == "Claro"));
    assert!(view
        .visible_edges
        .iter()
        .all(|e| e.source != "3007777777" && e.target != "3007777777"));
}

#[test]
fn test_missing_target_continues_with_warning() {
    let graph = CorrelationPipeline::default_config()
        .derive(&mission_records(), "3000000000")
        .unwrap();

    assert_eq!(graph.nodes.len(), 6);
    assert_eq!(graph.target_node().unwrap().interaction_count, 0);
    assert!(matches!(graph.warnings[0], PipelineWarning::TargetNotFound { .. }));
}

#[test]
fn test_session_keeps_only_latest_analysis() {
    let pipeline = CorrelationPipeline::default_config();
    let mut session = AnalysisSession::new();

    let first = session.begin();
    let second = session.begin();

    let newer = pipeline.derive_as(second, &mission_records(), "3009876543").unwrap();
    let older = pipeline.derive_as(first, &mission_records(), TARGET).unwrap();

    assert!(session.complete(newer));
    assert!(!session.complete(older));
    assert_eq!(session.current().unwrap().target, "3009876543");
}
