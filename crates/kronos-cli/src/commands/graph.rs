//! Graph command implementation.

use crate::cli::{DeriveArgs, GraphArgs};
use crate::config::Config;
use crate::error::Result;
use crate::input::load_interactions;
use crate::output::Formatter;
use kronos_graph::{CorrelationPipeline, DerivedGraph, GraphExport};
use std::fs;

/// Execute the graph command.
pub fn execute_graph(args: GraphArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let filters = args.filters.to_filter_state()?;
    let (pipeline, graph) = derive(&args.derive, config)?;
    let view = pipeline.view(&graph, &filters);

    println!("{}", formatter.format_view(&view, filters.show_directions())?);
    println!("{}", formatter.format_stats(&view.stats));
    for line in formatter.format_warnings(&graph.warnings) {
        eprintln!("{}", line);
    }

    if let Some(path) = args.export {
        let export = GraphExport::from_view(&graph, &filters, &view);
        fs::write(&path, export.to_json()?)?;
        println!("{}", formatter.success(&format!("Exported to {}", path.display())));
    }

    Ok(())
}

/// Load records and derive a graph with the effective configuration.
pub fn derive(args: &DeriveArgs, config: &Config) -> Result<(CorrelationPipeline, DerivedGraph)> {
    let pipeline = CorrelationPipeline::new(args.pipeline_config(&config.pipeline))?;
    let interactions = load_interactions(&args.input)?;
    let graph = pipeline.derive(&interactions, &args.target)?;
    Ok((pipeline, graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::FilterArgs;
    use crate::config::OutputFormat;
    use tempfile::tempdir;

    const RECORDS: &str = r#"[
        {"sourceNumber": "3001234567", "targetNumber": "3009876543",
         "timestamp": "2024-03-01T10:00:00Z", "operator": "Claro", "interactionType": "call"},
        {"sourceNumber": "3009876543", "targetNumber": "3005551234",
         "timestamp": "2024-03-01T10:05:00Z", "operator": "Movistar", "interactionType": "call"}
    ]"#;

    #[test]
    fn test_graph_with_export() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("records.json");
        let export = dir.path().join("graph.json");
        fs::write(&input, RECORDS).unwrap();

        let args = GraphArgs {
            derive: DeriveArgs {
                input,
                target: "3001234567".to_string(),
                preset: None,
                merge: false,
                strict_target: false,
            },
            filters: FilterArgs {
                min_interactions: 1,
                ..Default::default()
            },
            export: Some(export.clone()),
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        execute_graph(args, &Config::default(), &formatter).unwrap();

        let saved = GraphExport::from_json(&fs::read_to_string(export).unwrap()).unwrap();
        assert_eq!(saved.target, "3001234567");
        assert_eq!(saved.nodes.len(), 3);
        assert_eq!(saved.edges.len(), 2);
    }

    #[test]
    fn test_strict_target_flag() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("records.json");
        fs::write(&input, RECORDS).unwrap();

        let args = DeriveArgs {
            input,
            target: "3000000000".to_string(),
            preset: None,
            merge: false,
            strict_target: true,
        };
        assert!(derive(&args, &Config::default()).is_err());
    }
}
