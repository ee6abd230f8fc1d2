//! Interactive explore mode.
//!
//! Derives one graph, then lets the user change view filters with undo and
//! redo. The graph itself never changes; every command re-applies the
//! current filters to it.

use crate::cli::ExploreArgs;
use crate::commands::graph::derive;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use kronos_domain::{CorrelationTier, InteractionType};
use kronos_graph::{
    AnalysisSession, CorrelationPipeline, DerivedGraph, FilterHistory, GraphExport, ViewFilterState,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs;
use std::path::PathBuf;

/// Run the explore REPL over a freshly derived graph.
pub fn run_explore(args: ExploreArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (pipeline, graph) = derive(&args.derive, config)?;
    let mut session = AnalysisSession::new();
    session.begin_with(graph.analysis_id);
    session.complete(graph);

    let mut explorer = Explorer::new(pipeline, session, config.settings.history_size);
    let graph = explorer.graph()?;
    println!(
        "{}",
        formatter.info(&format!(
            "Exploring {} ({} nodes, {} edges) - Type 'help' for commands, 'exit' to quit",
            graph.target,
            graph.nodes.len(),
            graph.edges.len()
        ))
    );
    for line in formatter.format_warnings(&graph.warnings) {
        println!("{}", line);
    }
    println!();

    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e))))?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("kronos> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();

                match parse_explore_command(line) {
                    Ok(ExploreCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ExploreCommand::Help) => print_help(formatter),
                    Ok(cmd) => {
                        if let Err(e) = explorer.execute(cmd, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// Explore command type.
#[derive(Debug, Clone, PartialEq)]
pub enum ExploreCommand {
    /// Toggle one tier
    Tier(CorrelationTier),
    /// Toggle one operator
    Operator(String),
    /// Show every operator again
    AllOperators,
    /// Toggle one interaction type
    Type(InteractionType),
    /// Set the minimum interaction count
    Min(u32),
    /// Set or flip label visibility
    Labels(Option<bool>),
    /// Set or flip edge directions
    Directions(Option<bool>),
    /// Step back one filter change
    Undo,
    /// Step forward one filter change
    Redo,
    /// Print the filtered graph
    Show,
    /// Print the active filters
    Filters,
    /// Write the filtered graph to a file
    Export(PathBuf),
    /// Return to the default filters
    Reset,
    /// Print help
    Help,
    /// Leave the REPL
    Exit,
}

/// Parse an explore command line.
pub fn parse_explore_command(line: &str) -> Result<ExploreCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = parts.split_first() else {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    };

    match command {
        "exit" | "quit" | "q" => Ok(ExploreCommand::Exit),
        "help" | "?" => Ok(ExploreCommand::Help),
        "undo" | "u" => Ok(ExploreCommand::Undo),
        "redo" | "r" => Ok(ExploreCommand::Redo),
        "show" | "s" => Ok(ExploreCommand::Show),
        "filters" => Ok(ExploreCommand::Filters),
        "reset" => Ok(ExploreCommand::Reset),
        "tier" => {
            let name = args.first().ok_or_else(|| usage("tier <target|high|medium|low|indirect>"))?;
            CorrelationTier::parse(name)
                .map(ExploreCommand::Tier)
                .ok_or_else(|| CliError::InvalidInput(format!("Unknown tier: {}", name)))
        }
        "operator" => match args {
            [] => Err(usage("operator <name>|all")),
            ["all"] => Ok(ExploreCommand::AllOperators),
            words => Ok(ExploreCommand::Operator(words.join(" "))),
        },
        "type" => {
            let name = args.first().ok_or_else(|| usage("type <call|data>"))?;
            InteractionType::parse(name)
                .map(ExploreCommand::Type)
                .ok_or_else(|| CliError::InvalidInput(format!("Unknown interaction type: {}", name)))
        }
        "min" => {
            let value = args.first().ok_or_else(|| usage("min <n>"))?;
            value
                .parse()
                .map(ExploreCommand::Min)
                .map_err(|_| CliError::InvalidInput(format!("Not a number: {}", value)))
        }
        "labels" => parse_switch(args.first().copied()).map(ExploreCommand::Labels),
        "directions" => parse_switch(args.first().copied()).map(ExploreCommand::Directions),
        "export" => {
            let path = args.first().ok_or_else(|| usage("export <file>"))?;
            Ok(ExploreCommand::Export(PathBuf::from(path)))
        }
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            command
        ))),
    }
}

/// Filter state and graph held by the REPL.
pub struct Explorer {
    pipeline: CorrelationPipeline,
    session: AnalysisSession,
    history: FilterHistory,
}

impl Explorer {
    /// Start exploring the session's current graph with default filters.
    pub fn new(pipeline: CorrelationPipeline, session: AnalysisSession, history_size: usize) -> Self {
        Self {
            pipeline,
            session,
            history: FilterHistory::new(ViewFilterState::default(), history_size),
        }
    }

    /// Graph being explored.
    pub fn graph(&self) -> Result<&DerivedGraph> {
        self.session
            .current()
            .ok_or_else(|| CliError::InvalidInput("No analysis loaded".to_string()))
    }

    /// Active filters.
    pub fn filters(&self) -> &ViewFilterState {
        self.history.current()
    }

    /// Apply a command; filter changes print the updated counts.
    pub fn execute(&mut self, cmd: ExploreCommand, formatter: &Formatter) -> Result<()> {
        let current = self.history.current().clone();
        let next = match cmd {
            ExploreCommand::Tier(tier) => Some(current.toggle_level(tier)),
            ExploreCommand::Operator(name) => Some(current.toggle_operator(&name)),
            ExploreCommand::AllOperators => Some(current.with_operators(Vec::<String>::new())),
            ExploreCommand::Type(kind) => Some(current.toggle_interaction_type(kind)),
            ExploreCommand::Min(min) => Some(current.with_min_interactions(min)?),
            ExploreCommand::Labels(show) => Some(current.with_labels(show.unwrap_or(!current.show_labels()))),
            ExploreCommand::Directions(show) => {
                Some(current.with_directions(show.unwrap_or(!current.show_directions())))
            }
            ExploreCommand::Reset => Some(ViewFilterState::default()),
            ExploreCommand::Undo => {
                if !self.history.undo() {
                    println!("{}", formatter.warning("Nothing to undo"));
                    return Ok(());
                }
                None
            }
            ExploreCommand::Redo => {
                if !self.history.redo() {
                    println!("{}", formatter.warning("Nothing to redo"));
                    return Ok(());
                }
                None
            }
            ExploreCommand::Show => {
                let view = self.pipeline.view(self.graph()?, self.filters());
                println!("{}", formatter.format_view(&view, self.filters().show_directions())?);
                println!("{}", formatter.format_stats(&view.stats));
                return Ok(());
            }
            ExploreCommand::Filters => {
                println!("{}", describe_filters(self.filters()));
                return Ok(());
            }
            ExploreCommand::Export(path) => {
                let export = self.export()?;
                fs::write(&path, export.to_json()?)?;
                println!("{}", formatter.success(&format!("Exported to {}", path.display())));
                return Ok(());
            }
            ExploreCommand::Help | ExploreCommand::Exit => return Ok(()),
        };

        if let Some(next) = next {
            self.history.push(next);
        }
        let view = self.pipeline.view(self.graph()?, self.filters());
        println!("{}", formatter.format_stats(&view.stats));
        Ok(())
    }

    /// Snapshot of the current view.
    pub fn export(&self) -> Result<GraphExport> {
        let graph = self.graph()?;
        let view = self.pipeline.view(graph, self.filters());
        Ok(GraphExport::from_view(graph, self.filters(), &view))
    }
}

fn parse_switch(arg: Option<&str>) -> Result<Option<bool>> {
    match arg {
        None => Ok(None),
        Some("on") | Some("true") => Ok(Some(true)),
        Some("off") | Some("false") => Ok(Some(false)),
        Some(other) => Err(CliError::InvalidInput(format!("Expected on or off, got {}", other))),
    }
}

fn usage(text: &str) -> CliError {
    CliError::InvalidInput(format!("Usage: {}", text))
}

fn describe_filters(filters: &ViewFilterState) -> String {
    let tiers: Vec<&str> = filters.correlation_levels().iter().map(|t| t.as_str()).collect();
    let types: Vec<&str> = filters.interaction_types().iter().map(|t| t.as_str()).collect();
    let operators = if filters.operators().is_empty() {
        "all".to_string()
    } else {
        filters.operators().iter().cloned().collect::<Vec<_>>().join(", ")
    };

    format!(
        "  tiers: {}\n  operators: {}\n  types: {}\n  min interactions: {}\n  labels: {}\n  directions: {}",
        tiers.join(", "),
        operators,
        types.join(", "),
        filters.min_interactions(),
        if filters.show_labels() { "on" } else { "off" },
        if filters.show_directions() { "on" } else { "off" },
    )
}

fn get_history_path() -> Result<PathBuf> {
    let kronos_dir = Config::dir()?;
    std::fs::create_dir_all(&kronos_dir)?;
    Ok(kronos_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  tier <name>                - Toggle a tier (target|high|medium|low|indirect)");
    println!("  operator <name>|all        - Toggle an operator, or show all operators");
    println!("  type <call|data>           - Toggle an interaction type");
    println!("  min <n>                    - Minimum interactions per node");
    println!("  labels [on|off]            - Show or hide labels");
    println!("  directions [on|off]        - Show or hide edge directions");
    println!("  undo, u / redo, r          - Step through filter changes");
    println!("  show, s                    - Print the filtered graph");
    println!("  filters                    - Print the active filters");
    println!("  export <file>              - Write the filtered graph as JSON");
    println!("  reset                      - Restore default filters");
    println!("  help, ?                    - Show this help");
    println!("  exit, quit, q              - Leave explore mode");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use chrono::{TimeZone, Utc};
    use kronos_domain::Interaction;

    fn explorer() -> Explorer {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let records = vec![
            Interaction::call("t", "a", ts, "Claro"),
            Interaction::call("a", "t", ts, "Claro"),
            Interaction::call("a", "b", ts, "Movistar"),
        ];
        let pipeline = CorrelationPipeline::default_config();
        let mut session = AnalysisSession::new();
        let id = session.begin();
        session.complete(pipeline.derive_as(id, &records, "t").unwrap());
        Explorer::new(pipeline, session, 10)
    }

    fn quiet() -> Formatter {
        Formatter::new(OutputFormat::Quiet, false)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_explore_command("tier indirect").unwrap(),
            ExploreCommand::Tier(CorrelationTier::Indirect)
        );
        assert_eq!(
            parse_explore_command("operator Claro Movil").unwrap(),
            ExploreCommand::Operator("Claro Movil".to_string())
        );
        assert_eq!(parse_explore_command("operator all").unwrap(), ExploreCommand::AllOperators);
        assert_eq!(parse_explore_command("min 3").unwrap(), ExploreCommand::Min(3));
        assert_eq!(parse_explore_command("labels off").unwrap(), ExploreCommand::Labels(Some(false)));
        assert_eq!(parse_explore_command("directions").unwrap(), ExploreCommand::Directions(None));
        assert_eq!(parse_explore_command("q").unwrap(), ExploreCommand::Exit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_explore_command("tier").is_err());
        assert!(parse_explore_command("tier extreme").is_err());
        assert!(parse_explore_command("min lots").is_err());
        assert!(parse_explore_command("labels maybe").is_err());
        assert!(parse_explore_command("frobnicate").is_err());
    }

    #[test]
    fn test_filter_changes_with_undo_redo() {
        let mut explorer = explorer();
        let formatter = quiet();

        explorer.execute(ExploreCommand::Tier(CorrelationTier::Indirect), &formatter).unwrap();
        assert!(!explorer.filters().correlation_levels().contains(&CorrelationTier::Indirect));

        explorer.execute(ExploreCommand::Undo, &formatter).unwrap();
        assert_eq!(explorer.filters(), &ViewFilterState::default());

        explorer.execute(ExploreCommand::Redo, &formatter).unwrap();
        assert!(!explorer.filters().correlation_levels().contains(&CorrelationTier::Indirect));
    }

    #[test]
    fn test_invalid_min_keeps_state() {
        let mut explorer = explorer();
        assert!(explorer.execute(ExploreCommand::Min(0), &quiet()).is_err());
        assert_eq!(explorer.filters().min_interactions(), 1);
    }

    #[test]
    fn test_export_reflects_filters() {
        let mut explorer = explorer();
        explorer
            .execute(ExploreCommand::Operator("Claro".to_string()), &quiet())
            .unwrap();

        let export = explorer.export().unwrap();
        assert_eq!(export.nodes.len(), 2);
        assert_eq!(export.stats.total_nodes, 3);
        assert_eq!(export.reload().visible_nodes, export.nodes);
    }

    #[test]
    fn test_reset() {
        let mut explorer = explorer();
        explorer.execute(ExploreCommand::Min(5), &quiet()).unwrap();
        explorer.execute(ExploreCommand::Reset, &quiet()).unwrap();
        assert_eq!(explorer.filters(), &ViewFilterState::default());
    }
}
