//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use kronos_domain::CorrelationTier;
use kronos_graph::{GraphStats, GraphView, PipelineWarning, RelatedSet};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a filtered graph.
    pub fn format_view(&self, view: &GraphView, show_directions: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
            OutputFormat::Table => Ok(self.format_view_table(view, show_directions)),
            OutputFormat::Quiet => Ok(view
                .visible_nodes
                .iter()
                .map(|n| n.id.clone())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_view_table(&self, view: &GraphView, show_directions: bool) -> String {
        if view.is_empty() {
            return self.colorize("No nodes match the current filters.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Number", "Operator", "Interactions", "Tier"]);
        for node in &view.visible_nodes {
            builder.push_record([
                node.id.clone(),
                node.operator.clone(),
                node.interaction_count.to_string(),
                self.tier_label(node.correlation_tier),
            ]);
        }
        let mut nodes = builder.build();
        nodes
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut output = nodes.to_string();

        if !view.visible_edges.is_empty() {
            let arrow = if show_directions { "->" } else { "--" };
            let mut builder = Builder::default();
            builder.push_record(["Edge", "Type", "Cells", "Weight"]);
            for edge in &view.visible_edges {
                builder.push_record([
                    format!("{} {} {}", edge.source, arrow, edge.target),
                    edge.interaction_type.as_str().to_string(),
                    edge.shared_cell_ids.join(", "),
                    edge.weight.to_string(),
                ]);
            }
            let mut edges = builder.build();
            edges
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            output.push('\n');
            output.push_str(&edges.to_string());
        }

        output
    }

    /// "N of M" counts with a per-tier breakdown.
    pub fn format_stats(&self, stats: &GraphStats) -> String {
        let mut line = format!(
            "Showing {} of {} nodes, {} of {} edges",
            stats.visible_nodes, stats.total_nodes, stats.visible_edges, stats.total_edges
        );

        let breakdown: Vec<String> = CorrelationTier::all()
            .into_iter()
            .filter_map(|tier| {
                stats
                    .visible_by_tier
                    .get(&tier)
                    .map(|count| format!("{} {}", count, tier))
            })
            .collect();
        if !breakdown.is_empty() {
            line.push_str(&format!(" ({})", breakdown.join(", ")));
        }

        self.info(&line)
    }

    /// Format a related set with its exclusions.
    pub fn format_related(&self, related: &RelatedSet) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(related)?),
            OutputFormat::Quiet => Ok(related
                .members()
                .iter()
                .map(|m| m.target_number.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => Ok(self.format_related_table(related)),
        }
    }

    fn format_related_table(&self, related: &RelatedSet) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Number", "Operator", "Occurrences", "Confidence", "Cells"]);
        for member in related.members() {
            builder.push_record([
                member.target_number.clone(),
                member.operator.clone(),
                member.occurrences.to_string(),
                format!("{:.2}", member.confidence),
                member.related_cells.join(", "),
            ]);
        }
        let mut members = builder.build();
        members
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut output = format!(
            "{}\n{}",
            members,
            self.info(&format!("{} related number(s)", related.related_count()))
        );

        if !related.exclusions().is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Excluded", "Reason"]);
            for exclusion in related.exclusions() {
                builder.push_record([exclusion.number.clone(), exclusion.reason.to_string()]);
            }
            let mut excluded = builder.build();
            excluded.with(Style::rounded());
            output.push('\n');
            output.push_str(&excluded.to_string());
        }

        output
    }

    /// One line per warning.
    pub fn format_warnings(&self, warnings: &[PipelineWarning]) -> Vec<String> {
        warnings.iter().map(|w| self.warning(&w.to_string())).collect()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Tier name, colored by strength.
    pub fn tier_label(&self, tier: CorrelationTier) -> String {
        let color = match tier {
            CorrelationTier::Target => "magenta",
            CorrelationTier::High => "red",
            CorrelationTier::Medium => "yellow",
            CorrelationTier::Low => "green",
            CorrelationTier::Indirect => "cyan",
        };
        self.colorize(tier.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}
