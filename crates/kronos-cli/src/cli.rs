//! CLI command definitions and argument parsing.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use kronos_domain::{CorrelationTier, InteractionType};
use kronos_graph::{PipelineConfig, ViewFilterState};
use std::path::PathBuf;

/// Kronos CLI - Derive and explore telecom correlation graphs.
#[derive(Debug, Parser)]
#[command(name = "kronos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "KRONOS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (numbers only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Derive a correlation graph from interaction records
    Graph(GraphArgs),

    /// Expand a target's related network by cell overlap
    Related(RelatedArgs),

    /// Reload and print an exported graph
    View(ViewArgs),

    /// Explore a derived graph interactively
    Explore(ExploreArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Derivation options shared by `graph` and `explore`.
#[derive(Debug, Clone, Args)]
pub struct DeriveArgs {
    /// JSON file with an array of interaction records
    pub input: PathBuf,

    /// Target number
    #[arg(short, long)]
    pub target: String,

    /// Threshold preset; overrides the configured pipeline section
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Fold same-direction parallel edges into one weighted edge
    #[arg(long)]
    pub merge: bool,

    /// Fail when the target never appears in the records
    #[arg(long)]
    pub strict_target: bool,
}

impl DeriveArgs {
    /// Pipeline configuration after applying the preset and flags
    pub fn pipeline_config(&self, configured: &PipelineConfig) -> PipelineConfig {
        let mut config = match self.preset {
            Some(preset) => preset.into(),
            None => configured.clone(),
        };
        if self.merge {
            config.merge_parallel_edges = true;
        }
        if self.strict_target {
            config.strict_target = true;
        }
        config
    }
}

/// View filter options.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Show only these tiers (repeatable)
    #[arg(long = "tier", value_enum)]
    pub tiers: Vec<TierArg>,

    /// Show only these operators (repeatable)
    #[arg(long = "operator")]
    pub operators: Vec<String>,

    /// Show only these interaction types (repeatable)
    #[arg(long = "type", value_enum)]
    pub types: Vec<TypeArg>,

    /// Minimum interactions per node
    #[arg(long = "min", default_value_t = 1)]
    pub min_interactions: u32,

    /// Hide node labels in exports
    #[arg(long)]
    pub no_labels: bool,

    /// Hide edge directions in exports
    #[arg(long)]
    pub no_directions: bool,
}

impl FilterArgs {
    /// Build the filter state; unset lists keep everything visible
    pub fn to_filter_state(&self) -> crate::Result<ViewFilterState> {
        let mut state = ViewFilterState::default();
        if !self.tiers.is_empty() {
            state = state.with_levels(self.tiers.iter().copied().map(CorrelationTier::from));
        }
        if !self.operators.is_empty() {
            state = state.with_operators(self.operators.iter().cloned());
        }
        if !self.types.is_empty() {
            state = state.with_interaction_types(self.types.iter().copied().map(InteractionType::from));
        }
        state = state
            .with_min_interactions(self.min_interactions)?
            .with_labels(!self.no_labels)
            .with_directions(!self.no_directions);
        Ok(state)
    }
}

/// Arguments for the graph command.
#[derive(Debug, Parser)]
pub struct GraphArgs {
    #[command(flatten)]
    pub derive: DeriveArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Write the filtered graph to this JSON file
    #[arg(short, long)]
    pub export: Option<PathBuf>,
}

/// Arguments for the related command.
#[derive(Debug, Parser)]
pub struct RelatedArgs {
    /// Target number
    pub target: String,

    /// JSON file with correlation results (envelope or bare array)
    #[arg(short, long, conflicts_with = "mission")]
    pub input: Option<PathBuf>,

    /// Mission to analyze on the backend
    #[arg(short, long, requires_all = ["from", "to"])]
    pub mission: Option<String>,

    /// Start of the analyzed period (RFC 3339)
    #[arg(long)]
    pub from: Option<DateTime<Utc>>,

    /// End of the analyzed period (RFC 3339)
    #[arg(long)]
    pub to: Option<DateTime<Utc>>,

    /// Minimum matches requested from the backend
    #[arg(long, default_value_t = 2)]
    pub min_matches: u32,

    /// Backend URL; overrides the configured one
    #[arg(long, env = "KRONOS_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Threshold preset; overrides the configured pipeline section
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Minimum shared cells
    #[arg(long)]
    pub min_shared_cells: Option<usize>,

    /// Minimum occurrences
    #[arg(long)]
    pub min_occurrences: Option<u32>,

    /// Minimum confidence (0.0-1.0)
    #[arg(long)]
    pub min_confidence: Option<f64>,

    /// Cap on admitted members
    #[arg(long)]
    pub max_members: Option<usize>,

    /// Strip leading zeros from cell ids before comparing
    #[arg(long)]
    pub strip_zeros: bool,
}

impl RelatedArgs {
    /// Pipeline configuration after applying the preset and overrides
    pub fn pipeline_config(&self, configured: &PipelineConfig) -> PipelineConfig {
        let mut config = match self.preset {
            Some(preset) => preset.into(),
            None => configured.clone(),
        };
        let related = &mut config.related;
        if let Some(value) = self.min_shared_cells {
            related.min_shared_cells = value;
        }
        if let Some(value) = self.min_occurrences {
            related.min_occurrences = value;
        }
        if let Some(value) = self.min_confidence {
            related.min_confidence = value;
        }
        if self.max_members.is_some() {
            related.max_members = self.max_members;
        }
        if self.strip_zeros {
            related.strip_leading_zeros = true;
        }
        config
    }
}

/// Arguments for the view command.
#[derive(Debug, Parser)]
pub struct ViewArgs {
    /// Export file written by `graph --export` or `explore`
    pub file: PathBuf,
}

/// Arguments for the explore command.
#[derive(Debug, Parser)]
pub struct ExploreArgs {
    #[command(flatten)]
    pub derive: DeriveArgs,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Tier argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum TierArg {
    /// The analyzed number
    Target,
    /// Five or more interactions with the target
    High,
    /// Three or four interactions
    Medium,
    /// One or two interactions
    Low,
    /// No direct interaction with the target
    Indirect,
}

/// Interaction type argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum TypeArg {
    /// Voice calls
    Call,
    /// Data sessions
    Data,
}

/// Threshold preset argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// Default thresholds
    Default,
    /// Higher admission bar, capped related set
    Strict,
    /// Lower admission bar for sparse data
    Lenient,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<TierArg> for CorrelationTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Target => CorrelationTier::Target,
            TierArg::High => CorrelationTier::High,
            TierArg::Medium => CorrelationTier::Medium,
            TierArg::Low => CorrelationTier::Low,
            TierArg::Indirect => CorrelationTier::Indirect,
        }
    }
}

impl From<TypeArg> for InteractionType {
    fn from(kind: TypeArg) -> Self {
        match kind {
            TypeArg::Call => InteractionType::Call,
            TypeArg::Data => InteractionType::Data,
        }
    }
}

impl From<PresetArg> for PipelineConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => PipelineConfig::default(),
            PresetArg::Strict => PipelineConfig::strict(),
            PresetArg::Lenient => PipelineConfig::lenient(),
        }
    }
}
