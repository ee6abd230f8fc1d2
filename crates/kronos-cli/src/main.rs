//! Kronos CLI - Command-line interface for the Kronos correlation graph.

use clap::Parser;
use kronos_cli::cli::ConfigAction;
use kronos_cli::commands;
use kronos_cli::repl;
use kronos_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> kronos_cli::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };

    // A broken config file must not block `config init --force`
    let config = match (&cli.command, Config::load_from(&config_path)) {
        (_, Ok(config)) => config,
        (Command::Config(args), Err(e)) if matches!(args.action, ConfigAction::Init { .. }) => {
            tracing::warn!(error = %e, "Ignoring unreadable configuration");
            Config::default()
        }
        (_, Err(e)) => return Err(e),
    };

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Graph(args) => commands::execute_graph(args, &config, &formatter)?,
        Command::Related(args) => commands::execute_related(args, &config, &formatter).await?,
        Command::View(args) => commands::execute_view(args, &formatter)?,
        Command::Explore(args) => repl::run_explore(args, &config, &formatter)?,
        Command::Config(args) => commands::execute_config(args, &config, &config_path, &formatter)?,
    }

    Ok(())
}
