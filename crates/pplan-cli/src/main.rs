mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use pplan_config::Config;
use tracing::warn;

fn main() -> Result<()> {
    // Logs go to stderr so plans can be piped
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        // `config init` must not find a file it created itself
        None if matches!(cli.command, cli::Commands::Config(_)) => Config::load_or_default()?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("Could not load config, using defaults: {}", e);
            Config::default()
        }),
    };

    match cli.command {
        cli::Commands::Plan(args) => commands::plan::handle(args, &config),
        cli::Commands::Bench(args) => commands::bench::handle(args, &config),
        cli::Commands::Config(cmd) => commands::config::handle(cmd, &config, cli.config.as_deref()),
    }
}
