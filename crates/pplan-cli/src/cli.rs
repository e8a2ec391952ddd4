use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pplan_config::OutputFormat;
use pplan_core::StrategyKind;

#[derive(Parser)]
#[command(name = "pplan")]
#[command(about = "Split items into packs under item count and weight limits", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config directory)
    #[arg(long, global = true, env = "PPLAN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan packs for an item list
    Plan(PlanArgs),

    /// Run the throughput benchmark on generated items
    Bench(BenchArgs),

    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args)]
pub struct PlanArgs {
    /// Input file (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Packing strategy: sequential, parallel, best_fit or parallel_best_fit
    #[arg(long)]
    pub strategy: Option<StrategyKind>,

    /// Worker threads for the parallel strategies (0 = all cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Output format: text or json
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Print sort and pack timings
    #[arg(long)]
    pub timing: bool,

    /// Print a BLAKE3 digest of the rendered packs
    #[arg(long)]
    pub digest: bool,
}

#[derive(Args)]
pub struct BenchArgs {
    /// Item counts to benchmark (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub sizes: Vec<usize>,

    /// Only run this strategy
    #[arg(long)]
    pub strategy: Option<StrategyKind>,

    /// Worker threads for the parallel strategies (0 = all cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Seed for the generated items
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format: text or json
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
