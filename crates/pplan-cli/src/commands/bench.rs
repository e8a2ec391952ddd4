use anyhow::Result;
use pplan_config::{Config, OutputFormat};
use pplan_core::{SortOrder, StrategyKind};
use pplan_engine::{BenchmarkSettings, format_table, run_benchmark};
use tracing::info;

use crate::cli::BenchArgs;

pub fn handle(args: BenchArgs, config: &Config) -> Result<()> {
    let bench = &config.benchmark;

    let sizes = if args.sizes.is_empty() {
        bench.sizes.clone()
    } else {
        args.sizes
    };
    if sizes.is_empty() {
        anyhow::bail!("No benchmark sizes given");
    }

    let strategies = match args.strategy {
        Some(kind) => vec![kind],
        None => StrategyKind::ALL.to_vec(),
    };

    let settings = BenchmarkSettings {
        sizes,
        strategies,
        orders: SortOrder::ALL.to_vec(),
        threads: args.threads.unwrap_or(config.threads),
        seed: args.seed.unwrap_or(bench.seed),
        max_items: bench.max_items,
        max_weight: bench.max_weight,
    };

    info!(
        "Running benchmark: sizes {:?}, seed {}, limits {} items / {} weight",
        settings.sizes, settings.seed, settings.max_items, settings.max_weight
    );
    let report = run_benchmark(&settings);

    match args.format.unwrap_or(config.output.format) {
        OutputFormat::Text => print!("{}", format_table(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
