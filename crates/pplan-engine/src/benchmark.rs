//! Throughput benchmark over generated item lists

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use pplan_core::{DropReason, Item, SortOrder, StrategyKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};

use crate::input::PlanRequest;
use crate::planner::Planner;

pub const DEFAULT_SEED: u64 = 48;
pub const DEFAULT_MAX_ITEMS: i64 = 40;
pub const DEFAULT_MAX_WEIGHT: f64 = 500.0;

/// First id handed out by [`generate_items`]
pub const FIRST_ID: i64 = 1000;

/// Deterministic item list: 70% light items, 30% heavy ones.
pub fn generate_items(size: usize, seed: u64) -> Vec<Item> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..size)
        .map(|i| {
            let length = rng.random_range(500..=10_000);
            let quantity = rng.random_range(10..=100);
            let weight = if i % 10 < 7 {
                rng.random_range(0.5..6.0)
            } else {
                rng.random_range(6.1..30.0)
            };
            Item::new(FIRST_ID + i as i64, length, quantity, weight)
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct BenchmarkSettings {
    pub sizes: Vec<usize>,
    pub strategies: Vec<StrategyKind>,
    pub orders: Vec<SortOrder>,
    /// Parallel worker count, 0 = available parallelism
    pub threads: usize,
    pub seed: u64,
    pub max_items: i64,
    pub max_weight: f64,
}

impl Default for BenchmarkSettings {
    fn default() -> Self {
        Self {
            sizes: vec![100_000, 1_000_000],
            strategies: StrategyKind::ALL.to_vec(),
            orders: SortOrder::ALL.to_vec(),
            threads: 0,
            seed: DEFAULT_SEED,
            max_items: DEFAULT_MAX_ITEMS,
            max_weight: DEFAULT_MAX_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkResult {
    pub size: usize,
    pub strategy: String,
    pub order: SortOrder,
    pub sorting_time: Duration,
    pub packing_time: Duration,
    pub total_time: Duration,
    pub items_per_second: u64,
    pub total_packs: usize,
    pub utilization_percent: f64,
    pub unplaced_items: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub results: Vec<BenchmarkResult>,
    pub elapsed: Duration,
}

/// Throughput over placed units only, so runs cut short by a cap do not look faster
fn items_per_second(placed_items: i64, elapsed: Duration) -> u64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 || placed_items <= 0 {
        return 0;
    }
    (placed_items as f64 / secs) as u64
}

/// Run every strategy × order × size combination. Each size is generated once
/// and cloned per run so every combination sees the same items.
pub fn run_benchmark(settings: &BenchmarkSettings) -> BenchmarkReport {
    let started = Instant::now();
    let datasets: Vec<(usize, Vec<Item>)> = settings
        .sizes
        .iter()
        .map(|&size| (size, generate_items(size, settings.seed)))
        .collect();

    let mut results = Vec::new();
    for &kind in &settings.strategies {
        let planner = Planner::with_kind(kind, settings.threads);
        for &order in &settings.orders {
            for (size, items) in &datasets {
                let request = PlanRequest::new(
                    order,
                    settings.max_items,
                    settings.max_weight,
                    items.clone(),
                );
                let plan = planner.plan(request);
                let unplaced_items = plan.unplaced_items();

                info!(
                    strategy = %plan.strategy,
                    order = order.short_label(),
                    size,
                    packs = plan.packs.len(),
                    "Benchmark run finished"
                );
                if unplaced_items > 0 {
                    warn!(
                        strategy = %plan.strategy,
                        order = order.short_label(),
                        size,
                        unplaced = unplaced_items,
                        iteration_limit = plan.unplaced_by(DropReason::IterationLimit),
                        pack_limit = plan.unplaced_by(DropReason::PackLimit),
                        "Benchmark run left quantity unplaced"
                    );
                }

                results.push(BenchmarkResult {
                    size: *size,
                    strategy: plan.strategy.clone(),
                    order,
                    sorting_time: plan.sorting_time,
                    packing_time: plan.packing_time,
                    total_time: plan.total_time,
                    items_per_second: items_per_second(plan.placed_items(), plan.total_time),
                    total_packs: plan.packs.len(),
                    utilization_percent: plan.utilization_percent,
                    unplaced_items,
                });
            }
        }
    }

    BenchmarkReport {
        results,
        elapsed: started.elapsed(),
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Fixed-width results table, one row per run
pub fn format_table(report: &BenchmarkReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<32} {:<6} {:>10} {:>10} {:>10} {:>12} {:>8} {:>7} {:>10}",
        "Size",
        "Strategy",
        "Order",
        "Sort(ms)",
        "Pack(ms)",
        "Total(ms)",
        "Items/sec",
        "Packs",
        "Util%",
        "Unplaced"
    );
    let _ = writeln!(out, "{}", "-".repeat(124));

    for r in &report.results {
        let _ = writeln!(
            out,
            "{:<10} {:<32} {:<6} {:>10.3} {:>10.3} {:>10.3} {:>12} {:>8} {:>6.1}% {:>10}",
            r.size,
            r.strategy,
            r.order.short_label(),
            millis(r.sorting_time),
            millis(r.packing_time),
            millis(r.total_time),
            r.items_per_second,
            r.total_packs,
            r.utilization_percent,
            r.unplaced_items,
        );
    }

    let _ = writeln!(
        out,
        "\nTotal benchmark execution: {:.3} ms",
        millis(report.elapsed)
    );
    out
}
