//! Packing strategy contract

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::best_fit::BestFitPacker;
use crate::error::CoreError;
use crate::item::Item;
use crate::outcome::PackingOutcome;
use crate::pack::Pack;
use crate::parallel::{ParallelPacker, Placement};
use crate::sequential::SequentialPacker;

/// Turns a list of items into a list of packs under a count and weight limit
pub trait PackStrategy: Send + Sync {
    /// Human readable name, used in logs and benchmark tables
    fn name(&self) -> String;

    /// Pack `items` and report any quantity that could not be placed
    fn pack_with_report(&self, items: &[Item], max_items: i64, max_weight: f64)
    -> PackingOutcome;

    fn pack_items(&self, items: &[Item], max_items: i64, max_weight: f64) -> Vec<Pack> {
        self.pack_with_report(items, max_items, max_weight).packs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Sequential,
    Parallel,
    BestFit,
    ParallelBestFit,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Sequential,
        StrategyKind::Parallel,
        StrategyKind::BestFit,
        StrategyKind::ParallelBestFit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Sequential => "sequential",
            StrategyKind::Parallel => "parallel",
            StrategyKind::BestFit => "best_fit",
            StrategyKind::ParallelBestFit => "parallel_best_fit",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "sequential" | "blocking" => Ok(StrategyKind::Sequential),
            "parallel" => Ok(StrategyKind::Parallel),
            "best_fit" | "blocking_best_fit" => Ok(StrategyKind::BestFit),
            "parallel_best_fit" => Ok(StrategyKind::ParallelBestFit),
            _ => Err(CoreError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Build a strategy. `threads` only matters for the parallel variants, where 0
/// means the host's available parallelism.
pub fn create_strategy(kind: StrategyKind, threads: usize) -> Box<dyn PackStrategy> {
    match kind {
        StrategyKind::Sequential => Box::new(SequentialPacker::new()),
        StrategyKind::Parallel => Box::new(ParallelPacker::new(threads)),
        StrategyKind::BestFit => Box::new(BestFitPacker::new()),
        StrategyKind::ParallelBestFit => {
            Box::new(ParallelPacker::with_placement(threads, Placement::BestFit))
        }
    }
}
