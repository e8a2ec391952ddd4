//! Sequential first-fit packing with item splitting
//!
//! One pack is open at a time. Each item's quantity is poured into the open
//! pack until it refuses more, then a new pack is opened and the rest of the
//! item follows. Items are never reordered.

use tracing::debug;

use crate::item::Item;
use crate::outcome::{DropLog, DropReason, PackingOutcome};
use crate::pack::{Limits, Pack};
use crate::strategy::PackStrategy;

/// Placement attempts allowed in one sequential run
pub const MAX_ITERATIONS: u64 = 1_000_000;

/// Upper bound on packs a sequential run may open
pub const MAX_PACKS: usize = 100_000;

/// Safety caps for one packing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunCaps {
    pub max_iterations: u64,
    pub max_packs: usize,
}

impl RunCaps {
    pub(crate) fn sequential(item_count: usize) -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            max_packs: MAX_PACKS.min(item_count / 10 + 1000),
        }
    }
}

/// Greedy placement shared by the sequential packer and every parallel worker.
///
/// `next_number` is called once per opened pack, including the first one,
/// which is opened before any item is looked at.
pub(crate) fn first_fit<F>(
    items: &[Item],
    limits: Limits,
    caps: RunCaps,
    mut next_number: F,
) -> PackingOutcome
where
    F: FnMut() -> u64,
{
    let capacity = (items.len() / 450 + 16).clamp(16, caps.max_packs.max(16));
    let mut packs = Vec::with_capacity(capacity);
    let mut drops = DropLog::default();
    let mut iterations: u64 = 0;

    packs.push(Pack::new(next_number()));

    for item in items {
        if item.quantity() <= 0 {
            continue;
        }

        let mut remaining = item.quantity();
        let mut dropped = None;

        while remaining > 0 {
            iterations += 1;
            if iterations > caps.max_iterations {
                dropped = Some(DropReason::IterationLimit);
                break;
            }

            let Some(current) = packs.last_mut() else {
                break;
            };
            let placed = current.add_partial_item(
                item.id(),
                item.length(),
                remaining,
                item.weight(),
                limits.max_items,
                limits.max_weight,
            );

            if placed > 0 {
                remaining -= placed;
                continue;
            }

            if item.weight() > limits.max_weight {
                dropped = Some(DropReason::TooHeavy);
                break;
            }
            if current.is_empty() {
                dropped = Some(DropReason::RejectedByEmptyPack);
                break;
            }
            if packs.len() >= caps.max_packs {
                dropped = Some(DropReason::PackLimit);
                break;
            }

            packs.push(Pack::new(next_number()));
        }

        if remaining > 0 {
            drops.record(item, remaining, dropped.unwrap_or(DropReason::IterationLimit));
        }
    }

    drops.finish(packs)
}

/// Deterministic single-threaded first-fit packer
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialPacker;

impl SequentialPacker {
    pub fn new() -> Self {
        Self
    }

    /// Pack with already normalized limits, numbering packs from 1
    pub fn run(&self, items: &[Item], limits: Limits) -> PackingOutcome {
        let mut number = 0;
        let outcome = first_fit(items, limits, RunCaps::sequential(items.len()), || {
            number += 1;
            number
        });
        debug!(
            items = items.len(),
            packs = outcome.packs.len(),
            "Sequential packing finished"
        );
        outcome
    }
}

impl PackStrategy for SequentialPacker {
    fn name(&self) -> String {
        "Sequential".to_string()
    }

    fn pack_with_report(
        &self,
        items: &[Item],
        max_items: i64,
        max_weight: f64,
    ) -> PackingOutcome {
        self.run(items, Limits::new(max_items, max_weight).normalized())
    }
}
