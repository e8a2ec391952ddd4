//! Best-fit packing with item splitting
//!
//! Every pack stays open while it has room. Each placement goes to the open
//! pack with the least remaining weight that still takes at least one unit,
//! ties broken by fewer remaining item slots. A new pack is opened only when
//! no open pack accepts the item.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::debug;

use crate::item::Item;
use crate::outcome::{DropLog, DropReason, PackingOutcome};
use crate::pack::{Limits, Pack};
use crate::sequential::RunCaps;
use crate::strategy::PackStrategy;

/// Headroom of one open pack, ordered tightest first
#[derive(Debug, Clone, Copy)]
struct Headroom {
    remaining_weight: f64,
    remaining_items: i64,
    index: usize,
}

impl Headroom {
    /// `None` once the pack cannot take anything more
    fn of(pack: &Pack, index: usize, limits: Limits) -> Option<Self> {
        if pack.is_full(limits.max_items, limits.max_weight) {
            return None;
        }
        Some(Self {
            remaining_weight: pack.remaining_weight(limits.max_weight),
            remaining_items: pack.remaining_items(limits.max_items),
            index,
        })
    }

    fn takes(&self, unit_weight: f64) -> bool {
        self.remaining_items > 0 && self.remaining_weight >= unit_weight
    }
}

impl Ord for Headroom {
    fn cmp(&self, other: &Self) -> Ordering {
        self.remaining_weight
            .total_cmp(&other.remaining_weight)
            .then(self.remaining_items.cmp(&other.remaining_items))
            .then(self.index.cmp(&other.index))
    }
}

impl PartialOrd for Headroom {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Headroom {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Headroom {}

/// Best-fit placement shared by [`BestFitPacker`] and the parallel best-fit workers.
///
/// Packs are opened lazily, so an input with nothing placeable yields no packs.
/// Items heavier than the weight limit are dropped without opening a pack.
pub(crate) fn best_fit<F>(
    items: &[Item],
    limits: Limits,
    caps: RunCaps,
    mut next_number: F,
) -> PackingOutcome
where
    F: FnMut() -> u64,
{
    let mut packs: Vec<Pack> = Vec::new();
    let mut open: BinaryHeap<Reverse<Headroom>> = BinaryHeap::new();
    let mut passed_over: Vec<Reverse<Headroom>> = Vec::new();
    let mut drops = DropLog::default();
    let mut iterations: u64 = 0;

    for item in items {
        if item.quantity() <= 0 {
            continue;
        }
        if item.weight() > limits.max_weight {
            drops.record(item, item.quantity(), DropReason::TooHeavy);
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

            let mut placed = 0;
            while let Some(Reverse(slot)) = open.pop() {
                if slot.takes(item.weight()) {
                    let pack = &mut packs[slot.index];
                    placed = pack.add_partial_item(
                        item.id(),
                        item.length(),
                        remaining,
                        item.weight(),
                        limits.max_items,
                        limits.max_weight,
                    );
                    if placed > 0 {
                        if let Some(updated) = Headroom::of(pack, slot.index, limits) {
                            passed_over.push(Reverse(updated));
                        }
                        break;
                    }
                }
                passed_over.push(Reverse(slot));
            }
            open.extend(passed_over.drain(..));

            if placed > 0 {
                remaining -= placed;
                continue;
            }

            if packs.len() >= caps.max_packs {
                dropped = Some(DropReason::PackLimit);
                break;
            }

            let mut pack = Pack::new(next_number());
            let placed = pack.add_partial_item(
                item.id(),
                item.length(),
                remaining,
                item.weight(),
                limits.max_items,
                limits.max_weight,
            );
            if placed == 0 {
                dropped = Some(DropReason::RejectedByEmptyPack);
                break;
            }

            remaining -= placed;
            let index = packs.len();
            if let Some(slot) = Headroom::of(&pack, index, limits) {
                open.push(Reverse(slot));
            }
            packs.push(pack);
        }

        if remaining > 0 {
            drops.record(item, remaining, dropped.unwrap_or(DropReason::IterationLimit));
        }
    }

    drops.finish(packs)
}

/// Deterministic single-threaded best-fit packer
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFitPacker;

impl BestFitPacker {
    pub fn new() -> Self {
        Self
    }

    /// Pack with already normalized limits, numbering packs from 1
    pub fn run(&self, items: &[Item], limits: Limits) -> PackingOutcome {
        let mut number = 0;
        let outcome = best_fit(items, limits, RunCaps::sequential(items.len()), || {
            number += 1;
            number
        });
        debug!(
            items = items.len(),
            packs = outcome.packs.len(),
            "Best-fit packing finished"
        );
        outcome
    }
}

impl PackStrategy for BestFitPacker {
    fn name(&self) -> String {
        "Best Fit".to_string()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequential::{MAX_ITERATIONS, SequentialPacker};

    fn pack(items: &[Item], max_items: i64, max_weight: f64) -> PackingOutcome {
        BestFitPacker::new().pack_with_report(items, max_items, max_weight)
    }

    fn ids(pack: &Pack) -> Vec<i64> {
        pack.fragments().iter().map(|f| f.id).collect()
    }

    fn counter() -> impl FnMut() -> u64 {
        let mut number = 0;
        move || {
            number += 1;
            number
        }
    }

    #[test]
    fn test_fills_tightest_pack() {
        let items = vec![
            Item::new(1, 10, 1, 6.0),
            Item::new(2, 10, 1, 7.0),
            Item::new(3, 10, 1, 3.0),
            Item::new(4, 10, 1, 4.0),
        ];
        let outcome = pack(&items, 10, 10.0);

        // Item 3 goes to the pack with 3.0 left, leaving 4.0 for item 4
        assert_eq!(outcome.packs.len(), 2);
        assert_eq!(ids(&outcome.packs[0]), vec![1, 4]);
        assert_eq!(ids(&outcome.packs[1]), vec![2, 3]);
        assert_eq!(outcome.packs[0].total_weight(), 10.0);
        assert_eq!(outcome.packs[1].total_weight(), 10.0);

        let first_fit = SequentialPacker::new().pack_items(&items, 10, 10.0);
        assert_eq!(first_fit.len(), 3);
    }

    #[test]
    fn test_headroom_pops_tightest_first() {
        let slot = |remaining_weight, remaining_items, index| {
            Reverse(Headroom {
                remaining_weight,
                remaining_items,
                index,
            })
        };
        let mut heap = BinaryHeap::from(vec![slot(5.0, 3, 0), slot(5.0, 1, 1), slot(2.0, 8, 2)]);

        let mut order = Vec::new();
        while let Some(Reverse(headroom)) = heap.pop() {
            order.push(headroom.index);
        }
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn test_splits_by_item_count() {
        let outcome = pack(&[Item::new(1, 10, 5, 2.0)], 3, 100.0);

        let totals: Vec<i64> = outcome.packs.iter().map(Pack::total_items).collect();
        assert_eq!(totals, vec![3, 2]);
        assert_eq!(outcome.packs[0].number(), 1);
        assert_eq!(outcome.packs[1].number(), 2);
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_zero_weight_only_counts_items() {
        let outcome = pack(&[Item::new(1, 5, 10, 0.0)], 4, 1.0);

        let totals: Vec<i64> = outcome.packs.iter().map(Pack::total_items).collect();
        assert_eq!(totals, vec![4, 4, 2]);
    }

    #[test]
    fn test_too_heavy_item_opens_no_pack() {
        let items = vec![Item::new(1, 1, 2, 1000.0), Item::new(2, 1, 1, 1.0)];
        let outcome = pack(&items, 10, 5.0);

        assert_eq!(outcome.packs.len(), 1);
        assert_eq!(ids(&outcome.packs[0]), vec![2]);
        assert_eq!(outcome.unplaced_by(DropReason::TooHeavy), 2);
    }

    #[test]
    fn test_empty_input_has_no_packs() {
        let outcome = pack(&[], 10, 5.0);
        assert!(outcome.packs.is_empty());
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_normalizes_degenerate_limits() {
        let outcome = pack(&[Item::new(1, 10, 3, 0.0)], 0, -5.0);

        assert_eq!(outcome.packs.len(), 3);
        assert!(outcome.packs.iter().all(|p| p.total_items() == 1));
    }

    #[test]
    fn test_pack_cap_truncates() {
        let caps = RunCaps {
            max_iterations: MAX_ITERATIONS,
            max_packs: 2,
        };
        let outcome = best_fit(
            &[Item::new(1, 10, 10, 1.0)],
            Limits::new(3, 100.0),
            caps,
            counter(),
        );

        assert_eq!(outcome.packs.len(), 2);
        assert_eq!(outcome.placed_quantity(), 6);
        assert_eq!(outcome.unplaced_by(DropReason::PackLimit), 4);
    }

    #[test]
    fn test_iteration_cap_stops_all_further_items() {
        let caps = RunCaps {
            max_iterations: 2,
            max_packs: 100,
        };
        let items = vec![Item::new(1, 10, 10, 1.0), Item::new(2, 10, 4, 1.0)];
        let outcome = best_fit(&items, Limits::new(2, 100.0), caps, counter());

        // Each iteration opens a pack and fills it with 2 units
        assert_eq!(outcome.placed_quantity(), 4);
        assert_eq!(outcome.unplaced_by(DropReason::IterationLimit), 10);
    }

    #[test]
    fn test_is_deterministic() {
        let items: Vec<Item> = (0..300)
            .map(|i| Item::new(i, 100 + i, (i % 11) + 1, (i % 9) as f64 * 0.75 + 0.25))
            .collect();

        let first = pack(&items, 12, 40.0);
        let second = pack(&items, 12, 40.0);
        assert_eq!(first.packs, second.packs);
        assert_eq!(first.placed_quantity(), items.iter().map(Item::quantity).sum::<i64>());
    }
}
