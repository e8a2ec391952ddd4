//! Parallel packing over contiguous chunks
//!
//! The item list is cut into one contiguous chunk per worker. Each worker runs
//! the same greedy placement as [`SequentialPacker`] (or [`BestFitPacker`]) over
//! its chunk, drawing pack numbers from a shared atomic counter, and appends its
//! packs to the shared result exactly once when it finishes.
//!
//! Packs from different workers appear in completion order, so list order is
//! not deterministic across runs. Pack numbers are unique within a run.

use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use parking_lot::Mutex;
use tracing::{debug, error};

use crate::best_fit::{BestFitPacker, best_fit};
use crate::item::Item;
use crate::outcome::{DropReason, PackingOutcome, Unplaced};
use crate::pack::Limits;
use crate::sequential::{RunCaps, SequentialPacker, first_fit};
use crate::strategy::PackStrategy;

/// Inputs shorter than this are packed sequentially
pub const PARALLEL_THRESHOLD: usize = 5000;

pub const MAX_THREADS: usize = 32;

/// Placement attempts allowed per worker
pub const WORKER_MAX_ITERATIONS: u64 = 500_000;

/// Upper bound on packs a single worker may open
pub const WORKER_MAX_PACKS: usize = 20_000;

/// Upper bound on packs kept from a whole parallel run
pub const MAX_TOTAL_PACKS: usize = 200_000;

impl RunCaps {
    fn worker(chunk_len: usize) -> Self {
        Self {
            max_iterations: WORKER_MAX_ITERATIONS,
            max_packs: WORKER_MAX_PACKS.min(chunk_len / 10 + 500),
        }
    }
}

fn total_pack_cap(item_count: usize) -> usize {
    MAX_TOTAL_PACKS.min(item_count / 5 + 10_000)
}

/// Split `len` elements into `parts` contiguous ranges whose sizes differ by at
/// most one, larger ranges first.
pub fn chunk_ranges(len: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.max(1);
    let base = len / parts;
    let remainder = len % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for index in 0..parts {
        let end = start + base + usize::from(index < remainder);
        ranges.push(start..end);
        start = end;
    }
    ranges
}

/// How each worker places items into its own packs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    FirstFit,
    BestFit,
}

impl Placement {
    fn place<F>(
        self,
        items: &[Item],
        limits: Limits,
        caps: RunCaps,
        next_number: F,
    ) -> PackingOutcome
    where
        F: FnMut() -> u64,
    {
        match self {
            Placement::FirstFit => first_fit(items, limits, caps, next_number),
            Placement::BestFit => best_fit(items, limits, caps, next_number),
        }
    }

    fn run_single(self, items: &[Item], limits: Limits) -> PackingOutcome {
        match self {
            Placement::FirstFit => SequentialPacker::new().run(items, limits),
            Placement::BestFit => BestFitPacker::new().run(items, limits),
        }
    }
}

/// Multi-threaded packer
#[derive(Debug, Clone, Copy)]
pub struct ParallelPacker {
    threads: usize,
    placement: Placement,
}

impl ParallelPacker {
    /// First-fit workers. `threads == 0` uses the host's available parallelism.
    /// The count is clamped to `1..=MAX_THREADS`.
    pub fn new(threads: usize) -> Self {
        Self::with_placement(threads, Placement::FirstFit)
    }

    pub fn with_placement(threads: usize, placement: Placement) -> Self {
        let threads = if threads == 0 {
            thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        } else {
            threads
        };
        Self {
            threads: threads.clamp(1, MAX_THREADS),
            placement,
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Pack with already normalized limits
    pub fn run(&self, items: &[Item], limits: Limits) -> PackingOutcome {
        if items.len() < PARALLEL_THRESHOLD || self.threads == 1 {
            debug!(
                items = items.len(),
                threads = self.threads,
                "Packing sequentially"
            );
            return self.placement.run_single(items, limits);
        }

        let next_number = AtomicU64::new(1);
        let merged = Mutex::new(PackingOutcome::default());
        let total_cap = total_pack_cap(items.len());
        let placement = self.placement;

        thread::scope(|scope| {
            for (worker, range) in chunk_ranges(items.len(), self.threads)
                .into_iter()
                .enumerate()
            {
                let chunk = &items[range];
                let next_number = &next_number;
                let merged = &merged;

                scope.spawn(move || {
                    let caps = RunCaps::worker(chunk.len());
                    let local = placement.place(chunk, limits, caps, || {
                        next_number.fetch_add(1, Ordering::Relaxed)
                    });
                    let local_packs = local.packs.len();

                    let truncated = merge_into(&mut merged.lock(), local, total_cap);

                    if truncated > 0 {
                        error!(worker, truncated, "Pack cap reached, discarding worker packs");
                    }
                    debug!(worker, items = chunk.len(), packs = local_packs, "Worker finished");
                });
            }
        });

        let outcome = merged.into_inner();
        debug!(
            items = items.len(),
            threads = self.threads,
            packs = outcome.packs.len(),
            "Parallel packing finished"
        );
        outcome
    }
}

impl Default for ParallelPacker {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PackStrategy for ParallelPacker {
    fn name(&self) -> String {
        match self.placement {
            Placement::FirstFit => format!("Parallel({} threads)", self.threads),
            Placement::BestFit => format!("Parallel Best Fit({} threads)", self.threads),
        }
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

/// Append a worker's result, keeping at most `cap` packs overall. Fragments of
/// packs that do not fit are reported as unplaced. Returns the number of packs
/// discarded.
fn merge_into(target: &mut PackingOutcome, local: PackingOutcome, cap: usize) -> usize {
    let PackingOutcome {
        mut packs,
        unplaced,
    } = local;

    let room = cap.saturating_sub(target.packs.len());
    let mut truncated = 0;
    if packs.len() > room {
        for pack in packs.drain(room..) {
            truncated += 1;
            target
                .unplaced
                .extend(pack.fragments().iter().map(|fragment| Unplaced {
                    id: fragment.id,
                    quantity: fragment.quantity,
                    reason: DropReason::PackLimit,
                }));
        }
    }

    target.packs.extend(packs);
    target.unplaced.extend(unplaced);
    truncated
}
