//! Result of a packing run, including quantity the packer had to give up on

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::item::Item;
use crate::pack::Pack;

/// Why a quantity was left out of every pack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// A single unit weighs more than the pack weight limit
    TooHeavy,
    /// A freshly opened pack accepted none of the remaining units
    RejectedByEmptyPack,
    /// The run hit its placement iteration cap
    IterationLimit,
    /// The run hit its pack-count cap
    PackLimit,
}

impl DropReason {
    pub const ALL: [DropReason; 4] = [
        DropReason::TooHeavy,
        DropReason::RejectedByEmptyPack,
        DropReason::IterationLimit,
        DropReason::PackLimit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::TooHeavy => "too heavy",
            DropReason::RejectedByEmptyPack => "rejected by empty pack",
            DropReason::IterationLimit => "iteration limit",
            DropReason::PackLimit => "pack limit",
        }
    }
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quantity of one item that no pack received
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unplaced {
    pub id: i64,
    pub quantity: i64,
    pub reason: DropReason,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackingOutcome {
    pub packs: Vec<Pack>,
    pub unplaced: Vec<Unplaced>,
}

impl PackingOutcome {
    pub fn placed_quantity(&self) -> i64 {
        self.packs.iter().map(Pack::total_items).sum()
    }

    pub fn unplaced_quantity(&self) -> i64 {
        self.unplaced.iter().map(|u| u.quantity).sum()
    }

    /// True when every positive input quantity ended up in some pack
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    pub fn unplaced_by(&self, reason: DropReason) -> i64 {
        self.unplaced
            .iter()
            .filter(|u| u.reason == reason)
            .map(|u| u.quantity)
            .sum()
    }
}

/// Collects dropped quantity during one packing run and logs each drop once
#[derive(Debug, Default)]
pub(crate) struct DropLog {
    unplaced: Vec<Unplaced>,
    cap_reported: bool,
}

impl DropLog {
    pub(crate) fn record(&mut self, item: &Item, quantity: i64, reason: DropReason) {
        match reason {
            DropReason::IterationLimit | DropReason::PackLimit => {
                if !self.cap_reported {
                    error!(
                        reason = %reason,
                        id = item.id(),
                        "Packing run hit a safety cap, remaining items are left unplaced"
                    );
                    self.cap_reported = true;
                }
            }
            DropReason::TooHeavy | DropReason::RejectedByEmptyPack => {
                debug!(
                    id = item.id(),
                    quantity,
                    weight = item.weight(),
                    reason = %reason,
                    "Dropping unplaceable quantity"
                );
            }
        }
        self.unplaced.push(Unplaced {
            id: item.id(),
            quantity,
            reason,
        });
    }

    pub(crate) fn finish(self, packs: Vec<Pack>) -> PackingOutcome {
        let outcome = PackingOutcome {
            packs,
            unplaced: self.unplaced,
        };
        if !outcome.is_complete() {
            warn!(
                unplaced = outcome.unplaced_quantity(),
                items = outcome.unplaced.len(),
                "Some item quantity could not be packed"
            );
        }
        outcome
    }
}
