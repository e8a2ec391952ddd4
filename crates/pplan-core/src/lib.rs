//! Core domain models and packing logic for pplan
//!
//! This crate contains:
//! - Domain models (Item, Fragment, Pack)
//! - Packing strategies (first-fit and best-fit with splitting, sequential or parallel)
//! - Unplaced-quantity accounting for every packing run

pub mod best_fit;
pub mod error;
pub mod item;
pub mod outcome;
pub mod pack;
pub mod parallel;
pub mod render;
pub mod sequential;
pub mod sort;
pub mod strategy;

pub use best_fit::BestFitPacker;
pub use error::{CoreError, Result};
pub use item::{Fragment, Item};
pub use outcome::{DropReason, PackingOutcome, Unplaced};
pub use pack::{Limits, Pack};
pub use parallel::{ParallelPacker, Placement};
pub use render::render_packs;
pub use sequential::SequentialPacker;
pub use sort::SortOrder;
pub use strategy::{PackStrategy, StrategyKind, create_strategy};
