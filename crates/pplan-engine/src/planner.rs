//! Plan orchestration: sort, pack, measure

use std::time::{Duration, Instant};

use pplan_core::{
    DropReason, Limits, Pack, PackStrategy, SortOrder, StrategyKind, Unplaced, create_strategy,
    render_packs,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::input::PlanRequest;

/// Result of planning one request
#[derive(Debug, Clone, Serialize)]
pub struct PlanResult {
    pub strategy: String,
    pub order: SortOrder,
    pub max_items: i64,
    pub max_weight: f64,
    pub packs: Vec<Pack>,
    pub unplaced: Vec<Unplaced>,
    /// Sum of all positive input quantities
    pub total_items: i64,
    pub utilization_percent: f64,
    pub sorting_time: Duration,
    pub packing_time: Duration,
    pub total_time: Duration,
}

impl PlanResult {
    pub fn non_empty_packs(&self) -> impl Iterator<Item = &Pack> {
        self.packs.iter().filter(|p| !p.is_empty())
    }

    pub fn placed_items(&self) -> i64 {
        self.packs.iter().map(Pack::total_items).sum()
    }

    pub fn unplaced_items(&self) -> i64 {
        self.unplaced.iter().map(|u| u.quantity).sum()
    }

    pub fn unplaced_by(&self, reason: DropReason) -> i64 {
        self.unplaced
            .iter()
            .filter(|u| u.reason == reason)
            .map(|u| u.quantity)
            .sum()
    }

    pub fn render(&self) -> String {
        render_packs(&self.packs)
    }

    /// BLAKE3 of the rendered packs. Stable across sequential runs of the same input.
    pub fn digest(&self) -> String {
        blake3::hash(self.render().as_bytes()).to_hex().to_string()
    }
}

/// Weight carried by non-empty packs as a share of their combined capacity
pub fn utilization(packs: &[Pack], max_weight: f64) -> f64 {
    let (weight, count) = packs
        .iter()
        .filter(|p| !p.is_empty())
        .fold((0.0, 0usize), |(weight, count), p| {
            (weight + p.total_weight(), count + 1)
        });

    if count == 0 || max_weight <= 0.0 {
        return 0.0;
    }
    weight / (count as f64 * max_weight) * 100.0
}

pub struct Planner {
    strategy: Box<dyn PackStrategy>,
}

impl Planner {
    pub fn new(strategy: Box<dyn PackStrategy>) -> Self {
        Self { strategy }
    }

    pub fn with_kind(kind: StrategyKind, threads: usize) -> Self {
        Self::new(create_strategy(kind, threads))
    }

    pub fn strategy_name(&self) -> String {
        self.strategy.name()
    }

    pub fn plan(&self, request: PlanRequest) -> PlanResult {
        let PlanRequest {
            order,
            max_items,
            max_weight,
            mut items,
            ..
        } = request;

        let started = Instant::now();

        // 1. Sort
        order.apply(&mut items);
        let sorting_time = started.elapsed();

        // 2. Pack
        let pack_started = Instant::now();
        let outcome = self.strategy.pack_with_report(&items, max_items, max_weight);
        let packing_time = pack_started.elapsed();
        let total_time = started.elapsed();

        // 3. Summarize
        let limits = Limits::new(max_items, max_weight).normalized();
        let total_items: i64 = items.iter().map(|item| item.quantity().max(0)).sum();
        let utilization_percent = utilization(&outcome.packs, limits.max_weight);

        debug!(
            strategy = %self.strategy.name(),
            items = items.len(),
            packs = outcome.packs.len(),
            ?sorting_time,
            ?packing_time,
            "Plan finished"
        );
        if !outcome.is_complete() {
            info!(
                unplaced = outcome.unplaced_quantity(),
                "Plan left some quantity unplaced"
            );
        }

        PlanResult {
            strategy: self.strategy.name(),
            order,
            max_items,
            max_weight,
            packs: outcome.packs,
            unplaced: outcome.unplaced,
            total_items,
            utilization_percent,
            sorting_time,
            packing_time,
            total_time,
        }
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::with_kind(StrategyKind::Sequential, 1)
    }
}

#[cfg(test)]
mod tests {
    use pplan_core::Item;

    use super::*;

    fn sample_items() -> Vec<Item> {
        vec![
            Item::new(1, 200, 5, 2.0),
            Item::new(2, 100, 3, 3.0),
            Item::new(3, 300, 2, 5.0),
            Item::new(4, 150, 4, 1.5),
        ]
    }

    #[test]
    fn test_plan_natural_order() {
        let request = PlanRequest::new(SortOrder::Natural, 10, 25.0, sample_items());
        let result = Planner::default().plan(request);

        // 5*2 + 3*3 + 2*5 = 29 > 25, so the last unit of item 3 spills over
        assert_eq!(result.packs.len(), 2);
        assert_eq!(result.packs[0].total_items(), 9);
        assert_eq!(result.packs[0].total_weight(), 24.0);
        assert_eq!(result.packs[1].total_items(), 5);
        assert_eq!(result.packs[1].total_weight(), 11.0);
        assert_eq!(result.total_items, 14);
        assert!((result.utilization_percent - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_plan_short_to_long() {
        let request = PlanRequest::new(SortOrder::ShortToLong, 10, 25.0, sample_items());
        let result = Planner::default().plan(request);

        assert_eq!(result.packs[0].fragments()[0].length, 100);
        assert_eq!(result.total_items, 14);
    }

    #[test]
    fn test_plan_long_to_short() {
        let request = PlanRequest::new(SortOrder::LongToShort, 10, 25.0, sample_items());
        let result = Planner::default().plan(request);

        assert_eq!(result.packs[0].fragments()[0].length, 300);
        assert_eq!(result.total_items, 14);
    }

    #[test]
    fn test_plan_empty_items() {
        let request = PlanRequest::new(SortOrder::Natural, 10, 25.0, Vec::new());
        let result = Planner::default().plan(request);

        assert_eq!(result.packs.len(), 1);
        assert!(result.packs[0].is_empty());
        assert_eq!(result.total_items, 0);
        assert_eq!(result.utilization_percent, 0.0);
        assert_eq!(result.render(), "");
    }

    #[test]
    fn test_plan_extremely_heavy_item() {
        let request = PlanRequest::new(
            SortOrder::Natural,
            10,
            25.0,
            vec![Item::new(1, 100, 1, 30.0)],
        );
        let result = Planner::default().plan(request);

        assert!(result.packs.iter().all(Pack::is_empty));
        assert_eq!(result.total_items, 1);
        assert_eq!(result.placed_items(), 0);
        assert_eq!(result.unplaced_items(), 1);
        assert_eq!(result.unplaced[0].reason, DropReason::TooHeavy);
        assert_eq!(result.unplaced_by(DropReason::TooHeavy), 1);
        assert_eq!(result.utilization_percent, 0.0);
    }

    #[test]
    fn test_plan_heavy_items_one_per_pack() {
        let items = vec![
            Item::new(1, 100, 1, 20.0),
            Item::new(2, 100, 1, 15.0),
            Item::new(3, 100, 1, 25.0),
        ];
        let request = PlanRequest::new(SortOrder::Natural, 10, 25.0, items);
        let result = Planner::default().plan(request);

        let weights: Vec<f64> = result.packs.iter().map(Pack::total_weight).collect();
        assert_eq!(weights, vec![20.0, 15.0, 25.0]);
    }

    #[test]
    fn test_utilization() {
        let mut half = Pack::new(1);
        half.add_partial_item(1, 10, 5, 1.0, 10, 10.0);
        let mut full = Pack::new(2);
        full.add_partial_item(2, 10, 10, 1.0, 10, 10.0);

        let packs = vec![half, full, Pack::new(3)];
        assert!((utilization(&packs, 10.0) - 75.0).abs() < 1e-9);
        assert_eq!(utilization(&[], 10.0), 0.0);
    }

    #[test]
    fn test_digest_is_stable() {
        let planner = Planner::default();
        let first = planner.plan(PlanRequest::new(SortOrder::Natural, 10, 25.0, sample_items()));
        let second = planner.plan(PlanRequest::new(SortOrder::Natural, 10, 25.0, sample_items()));
        let reordered =
            planner.plan(PlanRequest::new(SortOrder::LongToShort, 10, 25.0, sample_items()));

        assert_eq!(first.digest(), second.digest());
        assert_ne!(first.digest(), reordered.digest());
        assert_eq!(first.digest().len(), 64);
    }

    #[test]
    fn test_strategy_name() {
        assert_eq!(Planner::default().strategy_name(), "Sequential");
        assert_eq!(
            Planner::with_kind(StrategyKind::Parallel, 2).strategy_name(),
            "Parallel(2 threads)"
        );
        assert_eq!(
            Planner::with_kind(StrategyKind::BestFit, 2).strategy_name(),
            "Best Fit"
        );
    }

    #[test]
    fn test_plan_best_fit() {
        let request = PlanRequest::new(SortOrder::Natural, 10, 25.0, sample_items());
        let result = Planner::with_kind(StrategyKind::BestFit, 1).plan(request);

        // Same first pack as first-fit, the spilled unit opens the second
        assert_eq!(result.packs.len(), 2);
        assert_eq!(result.placed_items(), 14);
        assert_eq!(result.unplaced_items(), 0);
        assert!(result.packs.iter().all(|p| p.total_weight() <= 25.0));
    }

    #[test]
    fn test_plan_best_fit_empty_items_has_no_packs() {
        let request = PlanRequest::new(SortOrder::Natural, 10, 25.0, Vec::new());
        let result = Planner::with_kind(StrategyKind::BestFit, 1).plan(request);

        assert!(result.packs.is_empty());
        assert_eq!(result.render(), "");
    }
}
