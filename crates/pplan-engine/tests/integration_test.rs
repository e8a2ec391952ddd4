use std::collections::{HashMap, HashSet};

use pplan_core::{DropReason, Item, SortOrder, StrategyKind};
use pplan_engine::{PlanRequest, Planner, generate_items, parse_input};

const SAMPLE_INPUT: &str = "NATURAL,40,500.0\n\
                            1001,6200,30,9.653\n\
                            2001,7200,50,11.21\n";

#[test]
fn test_parse_plan_render() {
    let request = parse_input(SAMPLE_INPUT.as_bytes()).unwrap();
    let result = Planner::default().plan(request);

    let expected = "Pack Number: 1\n\
                    1001,6200,30,9.653\n\
                    2001,7200,10,11.210\n\
                    Pack Length: 7200, Pack Weight: 401.69\n\
                    Pack Number: 2\n\
                    2001,7200,40,11.210\n\
                    Pack Length: 7200, Pack Weight: 448.40\n";
    assert_eq!(result.render(), expected);
    assert_eq!(result.total_items, 80);
    assert!(result.unplaced.is_empty());
}

#[test]
fn test_plan_result_serializes_to_json() {
    let request = parse_input(SAMPLE_INPUT.as_bytes()).unwrap();
    let result = Planner::default().plan(request);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["strategy"], "Sequential");
    assert_eq!(json["order"], "NATURAL");
    assert_eq!(json["packs"].as_array().unwrap().len(), 2);
    assert_eq!(json["total_items"], 80);
}

#[test]
fn test_heavy_item_reported_not_rendered() {
    let input = "SHORT_TO_LONG,10,20.0\n1,100,2,5.0\n2,50,3,25.0\n";
    let request = parse_input(input.as_bytes()).unwrap();
    let result = Planner::default().plan(request);

    assert_eq!(result.placed_items(), 2);
    assert_eq!(result.unplaced.len(), 1);
    assert_eq!(result.unplaced[0].id, 2);
    assert_eq!(result.unplaced[0].quantity, 3);
    assert_eq!(result.unplaced[0].reason, DropReason::TooHeavy);
    assert!(!result.render().contains("2,50,"));
}

#[test]
fn test_parallel_plan_keeps_numbers_unique() {
    // Above the parallel threshold, small enough to stay clear of the caps
    let items: Vec<Item> = (0..6000).map(|i| Item::new(i, 100 + i % 50, 1, 1.0)).collect();
    let request = PlanRequest::new(SortOrder::Natural, 40, 500.0, items);
    let result = Planner::with_kind(StrategyKind::Parallel, 4).plan(request);

    let numbers: HashSet<u64> = result.packs.iter().map(|p| p.number()).collect();
    assert_eq!(numbers.len(), result.packs.len());

    let mut placed: HashMap<i64, i64> = HashMap::new();
    for pack in &result.packs {
        assert!(pack.total_items() <= 40);
        for fragment in pack.fragments() {
            *placed.entry(fragment.id).or_insert(0) += fragment.quantity;
        }
    }
    assert_eq!(placed.len(), 6000);
    assert!(placed.values().all(|&q| q == 1));
    assert!(result.unplaced.is_empty());
}

#[test]
fn test_generated_plan_accounts_for_every_unit() {
    let items = generate_items(2000, 48);
    let request = PlanRequest::new(SortOrder::LongToShort, 40, 500.0, items);
    let result = Planner::default().plan(request);

    assert_eq!(
        result.placed_items() + result.unplaced_items(),
        result.total_items
    );
    assert!(result.utilization_percent > 0.0);
}

#[test]
fn test_sequential_digest_repeats() {
    let planner = Planner::default();
    let first = planner.plan(PlanRequest::new(
        SortOrder::ShortToLong,
        40,
        500.0,
        generate_items(500, 48),
    ));
    let second = planner.plan(PlanRequest::new(
        SortOrder::ShortToLong,
        40,
        500.0,
        generate_items(500, 48),
    ));

    assert_eq!(first.digest(), second.digest());
}
