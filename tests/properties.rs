//! Invariants that hold for any valid input.

use std::collections::HashSet;

use order_batcher::models::{Batch, Order};
use order_batcher::{Algorithm, BatchConfig, BatchOptimizer};
use proptest::prelude::*;

fn order_strategy() -> impl Strategy<Value = (f64, f64, f64, u8)> {
    (12.8f64..13.2, 77.4f64..77.8, 0.5f64..30.0, 0u8..5)
}

fn orders_strategy() -> impl Strategy<Value = Vec<Order>> {
    prop::collection::vec(order_strategy(), 0..60).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (lat, lon, weight, key))| {
                Order::new(format!("o{}", i), lat, lon, weight, format!("5600{:02}", key))
            })
            .collect()
    })
}

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    prop_oneof![Just(Algorithm::KMeans), Just(Algorithm::Simple)]
}

fn run(orders: &[Order], algorithm: Algorithm, max_weight: f64, max_orders: usize) -> Vec<Batch> {
    let config = BatchConfig::new(algorithm, max_weight, max_orders);
    BatchOptimizer::new(config)
        .expect("valid config")
        .create_batches(orders)
        .expect("valid orders")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_order_in_exactly_one_batch(
        orders in orders_strategy(),
        algorithm in algorithm_strategy(),
        max_weight in 5.0f64..60.0,
        max_orders in 1usize..12,
    ) {
        let batches = run(&orders, algorithm, max_weight, max_orders);
        let mut seen = HashSet::new();
        for batch in &batches {
            prop_assert!(!batch.member_order_ids.is_empty());
            prop_assert_eq!(batch.total_orders, batch.member_order_ids.len());
            for id in &batch.member_order_ids {
                prop_assert!(seen.insert(id.clone()), "order {} repeated", id);
            }
        }
        let expected: HashSet<String> = orders.iter().map(|o| o.id().to_string()).collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn weight_is_conserved(
        orders in orders_strategy(),
        algorithm in algorithm_strategy(),
        max_weight in 5.0f64..60.0,
        max_orders in 1usize..12,
    ) {
        let batches = run(&orders, algorithm, max_weight, max_orders);
        let input: f64 = orders.iter().map(|o| o.weight()).sum();
        let output: f64 = batches.iter().map(|b| b.total_weight).sum();
        prop_assert!((input - output).abs() <= 1e-6 * input.max(1.0));
    }

    #[test]
    fn multi_order_batches_respect_limits(
        orders in orders_strategy(),
        algorithm in algorithm_strategy(),
        max_weight in 5.0f64..60.0,
        max_orders in 1usize..12,
    ) {
        let batches = run(&orders, algorithm, max_weight, max_orders);
        for batch in batches.iter().filter(|b| b.total_orders > 1) {
            prop_assert!(batch.total_weight <= max_weight);
            prop_assert!(batch.total_orders <= max_orders);
        }
    }

    #[test]
    fn route_estimates_are_bounded(
        orders in orders_strategy(),
        algorithm in algorithm_strategy(),
    ) {
        let batches = run(&orders, algorithm, 25.0, 30);
        for batch in &batches {
            prop_assert!(batch.estimated_distance_km >= 0.0);
            prop_assert!(batch.estimated_distance_km.is_finite());
            if batch.total_orders == 1 {
                prop_assert_eq!(batch.estimated_distance_km, 0.0);
            }
            let mut route = batch.route.clone();
            let mut members = batch.member_order_ids.clone();
            route.sort();
            members.sort();
            prop_assert_eq!(route, members);
        }
    }

    #[test]
    fn repeated_calls_agree(
        orders in orders_strategy(),
        algorithm in algorithm_strategy(),
    ) {
        let first = run(&orders, algorithm, 25.0, 8);
        let second = run(&orders, algorithm, 25.0, 8);
        let membership = |b: &[Batch]| -> Vec<Vec<String>> {
            b.iter().map(|x| x.member_order_ids.clone()).collect()
        };
        prop_assert_eq!(membership(&first), membership(&second));
    }
}
