//! Nearest-neighbor route heuristic.
//!
//! Starting from the batch center, always move to the closest unvisited
//! order. The tour is open: it does not return to the center.
//!
//! # Complexity
//!
//! O(n²) where n = batch size. Batches are capacity-bounded, so n stays
//! small.

use std::borrow::Borrow;

use crate::distance::{centroid, haversine_km};
use crate::models::Order;

/// Visiting order and length of an estimated route.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutePlan {
    /// Order ids in visiting order.
    pub sequence: Vec<String>,
    /// Sum of all legs, starting at the center (km).
    pub distance_km: f64,
}

/// Nearest-neighbor route estimator.
///
/// # Examples
///
/// ```
/// use order_batcher::models::Order;
/// use order_batcher::route::RouteEstimator;
///
/// let orders = vec![
///     Order::new("a", 0.0, 0.0, 1.0, "k"),
///     Order::new("b", 0.0, 0.1, 1.0, "k"),
///     Order::new("c", 0.0, 0.3, 1.0, "k"),
/// ];
/// let plan = RouteEstimator::plan(&orders);
/// assert_eq!(plan.sequence, vec!["b", "a", "c"]);
/// assert!(plan.distance_km > 0.0);
/// assert_eq!(RouteEstimator::estimate_distance(&orders), plan.distance_km);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteEstimator;

impl RouteEstimator {
    /// Builds the nearest-neighbor tour for `orders`.
    ///
    /// Ties go to the order that comes first in `orders`, so the result is
    /// deterministic for a fixed input order. A single order yields a
    /// one-stop plan of length 0; no orders yield an empty plan.
    pub fn plan<O: Borrow<Order>>(orders: &[O]) -> RoutePlan {
        match orders.len() {
            0 => return RoutePlan::default(),
            1 => {
                return RoutePlan {
                    sequence: vec![orders[0].borrow().id().to_string()],
                    distance_km: 0.0,
                }
            }
            _ => {}
        }

        let n = orders.len();
        let mut visited = vec![false; n];
        let mut sequence = Vec::with_capacity(n);
        let mut total = 0.0;
        let mut current = centroid(orders);

        for _ in 0..n {
            let mut best: Option<(usize, f64)> = None;
            for (i, order) in orders.iter().enumerate() {
                if visited[i] {
                    continue;
                }
                let o = order.borrow();
                let d = haversine_km(current.0, current.1, o.latitude(), o.longitude());
                if best.map_or(true, |(_, best_d)| d < best_d) {
                    best = Some((i, d));
                }
            }

            let Some((next, leg)) = best else { break };
            let o = orders[next].borrow();
            visited[next] = true;
            total += leg;
            sequence.push(o.id().to_string());
            current = o.location();
        }

        RoutePlan {
            sequence,
            distance_km: total,
        }
    }

    /// Length of the nearest-neighbor tour in km. Returns 0 for fewer than
    /// two orders.
    pub fn estimate_distance<O: Borrow<Order>>(orders: &[O]) -> f64 {
        Self::plan(orders).distance_km
    }
}
