//! Batch descriptor produced by the engine.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Order;
use crate::distance::centroid;
use crate::route::RouteEstimator;

/// A group of orders to be delivered together.
///
/// Batches are built fresh on every call and handed to the caller; the
/// engine never persists them.
///
/// # Examples
///
/// ```
/// use order_batcher::models::{Batch, Order};
///
/// let orders = vec![
///     Order::new("a", 12.0, 77.0, 10.0, "560001"),
///     Order::new("b", 12.0, 77.1, 5.0, "560001"),
/// ];
/// let batch = Batch::from_orders(&orders, Some("560001"), 40.0);
/// assert_eq!(batch.total_orders, 2);
/// assert!((batch.total_weight - 15.0).abs() < 1e-10);
/// assert!((batch.center_longitude - 77.05).abs() < 1e-10);
/// assert_eq!(batch.route.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// Freshly generated identifier (UUID v4).
    pub id: String,
    /// Member order ids in packing order.
    pub member_order_ids: Vec<String>,
    /// Member order ids in nearest-neighbor visiting order.
    pub route: Vec<String>,
    /// Sum of member weights (kg).
    pub total_weight: f64,
    /// Number of members.
    pub total_orders: usize,
    /// Mean latitude of the members.
    pub center_latitude: f64,
    /// Mean longitude of the members.
    pub center_longitude: f64,
    /// Nearest-neighbor tour length from the center (km).
    pub estimated_distance_km: f64,
    /// Travel time for `estimated_distance_km` at the configured speed.
    pub estimated_time_minutes: u32,
    /// Shared postal key when the batch came from postal grouping.
    pub postal_key: Option<String>,
}

impl Batch {
    /// Builds a batch from its members, computing totals, the center and the
    /// route estimate.
    ///
    /// Callers pass a non-empty group; the pipeline never produces empty
    /// groups.
    pub fn from_orders<O: Borrow<Order>>(
        orders: &[O],
        postal_key: Option<&str>,
        speed_kmh: f64,
    ) -> Self {
        let (center_latitude, center_longitude) = centroid(orders);
        let plan = RouteEstimator::plan(orders);
        let total_weight = orders.iter().map(|o| o.borrow().weight()).sum();

        Self {
            id: Uuid::new_v4().to_string(),
            member_order_ids: orders.iter().map(|o| o.borrow().id().to_string()).collect(),
            route: plan.sequence,
            total_weight,
            total_orders: orders.len(),
            center_latitude,
            center_longitude,
            estimated_distance_km: plan.distance_km,
            estimated_time_minutes: estimated_minutes(plan.distance_km, speed_kmh),
            postal_key: postal_key.map(str::to_string),
        }
    }

    /// Returns `true` if the batch contains the given order id.
    pub fn contains(&self, order_id: &str) -> bool {
        self.member_order_ids.iter().any(|id| id == order_id)
    }

    /// Travel time for this batch's route at a different average speed.
    pub fn estimated_minutes(&self, speed_kmh: f64) -> u32 {
        estimated_minutes(self.estimated_distance_km, speed_kmh)
    }
}

/// Converts a distance in km to whole minutes at `speed_kmh`.
pub(crate) fn estimated_minutes(distance_km: f64, speed_kmh: f64) -> u32 {
    let hours = distance_km / speed_kmh;
    (hours * 60.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_order_batch() {
        let orders = [Order::new("solo", 12.5, 77.5, 30.0, "560010")];
        let batch = Batch::from_orders(&orders, None, 40.0);
        assert_eq!(batch.member_order_ids, vec!["solo".to_string()]);
        assert_eq!(batch.route, vec!["solo".to_string()]);
        assert_eq!(batch.total_orders, 1);
        assert_eq!(batch.total_weight, 30.0);
        assert_eq!(batch.center_latitude, 12.5);
        assert_eq!(batch.center_longitude, 77.5);
        assert_eq!(batch.estimated_distance_km, 0.0);
        assert_eq!(batch.estimated_time_minutes, 0);
        assert!(batch.postal_key.is_none());
    }

    #[test]
    fn test_batch_from_refs() {
        let a = Order::new("a", 0.0, 0.0, 1.0, "k");
        let b = Order::new("b", 0.0, 1.0, 2.0, "k");
        let group = vec![&a, &b];
        let batch = Batch::from_orders(&group, Some("k"), 40.0);
        assert_eq!(batch.postal_key.as_deref(), Some("k"));
        assert!(batch.contains("a"));
        assert!(batch.contains("b"));
        assert!(!batch.contains("c"));
        assert!(batch.estimated_distance_km > 0.0);
    }

    #[test]
    fn test_batch_ids_are_unique() {
        let orders = [Order::new("a", 0.0, 0.0, 1.0, "k")];
        let first = Batch::from_orders(&orders, None, 40.0);
        let second = Batch::from_orders(&orders, None, 40.0);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_estimated_minutes() {
        // 10 km at 40 km/h = 15 minutes
        assert_eq!(estimated_minutes(10.0, 40.0), 15);
        assert_eq!(estimated_minutes(0.0, 40.0), 0);
        assert_eq!(estimated_minutes(1.0, 60.0), 1);
    }

    #[test]
    fn test_estimated_minutes_other_speed() {
        let orders = [
            Order::new("a", 0.0, 0.0, 1.0, "k"),
            Order::new("b", 0.0, 0.5, 1.0, "k"),
        ];
        let batch = Batch::from_orders(&orders, None, 40.0);
        assert!(batch.estimated_minutes(20.0) >= batch.estimated_time_minutes);
    }
}
