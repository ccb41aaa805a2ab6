//! Geographic k-means strategy.
//!
//! # Algorithm
//!
//! 1. Pick `k` as the largest of the distinct postal-key count and the
//!    minimum batch counts implied by the weight and order limits.
//! 2. Run seeded k-means over `(latitude, longitude)`.
//! 3. Keep clusters that fit the limits whole; split the rest with
//!    descending-weight packing.

use std::collections::{HashMap, HashSet};

use super::{ClusteringStrategy, KMeans, KMeansOptions, OrderGroup, PincodeClusterer};
use crate::models::Order;
use crate::packing::{CapacityLimits, CapacityPacker, PackingMode};

/// Cluster count used for k-means, clamped to `[1, orders.len()]`.
///
/// # Examples
///
/// ```
/// use order_batcher::clustering::estimate_cluster_count;
/// use order_batcher::models::Order;
/// use order_batcher::packing::CapacityLimits;
///
/// let orders = vec![
///     Order::new("a", 0.0, 0.0, 20.0, "1"),
///     Order::new("b", 0.0, 0.0, 20.0, "1"),
///     Order::new("c", 0.0, 0.0, 20.0, "1"),
/// ];
/// // 60 kg over 25 kg batches needs at least 3 batches
/// let limits = CapacityLimits::new(25.0, 30).unwrap();
/// assert_eq!(estimate_cluster_count(&orders, &limits), 3);
/// ```
pub fn estimate_cluster_count(orders: &[Order], limits: &CapacityLimits) -> usize {
    if orders.is_empty() {
        return 1;
    }

    let postal_keys = orders
        .iter()
        .map(Order::postal_key)
        .collect::<HashSet<_>>()
        .len();
    let total_weight: f64 = orders.iter().map(Order::weight).sum();
    let by_weight = (total_weight / limits.max_weight()).ceil() as usize;
    let by_count = orders.len().div_ceil(limits.max_orders());

    postal_keys.max(by_weight).max(by_count).clamp(1, orders.len())
}

/// K-means geographic clusterer.
///
/// # Examples
///
/// ```
/// use order_batcher::clustering::{ClusteringStrategy, GeoClusterer};
/// use order_batcher::models::Order;
/// use order_batcher::packing::CapacityLimits;
///
/// let orders = vec![
///     Order::new("a", 12.9716, 77.5946, 15.0, "560001"),
///     Order::new("b", 12.9717, 77.5947, 15.0, "560001"),
///     Order::new("c", 12.9718, 77.5946, 15.0, "560001"),
/// ];
/// let limits = CapacityLimits::new(50.0, 30).unwrap();
/// let batches = GeoClusterer::default().cluster(&orders, &limits);
/// assert_eq!(batches.len(), 1);
/// assert_eq!(batches[0].total_orders, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeoClusterer {
    options: KMeansOptions,
}

impl GeoClusterer {
    /// Creates a clusterer with the given k-means options.
    pub fn new(options: KMeansOptions) -> Self {
        Self { options }
    }

    /// The k-means options in use.
    pub fn options(&self) -> &KMeansOptions {
        &self.options
    }
}

impl ClusteringStrategy for GeoClusterer {
    fn name(&self) -> &'static str {
        "kmeans"
    }

    fn partition<'a>(&self, orders: &'a [Order], limits: &CapacityLimits) -> Vec<OrderGroup<'a>> {
        if orders.len() <= 1 {
            return PincodeClusterer.partition(orders, limits);
        }

        let k = estimate_cluster_count(orders, limits);
        let points: Vec<[f64; 2]> = orders
            .iter()
            .map(|o| [o.latitude(), o.longitude()])
            .collect();
        let fit = KMeans::new(k).with_options(self.options.clone()).fit(&points);
        tracing::debug!(
            k,
            iterations = fit.iterations,
            converged = fit.converged,
            inertia = fit.inertia,
            "k-means finished"
        );

        // labels in discovery order; unused labels never get an entry
        let mut slot: HashMap<usize, usize> = HashMap::new();
        let mut clusters: Vec<Vec<&'a Order>> = Vec::new();
        for (order, &label) in orders.iter().zip(&fit.labels) {
            let i = *slot.entry(label).or_insert_with(|| {
                clusters.push(Vec::new());
                clusters.len() - 1
            });
            clusters[i].push(order);
        }

        let packer = CapacityPacker::new(*limits);
        let mut groups = Vec::with_capacity(clusters.len());
        for (label, members) in clusters.into_iter().enumerate() {
            let weight: f64 = members.iter().map(|o| o.weight()).sum();
            if limits.admits(members.len(), weight) {
                groups.push(OrderGroup {
                    orders: members,
                    postal_key: None,
                });
                continue;
            }

            let parts = packer.pack(&members, PackingMode::DescendingWeight);
            tracing::debug!(
                cluster = label,
                orders = members.len(),
                weight,
                parts = parts.len(),
                "split oversized cluster"
            );
            groups.extend(parts.into_iter().map(|orders| OrderGroup {
                orders,
                postal_key: None,
            }));
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(max_weight: f64, max_orders: usize) -> CapacityLimits {
        CapacityLimits::new(max_weight, max_orders).expect("valid limits")
    }

    fn sorted_members(groups: &[OrderGroup<'_>]) -> Vec<Vec<String>> {
        let mut out: Vec<Vec<String>> = groups
            .iter()
            .map(|g| {
                let mut ids: Vec<String> = g.orders.iter().map(|o| o.id().to_string()).collect();
                ids.sort();
                ids
            })
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_estimate_cluster_count() {
        let orders = [
            Order::new("a", 0.0, 0.0, 1.0, "1"),
            Order::new("b", 0.0, 0.0, 1.0, "2"),
            Order::new("c", 0.0, 0.0, 1.0, "2"),
            Order::new("d", 0.0, 0.0, 1.0, "3"),
        ];
        assert_eq!(estimate_cluster_count(&orders, &limits(25.0, 30)), 3);
        // count bound dominates: ceil(4 / 1)
        assert_eq!(estimate_cluster_count(&orders, &limits(25.0, 1)), 4);
        assert_eq!(estimate_cluster_count(&[], &limits(25.0, 1)), 1);
    }

    #[test]
    fn test_estimate_clamped_to_order_count() {
        let orders = [
            Order::new("a", 0.0, 0.0, 100.0, "1"),
            Order::new("b", 0.0, 0.0, 100.0, "1"),
        ];
        // ceil(200 / 10) = 20 but only 2 orders
        assert_eq!(estimate_cluster_count(&orders, &limits(10.0, 30)), 2);
    }

    #[test]
    fn test_single_order_uses_postal_path() {
        let orders = [Order::new("solo", 12.0, 77.0, 5.0, "560001")];
        let groups = GeoClusterer::default().partition(&orders, &limits(25.0, 30));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].postal_key, Some("560001"));
    }

    #[test]
    fn test_empty() {
        assert!(GeoClusterer::default().partition(&[], &limits(25.0, 30)).is_empty());
    }

    #[test]
    fn test_separates_distant_neighbourhoods() {
        let orders = [
            Order::new("n1", 13.10, 77.60, 5.0, "north"),
            Order::new("s1", 12.80, 77.60, 5.0, "south"),
            Order::new("n2", 13.101, 77.601, 5.0, "north"),
            Order::new("s2", 12.801, 77.601, 5.0, "south"),
        ];
        let groups = GeoClusterer::default().partition(&orders, &limits(25.0, 30));
        assert_eq!(
            sorted_members(&groups),
            vec![vec!["n1".to_string(), "n2".to_string()], vec!["s1".to_string(), "s2".to_string()]]
        );
        assert!(groups.iter().all(|g| g.postal_key.is_none()));
    }

    #[test]
    fn test_splits_oversized_cluster_heaviest_first() {
        // postal keys force k = 2 while one cluster carries 40 kg
        let orders = [
            Order::new("a", 12.9700, 77.5900, 10.0, "x"),
            Order::new("b", 12.9701, 77.5901, 20.0, "x"),
            Order::new("c", 12.9702, 77.5900, 10.0, "x"),
            Order::new("far", 14.0000, 79.0000, 5.0, "y"),
        ];
        let geo = GeoClusterer::default();
        let l = limits(25.0, 30);
        let groups = geo.partition(&orders, &l);
        let members = sorted_members(&groups);
        assert_eq!(members.len(), 3);
        assert!(members.contains(&vec!["far".to_string()]));
        assert!(members.contains(&vec!["b".to_string()]));
        assert!(members.contains(&vec!["a".to_string(), "c".to_string()]));
    }

    #[test]
    fn test_identical_coordinates_terminate() {
        let orders: Vec<Order> = (0..10)
            .map(|i| Order::new(format!("o{}", i), 12.0, 77.0, 10.0, format!("{}", i % 4)))
            .collect();
        let l = limits(25.0, 30);
        let groups = GeoClusterer::default().partition(&orders, &l);
        let total: usize = groups.iter().map(|g| g.orders.len()).sum();
        assert_eq!(total, 10);
        for g in &groups {
            assert!(!g.orders.is_empty());
            if g.orders.len() > 1 {
                assert!(l.admits(g.orders.len(), g.total_weight()));
            }
        }
    }

    #[test]
    fn test_deterministic_membership() {
        let orders: Vec<Order> = (0..25)
            .map(|i| {
                let f = i as f64;
                Order::new(
                    format!("o{}", i),
                    12.9 + (f * 0.37).sin() * 0.1,
                    77.5 + (f * 0.91).cos() * 0.1,
                    1.0 + (i % 5) as f64,
                    format!("{}", i % 3),
                )
            })
            .collect();
        let geo = GeoClusterer::default();
        let l = limits(20.0, 6);
        let ids = |groups: Vec<OrderGroup<'_>>| -> Vec<Vec<String>> {
            groups
                .into_iter()
                .map(|g| g.orders.iter().map(|o| o.id().to_string()).collect())
                .collect()
        };
        assert_eq!(ids(geo.partition(&orders, &l)), ids(geo.partition(&orders, &l)));
    }
}
