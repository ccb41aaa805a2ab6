//! Postal-key grouping strategy.

use std::collections::HashMap;

use super::{ClusteringStrategy, OrderGroup};
use crate::models::Order;
use crate::packing::{CapacityLimits, CapacityPacker, PackingMode};

/// Groups orders sharing an exact postal key, then packs each group in
/// input order.
///
/// Keys are emitted in first-seen order.
///
/// # Examples
///
/// ```
/// use order_batcher::clustering::{ClusteringStrategy, PincodeClusterer};
/// use order_batcher::models::Order;
/// use order_batcher::packing::CapacityLimits;
///
/// let orders = vec![
///     Order::new("a", 12.97, 77.59, 20.0, "560001"),
///     Order::new("b", 12.97, 77.60, 15.0, "560001"),
///     Order::new("c", 12.98, 77.60, 10.0, "560002"),
/// ];
/// let limits = CapacityLimits::new(25.0, 30).unwrap();
/// let batches = PincodeClusterer.cluster(&orders, &limits);
/// assert_eq!(batches.len(), 3);
/// assert_eq!(batches[2].postal_key.as_deref(), Some("560002"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PincodeClusterer;

impl ClusteringStrategy for PincodeClusterer {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn partition<'a>(&self, orders: &'a [Order], limits: &CapacityLimits) -> Vec<OrderGroup<'a>> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut by_key: Vec<(&'a str, Vec<&'a Order>)> = Vec::new();

        for order in orders {
            let key = order.postal_key();
            match index.get(key) {
                Some(&i) => by_key[i].1.push(order),
                None => {
                    index.insert(key, by_key.len());
                    by_key.push((key, vec![order]));
                }
            }
        }

        let packer = CapacityPacker::new(*limits);
        let groups: Vec<OrderGroup<'a>> = by_key
            .into_iter()
            .flat_map(|(key, members)| {
                packer
                    .pack(&members, PackingMode::Stable)
                    .into_iter()
                    .map(move |orders| OrderGroup {
                        orders,
                        postal_key: Some(key),
                    })
            })
            .collect();

        tracing::debug!(
            postal_keys = index.len(),
            groups = groups.len(),
            "grouped orders by postal key"
        );
        groups
    }
}
