//! Strategies that partition orders into capacity-bounded groups.
//!
//! - [`PincodeClusterer`] — exact postal-key grouping, then stable packing
//! - [`GeoClusterer`] — k-means over coordinates, then descending-weight
//!   packing of oversized clusters
//! - [`KMeans`] — seeded Lloyd's k-means used by [`GeoClusterer`]
//!
//! Every strategy is a pure transform: orders in, groups out, with no
//! state kept between calls.

mod geo;
mod kmeans;
mod pincode;

pub use geo::{estimate_cluster_count, GeoClusterer};
pub use kmeans::{KMeans, KMeansOptions, KMeansResult};
pub use pincode::PincodeClusterer;

use crate::config::DEFAULT_SPEED_KMH;
use crate::models::{Batch, Order};
use crate::packing::CapacityLimits;

/// A non-empty set of orders that will become one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderGroup<'a> {
    /// Members, in packing order.
    pub orders: Vec<&'a Order>,
    /// Shared postal key, when the group came from postal grouping.
    pub postal_key: Option<&'a str>,
}

impl<'a> OrderGroup<'a> {
    /// Annotates the group with totals, center and route estimate.
    pub fn into_batch(self, speed_kmh: f64) -> Batch {
        Batch::from_orders(&self.orders, self.postal_key, speed_kmh)
    }

    /// Sum of member weights.
    pub fn total_weight(&self) -> f64 {
        self.orders.iter().map(|o| o.weight()).sum()
    }
}

/// A batching strategy.
///
/// Implementors only decide membership; annotation into [`Batch`] values is
/// shared.
pub trait ClusteringStrategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Splits `orders` into groups. Every order appears in exactly one
    /// non-empty group, and multi-order groups respect `limits`.
    fn partition<'a>(&self, orders: &'a [Order], limits: &CapacityLimits) -> Vec<OrderGroup<'a>>;

    /// Partitions and annotates, timing routes at `speed_kmh`.
    fn cluster_with_speed(
        &self,
        orders: &[Order],
        limits: &CapacityLimits,
        speed_kmh: f64,
    ) -> Vec<Batch> {
        self.partition(orders, limits)
            .into_iter()
            .map(|group| group.into_batch(speed_kmh))
            .collect()
    }

    /// Partitions and annotates at the default speed.
    fn cluster(&self, orders: &[Order], limits: &CapacityLimits) -> Vec<Batch> {
        self.cluster_with_speed(orders, limits, DEFAULT_SPEED_KMH)
    }
}
