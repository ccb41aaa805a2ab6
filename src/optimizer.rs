//! Entry point: validated orders in, batches out.
//!
//! The pipeline is `validate → partition → pack → annotate`. Nothing
//! survives between calls, so one optimizer can serve concurrent callers.

use std::collections::HashSet;

use crate::clustering::{ClusteringStrategy, GeoClusterer, PincodeClusterer};
use crate::config::{Algorithm, BatchConfig};
use crate::error::{BatchError, Result};
use crate::models::{Batch, Order};
use crate::packing::CapacityLimits;

/// Batch optimizer bound to a validated configuration.
///
/// # Examples
///
/// ```
/// use order_batcher::{Algorithm, BatchConfig, BatchOptimizer};
/// use order_batcher::models::Order;
///
/// let optimizer = BatchOptimizer::new(BatchConfig::new(Algorithm::Simple, 25.0, 30)).unwrap();
/// let orders = vec![
///     Order::new("A", 12.9716, 77.5946, 20.0, "560001"),
///     Order::new("B", 12.9750, 77.5980, 15.0, "560001"),
///     Order::new("C", 12.9800, 77.6000, 10.0, "560002"),
/// ];
/// let batches = optimizer.create_batches(&orders).unwrap();
/// assert_eq!(batches.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct BatchOptimizer {
    config: BatchConfig,
    limits: CapacityLimits,
}

impl BatchOptimizer {
    /// Validates `config` and builds an optimizer.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Configuration`] for unusable settings.
    pub fn new(config: BatchConfig) -> Result<Self> {
        config.validate()?;
        let limits = config.limits()?;
        Ok(Self { config, limits })
    }

    /// The active configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Partitions `orders` into batches.
    ///
    /// Empty input yields no batches. Every order lands in exactly one
    /// batch and multi-order batches respect the capacity limits.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidOrder`] for unusable coordinates or
    /// weights and [`BatchError::DuplicateOrderId`] for repeated ids.
    pub fn create_batches(&self, orders: &[Order]) -> Result<Vec<Batch>> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }
        validate_orders(orders)?;

        let batches = match self.config.algorithm {
            Algorithm::Simple => self.run(&PincodeClusterer, orders),
            Algorithm::KMeans => self.run(&GeoClusterer::new(self.config.kmeans.clone()), orders),
        };

        tracing::info!(
            algorithm = %self.config.algorithm,
            orders = orders.len(),
            batches = batches.len(),
            "created batches"
        );
        Ok(batches)
    }

    fn run<S: ClusteringStrategy>(&self, strategy: &S, orders: &[Order]) -> Vec<Batch> {
        tracing::debug!(
            strategy = strategy.name(),
            max_weight = self.limits.max_weight(),
            max_orders = self.limits.max_orders(),
            "partitioning orders"
        );
        strategy.cluster_with_speed(orders, &self.limits, self.config.speed_kmh)
    }
}

/// One-shot batching with default tuning.
///
/// `algorithm` is resolved with [`Algorithm::parse`]: `"simple"` selects
/// postal grouping and anything else selects k-means.
///
/// # Errors
///
/// Same as [`BatchOptimizer::new`] and [`BatchOptimizer::create_batches`].
///
/// # Examples
///
/// ```
/// use order_batcher::create_batches;
/// use order_batcher::models::Order;
///
/// let orders = vec![Order::new("only", 12.97, 77.59, 3.0, "560001")];
/// let batches = create_batches(&orders, "kmeans", 25.0, 30).unwrap();
/// assert_eq!(batches.len(), 1);
/// assert!(create_batches(&orders, "kmeans", 0.0, 30).is_err());
/// assert!(create_batches(&[], "simple", 25.0, 30).unwrap().is_empty());
/// ```
pub fn create_batches(
    orders: &[Order],
    algorithm: &str,
    max_weight: f64,
    max_orders: usize,
) -> Result<Vec<Batch>> {
    let config = BatchConfig::new(Algorithm::parse(algorithm), max_weight, max_orders);
    BatchOptimizer::new(config)?.create_batches(orders)
}

fn validate_orders(orders: &[Order]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(orders.len());
    for order in orders {
        order.validate()?;
        if !seen.insert(order.id()) {
            return Err(BatchError::DuplicateOrderId {
                id: order.id().to_string(),
            });
        }
    }
    Ok(())
}
