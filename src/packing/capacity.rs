//! Greedy sequential capacity packing.
//!
//! # Algorithm
//!
//! Walks the orders once, keeping an open group and its running weight. An
//! order that would push the open group past either limit closes it and
//! starts a new group on its own. Orders are never dropped: an order heavier
//! than `max_weight` ends up alone in a group that exceeds the limit.

use crate::error::{BatchError, Result};
use crate::models::Order;

/// Per-batch weight and count ceilings.
///
/// # Examples
///
/// ```
/// use order_batcher::packing::CapacityLimits;
///
/// let limits = CapacityLimits::new(25.0, 30).unwrap();
/// assert!(limits.admits(30, 25.0));
/// assert!(!limits.admits(31, 10.0));
/// assert!(CapacityLimits::new(0.0, 30).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityLimits {
    max_weight: f64,
    max_orders: usize,
}

impl CapacityLimits {
    /// Creates limits after checking both are positive.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Configuration`] if `max_weight` is not a finite
    /// positive number or `max_orders` is zero.
    pub fn new(max_weight: f64, max_orders: usize) -> Result<Self> {
        if !max_weight.is_finite() || max_weight <= 0.0 {
            return Err(BatchError::configuration(
                "max_weight",
                max_weight,
                "must be a finite positive number",
            ));
        }
        if max_orders == 0 {
            return Err(BatchError::configuration(
                "max_orders",
                max_orders,
                "must be at least 1",
            ));
        }
        Ok(Self {
            max_weight,
            max_orders,
        })
    }

    /// Maximum total weight (kg) of a multi-order batch.
    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    /// Maximum number of orders in a batch.
    pub fn max_orders(&self) -> usize {
        self.max_orders
    }

    /// Returns `true` if a group of `count` orders weighing `weight` fits.
    pub fn admits(&self, count: usize, weight: f64) -> bool {
        count <= self.max_orders && weight <= self.max_weight
    }
}

/// Order in which the packer consumes its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackingMode {
    /// Keep the caller's order.
    #[default]
    Stable,
    /// Heaviest first; equal weights keep the caller's relative order.
    DescendingWeight,
}

/// Greedy sequential bin packer.
///
/// # Examples
///
/// ```
/// use order_batcher::models::Order;
/// use order_batcher::packing::{CapacityLimits, CapacityPacker, PackingMode};
///
/// let orders = vec![
///     Order::new("a", 0.0, 0.0, 20.0, "k"),
///     Order::new("b", 0.0, 0.0, 15.0, "k"),
///     Order::new("c", 0.0, 0.0, 5.0, "k"),
/// ];
/// let refs: Vec<&Order> = orders.iter().collect();
/// let packer = CapacityPacker::new(CapacityLimits::new(25.0, 30).unwrap());
///
/// let groups = packer.pack(&refs, PackingMode::Stable);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].len(), 1); // a
/// assert_eq!(groups[1].len(), 2); // b + c
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CapacityPacker {
    limits: CapacityLimits,
}

impl CapacityPacker {
    /// Creates a packer for the given limits.
    pub fn new(limits: CapacityLimits) -> Self {
        Self { limits }
    }

    /// The limits this packer enforces.
    pub fn limits(&self) -> &CapacityLimits {
        &self.limits
    }

    /// Packs `orders` into groups that respect the limits.
    ///
    /// Every input order lands in exactly one non-empty group. Group order
    /// follows the consumption order selected by `mode`.
    pub fn pack<'a>(&self, orders: &[&'a Order], mode: PackingMode) -> Vec<Vec<&'a Order>> {
        let mut sequence = orders.to_vec();
        if mode == PackingMode::DescendingWeight {
            // stable sort: ties keep input order
            sequence.sort_by(|a, b| b.weight().total_cmp(&a.weight()));
        }

        let mut groups = Vec::new();
        let mut current: Vec<&'a Order> = Vec::new();
        let mut current_weight = 0.0;

        for order in sequence {
            let weight = order.weight();
            if !self.limits.admits(current.len() + 1, current_weight + weight) {
                if !current.is_empty() {
                    groups.push(std::mem::take(&mut current));
                }
                if weight > self.limits.max_weight {
                    tracing::warn!(
                        order_id = order.id(),
                        weight,
                        max_weight = self.limits.max_weight,
                        "order exceeds max weight on its own, packing it alone"
                    );
                }
                current.push(order);
                current_weight = weight;
            } else {
                current.push(order);
                current_weight += weight;
            }
        }

        if !current.is_empty() {
            groups.push(current);
        }

        groups
    }
}
