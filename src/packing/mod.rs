//! Capacity-bounded grouping of orders.
//!
//! - [`CapacityPacker`] — greedy sequential bin packing, O(n) (O(n log n)
//!   in descending-weight mode)

mod capacity;

pub use capacity::{CapacityLimits, CapacityPacker, PackingMode};
