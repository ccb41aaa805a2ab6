//! Route length estimation for a batch.
//!
//! - [`RouteEstimator`] — nearest-neighbor tour from the batch center, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::{RouteEstimator, RoutePlan};
