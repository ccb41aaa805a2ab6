//! # order-batcher
//!
//! Groups pending delivery orders into geographically coherent,
//! capacity-bounded batches and estimates each batch's route length.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Order, Batch)
//! - [`distance`] — Haversine distance, polyline length, centroid
//! - [`route`] — Nearest-neighbor route estimate
//! - [`packing`] — Greedy capacity packing
//! - [`clustering`] — Postal-key and k-means batching strategies
//! - [`config`] — Configuration and TOML loading
//! - [`error`] — Error type
//!
//! Distances are great-circle estimates, not routed road paths.
//!
//! ```
//! use order_batcher::create_batches;
//! use order_batcher::models::Order;
//!
//! let orders = vec![
//!     Order::new("A", 12.9716, 77.5946, 20.0, "560001"),
//!     Order::new("B", 12.9750, 77.5980, 15.0, "560001"),
//!     Order::new("C", 12.9800, 77.6000, 10.0, "560002"),
//! ];
//! let batches = create_batches(&orders, "simple", 25.0, 30).unwrap();
//! assert_eq!(batches.len(), 3);
//! ```

pub mod clustering;
pub mod config;
pub mod distance;
pub mod error;
pub mod models;
pub mod optimizer;
pub mod packing;
pub mod route;

pub use config::{Algorithm, BatchConfig};
pub use error::{BatchError, Result};
pub use optimizer::{create_batches, BatchOptimizer};
