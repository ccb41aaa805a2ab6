//! Geographic distance helpers.
//!
//! - [`haversine_km`] — great-circle distance between two coordinates
//! - [`route_length`] — length of a polyline of coordinates
//! - [`centroid`] — planar mean position of a group of orders

mod centroid;
mod haversine;

pub use centroid::centroid;
pub use haversine::{haversine_km, route_length, EARTH_RADIUS_KM};
