//! Planar mean of order coordinates.
//!
//! Averages latitude and longitude directly instead of computing a spherical
//! centroid. The error grows near the poles and the result is wrong for
//! groups that straddle the antimeridian (mean of 179 and -179 is 0).

use std::borrow::Borrow;

use crate::models::Order;

/// Arithmetic-mean `(latitude, longitude)` of the given orders.
///
/// Returns `(0.0, 0.0)` for an empty slice. That sentinel is also a real
/// location (equator, prime meridian); pipeline groups are never empty.
///
/// # Examples
///
/// ```
/// use order_batcher::distance::centroid;
/// use order_batcher::models::Order;
///
/// let orders = vec![
///     Order::new("a", 10.0, 20.0, 1.0, "k"),
///     Order::new("b", 12.0, 24.0, 1.0, "k"),
/// ];
/// assert_eq!(centroid(&orders), (11.0, 22.0));
/// assert_eq!(centroid::<Order>(&[]), (0.0, 0.0));
/// ```
pub fn centroid<O: Borrow<Order>>(orders: &[O]) -> (f64, f64) {
    if orders.is_empty() {
        return (0.0, 0.0);
    }

    let (lat_sum, lon_sum) = orders.iter().fold((0.0, 0.0), |(lat, lon), o| {
        let o = o.borrow();
        (lat + o.latitude(), lon + o.longitude())
    });
    let n = orders.len() as f64;

    (lat_sum / n, lon_sum / n)
}
