//! Great-circle distance on a spherical Earth.
//!
//! Ignores roads: a straight-line estimate used for route heuristics, not a
//! routed path.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two points in decimal degrees.
///
/// Inputs are expected to be valid degrees. Out-of-range values are not
/// clamped; orders are validated before they reach this function.
///
/// # Examples
///
/// ```
/// use order_batcher::distance::haversine_km;
///
/// let d = haversine_km(0.0, 0.0, 0.0, 1.0);
/// assert!((d - 111.195).abs() < 0.01);
/// ```
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Total length of a polyline: the sum of legs between consecutive
/// `(latitude, longitude)` points.
///
/// Returns 0 for fewer than two points.
///
/// # Examples
///
/// ```
/// use order_batcher::distance::{haversine_km, route_length};
///
/// let points = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)];
/// let expected = haversine_km(0.0, 0.0, 0.0, 1.0) + haversine_km(0.0, 1.0, 1.0, 1.0);
/// assert!((route_length(&points) - expected).abs() < 1e-10);
/// ```
pub fn route_length(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|leg| haversine_km(leg[0].0, leg[0].1, leg[1].0, leg[1].1))
        .sum()
}
