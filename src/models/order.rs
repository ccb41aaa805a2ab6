//! Delivery order type.

use serde::{Deserialize, Serialize};

use crate::error::{BatchError, Result};

/// A pending delivery order awaiting batching.
///
/// Orders are owned by the caller. The engine only reads their id,
/// coordinates, weight and postal key.
///
/// # Examples
///
/// ```
/// use order_batcher::models::Order;
///
/// let order = Order::new("o-1", 12.9716, 77.5946, 20.0, "560001");
/// assert_eq!(order.id(), "o-1");
/// assert_eq!(order.weight(), 20.0);
/// assert_eq!(order.postal_key(), "560001");
/// assert!(order.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: String,
    latitude: f64,
    longitude: f64,
    weight: f64,
    postal_key: String,
}

impl Order {
    /// Creates a new order.
    pub fn new(
        id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        weight: f64,
        postal_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            weight,
            postal_key: postal_key.into(),
        }
    }

    /// Order identifier, unique within one batching call.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// `(latitude, longitude)` pair.
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// Weight in kilograms.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Postal grouping key (pincode).
    pub fn postal_key(&self) -> &str {
        &self.postal_key
    }

    /// Checks that coordinates are finite and in range and that the weight
    /// is a finite positive number.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidOrder`] naming the first broken field.
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(BatchError::invalid_order(
                &self.id,
                format!("latitude {} outside [-90, 90]", self.latitude),
            ));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(BatchError::invalid_order(
                &self.id,
                format!("longitude {} outside [-180, 180]", self.longitude),
            ));
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(BatchError::invalid_order(
                &self.id,
                format!("weight {} must be a positive number", self.weight),
            ));
        }
        Ok(())
    }
}
