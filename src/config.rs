//! Batching configuration.
//!
//! Configuration can be built in code or loaded from TOML.
//!
//! # Example TOML
//! ```toml
//! algorithm = "kmeans"
//! max_weight = 25.0
//! max_orders = 30
//! speed_kmh = 40.0
//!
//! [kmeans]
//! seed = 42
//! restarts = 10
//! max_iterations = 300
//! tolerance = 1e-9
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clustering::KMeansOptions;
use crate::error::{BatchError, Result};
use crate::packing::CapacityLimits;

/// Default per-batch weight ceiling (kg).
pub const DEFAULT_MAX_WEIGHT: f64 = 25.0;

/// Default per-batch order ceiling.
pub const DEFAULT_MAX_ORDERS: usize = 30;

/// Average driving speed assumed for time estimates.
pub const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Batching strategy selector.
///
/// Parsing never fails: `"simple"` selects postal grouping and any other
/// name, recognized or not, selects k-means. Unrecognized names are logged.
///
/// # Examples
///
/// ```
/// use order_batcher::config::Algorithm;
///
/// assert_eq!(Algorithm::parse("simple"), Algorithm::Simple);
/// assert_eq!(Algorithm::parse("kmeans"), Algorithm::KMeans);
/// assert_eq!(Algorithm::parse("dbscan"), Algorithm::KMeans);
/// assert!(!Algorithm::is_recognized("dbscan"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Algorithm {
    /// Seeded k-means over coordinates.
    #[default]
    KMeans,
    /// Exact postal-key grouping.
    Simple,
}

impl Algorithm {
    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::KMeans => "kmeans",
            Algorithm::Simple => "simple",
        }
    }

    /// Returns `true` if `name` is one of the canonical names.
    pub fn is_recognized(name: &str) -> bool {
        name == "kmeans" || name == "simple"
    }

    /// Resolves a strategy name, falling back to [`Algorithm::KMeans`].
    pub fn parse(name: &str) -> Self {
        match name {
            "simple" => Algorithm::Simple,
            "kmeans" => Algorithm::KMeans,
            other => {
                tracing::warn!(algorithm = other, "unrecognized algorithm, using kmeans");
                Algorithm::KMeans
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Algorithm {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for Algorithm {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<Algorithm> for String {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.as_str().to_string()
    }
}

/// Settings for one batching call.
///
/// Missing TOML fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Strategy to run.
    pub algorithm: Algorithm,
    /// Per-batch weight ceiling (kg).
    pub max_weight: f64,
    /// Per-batch order ceiling.
    pub max_orders: usize,
    /// Average speed used for `estimated_time_minutes`.
    pub speed_kmh: f64,
    /// k-means tuning.
    pub kmeans: KMeansOptions,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            max_weight: DEFAULT_MAX_WEIGHT,
            max_orders: DEFAULT_MAX_ORDERS,
            speed_kmh: DEFAULT_SPEED_KMH,
            kmeans: KMeansOptions::default(),
        }
    }
}

impl BatchConfig {
    /// Creates a configuration with the given strategy and limits and
    /// default tuning.
    pub fn new(algorithm: Algorithm, max_weight: f64, max_orders: usize) -> Self {
        Self {
            algorithm,
            max_weight,
            max_orders,
            ..Self::default()
        }
    }

    /// Sets the average speed for time estimates.
    pub fn with_speed_kmh(mut self, speed_kmh: f64) -> Self {
        self.speed_kmh = speed_kmh;
        self
    }

    /// Sets the k-means tuning.
    pub fn with_kmeans(mut self, kmeans: KMeansOptions) -> Self {
        self.kmeans = kmeans;
        self
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::ConfigParse`] if the TOML is malformed.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::ConfigRead`] if the file cannot be read and
    /// [`BatchError::ConfigParse`] if its contents are not valid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Capacity limits derived from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Configuration`] for non-positive limits.
    pub fn limits(&self) -> Result<CapacityLimits> {
        CapacityLimits::new(self.max_weight, self.max_orders)
    }

    /// Checks every setting.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Configuration`] naming the first bad setting.
    pub fn validate(&self) -> Result<()> {
        self.limits()?;
        if !self.speed_kmh.is_finite() || self.speed_kmh <= 0.0 {
            return Err(BatchError::configuration(
                "speed_kmh",
                self.speed_kmh,
                "must be a finite positive number",
            ));
        }
        self.kmeans.validate()
    }
}
