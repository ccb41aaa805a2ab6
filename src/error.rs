//! Error types for batch creation.

use thiserror::Error;

/// Errors raised before any clustering work starts.
///
/// Only input validation can fail: once orders and limits are accepted, the
/// partition, packing and annotation stages always produce a result.
#[derive(Debug, Error)]
pub enum BatchError {
    /// A capacity limit or tuning parameter cannot make forward progress.
    #[error("invalid configuration: {field} = {value} ({reason})")]
    Configuration {
        /// Name of the offending setting.
        field: &'static str,
        /// Rendered value that was rejected.
        value: String,
        /// What the setting must satisfy.
        reason: &'static str,
    },

    /// An order carries coordinates or a weight the engine cannot use.
    #[error("invalid order {id}: {reason}")]
    InvalidOrder {
        /// Order identifier.
        id: String,
        /// Which field is broken and how.
        reason: String,
    },

    /// The same order id appears more than once in a single call.
    #[error("duplicate order id {id}")]
    DuplicateOrderId {
        /// The repeated identifier.
        id: String,
    },

    /// A configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// A configuration file is not valid TOML for [`BatchConfig`](crate::BatchConfig).
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl BatchError {
    pub(crate) fn configuration(
        field: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Self::Configuration {
            field,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn invalid_order(id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidOrder {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BatchError>;
