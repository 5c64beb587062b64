//! # Error Types
//!
//! Leaf error type for the contract registry. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Top-level error type for the foundational primitives.
#[derive(Error, Debug)]
pub enum CregError {
    /// A value could not be read as a date/time.
    #[error("invalid date-time {0:?}")]
    InvalidTimestamp(String),

    /// A value could not be read as a Guid.
    #[error("invalid Guid {0:?}")]
    InvalidGuid(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
