//! Error types for Tollgate.

use thiserror::Error;

/// Main error type for Tollgate operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TollgateError {
    /// A limit that can never be enforced meaningfully
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Tollgate operations.
pub type Result<T> = std::result::Result<T, TollgateError>;
