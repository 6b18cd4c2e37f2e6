//! Error types for scan operations

use crate::source::SourceError;

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected scan configuration, caught before any network activity
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// HTTP client construction failed
    #[error("Client error: {0}")]
    Client(String),

    /// A log-source call the scan cannot proceed without failed
    #[error("Log source error: {0}")]
    Source(#[from] SourceError),

    /// Operation cancelled
    #[error("Cancelled")]
    Cancelled,
}
