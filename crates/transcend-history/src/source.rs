//! Log-source capability consumed by the scanner
//!
//! The surrounding application supplies the connection to the chain; the
//! scanner only ever talks to it through this trait so tests can substitute
//! an in-memory source.

use crate::filter::EventFilter;
use crate::window::BlockWindow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use transcend_core::RawRecord;

/// Failure of a single log-source call
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// The call did not complete within its deadline
    #[error("request timed out")]
    Timeout,

    /// The source refused the call due to rate limiting
    #[error("rate limited by the log source")]
    RateLimited,

    /// The call could not reach the source or the source rejected it
    #[error("transport error: {0}")]
    Transport(String),

    /// The source answered with a payload the client could not interpret
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Append-only event log plus the block metadata needed to normalize records
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Current chain head block number
    async fn head_block(&self) -> std::result::Result<u64, SourceError>;

    /// All matches for one filter within one closed block window
    async fn query_logs(
        &self,
        filter: &EventFilter,
        window: &BlockWindow,
    ) -> std::result::Result<Vec<RawRecord>, SourceError>;

    /// Wall-clock time of the given block
    async fn block_timestamp(
        &self,
        block_number: u64,
    ) -> std::result::Result<DateTime<Utc>, SourceError>;
}
