//! Single-query event fetching
//!
//! One call issues exactly one query against the log source; there is no
//! retry here. Retry policy, if any, belongs to the caller, and a failed
//! query is returned as data rather than raised, so one bad filter/window
//! pair can never abort a whole scan.

use crate::filter::EventFilter;
use crate::source::{LogSource, SourceError};
use crate::window::BlockWindow;
use std::time::Duration;
use transcend_core::RawRecord;

/// One failed (window, filter) query and its cause
#[derive(Debug, Clone, thiserror::Error)]
#[error("query {filter:?} on {window} failed: {cause}")]
pub struct FetchFailure {
    /// Window the failed query covered
    pub window: BlockWindow,
    /// Filter the failed query carried
    pub filter: EventFilter,
    /// Underlying cause
    pub cause: SourceError,
}

/// Query one filter over one window, bounded by a deadline
///
/// Every returned record is stamped with the filter's kind, so downstream
/// stages can dispatch without re-deriving it. A call that outlives the
/// deadline resolves as a timeout failure instead of blocking the scan.
pub async fn fetch<S>(
    source: &S,
    window: BlockWindow,
    filter: EventFilter,
    deadline: Duration,
) -> std::result::Result<Vec<RawRecord>, FetchFailure>
where
    S: LogSource + ?Sized,
{
    let result = tokio::time::timeout(deadline, source.query_logs(&filter, &window)).await;
    match result {
        Ok(Ok(mut records)) => {
            for record in &mut records {
                record.kind = filter.kind;
            }
            Ok(records)
        }
        Ok(Err(cause)) => Err(FetchFailure {
            window,
            filter,
            cause,
        }),
        Err(_) => Err(FetchFailure {
            window,
            filter,
            cause: SourceError::Timeout,
        }),
    }
}
