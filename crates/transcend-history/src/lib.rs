//! Ledger history scanner
//!
//! Reconstructs an account's historical financial events by walking an
//! append-only event log backward across fixed-size block windows, merging
//! heterogeneous event kinds into one time-ordered activity feed while
//! tolerating partial query failures.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assemble;
pub mod cancel;
pub mod client;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod normalize;
pub mod progress;
pub mod scan;
pub mod source;
pub mod window;

pub use assemble::assemble;
pub use cancel::CancelToken;
pub use client::{RpcClient, RpcClientConfig};
pub use error::{Error, Result};
pub use fetch::{fetch, FetchFailure};
pub use filter::{standard_filters, EventFilter};
pub use normalize::normalize_records;
pub use progress::{ScanProgress, ScanStage};
pub use scan::{HistoryScanner, ScanConfig, ScanResult};
pub use source::{LogSource, SourceError};
pub use window::{plan_windows, BlockWindow};
