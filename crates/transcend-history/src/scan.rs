//! Scan orchestration
//!
//! Drives the window planner and the fetcher across the whole lookback range:
//! windows run strictly one after another, the filters within a window run
//! concurrently, and each window's results are merged only once its full
//! fan-out has resolved. Per-filter failures mark the window incomplete and
//! the scan carries on; partial history beats no history.

use crate::assemble::assemble;
use crate::cancel::CancelToken;
use crate::fetch::fetch;
use crate::filter::{standard_filters, EventFilter};
use crate::normalize::normalize_records;
use crate::progress::{ScanProgress, ScanStage};
use crate::source::LogSource;
use crate::window::{plan_windows, BlockWindow};
use crate::{Error, Result};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use transcend_core::{AssetTable, HistoryEntry, RawRecord};
use transcend_params::Network;

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Block-range granularity of one log query
    pub window_size: u64,
    /// Maximum historical depth to reconstruct, in blocks
    pub max_lookback: u64,
    /// Deadline applied to each individual fetch or lookup call
    pub fetch_timeout: Duration,
}

impl ScanConfig {
    /// Configuration matching a network's deployed scan constants
    pub fn for_network(network: &Network) -> Self {
        Self {
            window_size: network.scan_window_size,
            max_lookback: network.max_history_blocks,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Error::Config("window size must be non-zero".to_string()));
        }
        if self.fetch_timeout.is_zero() {
            return Err(Error::Config("fetch timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            window_size: 40_000,
            max_lookback: 500_000,
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

/// Outcome of one scan invocation
///
/// `incomplete_windows` is non-empty exactly when at least one filter query
/// failed and was skipped; the entries are then usable but possibly partial.
/// A quality flag, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Normalized history, most recent first
    pub entries: Vec<HistoryEntry>,
    /// Windows in which at least one filter query failed
    pub incomplete_windows: BTreeSet<BlockWindow>,
}

impl ScanResult {
    /// Whether every planned query succeeded
    pub fn is_complete(&self) -> bool {
        self.incomplete_windows.is_empty()
    }
}

/// One-shot, on-demand history scanner
///
/// Holds the injected log source and the scan parameters. Every `scan` call
/// starts from the current chain head; nothing persists between calls.
pub struct HistoryScanner<S> {
    source: Arc<S>,
    network: Network,
    config: ScanConfig,
    assets: AssetTable,
    progress: ScanProgress,
    cancel: CancelToken,
}

impl<S> HistoryScanner<S>
where
    S: LogSource + 'static,
{
    /// Create a scanner with the network's default configuration
    pub fn new(source: Arc<S>, network: Network) -> Self {
        let config = ScanConfig::for_network(&network);
        Self::with_config(source, network, config)
    }

    /// Create a scanner with custom configuration
    pub fn with_config(source: Arc<S>, network: Network, config: ScanConfig) -> Self {
        let assets = AssetTable::new(network.native_symbol)
            .with_tokens(network.known_tokens.iter().copied());
        Self {
            source,
            network,
            config,
            assets,
            progress: ScanProgress::new(),
            cancel: CancelToken::new(),
        }
    }

    /// Borrow the underlying log source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get progress handle
    pub fn progress(&self) -> ScanProgress {
        self.progress.clone()
    }

    /// Share the cancellation token without borrowing the scanner
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Scan the standard event kinds for one account
    pub async fn scan(&self, account: Address) -> Result<ScanResult> {
        let filters = standard_filters(&self.network, account);
        self.scan_with_filters(&filters).await
    }

    /// Scan an explicit filter set
    pub async fn scan_with_filters(&self, filters: &[EventFilter]) -> Result<ScanResult> {
        self.config.validate()?;

        let head_block = self.source.head_block().await?;
        let windows = plan_windows(head_block, self.config.window_size, self.config.max_lookback)?;
        info!(
            head_block,
            windows = windows.len(),
            filters = filters.len(),
            "starting history scan"
        );
        self.progress.start(windows.len() as u64);

        let mut raw_records: Vec<RawRecord> = Vec::new();
        let mut incomplete_windows = BTreeSet::new();

        for window in windows {
            if self.cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            self.progress.set_current_window(window);

            let mut handles = Vec::with_capacity(filters.len());
            for filter in filters {
                let source = Arc::clone(&self.source);
                let filter = *filter;
                let deadline = self.config.fetch_timeout;
                handles.push(tokio::spawn(async move {
                    fetch(source.as_ref(), window, filter, deadline).await
                }));
            }

            // The window's batch is merged only after the whole fan-out has
            // resolved; nothing else ever writes the accumulator.
            let mut batch = Vec::new();
            for handle in handles {
                match handle.await {
                    Ok(Ok(records)) => batch.extend(records),
                    Ok(Err(failure)) => {
                        warn!(error = %failure, "skipping failed query");
                        incomplete_windows.insert(failure.window);
                    }
                    Err(e) => {
                        warn!(%window, error = %e, "fetch task failed");
                        incomplete_windows.insert(window);
                    }
                }
            }

            debug!(%window, records = batch.len(), "window resolved");
            self.progress.record_window(batch.len() as u64);
            raw_records.extend(batch);
        }

        self.progress.set_stage(ScanStage::Normalizing);
        let entries = normalize_records(&self.source, &self.assets, raw_records).await;
        let entries = assemble(entries);
        self.progress.complete();

        info!(
            entries = entries.len(),
            incomplete = incomplete_windows.len(),
            "history scan finished"
        );
        Ok(ScanResult {
            entries,
            incomplete_windows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let mut config = ScanConfig::default();
        assert!(config.validate().is_ok());

        config.window_size = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.window_size = 1;
        config.fetch_timeout = Duration::ZERO;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_config_for_network() {
        let config = ScanConfig::for_network(&Network::lisk_sepolia());
        assert_eq!(config.window_size, 40_000);
        assert_eq!(config.max_lookback, 500_000);
    }

    #[test]
    fn test_result_completeness_flag() {
        let complete = ScanResult {
            entries: Vec::new(),
            incomplete_windows: BTreeSet::new(),
        };
        assert!(complete.is_complete());

        let mut incomplete = complete.clone();
        incomplete
            .incomplete_windows
            .insert(BlockWindow::new(0, 9));
        assert!(!incomplete.is_complete());
    }
}
