//! Scan progress tracking

use crate::window::BlockWindow;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Scan stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStage {
    /// Resolving the chain head and planning windows
    Planning,
    /// Querying event logs window by window
    Scanning,
    /// Resolving timestamps and normalizing records
    Normalizing,
    /// Complete
    Complete,
}

impl ScanStage {
    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Planning => "Planning Windows",
            Self::Scanning => "Scanning Blocks",
            Self::Normalizing => "Normalizing Records",
            Self::Complete => "Done",
        }
    }
}

/// Scan progress, cloneable and shared with the caller
#[derive(Debug, Clone)]
pub struct ScanProgress {
    inner: Arc<RwLock<ProgressInner>>,
}

#[derive(Debug)]
struct ProgressInner {
    stage: ScanStage,
    windows_total: u64,
    windows_scanned: u64,
    records_found: u64,
    current_window: Option<BlockWindow>,
    start_time: Option<Instant>,
}

impl ScanProgress {
    /// Create a fresh tracker
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ProgressInner {
                stage: ScanStage::Planning,
                windows_total: 0,
                windows_scanned: 0,
                records_found: 0,
                current_window: None,
                start_time: None,
            })),
        }
    }

    /// Start tracking a scan over the given number of windows
    pub fn start(&self, windows_total: u64) {
        let mut inner = self.inner.write();
        inner.stage = ScanStage::Scanning;
        inner.windows_total = windows_total;
        inner.windows_scanned = 0;
        inner.records_found = 0;
        inner.current_window = None;
        inner.start_time = Some(Instant::now());
    }

    /// Record the window currently being queried
    pub fn set_current_window(&self, window: BlockWindow) {
        self.inner.write().current_window = Some(window);
    }

    /// Record one fully resolved window and the records it contributed
    pub fn record_window(&self, records: u64) {
        let mut inner = self.inner.write();
        inner.windows_scanned += 1;
        inner.records_found += records;
    }

    /// Set stage
    pub fn set_stage(&self, stage: ScanStage) {
        self.inner.write().stage = stage;
    }

    /// Mark as complete
    pub fn complete(&self) {
        let mut inner = self.inner.write();
        inner.stage = ScanStage::Complete;
        inner.current_window = None;
    }

    /// Get current stage
    pub fn stage(&self) -> ScanStage {
        self.inner.read().stage
    }

    /// Check if complete
    pub fn is_complete(&self) -> bool {
        self.inner.read().stage == ScanStage::Complete
    }

    /// Windows fully resolved so far
    pub fn windows_scanned(&self) -> u64 {
        self.inner.read().windows_scanned
    }

    /// Total windows planned for this scan
    pub fn windows_total(&self) -> u64 {
        self.inner.read().windows_total
    }

    /// Raw records accumulated so far
    pub fn records_found(&self) -> u64 {
        self.inner.read().records_found
    }

    /// Window currently in flight, if any
    pub fn current_window(&self) -> Option<BlockWindow> {
        self.inner.read().current_window
    }

    /// Get progress percentage over planned windows
    pub fn percentage(&self) -> f64 {
        let inner = self.inner.read();
        if inner.windows_total == 0 {
            return 0.0;
        }
        (inner.windows_scanned as f64 / inner.windows_total as f64) * 100.0
    }

    /// Get elapsed time
    pub fn elapsed(&self) -> Option<Duration> {
        self.inner.read().start_time.map(|start| start.elapsed())
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let inner = self.inner.read();
        let window = match inner.current_window {
            Some(w) => format!(" | {w}"),
            None => String::new(),
        };
        format!(
            "{} | {}/{} windows | {} records{}",
            inner.stage.name(),
            inner.windows_scanned,
            inner.windows_total,
            inner.records_found,
            window
        )
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}
