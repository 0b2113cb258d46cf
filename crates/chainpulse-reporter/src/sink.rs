//! Logging sinks for emitted sync reports.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use chainpulse_core::state::SyncState;
use chainpulse_core::stats::IntervalStats;

use crate::error::ReporterError;

/// One emitted progress report: a drained window plus its classification.
///
/// Constructed immediately before emission and discarded after; the
/// serialized schema is owned by the logging backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncLogRecord {
    /// Derived sync state for the window.
    pub state: SyncState,
    /// The just-drained window statistics.
    pub stats: IntervalStats,
    /// Length of the accumulation window in seconds.
    pub window_secs: u64,
    /// Unix timestamp of when this record was emitted.
    pub emitted_at: i64,
}

impl SyncLogRecord {
    /// Build a record for a drained window.
    pub fn new(state: SyncState, stats: IntervalStats, window: Duration) -> Self {
        Self {
            state,
            stats,
            window_secs: window.as_secs(),
            emitted_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Severity a record was routed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warn,
}

/// Sink for structured progress reports.
///
/// The reporter picks the method: stalled windows go to [`warn`], synced
/// and syncing windows go to [`info`].
///
/// [`info`]: ProgressSink::info
/// [`warn`]: ProgressSink::warn
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Emit a record at informational severity.
    async fn info(&self, record: &SyncLogRecord) -> Result<(), ReporterError>;

    /// Emit a record at warning severity.
    async fn warn(&self, record: &SyncLogRecord) -> Result<(), ReporterError>;
}

// ─── Tracing sink ─────────────────────────────────────────────────────────────

/// Sink that forwards each report to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[async_trait]
impl ProgressSink for TracingSink {
    async fn info(&self, record: &SyncLogRecord) -> Result<(), ReporterError> {
        tracing::info!(
            state = %record.state,
            blocks_applied = record.stats.blocks_applied,
            rollbacks_applied = record.stats.rollbacks_applied,
            chain_index_point = %record.stats.chain_index_point,
            node_point = %record.stats.node_point,
            window_secs = record.window_secs,
            "Sync progress"
        );
        Ok(())
    }

    async fn warn(&self, record: &SyncLogRecord) -> Result<(), ReporterError> {
        tracing::warn!(
            state = %record.state,
            blocks_applied = record.stats.blocks_applied,
            rollbacks_applied = record.stats.rollbacks_applied,
            chain_index_point = %record.stats.chain_index_point,
            node_point = %record.stats.node_point,
            window_secs = record.window_secs,
            "Sync progress"
        );
        Ok(())
    }
}

// ─── In-memory sink (for testing) ─────────────────────────────────────────────

/// In-memory sink for tests and ephemeral inspection.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<(Severity, SyncLogRecord)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, in emission order.
    pub fn records(&self) -> Vec<(Severity, SyncLogRecord)> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressSink for MemorySink {
    async fn info(&self, record: &SyncLogRecord) -> Result<(), ReporterError> {
        self.records
            .lock()
            .unwrap()
            .push((Severity::Info, record.clone()));
        Ok(())
    }

    async fn warn(&self, record: &SyncLogRecord) -> Result<(), ReporterError> {
        self.records
            .lock()
            .unwrap()
            .push((Severity::Warn, record.clone()));
        Ok(())
    }
}
