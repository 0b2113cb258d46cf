//! chainpulse-reporter — the adaptive sync-progress reporting loop.
//!
//! # Architecture
//!
//! ```text
//! chain-sync loop ──publish──▶ EventSource (broadcast fan-out)
//!                                   │ subscribe()   ← one cursor per reporter
//!                                   ▼
//!                            ProgressReporter (Tokio task)
//!                                   ├── drain: try_next until empty
//!                                   ├── fold:  IntervalStats::combine
//!                                   ├── classify: SyncState::evaluate
//!                                   └── emit:  ProgressSink::{info, warn}
//! ```
//!
//! Each window the reporter drains every pending event, folds the burst
//! into one `IntervalStats`, classifies it, and emits one report. The
//! polling cadence adapts: 30 s while catching up, 300 s once synced or
//! stalled.

pub mod config;
pub mod error;
pub mod reporter;
pub mod sink;
pub mod source;

pub use config::{DelayTier, ReporterConfig};
pub use error::ReporterError;
pub use reporter::ProgressReporter;
pub use sink::{MemorySink, ProgressSink, Severity, SyncLogRecord, TracingSink};
pub use source::{EventSource, EventSubscription};
