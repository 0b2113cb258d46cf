//! Error types for the reporter loop.

use thiserror::Error;

/// Errors surfaced by the reporter loop.
///
/// The data path itself has no failure modes — an empty channel read is
/// a normal "no events yet" outcome. Only sink emission can fail.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("sink error: {reason}")]
    Sink { reason: String },
}
