//! Sink errors.

use std::io;

use thiserror::Error;

/// Sink-level error.
///
/// Only [`crate::Sink::flush`] returns one to callers. Failures while
/// writing a record are reported through diagnostics and the record dropped.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("flush failed: {0}")]
    Flush(#[source] io::Error),

    #[error("write failed: {0}")]
    Write(#[source] io::Error),

    #[error("record encoding failed: {0}")]
    Encode(String),

    /// A writer lock was poisoned by a panicking thread.
    #[error("sink lock poisoned")]
    Poisoned,
}
