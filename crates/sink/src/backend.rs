//! The sink boundary.

use std::sync::Arc;

use crate::error::SinkError;
use crate::record::Entry;

/// Destination for finished log entries.
///
/// Implementations stamp the entry with time and scope, format it and write
/// it. They must serialize concurrent writes themselves; loggers call `log`
/// from any thread without locking.
pub trait Sink: Send + Sync {
    /// Scope label embedded at construction.
    fn name(&self) -> &str;

    fn log(&self, entry: Entry);

    /// Drain buffered output. Errors are reported once, never retried.
    fn flush(&self) -> Result<(), SinkError>;
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn log(&self, entry: Entry) {
        (**self).log(entry)
    }

    fn flush(&self) -> Result<(), SinkError> {
        (**self).flush()
    }
}
