//! In-memory sink for tests/dev.

use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::backend::Sink;
use crate::config::EncoderConfig;
use crate::error::SinkError;
use crate::record::{Entry, Record};

/// Retains every record it receives.
///
/// - No IO
/// - Enrichment follows the given [`EncoderConfig`] (none by default)
/// - Can be told to fail flushes, to exercise error reporting
#[derive(Debug, Default)]
pub struct CaptureSink {
    scope: String,
    encoder: EncoderConfig,
    records: Mutex<Vec<Record>>,
    fail_flush: bool,
    flushes: AtomicUsize,
}

impl CaptureSink {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            ..Self::default()
        }
    }

    /// Capture with the enrichment of `encoder` (caller, stack traces).
    pub fn with_encoder(mut self, encoder: EncoderConfig) -> Self {
        self.encoder = encoder;
        self
    }

    /// Make every `flush` fail.
    pub fn failing_flush(mut self) -> Self {
        self.fail_flush = true;
        self
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Remove and return the captured records.
    pub fn take(&self) -> Vec<Record> {
        self.records
            .lock()
            .map(|mut r| std::mem::take(&mut *r))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `flush` calls so far.
    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

impl Sink for CaptureSink {
    fn name(&self) -> &str {
        &self.scope
    }

    fn log(&self, entry: Entry) {
        let stacktrace = self.encoder.wants_stacktrace(entry.severity);
        let mut record = Record::stamp(entry, &self.scope, stacktrace);
        if !self.encoder.add_caller {
            record.caller = None;
        }

        // If the lock is poisoned the record is dropped; capture is best-effort.
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }

    fn flush(&self) -> Result<(), SinkError> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        if self.fail_flush {
            return Err(SinkError::Flush(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "capture sink configured to fail",
            )));
        }
        Ok(())
    }
}
