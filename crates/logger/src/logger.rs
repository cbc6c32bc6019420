//! Typed logger: leveled logging of structured events.

use std::sync::Arc;

use zlog_core::Severity;
use zlog_encoder::encode_message;
use zlog_schema::Message;
use zlog_sink::{Caller, Entry, Field, Sink, SinkConfig, SinkError};

/// Key holding the encoded event.
pub const EVENT_KEY: &str = "event";

/// Key holding the logger's message kind (Info records only).
pub const KIND_KEY: &str = "kind";

/// Logs structured events to one sink, gated by a fixed threshold.
///
/// A record at `s` is emitted iff `s >= threshold`. The event is encoded as
/// a single nested `event` object. Info records also carry the logger's
/// `kind` tag; the other levels omit it to stay lean.
///
/// Construct once per log stream and share it; it is `Send + Sync` and has
/// no mutable state.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn Sink>,
    kind: String,
    verbosity: Severity,
}

impl Logger {
    pub fn new(sink: Arc<dyn Sink>, kind: impl Into<String>, level: Severity) -> Self {
        Self {
            sink,
            kind: kind.into(),
            verbosity: level,
        }
    }

    /// Logger writing JSON lines to standard output.
    pub fn json(scope: impl Into<String>, kind: impl Into<String>, level: Severity) -> Self {
        Self::new(Arc::new(SinkConfig::json(scope).build()), kind, level)
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, event: &dyn Message) {
        self.emit(Severity::Debug, msg, event, false, Caller::here());
    }

    #[track_caller]
    pub fn info(&self, msg: &str, event: &dyn Message) {
        self.emit(Severity::Info, msg, event, true, Caller::here());
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, event: &dyn Message) {
        self.emit(Severity::Warning, msg, event, false, Caller::here());
    }

    #[track_caller]
    pub fn error(&self, msg: &str, event: &dyn Message) {
        self.emit(Severity::Error, msg, event, false, Caller::here());
    }

    /// Whether a record at `level` would be emitted.
    ///
    /// Check this before building an expensive event.
    pub fn v(&self, level: Severity) -> bool {
        level >= self.verbosity
    }

    /// Flush the sink, returning its error if any.
    pub fn sync(&self) -> Result<(), SinkError> {
        self.sink.flush()
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn verbosity(&self) -> Severity {
        self.verbosity
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    fn emit(
        &self,
        severity: Severity,
        msg: &str,
        event: &dyn Message,
        with_kind: bool,
        caller: Caller,
    ) {
        if !self.v(severity) {
            return;
        }

        let mut entry = Entry::new(severity, msg).with_caller(caller);
        if with_kind {
            entry.fields.push(Field::new(KIND_KEY, self.kind.as_str()));
        }
        entry.fields.push(Field::new(EVENT_KEY, encode_message(event)));
        self.sink.log(entry);
    }
}

impl core::fmt::Debug for Logger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Logger")
            .field("scope", &self.sink.name())
            .field("kind", &self.kind)
            .field("verbosity", &self.verbosity)
            .finish()
    }
}
