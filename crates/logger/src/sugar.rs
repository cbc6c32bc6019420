//! Sugar: unstructured, formatted logging over the console profile.

use std::fmt;
use std::sync::Arc;

use zlog_core::{Color, Severity};
use zlog_sink::{Caller, Entry, Field, Sink, SinkConfig, SinkError};

/// Plain leveled logger for free-form messages.
///
/// Same gating as [`crate::Logger`], but messages are formatted arguments and
/// extra data is passed as inline key/value fields instead of a structured
/// event.
#[derive(Clone)]
pub struct Sugar {
    sink: Arc<dyn Sink>,
    scope: String,
    verbosity: Severity,
}

impl Sugar {
    /// Console logger on standard output with a green scope label.
    pub fn console(scope: impl Into<String>, level: Severity) -> Self {
        let scope = scope.into();
        let label = if scope.is_empty() {
            String::new()
        } else {
            Color::Green.paint(&scope)
        };
        Self::new(Arc::new(SinkConfig::console(label).build()), scope, level)
    }

    /// Unscoped console logger.
    pub fn default_console(level: Severity) -> Self {
        Self::console("", level)
    }

    /// Sugar over any sink. `scope` is the plain label reported by
    /// [`Sugar::scope`]; the sink keeps its own (possibly decorated) name.
    pub fn new(sink: Arc<dyn Sink>, scope: impl Into<String>, level: Severity) -> Self {
        Self {
            sink,
            scope: scope.into(),
            verbosity: level,
        }
    }

    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, args, Vec::new());
    }

    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Info, args, Vec::new());
    }

    #[track_caller]
    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Warning, args, Vec::new());
    }

    /// Alias of [`Sugar::warning`].
    #[track_caller]
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.warning(args);
    }

    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, args, Vec::new());
    }

    /// Log at Fatal. The process keeps running until the caller invokes
    /// [`FatalExit::exit`] on the returned token.
    #[track_caller]
    pub fn fatal(&self, args: fmt::Arguments<'_>) -> FatalExit {
        self.log(Severity::Fatal, args, Vec::new());
        FatalExit {
            sink: Arc::clone(&self.sink),
        }
    }

    #[track_caller]
    pub fn debug_with<I, F>(&self, msg: &str, fields: I)
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        self.log_with(Severity::Debug, msg, fields);
    }

    #[track_caller]
    pub fn info_with<I, F>(&self, msg: &str, fields: I)
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        self.log_with(Severity::Info, msg, fields);
    }

    #[track_caller]
    pub fn warning_with<I, F>(&self, msg: &str, fields: I)
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        self.log_with(Severity::Warning, msg, fields);
    }

    /// Alias of [`Sugar::warning_with`].
    #[track_caller]
    pub fn warn_with<I, F>(&self, msg: &str, fields: I)
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        self.log_with(Severity::Warning, msg, fields);
    }

    #[track_caller]
    pub fn error_with<I, F>(&self, msg: &str, fields: I)
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        self.log_with(Severity::Error, msg, fields);
    }

    pub fn v(&self, level: Severity) -> bool {
        level >= self.verbosity
    }

    pub fn sync(&self) -> Result<(), SinkError> {
        self.sink.flush()
    }

    /// Scope label without decoration.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn verbosity(&self) -> Severity {
        self.verbosity
    }

    #[track_caller]
    fn log(&self, severity: Severity, args: fmt::Arguments<'_>, fields: Vec<Field>) {
        if !self.v(severity) {
            return;
        }
        // Formatting happens only past the gate.
        let message = render(args);
        let mut entry = Entry::new(severity, message).with_caller(Caller::here());
        entry.fields = fields;
        self.sink.log(entry);
    }

    #[track_caller]
    fn log_with<I, F>(&self, severity: Severity, msg: &str, fields: I)
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        if !self.v(severity) {
            return;
        }
        let fields = fields.into_iter().map(Into::into).collect();
        self.log(severity, format_args!("{msg}"), fields);
    }
}

/// Message placed in a record whose arguments failed to format.
pub const FORMAT_ERROR: &str = "<format error>";

/// Format `args` without panicking on a failing `Display` impl.
fn render(args: fmt::Arguments<'_>) -> String {
    if let Some(s) = args.as_str() {
        return s.to_owned();
    }
    let mut message = String::new();
    match fmt::write(&mut message, args) {
        Ok(()) => message,
        Err(_) => {
            tracing::debug!(partial = %message, "log message failed to format");
            FORMAT_ERROR.to_string()
        }
    }
}

impl fmt::Debug for Sugar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sugar")
            .field("scope", &self.scope)
            .field("verbosity", &self.verbosity)
            .finish()
    }
}

/// Returned by a Fatal log call; terminating is the caller's explicit step.
#[must_use = "call `exit()` to terminate after a fatal log"]
pub struct FatalExit {
    sink: Arc<dyn Sink>,
}

impl FatalExit {
    /// Flush the sink and exit the process with status 1.
    pub fn exit(self) -> ! {
        if let Err(err) = self.sink.flush() {
            tracing::warn!(error = %err, "flush before fatal exit failed");
        }
        std::process::exit(1)
    }
}

impl fmt::Debug for FatalExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FatalExit")
            .field("scope", &self.sink.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use zlog_encoder::Value;
    use zlog_sink::{CaptureSink, EncoderConfig};

    use super::*;

    fn sugar(level: Severity) -> (Arc<CaptureSink>, Sugar) {
        let sink = Arc::new(CaptureSink::new("worker"));
        let sugar = Sugar::new(sink.clone(), "worker", level);
        (sink, sugar)
    }

    #[test]
    fn accessors() {
        let (_, sugar) = sugar(Severity::Info);
        assert_eq!(sugar.scope(), "worker");
        assert_eq!(sugar.verbosity(), Severity::Info);
    }

    #[test]
    fn formats_arguments() {
        let (sink, sugar) = sugar(Severity::Debug);
        sugar.info(format_args!("processed {} jobs in {}ms", 12, 40));
        assert_eq!(sink.records()[0].message, "processed 12 jobs in 40ms");
    }

    #[test]
    fn gated_calls_do_not_format() {
        struct Counting<'a>(&'a Cell<u32>);
        impl fmt::Display for Counting<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.set(self.0.get() + 1);
                f.write_str("x")
            }
        }

        let (sink, sugar) = sugar(Severity::Error);
        let calls = Cell::new(0);
        sugar.debug(format_args!("{}", Counting(&calls)));
        sugar.warning(format_args!("{}", Counting(&calls)));
        assert_eq!(calls.get(), 0);
        assert!(sink.is_empty());

        sugar.error(format_args!("{}", Counting(&calls)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn failing_display_degrades_the_message() {
        struct Broken;
        impl fmt::Display for Broken {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let (sink, sugar) = sugar(Severity::Debug);
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            sugar.info(format_args!("value={}", Broken));
        }));
        assert!(outcome.is_ok());

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, FORMAT_ERROR);
    }

    #[test]
    fn warn_aliases_warning() {
        let (sink, sugar) = sugar(Severity::Debug);
        sugar.warn(format_args!("a"));
        sugar.warning(format_args!("b"));
        sugar.warn_with("c", [("k", 1i32)]);

        let levels: Vec<Severity> = sink.records().iter().map(|r| r.severity).collect();
        assert_eq!(levels, vec![Severity::Warning; 3]);
    }

    #[test]
    fn inline_fields_keep_order() {
        let (sink, sugar) = sugar(Severity::Debug);
        sugar.info_with(
            "job done",
            [Field::new("job", "reindex"), Field::new("took_ms", 40u64), Field::new("ok", true)],
        );

        let record = &sink.records()[0];
        let keys: Vec<&str> = record.fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["job", "took_ms", "ok"]);
        assert_eq!(record.field("took_ms"), Some(&Value::U64(40)));
        assert!(record.field("kind").is_none());
        assert!(record.field("event").is_none());
    }

    #[test]
    fn fatal_logs_and_hands_back_exit_token() {
        let sink = Arc::new(CaptureSink::new("").with_encoder(EncoderConfig::console()));
        let sugar = Sugar::new(sink.clone(), "", Severity::Error);

        let exit = sugar.fatal(format_args!("disk full"));
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Fatal);
        assert!(records[0].stacktrace.is_some());
        assert!(records[0].caller.unwrap().file.ends_with("sugar.rs"));
        // Dropping the token keeps the test process alive.
        drop(exit);
    }

    #[test]
    fn console_constructor_keeps_plain_scope() {
        let sugar = Sugar::console("api", Severity::Info);
        assert_eq!(sugar.scope(), "api");
        assert!(!sugar.v(Severity::Debug));
        assert!(sugar.v(Severity::Info));
    }
}
