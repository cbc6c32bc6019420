//! Sink configuration: the shared key naming scheme and the two profiles.
//!
//! Both profiles use the same keys (`timestamp`, `level`, `name`, `message`,
//! `stacktrace`, `caller`) and differ only in how they format them and in
//! whether records are enriched with a caller location and a stack trace.

use std::io::{self, Write};

use chrono::{DateTime, Local, Utc};

use zlog_core::{Color, Severity};

use crate::writer::WriterSink;

/// How the `timestamp` value is rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimeFormat {
    /// Local time, ISO-8601 with milliseconds and numeric offset.
    Iso8601Millis,
    /// Float seconds since the Unix epoch.
    EpochSeconds,
}

impl TimeFormat {
    pub fn render(self, time: &DateTime<Utc>) -> String {
        match self {
            TimeFormat::Iso8601Millis => time
                .with_timezone(&Local)
                .format("%Y-%m-%dT%H:%M:%S%.3f%z")
                .to_string(),
            TimeFormat::EpochSeconds => format!("{}", epoch_seconds(time)),
        }
    }
}

pub(crate) fn epoch_seconds(time: &DateTime<Utc>) -> f64 {
    time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) / 1e9
}

/// How the `level` value is rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LevelFormat {
    /// `INFO`, wrapped in the level's ANSI color.
    CapitalColor,
    /// `INFO`.
    Capital,
    /// `info`.
    Lowercase,
}

impl LevelFormat {
    pub fn render(self, severity: Severity) -> String {
        match self {
            LevelFormat::CapitalColor => level_color(severity).paint(severity.capital()),
            LevelFormat::Capital => severity.capital().to_string(),
            LevelFormat::Lowercase => severity.as_str().to_string(),
        }
    }
}

fn level_color(severity: Severity) -> Color {
    match severity {
        Severity::Debug => Color::Magenta,
        Severity::Info => Color::Blue,
        Severity::Warning => Color::Yellow,
        Severity::Error | Severity::Fatal => Color::Red,
    }
}

/// Field naming and enrichment shared by the encoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    pub time_key: String,
    pub level_key: String,
    pub name_key: String,
    pub message_key: String,
    pub stacktrace_key: String,
    pub caller_key: String,
    pub time_format: TimeFormat,
    pub level_format: LevelFormat,
    /// Render the caller location when the entry carries one.
    pub add_caller: bool,
    /// Force-capture a stack trace at or above this level.
    pub stacktrace_level: Option<Severity>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            time_key: "timestamp".to_string(),
            level_key: "level".to_string(),
            name_key: "name".to_string(),
            message_key: "message".to_string(),
            stacktrace_key: "stacktrace".to_string(),
            caller_key: "caller".to_string(),
            time_format: TimeFormat::Iso8601Millis,
            level_format: LevelFormat::Capital,
            add_caller: false,
            stacktrace_level: None,
        }
    }
}

impl EncoderConfig {
    /// Human-oriented: local ISO time, colored level, short caller, stack
    /// traces at Fatal.
    pub fn console() -> Self {
        Self {
            time_format: TimeFormat::Iso8601Millis,
            level_format: LevelFormat::CapitalColor,
            add_caller: true,
            stacktrace_level: Some(Severity::Fatal),
            ..Self::default()
        }
    }

    /// Machine-oriented: epoch time, plain level, no enrichment.
    pub fn json() -> Self {
        Self {
            time_format: TimeFormat::EpochSeconds,
            level_format: LevelFormat::Capital,
            ..Self::default()
        }
    }

    pub(crate) fn wants_stacktrace(&self, severity: Severity) -> bool {
        self.stacktrace_level.is_some_and(|min| severity >= min)
    }
}

/// Line layout of a sink.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Tab-separated text, fields as trailing JSON.
    Console,
    /// One JSON object per line.
    Json,
}

/// Builder for a [`WriterSink`].
pub struct SinkConfig {
    layout: Layout,
    encoder: EncoderConfig,
    scope: String,
    writer: Box<dyn Write + Send>,
}

impl SinkConfig {
    pub fn console(scope: impl Into<String>) -> Self {
        Self {
            layout: Layout::Console,
            encoder: EncoderConfig::console(),
            scope: scope.into(),
            writer: Box::new(io::stdout()),
        }
    }

    pub fn json(scope: impl Into<String>) -> Self {
        Self {
            layout: Layout::Json,
            encoder: EncoderConfig::json(),
            scope: scope.into(),
            writer: Box::new(io::stdout()),
        }
    }

    /// Replace the destination (standard output by default).
    pub fn writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    pub fn encoder(mut self, encoder: EncoderConfig) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn build(self) -> WriterSink {
        WriterSink::new(self.layout, self.encoder, self.scope, self.writer)
    }
}

impl core::fmt::Debug for SinkConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SinkConfig")
            .field("layout", &self.layout)
            .field("encoder", &self.encoder)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
