//! Severity model: ordered log levels and their string forms.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Ordered verbosity classification.
///
/// The derived ordering follows the discriminants, so gating is a plain
/// comparison: a record at `candidate` is emitted iff `candidate >= threshold`.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Lowest level; the most verbose threshold.
    #[default]
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    /// Highest level.
    Fatal = 4,
}

impl Severity {
    /// Every severity, lowest first.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Capitalized label used by the line encoders. Warning is shortened to
    /// `WARN`, the form the zap capital encoders print.
    pub fn capital(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Inverse of [`Severity::as_i32`].
    pub fn from_i32(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_i32() == value)
    }

    /// Whether a record at `self` passes a `threshold` gate.
    pub fn enabled_at(self, threshold: Severity) -> bool {
        self >= threshold
    }

    /// Level-string converter used for configuration values.
    ///
    /// Recognizes `debug`, `info`, `warn`, `error` and `fatal`. Anything else
    /// resolves to [`Severity::Debug`] so a misconfigured level degrades to
    /// maximum verbosity instead of failing.
    pub fn parse_lossy(name: &str) -> Self {
        match name {
            "debug" => Severity::Debug,
            "info" => Severity::Info,
            "warn" => Severity::Warning,
            "error" => Severity::Error,
            "fatal" => Severity::Fatal,
            _ => Severity::Debug,
        }
    }
}

/// Free-function form of [`Severity::parse_lossy`].
pub fn to_level(name: &str) -> Severity {
    Severity::parse_lossy(name)
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    /// Strict parser: accepts both `warn` and `warning`, case-insensitive,
    /// and rejects anything else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(CoreError::unknown_level(s)),
        }
    }
}

impl From<Severity> for i32 {
    fn from(value: Severity) -> Self {
        value.as_i32()
    }
}
