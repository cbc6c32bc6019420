//! Log entries as handed to a sink, and finished records.

use std::backtrace::Backtrace;
use std::panic::Location;

use chrono::{DateTime, Utc};
use serde::Serialize;

use zlog_core::Severity;
use zlog_encoder::{Object, Value};

/// Source location of a log call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Caller {
    pub file: &'static str,
    pub line: u32,
}

impl Caller {
    /// Location of the nearest `#[track_caller]` boundary.
    #[track_caller]
    pub fn here() -> Self {
        Self::from(Location::caller())
    }

    /// `dir/file.rs:line`, keeping only the last two path components.
    pub fn short(&self) -> String {
        let mut parts = self.file.rsplit(['/', '\\']);
        let file = parts.next().unwrap_or(self.file);
        match parts.next() {
            Some(dir) if !dir.is_empty() => format!("{dir}/{file}:{}", self.line),
            _ => format!("{file}:{}", self.line),
        }
    }
}

impl From<&'static Location<'static>> for Caller {
    fn from(loc: &'static Location<'static>) -> Self {
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }
}

/// One key/value pair attached to a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Attach any serializable value.
    pub fn reflect<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        Self::new(key, Value::reflect(value))
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Field {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// What a logger hands to its sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub severity: Severity,
    pub message: String,
    pub caller: Option<Caller>,
    pub fields: Vec<Field>,
}

impl Entry {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            caller: None,
            fields: Vec::new(),
        }
    }

    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }
}

/// A finished record: an entry stamped by the sink that received it.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub time: DateTime<Utc>,
    pub severity: Severity,
    /// Scope label of the sink.
    pub name: String,
    pub message: String,
    pub caller: Option<Caller>,
    pub stacktrace: Option<String>,
    pub fields: Vec<Field>,
}

impl Record {
    /// Stamp `entry` with the current time and the sink's scope.
    pub(crate) fn stamp(entry: Entry, name: &str, stacktrace: bool) -> Self {
        Self {
            time: Utc::now(),
            severity: entry.severity,
            name: name.to_string(),
            message: entry.message,
            caller: entry.caller,
            stacktrace: stacktrace.then(|| Backtrace::force_capture().to_string()),
            fields: entry.fields,
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.key == key).map(|f| &f.value)
    }

    /// The fields as one ordered object.
    pub fn fields_object(&self) -> Object {
        self.fields
            .iter()
            .map(|f| (f.key.clone(), f.value.clone()))
            .collect()
    }
}
