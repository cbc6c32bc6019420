//! Core error model.

use thiserror::Error;

/// Result type used by the core crate.
pub type CoreResult<T> = Result<T, CoreError>;

/// Core-level error.
///
/// Raised by strict parsers and the console permission check. The lossy level
/// converter never fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A level name did not match any known severity.
    #[error("unknown level: {0}")]
    UnknownLevel(String),

    #[error("invalid id: {0}")]
    InvalidId(String),

    /// The calling console is not in the method's allow list.
    #[error("access denied: console not allowed")]
    AccessDenied,
}

impl CoreError {
    pub fn unknown_level(name: impl Into<String>) -> Self {
        Self::UnknownLevel(name.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
