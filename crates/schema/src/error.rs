//! Schema construction errors.

use thiserror::Error;

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Raised while building descriptors or populating a [`crate::DynamicMessage`].
///
/// These are caller-side construction errors. Nothing on the logging path
/// returns them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("message {message} has no field named {field}")]
    UnknownField { message: String, field: String },

    #[error("field {field} expects {expected}, got {actual}")]
    KindMismatch {
        field: String,
        expected: String,
        actual: &'static str,
    },

    #[error("message {message} declares field {field} twice")]
    DuplicateField { message: String, field: String },

    #[error("invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },
}
