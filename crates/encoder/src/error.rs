//! Encoder-level errors.
//!
//! The field walker swallows these. They surface only as
//! [`crate::Value::Degraded`] sentinels in the output.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("message nesting exceeds depth limit {0}")]
    DepthExceeded(usize),

    #[error("marshal failed: {0}")]
    Marshal(String),
}

impl EncodeError {
    pub fn marshal(msg: impl Into<String>) -> Self {
        Self::Marshal(msg.into())
    }
}
