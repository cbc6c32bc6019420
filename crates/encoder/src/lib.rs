//! Field encoder: turns structured messages into sink-ready key/value trees.
//!
//! The walker in [`field`] visits a [`zlog_schema::Message`]'s present fields
//! in declared order and feeds them, typed, into an [`ObjectEncoder`]. The
//! in-memory builder [`Object`] is the encoder every sink uses.

pub mod error;
pub mod field;
pub mod object;
pub mod value;

pub use error::EncodeError;
pub use field::{MAX_DEPTH, MessageMarshaler, encode_message, marshal_message, value_of};
pub use object::{Object, ObjectEncoder, ObjectMarshaler};
pub use value::Value;
