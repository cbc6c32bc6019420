//! Structured-message schema model.
//!
//! Describes messages the way protocol-buffer schemas do: ordered, named,
//! numbered fields with a closed set of kinds, optionally repeated or mapped,
//! and nested messages. The [`Message`] trait is the read-only view the field
//! encoder walks.

pub mod descriptor;
pub mod error;
pub mod kind;
pub mod message;
pub mod value;

pub use descriptor::{FieldDescriptor, MessageDescriptor, MessageDescriptorBuilder, Presence};
pub use error::{SchemaError, SchemaResult};
pub use kind::{FieldKind, Kind};
pub use message::{DynamicMessage, Message};
pub use value::{MapKey, Value};
