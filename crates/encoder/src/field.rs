//! Field walker.
//!
//! Walks a message's present fields in declared order and emits each one
//! into an [`ObjectEncoder`]:
//!
//! - list fields become one [`Value::Array`] of per-element values
//! - map fields become one [`Value::Map`] keyed by the key's string form
//! - scalars go through the matching typed `add_*` call
//! - nested messages become nested objects
//! - anything else (group kinds, values that do not match their declared
//!   kind) is attached opaquely
//!
//! Nothing here returns an error to the logging caller. Nesting deeper than
//! [`MAX_DEPTH`] is replaced by a [`Value::Degraded`] sentinel.

use std::collections::BTreeMap;

use zlog_schema::{FieldDescriptor, FieldKind, Kind, Message, Value as FieldValue};

use crate::error::EncodeError;
use crate::object::{Object, ObjectEncoder, ObjectMarshaler};
use crate::value::Value;

/// Maximum message nesting depth, matching the protobuf default recursion
/// limit.
pub const MAX_DEPTH: usize = 100;

/// Adapts a message to [`ObjectMarshaler`] so it can be nested with
/// [`ObjectEncoder::add_object`].
pub struct MessageMarshaler<'a> {
    message: &'a dyn Message,
    depth: usize,
}

impl<'a> MessageMarshaler<'a> {
    pub fn new(message: &'a dyn Message) -> Self {
        Self { message, depth: 0 }
    }

    fn nested(message: &'a dyn Message, depth: usize) -> Self {
        Self { message, depth }
    }
}

impl ObjectMarshaler for MessageMarshaler<'_> {
    fn marshal_object(&self, enc: &mut dyn ObjectEncoder) -> Result<(), EncodeError> {
        walk(enc, self.message, self.depth)
    }
}

/// Emit every present field of `msg` into `enc`. Best effort; never fails.
pub fn marshal_message(enc: &mut dyn ObjectEncoder, msg: &dyn Message) {
    if let Err(err) = walk(enc, msg, 0) {
        tracing::debug!(
            msg_type = msg.descriptor().full_name(),
            error = %err,
            "message encoding degraded"
        );
    }
}

/// Encode `msg` into a fresh [`Object`].
pub fn encode_message(msg: &dyn Message) -> Object {
    let mut obj = Object::new();
    marshal_message(&mut obj, msg);
    obj
}

fn walk(enc: &mut dyn ObjectEncoder, msg: &dyn Message, depth: usize) -> Result<(), EncodeError> {
    if depth > MAX_DEPTH {
        return Err(EncodeError::DepthExceeded(MAX_DEPTH));
    }

    msg.for_each_field(&mut |field, value| {
        add_field(enc, field, value, depth);
        true
    });
    Ok(())
}

fn add_field(
    enc: &mut dyn ObjectEncoder,
    field: &FieldDescriptor,
    value: &FieldValue,
    depth: usize,
) {
    let key = field.name();
    match (field.kind(), value) {
        (FieldKind::List(kind), FieldValue::List(items)) => {
            let arr = items.iter().map(|v| value_at(kind, v, depth)).collect();
            let _ = enc.add_reflected(key, Value::Array(arr));
        }
        (FieldKind::Map { value: kind, .. }, FieldValue::Map(entries)) => {
            let map: BTreeMap<String, Value> = entries
                .iter()
                .map(|(k, v)| (k.to_string(), value_at(kind, v, depth)))
                .collect();
            let _ = enc.add_reflected(key, Value::Map(map));
        }
        (FieldKind::Singular(kind), v) => add_scalar(enc, key, kind, v, depth),
        (kind, v) => {
            tracing::debug!(
                field = key,
                kind = %kind,
                value = v.type_name(),
                "shape mismatch, attaching opaquely"
            );
            let _ = enc.add_reflected(key, opaque(v, depth));
        }
    }
}

fn add_scalar(
    enc: &mut dyn ObjectEncoder,
    key: &str,
    kind: Kind,
    value: &FieldValue,
    depth: usize,
) {
    match (kind, value) {
        (Kind::String, FieldValue::String(s)) => enc.add_string(key, s),
        (Kind::Int32 | Kind::Sint32 | Kind::Sfixed32, FieldValue::I32(n)) => enc.add_i32(key, *n),
        (Kind::Int64 | Kind::Sint64 | Kind::Sfixed64, FieldValue::I64(n)) => enc.add_i64(key, *n),
        (Kind::Uint32 | Kind::Fixed32, FieldValue::U32(n)) => enc.add_u32(key, *n),
        (Kind::Uint64 | Kind::Fixed64, FieldValue::U64(n)) => enc.add_u64(key, *n),
        (Kind::Float, FieldValue::F32(n)) => enc.add_f32(key, *n),
        (Kind::Double, FieldValue::F64(n)) => enc.add_f64(key, *n),
        (Kind::Bool, FieldValue::Bool(b)) => enc.add_bool(key, *b),
        (Kind::Bytes, FieldValue::Bytes(b)) => enc.add_binary(key, b),
        (Kind::Enum, FieldValue::Enum(n)) => enc.add_i32(key, *n),
        (Kind::Message, FieldValue::Message(m)) => {
            let _ = enc.add_object(key, &MessageMarshaler::nested(m, depth + 1));
        }
        (kind, v) => {
            if kind != Kind::Group {
                tracing::debug!(
                    field = key,
                    kind = %kind,
                    value = v.type_name(),
                    "kind mismatch, attaching opaquely"
                );
            }
            let _ = enc.add_reflected(key, opaque(v, depth));
        }
    }
}

/// Encoded form of a single list element or map value of `kind`.
pub fn value_of(kind: Kind, value: &FieldValue) -> Value {
    value_at(kind, value, 0)
}

fn value_at(kind: Kind, value: &FieldValue, depth: usize) -> Value {
    match (kind, value) {
        (Kind::String, FieldValue::String(s)) => Value::String(s.clone()),
        (Kind::Int32 | Kind::Sint32 | Kind::Sfixed32, FieldValue::I32(n)) => Value::I32(*n),
        (Kind::Int64 | Kind::Sint64 | Kind::Sfixed64, FieldValue::I64(n)) => Value::I64(*n),
        (Kind::Uint32 | Kind::Fixed32, FieldValue::U32(n)) => Value::U32(*n),
        (Kind::Uint64 | Kind::Fixed64, FieldValue::U64(n)) => Value::U64(*n),
        (Kind::Float, FieldValue::F32(n)) => Value::F32(*n),
        (Kind::Double, FieldValue::F64(n)) => Value::F64(*n),
        (Kind::Bool, FieldValue::Bool(b)) => Value::Bool(*b),
        (Kind::Bytes, FieldValue::Bytes(b)) => Value::Binary(b.clone()),
        (Kind::Enum, FieldValue::Enum(n)) => Value::I32(*n),
        (Kind::Message, FieldValue::Message(m)) => object_at(m, depth + 1),
        (_, v) => opaque(v, depth),
    }
}

fn object_at(msg: &dyn Message, depth: usize) -> Value {
    let mut obj = Object::new();
    match walk(&mut obj, msg, depth) {
        Ok(()) => Value::Object(obj),
        Err(err) => Value::Degraded(err.to_string()),
    }
}

/// Kind-agnostic conversion used when the declared kind cannot be trusted.
fn opaque(value: &FieldValue, depth: usize) -> Value {
    match value {
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::I32(n) | FieldValue::Enum(n) => Value::I32(*n),
        FieldValue::I64(n) => Value::I64(*n),
        FieldValue::U32(n) => Value::U32(*n),
        FieldValue::U64(n) => Value::U64(*n),
        FieldValue::F32(n) => Value::F32(*n),
        FieldValue::F64(n) => Value::F64(*n),
        FieldValue::String(s) => Value::String(s.clone()),
        FieldValue::Bytes(b) => Value::Binary(b.clone()),
        FieldValue::Message(m) => object_at(m, depth + 1),
        FieldValue::List(items) => Value::Array(items.iter().map(|v| opaque(v, depth)).collect()),
        FieldValue::Map(entries) => Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), opaque(v, depth)))
                .collect(),
        ),
    }
}
