//! Field values.

use std::collections::BTreeMap;

use crate::message::DynamicMessage;

/// A field value.
///
/// Singular values, list elements and map values all use this type; lists
/// and maps nest it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    /// Enum number.
    Enum(i32),
    Message(DynamicMessage),
    List(Vec<Value>),
    Map(BTreeMap<MapKey, Value>),
}

impl Value {
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<MapKey>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Short name of the in-memory shape, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Enum(_) => "enum",
            Value::Message(_) => "message",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Whether this is the zero value an implicit-presence field reports as
    /// unset. Floats compare by bit pattern, so `-0.0` is not default.
    pub fn is_default(&self) -> bool {
        match self {
            Value::Bool(b) => !b,
            Value::I32(n) | Value::Enum(n) => *n == 0,
            Value::I64(n) => *n == 0,
            Value::U32(n) => *n == 0,
            Value::U64(n) => *n == 0,
            Value::F32(n) => n.to_bits() == 0,
            Value::F64(n) => n.to_bits() == 0,
            Value::String(s) => s.is_empty(),
            Value::Bytes(b) => b.is_empty(),
            Value::Message(_) => false,
            Value::List(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
        }
    }

    pub fn as_message(&self) -> Option<&DynamicMessage> {
        match self {
            Value::Message(m) => Some(m),
            _ => None,
        }
    }
}

macro_rules! impl_value_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_value_from!(
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    Vec<u8> => Bytes,
    DynamicMessage => Message,
);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

/// Key of a map field entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    String(String),
}

impl MapKey {
    pub fn type_name(&self) -> &'static str {
        match self {
            MapKey::Bool(_) => "bool",
            MapKey::I32(_) => "i32",
            MapKey::I64(_) => "i64",
            MapKey::U32(_) => "u32",
            MapKey::U64(_) => "u64",
            MapKey::String(_) => "string",
        }
    }
}

/// String form used as the key of an encoded map.
impl core::fmt::Display for MapKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MapKey::Bool(b) => write!(f, "{b}"),
            MapKey::I32(n) => write!(f, "{n}"),
            MapKey::I64(n) => write!(f, "{n}"),
            MapKey::U32(n) => write!(f, "{n}"),
            MapKey::U64(n) => write!(f, "{n}"),
            MapKey::String(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_key_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for MapKey {
                fn from(value: $t) -> Self {
                    MapKey::$variant(value)
                }
            }
        )*
    };
}

impl_key_from!(
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    String => String,
);

impl From<&str> for MapKey {
    fn from(value: &str) -> Self {
        MapKey::String(value.to_owned())
    }
}
