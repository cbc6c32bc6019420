//! Field kinds.

use crate::value::{MapKey, Value};

/// Scalar kind of a field, list element or map value.
///
/// Mirrors the protobuf wire kinds. Several kinds share one in-memory
/// representation (`Int32`, `Sint32` and `Sfixed32` all hold an `i32`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Enum,
    Int32,
    Sint32,
    Sfixed32,
    Int64,
    Sint64,
    Sfixed64,
    Uint32,
    Fixed32,
    Uint64,
    Fixed64,
    Float,
    Double,
    String,
    Bytes,
    Message,
    /// Legacy group encoding. Carries a message but is not special-cased by
    /// the encoder.
    Group,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Enum => "enum",
            Kind::Int32 => "int32",
            Kind::Sint32 => "sint32",
            Kind::Sfixed32 => "sfixed32",
            Kind::Int64 => "int64",
            Kind::Sint64 => "sint64",
            Kind::Sfixed64 => "sfixed64",
            Kind::Uint32 => "uint32",
            Kind::Fixed32 => "fixed32",
            Kind::Uint64 => "uint64",
            Kind::Fixed64 => "fixed64",
            Kind::Float => "float",
            Kind::Double => "double",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::Message => "message",
            Kind::Group => "group",
        }
    }

    /// Whether `value` is the in-memory shape of this kind.
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Kind::Bool, Value::Bool(_))
                | (Kind::Enum, Value::Enum(_))
                | (Kind::Int32 | Kind::Sint32 | Kind::Sfixed32, Value::I32(_))
                | (Kind::Int64 | Kind::Sint64 | Kind::Sfixed64, Value::I64(_))
                | (Kind::Uint32 | Kind::Fixed32, Value::U32(_))
                | (Kind::Uint64 | Kind::Fixed64, Value::U64(_))
                | (Kind::Float, Value::F32(_))
                | (Kind::Double, Value::F64(_))
                | (Kind::String, Value::String(_))
                | (Kind::Bytes, Value::Bytes(_))
                | (Kind::Message | Kind::Group, Value::Message(_))
        )
    }

    /// Whether this kind may key a map field.
    pub fn is_map_key(self) -> bool {
        !matches!(
            self,
            Kind::Float | Kind::Double | Kind::Bytes | Kind::Enum | Kind::Message | Kind::Group
        )
    }

    /// Whether `key` is the in-memory shape of this key kind.
    pub fn accepts_key(self, key: &MapKey) -> bool {
        matches!(
            (self, key),
            (Kind::Bool, MapKey::Bool(_))
                | (Kind::Int32 | Kind::Sint32 | Kind::Sfixed32, MapKey::I32(_))
                | (Kind::Int64 | Kind::Sint64 | Kind::Sfixed64, MapKey::I64(_))
                | (Kind::Uint32 | Kind::Fixed32, MapKey::U32(_))
                | (Kind::Uint64 | Kind::Fixed64, MapKey::U64(_))
                | (Kind::String, MapKey::String(_))
        )
    }
}

impl core::fmt::Display for Kind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of a field: a single value, a repeated list, or a map.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Singular(Kind),
    List(Kind),
    Map { key: Kind, value: Kind },
}

impl FieldKind {
    pub fn is_list(&self) -> bool {
        matches!(self, FieldKind::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, FieldKind::Map { .. })
    }

    /// Kind of the singular value, list element, or map value.
    pub fn element(&self) -> Kind {
        match *self {
            FieldKind::Singular(k) | FieldKind::List(k) => k,
            FieldKind::Map { value, .. } => value,
        }
    }

    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldKind::Singular(k), v) => k.accepts(v),
            (FieldKind::List(k), Value::List(items)) => items.iter().all(|v| k.accepts(v)),
            (FieldKind::Map { key, value }, Value::Map(entries)) => entries
                .iter()
                .all(|(mk, mv)| key.accepts_key(mk) && value.accepts(mv)),
            _ => false,
        }
    }
}

impl core::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldKind::Singular(k) => write!(f, "{k}"),
            FieldKind::List(k) => write!(f, "repeated {k}"),
            FieldKind::Map { key, value } => write!(f, "map<{key}, {value}>"),
        }
    }
}
