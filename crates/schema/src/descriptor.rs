//! Field and message descriptors.

use std::sync::Arc;

use crate::error::{SchemaError, SchemaResult};
use crate::kind::{FieldKind, Kind};
use crate::value::Value;

/// How a field reports whether it is set.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Presence {
    /// Set iff the value differs from its kind's zero value.
    #[default]
    Implicit,
    /// Set whenever a value was assigned, default or not.
    Explicit,
}

/// Describes one field of a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    name: String,
    number: u32,
    kind: FieldKind,
    presence: Presence,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, number: u32, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            number,
            kind,
            presence: Presence::Implicit,
        }
    }

    pub fn singular(name: impl Into<String>, number: u32, kind: Kind) -> Self {
        Self::new(name, number, FieldKind::Singular(kind))
    }

    pub fn list(name: impl Into<String>, number: u32, kind: Kind) -> Self {
        Self::new(name, number, FieldKind::List(kind))
    }

    pub fn map(name: impl Into<String>, number: u32, key: Kind, value: Kind) -> Self {
        Self::new(name, number, FieldKind::Map { key, value })
    }

    /// Switch to explicit presence (`optional` in proto3 terms).
    pub fn optional(mut self) -> Self {
        self.presence = Presence::Explicit;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn is_list(&self) -> bool {
        self.kind.is_list()
    }

    pub fn is_map(&self) -> bool {
        self.kind.is_map()
    }

    /// Whether a stored `value` makes this field present.
    ///
    /// Messages are always present once set. Lists and maps are present iff
    /// non-empty.
    pub fn is_populated_by(&self, value: &Value) -> bool {
        match (self.presence, self.kind) {
            (Presence::Explicit, FieldKind::Singular(_)) => true,
            _ => !value.is_default(),
        }
    }

    fn validate(&self) -> SchemaResult<()> {
        let invalid = |reason: &str| SchemaError::InvalidField {
            field: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.is_empty() {
            return Err(invalid("empty name"));
        }
        if self.number == 0 {
            return Err(invalid("field number must be positive"));
        }
        match self.kind {
            FieldKind::Map { key, .. } if !key.is_map_key() => {
                Err(invalid(&format!("{key} cannot key a map")))
            }
            FieldKind::List(_) | FieldKind::Map { .. } if self.presence == Presence::Explicit => {
                Err(invalid("repeated and map fields cannot be optional"))
            }
            _ => Ok(()),
        }
    }
}

/// Describes a message type: its full name and ordered fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDescriptor {
    full_name: String,
    fields: Vec<FieldDescriptor>,
}

impl MessageDescriptor {
    pub fn builder(full_name: impl Into<String>) -> MessageDescriptorBuilder {
        MessageDescriptorBuilder {
            full_name: full_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// Builder validating field names and numbers are unique.
#[derive(Debug, Clone)]
pub struct MessageDescriptorBuilder {
    full_name: String,
    fields: Vec<FieldDescriptor>,
}

impl MessageDescriptorBuilder {
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> SchemaResult<Arc<MessageDescriptor>> {
        for (idx, f) in self.fields.iter().enumerate() {
            f.validate()?;
            let clash = self.fields[..idx]
                .iter()
                .any(|prev| prev.name == f.name || prev.number == f.number);
            if clash {
                return Err(SchemaError::DuplicateField {
                    message: self.full_name.clone(),
                    field: f.name.clone(),
                });
            }
        }

        Ok(Arc::new(MessageDescriptor {
            full_name: self.full_name,
            fields: self.fields,
        }))
    }
}
