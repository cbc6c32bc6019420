//! Read-only message view and a descriptor-driven message container.

use std::sync::Arc;

use crate::descriptor::{FieldDescriptor, MessageDescriptor};
use crate::error::{SchemaError, SchemaResult};
use crate::value::Value;

/// Read-only view of a structured message.
///
/// `for_each_field` visits only the *present* fields, in the descriptor's
/// declared order, and stops early when `visit` returns `false`.
///
/// Implement this for hand-written or generated types to log them without a
/// [`DynamicMessage`] copy:
///
/// ```ignore
/// impl Message for Login {
///     fn descriptor(&self) -> &MessageDescriptor { &LOGIN }
///     fn for_each_field(&self, visit: &mut dyn FnMut(&FieldDescriptor, &Value) -> bool) {
///         let _ = visit(&LOGIN.fields()[0], &Value::from(self.user.as_str()));
///     }
/// }
/// ```
pub trait Message {
    fn descriptor(&self) -> &MessageDescriptor;

    fn for_each_field(&self, visit: &mut dyn FnMut(&FieldDescriptor, &Value) -> bool);

    /// Number of present fields.
    fn present_count(&self) -> usize {
        let mut n = 0;
        self.for_each_field(&mut |_, _| {
            n += 1;
            true
        });
        n
    }
}

impl<M: Message + ?Sized> Message for &M {
    fn descriptor(&self) -> &MessageDescriptor {
        (**self).descriptor()
    }

    fn for_each_field(&self, visit: &mut dyn FnMut(&FieldDescriptor, &Value) -> bool) {
        (**self).for_each_field(visit)
    }
}

impl<M: Message + ?Sized> Message for Arc<M> {
    fn descriptor(&self) -> &MessageDescriptor {
        (**self).descriptor()
    }

    fn for_each_field(&self, visit: &mut dyn FnMut(&FieldDescriptor, &Value) -> bool) {
        (**self).for_each_field(visit)
    }
}

/// A message whose shape is given by a runtime [`MessageDescriptor`].
///
/// Values are checked against the field kind on assignment, so a
/// `DynamicMessage` is always well-typed. It owns its nested messages, which
/// keeps the value tree acyclic.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMessage {
    descriptor: Arc<MessageDescriptor>,
    values: Vec<Option<Value>>,
}

impl DynamicMessage {
    pub fn new(descriptor: Arc<MessageDescriptor>) -> Self {
        let values = vec![None; descriptor.fields().len()];
        Self { descriptor, values }
    }

    pub fn descriptor_arc(&self) -> &Arc<MessageDescriptor> {
        &self.descriptor
    }

    /// Assign `value` to the field called `name`.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> SchemaResult<()> {
        let idx = self.index_of(name)?;
        let value = value.into();
        let field = &self.descriptor.fields()[idx];
        if !field.kind().accepts(&value) {
            return Err(SchemaError::KindMismatch {
                field: field.name().to_string(),
                expected: field.kind().to_string(),
                actual: value.type_name(),
            });
        }
        self.values[idx] = Some(value);
        Ok(())
    }

    /// Chaining form of [`DynamicMessage::set`].
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> SchemaResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    pub fn clear(&mut self, name: &str) -> SchemaResult<()> {
        let idx = self.index_of(name)?;
        self.values[idx] = None;
        Ok(())
    }

    /// Stored value, whether or not it counts as present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let idx = self.descriptor.position(name)?;
        self.values[idx].as_ref()
    }

    /// Whether the field is present (see [`FieldDescriptor::is_populated_by`]).
    pub fn has(&self, name: &str) -> bool {
        let Some(idx) = self.descriptor.position(name) else {
            return false;
        };
        let field = &self.descriptor.fields()[idx];
        self.values[idx]
            .as_ref()
            .is_some_and(|v| field.is_populated_by(v))
    }

    fn index_of(&self, name: &str) -> SchemaResult<usize> {
        self.descriptor
            .position(name)
            .ok_or_else(|| SchemaError::UnknownField {
                message: self.descriptor.full_name().to_string(),
                field: name.to_string(),
            })
    }
}

impl Message for DynamicMessage {
    fn descriptor(&self) -> &MessageDescriptor {
        &self.descriptor
    }

    fn for_each_field(&self, visit: &mut dyn FnMut(&FieldDescriptor, &Value) -> bool) {
        for (field, value) in self.descriptor.fields().iter().zip(&self.values) {
            let Some(value) = value else { continue };
            if !field.is_populated_by(value) {
                continue;
            }
            if !visit(field, value) {
                break;
            }
        }
    }
}
