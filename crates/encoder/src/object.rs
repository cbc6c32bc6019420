//! Structured-output builder boundary and its in-memory implementation.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::EncodeError;
use crate::value::Value;

/// Accepts typed key/value additions.
///
/// The field walker drives this trait; it never inspects what the encoder
/// does with the values. Only the two composite operations can fail.
pub trait ObjectEncoder {
    fn add_string(&mut self, key: &str, value: &str);
    fn add_i32(&mut self, key: &str, value: i32);
    fn add_i64(&mut self, key: &str, value: i64);
    fn add_u32(&mut self, key: &str, value: u32);
    fn add_u64(&mut self, key: &str, value: u64);
    fn add_f32(&mut self, key: &str, value: f32);
    fn add_f64(&mut self, key: &str, value: f64);
    fn add_bool(&mut self, key: &str, value: bool);
    fn add_binary(&mut self, key: &str, value: &[u8]);

    /// Add a nested object produced by `marshaler`.
    fn add_object(&mut self, key: &str, marshaler: &dyn ObjectMarshaler)
    -> Result<(), EncodeError>;

    /// Add an already-built value (arrays, maps, opaque fallbacks).
    fn add_reflected(&mut self, key: &str, value: Value) -> Result<(), EncodeError>;
}

/// Something that can write itself into an [`ObjectEncoder`].
pub trait ObjectMarshaler {
    fn marshal_object(&self, enc: &mut dyn ObjectEncoder) -> Result<(), EncodeError>;
}

impl<F> ObjectMarshaler for F
where
    F: Fn(&mut dyn ObjectEncoder) -> Result<(), EncodeError>,
{
    fn marshal_object(&self, enc: &mut dyn ObjectEncoder) -> Result<(), EncodeError> {
        self(enc)
    }
}

/// Insertion-ordered key/value object.
///
/// Keys are not deduplicated; the builder records exactly what it was given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    fields: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.push((key.into(), value.into()));
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> Vec<(String, Value)> {
        self.fields
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl ObjectEncoder for Object {
    fn add_string(&mut self, key: &str, value: &str) {
        self.insert(key, value);
    }

    fn add_i32(&mut self, key: &str, value: i32) {
        self.insert(key, value);
    }

    fn add_i64(&mut self, key: &str, value: i64) {
        self.insert(key, value);
    }

    fn add_u32(&mut self, key: &str, value: u32) {
        self.insert(key, value);
    }

    fn add_u64(&mut self, key: &str, value: u64) {
        self.insert(key, value);
    }

    fn add_f32(&mut self, key: &str, value: f32) {
        self.insert(key, value);
    }

    fn add_f64(&mut self, key: &str, value: f64) {
        self.insert(key, value);
    }

    fn add_bool(&mut self, key: &str, value: bool) {
        self.insert(key, value);
    }

    fn add_binary(&mut self, key: &str, value: &[u8]) {
        self.insert(key, value.to_vec());
    }

    /// On failure the key still appears, holding a [`Value::Degraded`].
    fn add_object(
        &mut self,
        key: &str,
        marshaler: &dyn ObjectMarshaler,
    ) -> Result<(), EncodeError> {
        let mut child = Object::new();
        match marshaler.marshal_object(&mut child) {
            Ok(()) => {
                self.insert(key, child);
                Ok(())
            }
            Err(err) => {
                self.insert(key, Value::Degraded(err.to_string()));
                Err(err)
            }
        }
    }

    fn add_reflected(&mut self, key: &str, value: Value) -> Result<(), EncodeError> {
        self.insert(key, value);
        Ok(())
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
