//! Prefixed identifiers for log correlation.

use core::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Length of the random part of [`new_nano_id`].
pub const NANO_ID_LEN: usize = 21;

/// URL-safe alphabet of [`new_nano_id`].
pub const NANO_ID_ALPHABET: &[u8; 64] =
    b"_-0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// `prefix` followed by a fresh hyphenated UUID.
///
/// Uses UUIDv7, so ids minted later sort after earlier ones within a prefix.
pub fn new_id(prefix: &str) -> String {
    format!("{prefix}{}", Uuid::now_v7())
}

/// `prefix` followed by [`NANO_ID_LEN`] random URL-safe characters.
pub fn new_nano_id(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let mut id = String::with_capacity(prefix.len() + NANO_ID_LEN);
    id.push_str(prefix);
    for _ in 0..NANO_ID_LEN {
        let i = rng.gen_range(0..NANO_ID_ALPHABET.len());
        id.push(NANO_ID_ALPHABET[i] as char);
    }
    id
}

/// Identifier attached to a trace of related records.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for TraceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for TraceId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<TraceId> for Uuid {
    fn from(value: TraceId) -> Self {
        value.0
    }
}

impl FromStr for TraceId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s).map_err(|e| CoreError::invalid_id(format!("TraceId: {e}")))?;
        Ok(Self(uuid))
    }
}
