//! `zlog-core`: leaf building blocks shared by every zlog crate.
//!
//! This crate has no IO: severities, their string forms, and the ANSI color
//! helper used by the console profile. It also carries the small helpers that
//! services log alongside: prefixed ids, console permission checks and a
//! typed concurrent map.

pub mod color;
pub mod error;
pub mod id;
pub mod perms;
pub mod severity;
pub mod sync;

pub use color::Color;
pub use error::{CoreError, CoreResult};
pub use id::{TraceId, new_id, new_nano_id};
pub use perms::{Claim, Console, Method, allow};
pub use severity::{Severity, to_level};
pub use sync::SyncMap;
