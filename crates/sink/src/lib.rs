//! Sinks: where finished log records go.
//!
//! A sink receives [`Entry`] values from a logger, stamps them with time and
//! its scope label, formats and writes them. Two profiles share one key
//! naming scheme ([`EncoderConfig`]): a colored console layout and a JSON-lines
//! layout. [`CaptureSink`] keeps records in memory; [`TracingSink`] forwards
//! them to `tracing`.

pub mod backend;
pub mod capture;
pub mod config;
pub mod diagnostics;
pub mod encode;
pub mod error;
pub mod record;
pub mod tracing_sink;
pub mod writer;

pub use backend::Sink;
pub use capture::CaptureSink;
pub use config::{EncoderConfig, Layout, LevelFormat, SinkConfig, TimeFormat};
pub use error::SinkError;
pub use record::{Caller, Entry, Field, Record};
pub use tracing_sink::TracingSink;
pub use writer::{SharedBuffer, WriterSink};
