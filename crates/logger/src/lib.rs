//! `zlog`: leveled, structured logging.
//!
//! Three entry points share one severity model and one sink layer:
//!
//! - [`Logger`] logs protobuf-style [`Message`](zlog_schema::Message) events
//!   as a nested `event` object, tagged with a message `kind` on Info.
//! - [`Sugar`] logs formatted text with optional inline fields.
//! - The default logger is a process-wide [`Sugar`] behind the free functions
//!   and the [`debug!`], [`info!`], [`warn!`], [`error!`] and [`fatal!`]
//!   macros. Its level and scope can each be set once.
//!
//! ```no_run
//! use zlog::Severity;
//!
//! zlog::set_scope_log_level("billing", Severity::Info);
//! zlog::info!("charged {} cents", 1250);
//! ```

pub mod config;
pub mod default;
pub mod logger;
pub mod sugar;

pub use config::{LEVEL_ENV, SCOPE_ENV, init_from_env, level_from_env};
pub use default::{
    debug, default_logger, error, fatal, info, set_log_level, set_scope_log_level, warn, warning,
};
pub use logger::{EVENT_KEY, KIND_KEY, Logger};
pub use sugar::{FORMAT_ERROR, FatalExit, Sugar};

pub use zlog_core::{Severity, to_level};
pub use zlog_sink::{Field, Sink, SinkConfig, SinkError};

/// Log at Debug on the default logger.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::default::debug(::core::format_args!($($arg)+))
    };
}

/// Log at Info on the default logger.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::default::info(::core::format_args!($($arg)+))
    };
}

/// Log at Warning on the default logger.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::default::warning(::core::format_args!($($arg)+))
    };
}

/// Log at Error on the default logger.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::default::error(::core::format_args!($($arg)+))
    };
}

/// Log at Fatal on the default logger, flush it and exit with status 1.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::default::fatal(::core::format_args!($($arg)+)).exit()
    };
}
