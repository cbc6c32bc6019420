//! Process-wide default logger.
//!
//! Starts as an unscoped console [`Sugar`] at Debug. Two setters may replace
//! it, each at most once per process: [`set_log_level`] and
//! [`set_scope_log_level`] have independent gates, so a call to one does not
//! consume the other. Both replace the same handle, and whichever of the two
//! first calls runs later determines the final logger.

use std::fmt;
use std::sync::{Arc, LazyLock, Once, PoisonError, RwLock};

use zlog_core::Severity;

use crate::sugar::{FatalExit, Sugar};

static DEFAULT: LazyLock<RwLock<Arc<Sugar>>> =
    LazyLock::new(|| RwLock::new(Arc::new(Sugar::default_console(Severity::Debug))));

static SET_LEVEL: Once = Once::new();
static SET_SCOPE: Once = Once::new();

/// Replace the default logger with an unscoped console logger at `level`.
///
/// Only the first call in the process has any effect.
pub fn set_log_level(level: Severity) {
    SET_LEVEL.call_once(|| replace(Sugar::default_console(level)));
}

/// Replace the default logger with a console logger labeled `scope` at
/// `level`.
///
/// Only the first call in the process has any effect.
pub fn set_scope_log_level(scope: &str, level: Severity) {
    SET_SCOPE.call_once(|| replace(Sugar::console(scope, level)));
}

/// The current default logger.
pub fn default_logger() -> Arc<Sugar> {
    let guard = DEFAULT.read().unwrap_or_else(|poisoned| {
        tracing::warn!("default logger lock poisoned; using last value");
        poisoned.into_inner()
    });
    Arc::clone(&guard)
}

fn replace(sugar: Sugar) {
    let mut guard = DEFAULT.write().unwrap_or_else(PoisonError::into_inner);
    *guard = Arc::new(sugar);
}

#[track_caller]
pub fn debug(args: fmt::Arguments<'_>) {
    default_logger().debug(args);
}

#[track_caller]
pub fn info(args: fmt::Arguments<'_>) {
    default_logger().info(args);
}

#[track_caller]
pub fn warning(args: fmt::Arguments<'_>) {
    default_logger().warning(args);
}

/// Alias of [`warning`].
#[track_caller]
pub fn warn(args: fmt::Arguments<'_>) {
    default_logger().warning(args);
}

#[track_caller]
pub fn error(args: fmt::Arguments<'_>) {
    default_logger().error(args);
}

/// Log at Fatal on the default logger. Call [`FatalExit::exit`] on the
/// result to terminate; the `fatal!` macro does this for you.
#[track_caller]
pub fn fatal(args: fmt::Arguments<'_>) -> FatalExit {
    default_logger().fatal(args)
}
