//! Environment-driven configuration of the default logger.

use std::env;

use zlog_core::{Severity, to_level};

use crate::default::{set_log_level, set_scope_log_level};

/// Level name for the default logger, e.g. `ZLOG_LEVEL=warn`.
pub const LEVEL_ENV: &str = "ZLOG_LEVEL";

/// Optional scope label for the default logger.
pub const SCOPE_ENV: &str = "ZLOG_SCOPE";

/// Severity named by environment variable `var`.
///
/// Unset, non-unicode and unknown values all fall back to Debug.
pub fn level_from_env(var: &str) -> Severity {
    level_from(env::var(var).ok().as_deref())
}

/// Configure the default logger from [`LEVEL_ENV`] and [`SCOPE_ENV`].
///
/// Goes through the once-only setters, so it is a no-op if the matching
/// setter already ran.
pub fn init_from_env() {
    let level = level_from_env(LEVEL_ENV);
    match env::var(SCOPE_ENV) {
        Ok(scope) if !scope.is_empty() => set_scope_log_level(&scope, level),
        _ => set_log_level(level),
    }
}

fn level_from(value: Option<&str>) -> Severity {
    value.map(|v| to_level(v.trim())).unwrap_or(Severity::Debug)
}
