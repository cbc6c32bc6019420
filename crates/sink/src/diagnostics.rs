//! Diagnostics for zlog's own internals.
//!
//! Swallowed encoding errors, failed writes and poisoned locks are reported
//! through `tracing`. Installing a subscriber is optional; without one those
//! events are discarded.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "warn";

/// Install a JSON `tracing` subscriber on stderr, filtered by `RUST_LOG`.
///
/// Safe to call multiple times (subsequent calls are no-ops). Returns whether
/// this call installed the subscriber.
pub fn init() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
