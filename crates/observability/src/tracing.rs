//! Tracing/logging initialization.
//!
//! One JSON line per event, filtered through `RUST_LOG`. Request-scoped
//! fields (request id, method, path) come from the span the HTTP layer
//! opens around each call.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();

    tracing::debug!("telemetry initialized");
}
