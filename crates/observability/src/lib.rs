//! Shared tracing and logging setup.

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
