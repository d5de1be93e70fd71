//! Process-wide tracing setup.

/// Initialize process-wide logging.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(None);
}

/// Subscriber construction (filter, JSON formatter).
pub mod tracing;
