//! Utilities for logging.

use tracing_subscriber::EnvFilter;

/// Initialize a trace subscriber for tests.
///
/// Captures output per-test and may be called from every test; only the first
/// call installs the subscriber.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
