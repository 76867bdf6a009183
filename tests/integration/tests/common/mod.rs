//! Shared helpers for integration tests.

use tracing_subscriber::EnvFilter;

/// Routes engine logs to the test output. Set `RUST_LOG=nodewalk=trace` to
/// see every dispatch decision.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
