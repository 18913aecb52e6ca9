//! Test logging.

/// Route `tracing` output through the libtest capture for the current test
/// binary. Safe to call from every test; only the first call installs the
/// subscriber.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .try_init();
}
