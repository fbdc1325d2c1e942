//! Subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Fixed filter; the tools read no environment variables.
const DEFAULT_FILTER: &str = "warn";

/// Routes `tracing` events to stderr so stdout carries only tool output.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(DEFAULT_FILTER))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
