//! Logging configuration.
//!
//! Diagnostics go to stderr so that stdout carries nothing but row output.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Initializes logging to stderr.
///
/// Honors `RUST_LOG`; falls back to [`DEFAULT_FILTER`]. Calling it again
/// after a subscriber is installed has no effect.
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
