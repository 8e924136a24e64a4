//! Process-wide `tracing` setup.
//!
//! Diagnostics about the logger itself (dropped records, failed writes) are
//! `tracing` events. They go to stderr so they never mix with metric lines
//! written to stdout.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "info";

/// Initialize tracing for the process, filtered by `RUST_LOG` (default `info`).
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let _ = init_with_default(DEFAULT_DIRECTIVE);
}

/// Like [`init`], with `directive` used when `RUST_LOG` is unset or invalid.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_with_default(directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
