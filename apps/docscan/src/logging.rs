//! Tracing setup for developer diagnostics.
//!
//! User-facing output never goes through tracing; events are written to
//! stderr and filtered by `DOCSCAN_LOG` (default `warn`).

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "DOCSCAN_LOG";

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
