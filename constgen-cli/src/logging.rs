//! Diagnostic logging setup.
//!
//! User-facing progress goes to stdout through `colored`; `tracing` output
//! goes to stderr and is filtered by `CONSTGEN_LOG` (e.g.
//! `CONSTGEN_LOG=constgen=debug`).

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CONSTGEN_LOG";

/// Filter used when `CONSTGEN_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
