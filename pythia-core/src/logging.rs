//! Logging setup shared by Pythia front ends

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `info`, `pythia_tools=debug`)
pub const LOG_ENV_VAR: &str = "PYTHIA_LOG";

/// Install a `tracing` fmt subscriber filtered by `PYTHIA_LOG` (default `warn`).
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_logging() {
    let log_level = std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| "warn".to_string());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
