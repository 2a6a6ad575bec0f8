//! Test utilities for the Pythia workspace
//!
//! Shared alignment fixtures and a scriptable stand-in for the RAxML-NG
//! executable.

pub mod fixtures;
pub mod mock_raxmlng;

// Re-export commonly used items
pub use fixtures::{generate_alignment, write_fixture};
pub use mock_raxmlng::MockRaxmlNgScript;

// Re-export test dependencies for convenience
pub use anyhow::{Context, Result};
pub use tempfile;

/// Initialize test logging (call once per test module)
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
