//! Core utilities and types shared across all Pythia crates

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{PythiaError, PythiaResult, ReductionError};
pub use config::{Config, load_config, save_config};
pub use logging::init_logging;
pub use types::{DataType, FileFormat};

/// Version information for the Pythia project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
