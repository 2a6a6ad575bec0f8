//! Core error types for Pythia

pub mod reduction;

use std::path::PathBuf;
use thiserror::Error;
pub use reduction::ReductionError;

/// Main error type for Pythia operations
#[derive(Error, Debug)]
pub enum PythiaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file format of an MSA could not be determined
    #[error("Format error: {0}")]
    Format(String),

    /// The characters of an MSA do not fit any supported data type
    #[error("Data type error: unsupported characters {offending:?}. {details}")]
    DataType { offending: Vec<char>, details: String },

    /// Structurally malformed alignment
    #[error("Alignment error: {0}")]
    Alignment(String),

    #[error(transparent)]
    Reduction(#[from] ReductionError),

    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    #[error("Executable not found: {0}")]
    ExecutableNotFound(PathBuf),

    #[error("Invalid executable {path}: {details}")]
    ExecutableInvalid { path: PathBuf, details: String },

    /// An external process exited unsuccessfully
    #[error("Running command failed: {command}\n{details}")]
    ExternalTool { command: String, details: String },

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Prediction error: {0}")]
    Prediction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for Pythia operations
pub type PythiaResult<T> = Result<T, PythiaError>;

impl From<serde_json::Error> for PythiaError {
    fn from(err: serde_json::Error) -> Self {
        PythiaError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for PythiaError {
    fn from(err: csv::Error) -> Self {
        PythiaError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for PythiaError {
    fn from(err: anyhow::Error) -> Self {
        PythiaError::Other(err.to_string())
    }
}
