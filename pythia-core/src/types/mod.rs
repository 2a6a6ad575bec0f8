//! Types shared across the Pythia crates

pub mod data_type;
pub mod format;

pub use data_type::DataType;
pub use format::FileFormat;
