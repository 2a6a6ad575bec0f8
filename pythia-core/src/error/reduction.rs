//! Errors raised when a sequence reduction does not apply to an alignment

use thiserror::Error;

/// A reduction was requested for an alignment that does not need it.
///
/// Callers are expected to check `contains_duplicate_sequences` /
/// `contains_full_gap_sequences` first, or to handle this error. It is fatal
/// to the single reduction call only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReductionError {
    #[error("MSA {0} does not contain sequences consisting only of gaps")]
    NoFullGapSequences(String),

    #[error("MSA {0} does not contain duplicate sequences")]
    NoDuplicateSequences(String),
}

impl ReductionError {
    /// Name of the alignment the reduction was attempted on
    pub fn msa_name(&self) -> &str {
        match self {
            Self::NoFullGapSequences(name) | Self::NoDuplicateSequences(name) => name,
        }
    }
}
