//! Alignment file formats

use crate::error::PythiaError;
use serde::{Deserialize, Serialize};

/// File format of a multiple sequence alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileFormat {
    /// Records introduced by a `>name` line
    Fasta,
    /// Relaxed PHYLIP: `<ntaxa> <nsites>` header, whitespace-delimited names
    Phylip,
}

impl FileFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Fasta => "fasta",
            Self::Phylip => "phy",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fasta => write!(f, "fasta"),
            Self::Phylip => write!(f, "phylip-relaxed"),
        }
    }
}

impl std::str::FromStr for FileFormat {
    type Err = PythiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fasta" | "fa" | "fas" => Ok(Self::Fasta),
            "phylip" | "phylip-relaxed" | "phy" => Ok(Self::Phylip),
            _ => Err(PythiaError::Format(format!("Unknown MSA file format: {}", s))),
        }
    }
}
