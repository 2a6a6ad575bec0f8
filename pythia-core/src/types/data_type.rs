//! Character data types of an alignment

use crate::error::PythiaError;
use serde::{Deserialize, Serialize};

/// Biological data type of an MSA
///
/// Fixed when an alignment is constructed and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Nucleotide data
    #[serde(rename = "DNA")]
    Dna,
    /// Protein data
    #[serde(rename = "AA")]
    Aa,
    /// Morphological data with numeric states
    #[serde(rename = "MORPH")]
    Morph,
}

impl DataType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dna => "DNA",
            Self::Aa => "AA",
            Self::Morph => "MORPH",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DataType {
    type Err = PythiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DNA" => Ok(Self::Dna),
            "AA" | "PROTEIN" => Ok(Self::Aa),
            "MORPH" => Ok(Self::Morph),
            _ => Err(PythiaError::UnsupportedDataType(s.to_string())),
        }
    }
}
