pub mod fasta;
pub mod phylip;

/// Taxon names and rows decoded from a file, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAlignment {
    pub taxa: Vec<String>,
    pub rows: Vec<Vec<u8>>,
}

impl RawAlignment {
    pub fn push(&mut self, taxon: String, row: Vec<u8>) {
        self.taxa.push(taxon);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.taxa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxa.is_empty()
    }
}

/// Append the non-whitespace bytes of `line` to `row`
pub(crate) fn extend_without_whitespace(row: &mut Vec<u8>, line: &str) {
    row.extend(line.bytes().filter(|c| !c.is_ascii_whitespace()));
}

// Re-export commonly used functions
pub use fasta::{parse_fasta_str, write_fasta};
pub use phylip::{parse_phylip_header, parse_phylip_str, write_phylip};
