//! Alignment handling for Pythia
//!
//! Parsing of FASTA and relaxed PHYLIP alignments, data type detection,
//! alignment statistics and sequence reduction.

pub mod alphabet;
pub mod detect;
pub mod formats;
pub mod msa;
pub mod reduce;

// Re-export commonly used types
pub use alphabet::{Alphabet, GAP};
pub use detect::{detect_file_format, detect_format, guess_data_type};
pub use msa::{parse, parse_str, AlignmentMatrix, ParseOptions};
pub use reduce::{deduplicate_sequences, remove_full_gap_sequences};
