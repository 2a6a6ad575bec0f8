//! Removal of redundant rows from an alignment

use crate::msa::AlignmentMatrix;
use pythia_core::{PythiaResult, ReductionError};
use std::collections::HashSet;

fn retain_rows<F>(msa: &AlignmentMatrix, mut keep: F) -> PythiaResult<AlignmentMatrix>
where
    F: FnMut(&[u8]) -> bool,
{
    let (taxa, rows): (Vec<String>, Vec<Vec<u8>>) = msa
        .taxa()
        .iter()
        .zip(msa.sequences())
        .filter(|(_, row)| keep(*row))
        .map(|(taxon, row)| (taxon.clone(), row.to_vec()))
        .unzip();

    AlignmentMatrix::new(msa.name(), taxa, rows, msa.data_type())
}

/// Copy of `msa` without the rows that consist only of gaps
pub fn remove_full_gap_sequences(msa: &AlignmentMatrix) -> PythiaResult<AlignmentMatrix> {
    if !msa.contains_full_gap_sequences() {
        return Err(ReductionError::NoFullGapSequences(msa.name().to_string()).into());
    }

    let reduced = retain_rows(msa, |row| row.iter().any(|&c| c != crate::alphabet::GAP))?;
    tracing::debug!(
        "Removed {} full-gap sequences from {}",
        msa.n_taxa() - reduced.n_taxa(),
        msa.name()
    );
    Ok(reduced)
}

/// Copy of `msa` keeping only the first occurrence of every distinct row
pub fn deduplicate_sequences(msa: &AlignmentMatrix) -> PythiaResult<AlignmentMatrix> {
    if !msa.contains_duplicate_sequences() {
        return Err(ReductionError::NoDuplicateSequences(msa.name().to_string()).into());
    }

    let mut seen: HashSet<Vec<u8>> = HashSet::new();
    let reduced = retain_rows(msa, |row| seen.insert(row.to_vec()))?;
    tracing::debug!(
        "Removed {} duplicate sequences from {}",
        msa.n_taxa() - reduced.n_taxa(),
        msa.name()
    );
    Ok(reduced)
}
