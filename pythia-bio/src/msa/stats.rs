//! Summary statistics of an alignment matrix
//!
//! Columns consisting only of gaps are ignored by the pattern, gap and
//! invariance statistics. They still count as sites for the entropy
//! measures.

use super::AlignmentMatrix;
use crate::alphabet::GAP;
use pythia_core::{DataType, PythiaError, PythiaResult};
use std::collections::{HashMap, HashSet};

fn is_all_gap(column: &[u8]) -> bool {
    column.iter().all(|&c| c == GAP)
}

/// Shannon entropy in bits over the non-gap codes of a column
fn shannon_entropy(column: &[u8]) -> f64 {
    let mut counts = [0usize; 256];
    let mut total = 0usize;
    for &c in column.iter().filter(|&&c| c != GAP) {
        counts[c as usize] += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    counts
        .iter()
        .filter(|&&n| n > 0)
        .map(|&n| {
            let p = n as f64 / total as f64;
            p * (1.0 / p).log2()
        })
        .sum()
}

fn n_ln_n(n: usize) -> f64 {
    let n = n as f64;
    n * n.ln()
}

impl AlignmentMatrix {
    /// Whether any row consists only of gaps
    pub fn contains_full_gap_sequences(&self) -> bool {
        self.sequences().any(is_all_gap)
    }

    /// Whether any row occurs more than once
    pub fn contains_duplicate_sequences(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.n_taxa());
        self.sequences().any(|row| !seen.insert(row))
    }

    /// Number of occurrences of every distinct column, all-gap column included
    pub(crate) fn pattern_counts(&self) -> &HashMap<Vec<u8>, usize> {
        self.cache.pattern_counts.get_or_init(|| {
            let mut counts = HashMap::new();
            for column in self.columns() {
                *counts.entry(column).or_insert(0) += 1;
            }
            counts
        })
    }

    /// Number of distinct site patterns
    pub fn n_patterns(&self) -> usize {
        *self.cache.n_patterns.get_or_init(|| {
            self.pattern_counts()
                .keys()
                .filter(|pattern| !is_all_gap(pattern))
                .count()
        })
    }

    /// Share of gap cells among the cells of all columns that are not
    /// entirely gaps
    pub fn proportion_gaps(&self) -> f64 {
        *self.cache.proportion_gaps.get_or_init(|| {
            let mut gaps = 0usize;
            let mut sites = 0usize;
            for (pattern, &count) in self.pattern_counts() {
                if is_all_gap(pattern) {
                    continue;
                }
                gaps += count * pattern.iter().filter(|&&c| c == GAP).count();
                sites += count;
            }

            if sites == 0 {
                0.0
            } else {
                gaps as f64 / (sites * self.n_taxa()) as f64
            }
        })
    }

    /// Share of invariant sites among the columns that are not entirely gaps.
    ///
    /// A column is invariant when every code in it can represent one common
    /// state, counting gaps and ambiguity codes as compatible.
    pub fn proportion_invariant(&self) -> f64 {
        *self.cache.proportion_invariant.get_or_init(|| {
            let alphabet = self.alphabet();
            let mut invariant = 0usize;
            let mut sites = 0usize;
            for (pattern, &count) in self.pattern_counts() {
                if is_all_gap(pattern) {
                    continue;
                }
                let mut codes = pattern.clone();
                codes.sort_unstable();
                codes.dedup();
                if alphabet.is_invariant(&codes) {
                    invariant += count;
                }
                sites += count;
            }

            if sites == 0 {
                0.0
            } else {
                invariant as f64 / sites as f64
            }
        })
    }

    /// Shannon entropy of every column, in site order
    pub fn column_entropies(&self) -> Vec<f64> {
        self.columns().map(|column| shannon_entropy(&column)).collect()
    }

    /// Mean column entropy
    pub fn entropy(&self) -> f64 {
        let entropies = self.column_entropies();
        entropies.iter().sum::<f64>() / entropies.len() as f64
    }

    /// Sum of `N ln N` over the occurrence counts of all column patterns
    pub fn pattern_entropy(&self) -> f64 {
        self.pattern_counts().values().map(|&n| n_ln_n(n)).sum()
    }

    /// Bollback multinomial test statistic
    pub fn bollback_multinomial(&self) -> f64 {
        self.pattern_entropy() - n_ln_n(self.n_sites())
    }

    /// RAxML-NG model string for this matrix
    pub fn get_raxmlng_model(&self) -> PythiaResult<String> {
        match self.data_type() {
            DataType::Dna => Ok("GTR+G".to_string()),
            DataType::Aa => Ok("LG+G".to_string()),
            DataType::Morph => {
                let max_state = self
                    .sequences()
                    .flat_map(|row| row.iter())
                    .filter(|c| c.is_ascii_digit())
                    .max()
                    .ok_or_else(|| {
                        PythiaError::UnsupportedDataType(format!(
                            "morphological MSA {} contains no numeric states",
                            self.name()
                        ))
                    })?;
                Ok(format!("MULTI{}_GTR", max_state - b'0' + 1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msa::{parse_str, ParseOptions};

    fn dna(rows: &[&str]) -> AlignmentMatrix {
        let taxa = (0..rows.len()).map(|i| format!("T{}", i + 1)).collect();
        let rows = rows.iter().map(|r| r.as_bytes().to_vec()).collect();
        AlignmentMatrix::new("test", taxa, rows, DataType::Dna).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    // columns: AAAA, CTCC, ----, -R--
    fn mixed() -> AlignmentMatrix {
        dna(&["AC--", "AT-R", "AC--", "AC--"])
    }

    #[test]
    fn test_patterns_skip_all_gap_column() {
        let msa = mixed();
        assert_eq!(msa.n_patterns(), 3);
        assert_eq!(msa.pattern_counts().len(), 4);
    }

    #[test]
    fn test_proportion_gaps() {
        assert_close(mixed().proportion_gaps(), 3.0 / 12.0);
    }

    #[test]
    fn test_proportion_invariant_with_ambiguity() {
        // AAAA and -R-- are invariant, CTCC is not
        assert_close(mixed().proportion_invariant(), 2.0 / 3.0);
    }

    #[test]
    fn test_entropy() {
        let msa = mixed();
        let entropies = msa.column_entropies();
        assert_eq!(entropies.len(), 4);
        assert_close(entropies[0], 0.0);
        assert_close(entropies[1], 0.811278);
        assert_close(entropies[2], 0.0);
        assert_close(entropies[3], 0.0);
        assert_close(msa.entropy(), 0.811278 / 4.0);
    }

    #[test]
    fn test_pattern_entropy_and_bollback() {
        let msa = dna(&["AAC", "AAG"]);
        assert_close(msa.pattern_entropy(), 2.0 * 2f64.ln());
        assert_close(msa.bollback_multinomial(), 2.0 * 2f64.ln() - 3.0 * 3f64.ln());

        let distinct = mixed();
        assert_close(distinct.pattern_entropy(), 0.0);
        assert_close(distinct.bollback_multinomial(), -4.0 * 4f64.ln());
    }

    #[test]
    fn test_all_gap_alignment() {
        let msa = dna(&["--", "--"]);
        assert_eq!(msa.n_patterns(), 0);
        assert_eq!(msa.proportion_gaps(), 0.0);
        assert_eq!(msa.proportion_invariant(), 0.0);
        assert_eq!(msa.entropy(), 0.0);
        assert!(msa.contains_full_gap_sequences());
    }

    #[test]
    fn test_contains_checks() {
        let msa = dna(&["AC", "AC", "GT"]);
        assert!(msa.contains_duplicate_sequences());
        assert!(!msa.contains_full_gap_sequences());
        assert!(!dna(&["AC", "GT"]).contains_duplicate_sequences());
    }

    #[test]
    fn test_raxmlng_models() {
        assert_eq!(mixed().get_raxmlng_model().unwrap(), "GTR+G");

        let aa = parse_str(">A\nMKLE\n>B\nMKIE\n", &ParseOptions::default()).unwrap();
        assert_eq!(aa.get_raxmlng_model().unwrap(), "LG+G");

        let morph = parse_str(">A\n012\n>B\n0-2\n", &ParseOptions::default()).unwrap();
        assert_eq!(morph.data_type(), DataType::Morph);
        assert_eq!(morph.get_raxmlng_model().unwrap(), "MULTI3_GTR");
    }

    #[test]
    fn test_morph_without_states() {
        let options = ParseOptions::default().with_data_type(DataType::Morph);
        let morph = parse_str(">A\n--\n>B\n?-\n", &options).unwrap();
        assert!(matches!(
            morph.get_raxmlng_model(),
            Err(PythiaError::UnsupportedDataType(_))
        ));
    }

    #[test]
    fn test_statistics_are_cached() {
        let msa = mixed();
        let first = msa.proportion_invariant();
        assert!(msa.cache.proportion_invariant.get().is_some());
        assert_eq!(msa.proportion_invariant(), first);

        let copy = msa.clone();
        assert_eq!(copy.n_patterns(), msa.n_patterns());
    }
}
