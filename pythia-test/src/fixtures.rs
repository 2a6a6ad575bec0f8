//! Test fixtures and data generators
//!
//! Small alignments used across the Pythia workspace.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Six DNA taxa, ten sites, sequential relaxed PHYLIP
pub const DNA_PHYLIP: &str = "\
6 10
T1 ACGTACGTAA
T2 ACGTACGTAC
T3 ACGAACGTAA
T4 ACGTTCGTAG
T5 ACG-ACGTAA
T6 TCGTACGAAA
";

/// The alignment of [`DNA_PHYLIP`] in interleaved blocks of six and four sites
pub const DNA_PHYLIP_INTERLEAVED: &str = "\
6 10
T1 ACGTAC
T2 ACGTAC
T3 ACGAAC
T4 ACGTTC
T5 ACG-AC
T6 TCGTAC

GTAA
GTAC
GTAA
GTAG
GTAA
GAAA
";

/// Seven DNA taxa with one duplicate (`T1_COPY`) and one all-gap row (`GAPS`)
pub const REDUNDANT_DNA_FASTA: &str = "\
>T1
ACGTACGTAA
>T2
ACGTACGTAC
>T1_COPY
ACGTACGTAA
>T3 with a description
ACGAA
CGTAA
>GAPS
----------
>T4
ACGTTCGTAG
>T5
TCGTACGAAA
";

/// Too few taxa for a tree search
pub const THREE_TAXA_FASTA: &str = "\
>A
ACGTACGT
>B
ACGTACGA
>C
ACGTTCGT
";

/// Four protein sequences
pub const PROTEIN_FASTA: &str = "\
>P1
MKVLEQWRST
>P2
MKVIEQWRSS
>P3
MKV-EZWKST
>P4
MRVLEQWBST
";

/// Four taxa of morphological characters with states 0 to 2
pub const MORPH_PHYLIP: &str = "\
4 6
M1 010210
M2 0112?0
M3 0-0210
M4 110200
";

/// Write `contents` to `dir/name` and return the path
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("failed to write fixture {}: {}", path.display(), e));
    path
}

/// Generate a random DNA alignment in FASTA format
pub fn generate_alignment(n_taxa: usize, n_sites: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let bases = ['A', 'C', 'G', 'T', '-'];

    let mut fasta = String::new();
    for i in 0..n_taxa {
        let sequence: String = (0..n_sites)
            .map(|_| bases[rng.gen_range(0..bases.len())])
            .collect();
        let _ = write!(fasta, ">taxon_{}\n{}\n", i, sequence);
    }
    fasta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_alignment_is_deterministic() {
        let a = generate_alignment(5, 20, 42);
        let b = generate_alignment(5, 20, 42);
        assert_eq!(a, b);
        assert_eq!(a.lines().count(), 10);
        assert!(a.lines().skip(1).step_by(2).all(|l| l.len() == 20));
    }

    #[test]
    fn test_write_fixture() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_fixture(dir.path(), "msa.phy", DNA_PHYLIP);
        assert_eq!(std::fs::read_to_string(path).unwrap(), DNA_PHYLIP);
    }
}
