//! Settings and results exchanged with tree-search tools

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Number of parsimony trees inferred when nothing else is requested
pub const DEFAULT_PARSIMONY_TREES: usize = 24;

/// Options for a parsimony tree inference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsimonySettings {
    pub n_trees: usize,
    pub seed: u64,
    /// Unset lets the tool pick its own thread count
    pub threads: Option<usize>,
    /// Overwrite results of earlier runs with the same prefix
    pub redo: bool,
}

impl Default for ParsimonySettings {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_PARSIMONY_TREES,
            seed: 0,
            threads: None,
            redo: true,
        }
    }
}

impl ParsimonySettings {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_n_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }
}

/// Options for an RF-distance computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfDistSettings {
    pub threads: Option<usize>,
    pub redo: bool,
}

impl Default for RfDistSettings {
    fn default() -> Self {
        Self {
            threads: None,
            redo: true,
        }
    }
}

/// Topological diversity of a set of trees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RfDistResult {
    pub num_topologies: usize,
    /// Mean pairwise relative Robinson-Foulds distance, in [0, 1]
    pub rel_rfdist: f64,
    pub abs_rfdist: Option<f64>,
}

/// Alignment summary reported by a tool's alignment check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentSummary {
    pub n_sites: usize,
    pub n_patterns: usize,
    pub proportion_gaps: f64,
    pub proportion_invariant: f64,
}

/// `prefix` with `suffix` appended to its last component,
/// e.g. `run/msa` + `.raxml.log` = `run/msa.raxml.log`
pub fn prefixed_path(prefix: &Path, suffix: &str) -> PathBuf {
    let mut path: OsString = prefix.as_os_str().to_owned();
    path.push(suffix);
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsimony_defaults() {
        let settings = ParsimonySettings::default();
        assert_eq!(settings.n_trees, 24);
        assert_eq!(settings.seed, 0);
        assert_eq!(settings.threads, None);
        assert!(settings.redo);

        let settings = settings.with_seed(7).with_threads(Some(2));
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.threads, Some(2));
    }

    #[test]
    fn test_prefixed_path() {
        assert_eq!(
            prefixed_path(Path::new("/tmp/run/msa.phy"), ".pythia.csv"),
            PathBuf::from("/tmp/run/msa.phy.pythia.csv")
        );
        assert_eq!(
            prefixed_path(Path::new("pars"), ".raxml.startTree"),
            PathBuf::from("pars.raxml.startTree")
        );
    }
}
