/// Trait for tree-search tools
use crate::types::{ParsimonySettings, RfDistResult, RfDistSettings};
use pythia_core::PythiaResult;
use std::path::{Path, PathBuf};

/// Operations a phylogenetic tree-search tool provides to the feature
/// collector
pub trait TreeSearch: Send + Sync {
    /// Infer `settings.n_trees` parsimony starting trees for the alignment
    /// and return the file holding them, one Newick tree per line
    fn infer_parsimony_trees(
        &mut self,
        msa_file: &Path,
        model: &str,
        prefix: &Path,
        settings: &ParsimonySettings,
    ) -> PythiaResult<PathBuf>;

    /// Topological diversity of the trees in `trees_file`
    fn rfdistance(
        &mut self,
        trees_file: &Path,
        prefix: &Path,
        settings: &RfDistSettings,
    ) -> PythiaResult<RfDistResult>;

    /// Get tool version
    fn version(&self) -> PythiaResult<String>;

    /// Check if tool is available
    fn is_available(&self) -> bool {
        true
    }
}
