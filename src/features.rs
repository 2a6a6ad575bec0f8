//! Feature collection for the difficulty predictor

use indexmap::IndexMap;
use pythia_bio::AlignmentMatrix;
use pythia_core::{PythiaError, PythiaResult};
use pythia_tools::{ParsimonySettings, RfDistSettings, TreeSearch};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Number of parsimony trees the topological features are computed from
pub const N_PARSIMONY_TREES: usize = 24;

/// Smallest alignment a parsimony tree search is run on
pub const MIN_TAXA: usize = 4;

/// Features in the order they are collected and written
pub const FEATURE_NAMES: [&str; 13] = [
    "num_taxa",
    "num_sites",
    "num_patterns",
    "num_patterns/num_taxa",
    "num_sites/num_taxa",
    "num_patterns/num_sites",
    "proportion_gaps",
    "proportion_invariant",
    "entropy",
    "pattern_entropy",
    "bollback",
    "avg_rfdist_parsimony",
    "proportion_unique_topos_parsimony",
];

/// Named feature values, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(IndexMap<String, f64>);

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, &value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every value is infinite (and there is at least one)
    pub fn all_infinite(&self) -> bool {
        !self.is_empty() && self.0.values().all(|v| v.is_infinite())
    }

    /// Names of features whose value is NaN or infinite
    pub fn non_finite(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, value)| !value.is_finite())
            .map(|(name, _)| name)
            .collect()
    }

    /// Write a header row of feature names followed by one row of values.
    /// `extra` columns are appended after the features.
    pub fn write_csv<W: Write>(&self, writer: W, extra: &[(&str, f64)]) -> PythiaResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        let header = self.names().chain(extra.iter().map(|(name, _)| *name));
        csv.write_record(header)?;

        let values = self
            .iter()
            .map(|(_, value)| value)
            .chain(extra.iter().map(|(_, value)| *value))
            .map(|value| value.to_string());
        csv.write_record(values)?;

        csv.flush()?;
        Ok(())
    }

    pub fn to_json(&self) -> PythiaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromIterator<(String, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Collect the difficulty features of `msa`.
///
/// `msa_file` must hold `msa` in a format the tree search can read. All
/// tool output goes to a temporary directory that is removed on return;
/// the inferred trees are copied to `store_trees` when given.
pub fn collect_features<T: TreeSearch + ?Sized>(
    msa: &AlignmentMatrix,
    msa_file: &Path,
    tree_search: &mut T,
    seed: u64,
    threads: Option<usize>,
    store_trees: Option<&Path>,
) -> PythiaResult<FeatureVector> {
    if msa.n_taxa() < MIN_TAXA {
        return Err(PythiaError::Precondition(format!(
            "MSA {} has {} taxa, at least {} are needed to infer parsimony trees",
            msa.name(),
            msa.n_taxa(),
            MIN_TAXA
        )));
    }

    let model = msa.get_raxmlng_model()?;
    let temp_dir = tempfile::Builder::new().prefix("pythia-").tempdir()?;

    let parsimony = ParsimonySettings {
        n_trees: N_PARSIMONY_TREES,
        seed,
        threads,
        redo: true,
    };
    let trees = tree_search.infer_parsimony_trees(
        msa_file,
        &model,
        &temp_dir.path().join("parsimony"),
        &parsimony,
    )?;

    if let Some(destination) = store_trees {
        std::fs::copy(&trees, destination)?;
        tracing::info!("Parsimony trees saved to {}", destination.display());
    }

    let rf = tree_search.rfdistance(
        &trees,
        &temp_dir.path().join("rfdist"),
        &RfDistSettings {
            threads,
            redo: true,
        },
    )?;

    let n_taxa = msa.n_taxa() as f64;
    let n_sites = msa.n_sites() as f64;
    let n_patterns = msa.n_patterns() as f64;

    let values = [
        n_taxa,
        n_sites,
        n_patterns,
        n_patterns / n_taxa,
        n_sites / n_taxa,
        n_patterns / n_sites,
        msa.proportion_gaps(),
        msa.proportion_invariant(),
        msa.entropy(),
        msa.pattern_entropy(),
        msa.bollback_multinomial(),
        rf.rel_rfdist,
        rf.num_topologies as f64 / N_PARSIMONY_TREES as f64,
    ];

    let features: FeatureVector = FEATURE_NAMES
        .iter()
        .zip(values)
        .map(|(name, value)| (name.to_string(), value))
        .collect();

    for name in features.non_finite() {
        tracing::warn!("Feature {} of {} is not finite", name, msa.name());
    }

    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> FeatureVector {
        let mut features = FeatureVector::new();
        features.insert("num_taxa", 6.0);
        features.insert("entropy", 0.25);
        features
    }

    #[test]
    fn test_insertion_order() {
        let mut features = sample();
        features.insert("bollback", -3.5);
        assert_eq!(
            features.names().collect::<Vec<_>>(),
            vec!["num_taxa", "entropy", "bollback"]
        );
        assert_eq!(features.get("entropy"), Some(0.25));
        assert_eq!(features.get("missing"), None);
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        sample().write_csv(&mut out, &[("difficulty", 0.5)]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "num_taxa,entropy,difficulty\n6,0.25,0.5\n"
        );
    }

    #[test]
    fn test_json_keeps_order() {
        let json = sample().to_json().unwrap();
        assert!(json.find("num_taxa").unwrap() < json.find("entropy").unwrap());

        let parsed: FeatureVector = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_non_finite() {
        let mut features = sample();
        assert!(features.non_finite().is_empty());
        assert!(!features.all_infinite());

        features.insert("bollback", f64::NEG_INFINITY);
        assert_eq!(features.non_finite(), vec!["bollback"]);

        let infinite: FeatureVector = [("a".to_string(), f64::INFINITY), ("b".to_string(), f64::NEG_INFINITY)]
            .into_iter()
            .collect();
        assert!(infinite.all_infinite());
        assert!(!FeatureVector::new().all_infinite());
    }
}
