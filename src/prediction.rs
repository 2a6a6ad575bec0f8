//! Difficulty prediction pipeline
//!
//! Parses an alignment, optionally reduces it, collects its features and
//! scores them. Result files are written next to a prefix that defaults to
//! the alignment path.

use crate::features::{collect_features, FeatureVector};
use crate::scorer::{predict, DifficultyScorer};
use pythia_bio::{deduplicate_sequences, remove_full_gap_sequences, AlignmentMatrix, ParseOptions};
use pythia_core::{Config, FileFormat, PythiaError, PythiaResult};
use pythia_tools::types::prefixed_path;
use pythia_tools::TreeSearch;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{info, warn};

/// Options for [`predict_difficulty`]
#[derive(Debug, Clone)]
pub struct PredictionOptions {
    pub seed: u64,
    pub threads: Option<usize>,
    pub deduplicate: bool,
    pub remove_full_gaps: bool,
    pub store_results: bool,
    pub store_trees: bool,
    /// Prefix for all result files; the alignment path when unset
    pub prefix: Option<PathBuf>,
}

impl Default for PredictionOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PredictionOptions {
    fn from(config: &Config) -> Self {
        Self {
            seed: config.raxmlng.seed,
            threads: config.raxmlng.threads,
            deduplicate: config.reduction.deduplicate,
            remove_full_gaps: config.reduction.remove_full_gaps,
            store_results: config.output.store_results,
            store_trees: config.output.store_trees,
            prefix: config.output.prefix.clone(),
        }
    }
}

impl PredictionOptions {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    pub fn with_remove_full_gaps(mut self, remove_full_gaps: bool) -> Self {
        self.remove_full_gaps = remove_full_gaps;
        self
    }

    pub fn with_store_results(mut self, store_results: bool) -> Self {
        self.store_results = store_results;
        self
    }

    pub fn with_store_trees(mut self, store_trees: bool) -> Self {
        self.store_trees = store_trees;
        self
    }

    pub fn with_prefix<P: Into<PathBuf>>(mut self, prefix: P) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

/// Outcome of a difficulty prediction
#[derive(Debug, Clone)]
pub struct PredictionResult {
    pub msa_name: String,
    /// Predicted difficulty in [0, 1]
    pub difficulty: f64,
    pub features: FeatureVector,
    /// Stored reduced alignment, if the alignment was reduced and results are stored
    pub reduced_msa_file: Option<PathBuf>,
    pub trees_file: Option<PathBuf>,
    pub csv_file: Option<PathBuf>,
}

/// Apply the configured reductions, deduplication first. `None` when
/// neither applies.
fn reduce(msa: &AlignmentMatrix, options: &PredictionOptions) -> PythiaResult<Option<AlignmentMatrix>> {
    let mut reduced = None;

    if options.deduplicate && msa.contains_duplicate_sequences() {
        let deduplicated = deduplicate_sequences(msa)?;
        warn!(
            "MSA {} contains duplicate sequences, {} of {} taxa remain after deduplication",
            msa.name(),
            deduplicated.n_taxa(),
            msa.n_taxa()
        );
        reduced = Some(deduplicated);
    }

    if options.remove_full_gaps {
        let current = reduced.as_ref().unwrap_or(msa);
        if current.contains_full_gap_sequences() {
            let without_gaps = remove_full_gap_sequences(current)?;
            warn!(
                "MSA {} contains sequences consisting only of gaps, {} of {} taxa remain after removing them",
                current.name(),
                without_gaps.n_taxa(),
                current.n_taxa()
            );
            reduced = Some(without_gaps);
        }
    }

    Ok(reduced)
}

/// Predict the difficulty of the alignment in `msa_file`
pub fn predict_difficulty<S, T>(
    msa_file: &Path,
    scorer: &S,
    tree_search: &mut T,
    options: &PredictionOptions,
) -> PythiaResult<PredictionResult>
where
    S: DifficultyScorer + ?Sized,
    T: TreeSearch + ?Sized,
{
    let prefix = options
        .prefix
        .clone()
        .unwrap_or_else(|| msa_file.to_path_buf());

    info!("Predicting difficulty of {}", msa_file.display());
    let msa = pythia_bio::parse(msa_file, &ParseOptions::default())?;
    info!("Loaded {}", msa);

    // Holds the reduced alignment when results are not stored
    let temp_dir: TempDir;
    let mut reduced_msa_file = None;

    let (msa, features_input) = match reduce(&msa, options)? {
        Some(reduced) => {
            let path = if options.store_results {
                prefixed_path(&prefix, ".pythia.reduced.phy")
            } else {
                temp_dir = tempfile::Builder::new().prefix("pythia-").tempdir()?;
                temp_dir.path().join("reduced.phy")
            };
            reduced.write(&path, FileFormat::Phylip)?;
            if options.store_results {
                info!("Reduced MSA saved to {}", path.display());
                reduced_msa_file = Some(path.clone());
            }
            (reduced, path)
        }
        None => (msa, msa_file.to_path_buf()),
    };

    let trees_file = (options.store_trees && options.store_results)
        .then(|| prefixed_path(&prefix, ".pythia.trees"));

    info!("Collecting features of {}", msa.name());
    let features = collect_features(
        &msa,
        &features_input,
        tree_search,
        options.seed,
        options.threads,
        trees_file.as_deref(),
    )?;

    if features.all_infinite() {
        return Err(PythiaError::Prediction(format!(
            "all features of {} are infinite, the input MSA is probably corrupted",
            msa.name()
        )));
    }

    let difficulty = predict(scorer, &features)?;
    info!("Predicted difficulty of {}: {:.2}", msa.name(), difficulty);

    let csv_file = if options.store_results {
        let path = prefixed_path(&prefix, ".pythia.csv");
        let writer = BufWriter::new(File::create(&path)?);
        features.write_csv(writer, &[("difficulty", difficulty)])?;
        info!("Features and prediction saved to {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(PredictionResult {
        msa_name: msa.name().to_string(),
        difficulty,
        features,
        reduced_msa_file,
        trees_file,
        csv_file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pythia_core::DataType;

    fn dna(rows: &[&str]) -> AlignmentMatrix {
        let taxa = (0..rows.len()).map(|i| format!("t{}", i)).collect();
        let rows = rows.iter().map(|r| r.as_bytes().to_vec()).collect();
        AlignmentMatrix::new("test", taxa, rows, DataType::Dna).unwrap()
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.raxmlng.seed = 7;
        config.raxmlng.threads = Some(4);
        config.reduction.deduplicate = false;
        config.output.prefix = Some(PathBuf::from("out/run"));

        let options = PredictionOptions::from(&config);
        assert_eq!(options.seed, 7);
        assert_eq!(options.threads, Some(4));
        assert!(!options.deduplicate);
        assert!(options.remove_full_gaps);
        assert!(options.store_results);
        assert!(!options.store_trees);
        assert_eq!(options.prefix, Some(PathBuf::from("out/run")));
    }

    #[test]
    fn test_builders() {
        let options = PredictionOptions::default()
            .with_seed(3)
            .with_threads(Some(2))
            .with_deduplicate(false)
            .with_remove_full_gaps(false)
            .with_store_results(false)
            .with_store_trees(true)
            .with_prefix("p");
        assert_eq!(options.seed, 3);
        assert_eq!(options.threads, Some(2));
        assert!(!options.deduplicate && !options.remove_full_gaps && !options.store_results);
        assert!(options.store_trees);
        assert_eq!(options.prefix, Some(PathBuf::from("p")));
    }

    #[test]
    fn test_reduce_nothing_to_do() {
        let msa = dna(&["ACGT", "ACGA", "TCGT", "ACTT"]);
        assert!(reduce(&msa, &PredictionOptions::default()).unwrap().is_none());
    }

    #[test]
    fn test_reduce_respects_options() {
        let rows = ["ACGT", "ACGT", "----", "TCGT"];

        let both = reduce(&dna(&rows), &PredictionOptions::default()).unwrap().unwrap();
        assert_eq!(both.n_taxa(), 2);

        let dedup_only = reduce(&dna(&rows), &PredictionOptions::default().with_remove_full_gaps(false))
            .unwrap()
            .unwrap();
        assert_eq!(dedup_only.n_taxa(), 3);

        let none = PredictionOptions::default()
            .with_deduplicate(false)
            .with_remove_full_gaps(false);
        assert!(reduce(&dna(&rows), &none).unwrap().is_none());
    }
}
