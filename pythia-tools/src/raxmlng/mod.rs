//! RAxML-NG integration

pub mod parser;

use crate::invocation::Invocation;
use crate::traits::TreeSearch;
use crate::types::{
    prefixed_path, AlignmentSummary, ParsimonySettings, RfDistResult, RfDistSettings,
};
use pythia_core::config::RaxmlNgConfig;
use pythia_core::{PythiaError, PythiaResult};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use parser::{parse_alignment_log, parse_rfdist_log};

/// Name of the RAxML-NG binary looked up on `$PATH`
pub const BINARY_NAME: &str = "raxml-ng";

/// Banner every RAxML-NG build prints for `--version`
const VERSION_BANNER: &str = "RAxML-NG";

/// Log file RAxML-NG writes for `prefix`
pub fn log_file(prefix: &Path) -> PathBuf {
    prefixed_path(prefix, ".raxml.log")
}

/// Starting trees file RAxML-NG writes for `prefix`
pub fn start_tree_file(prefix: &Path) -> PathBuf {
    prefixed_path(prefix, ".raxml.startTree")
}

/// A verified RAxML-NG executable
#[derive(Debug, Clone)]
pub struct RaxmlNg {
    executable: PathBuf,
    version: String,
}

impl RaxmlNg {
    /// Wrap the executable at `executable` after checking that it runs and
    /// identifies itself as RAxML-NG
    pub fn new<P: Into<PathBuf>>(executable: P) -> PythiaResult<Self> {
        let executable = executable.into();
        if !executable.exists() {
            return Err(PythiaError::ExecutableNotFound(executable));
        }

        let mut invocation = Invocation::new(&executable).arg("--version");
        let output = invocation.run().map_err(|e| PythiaError::ExecutableInvalid {
            path: executable.clone(),
            details: e.to_string(),
        })?;

        let combined = output.combined();
        let version = combined
            .lines()
            .map(str::trim)
            .find(|line| line.contains(VERSION_BANNER))
            .map(str::to_string)
            .ok_or_else(|| PythiaError::ExecutableInvalid {
                path: executable.clone(),
                details: format!(
                    "`--version` did not report {}; output was:\n{}",
                    VERSION_BANNER, combined
                ),
            })?;

        tracing::debug!("Using {} at {}", version, executable.display());
        Ok(Self {
            executable,
            version,
        })
    }

    /// Locate `raxml-ng` on `$PATH`
    pub fn from_env() -> PythiaResult<Self> {
        let executable = which::which(BINARY_NAME)
            .map_err(|_| PythiaError::ExecutableNotFound(PathBuf::from(BINARY_NAME)))?;
        Self::new(executable)
    }

    /// Use the configured executable, falling back to `$PATH`
    pub fn from_config(config: &RaxmlNgConfig) -> PythiaResult<Self> {
        match &config.executable {
            Some(path) => Self::new(path.clone()),
            None => Self::from_env(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn invocation(&self) -> Invocation {
        Invocation::new(&self.executable)
    }

    fn alignment_invocation(&self, msa_file: &Path, model: &str, prefix: &Path) -> Invocation {
        self.invocation()
            .arg("--msa")
            .arg(msa_file)
            .arg("--model")
            .arg(model)
            .arg("--prefix")
            .arg(prefix)
    }

    /// RF-distance statistics of `trees_file`; the log goes to a temporary
    /// directory unless a prefix is given
    pub fn get_rfdistance_results(
        &self,
        trees_file: &Path,
        prefix: Option<&Path>,
        settings: &RfDistSettings,
    ) -> PythiaResult<RfDistResult> {
        let temp_dir = TempDir::new()?;
        let prefix = prefix
            .map(Path::to_path_buf)
            .unwrap_or_else(|| temp_dir.path().join("rfdist"));

        self.invocation()
            .arg("--rfdist")
            .arg(trees_file)
            .arg("--prefix")
            .arg(&prefix)
            .option("--threads", settings.threads)
            .flag_if("--redo", settings.redo)
            .run()?;

        let log = std::fs::read_to_string(log_file(&prefix))?;
        parse_rfdist_log(&log)
    }

    /// Number of patterns, proportion of gaps and proportion of invariant
    /// sites as computed by `raxml-ng --parse`
    pub fn get_patterns_gaps_invariant(
        &self,
        msa_file: &Path,
        model: &str,
        prefix: Option<&Path>,
    ) -> PythiaResult<AlignmentSummary> {
        let temp_dir = TempDir::new()?;
        let prefix = prefix
            .map(Path::to_path_buf)
            .unwrap_or_else(|| temp_dir.path().join("parse"));

        self.alignment_invocation(msa_file, model, &prefix)
            .arg("--parse")
            .flag_if("--redo", true)
            .run()?;

        let log = std::fs::read_to_string(log_file(&prefix))?;
        parse_alignment_log(&log)
    }
}

impl TreeSearch for RaxmlNg {
    fn infer_parsimony_trees(
        &mut self,
        msa_file: &Path,
        model: &str,
        prefix: &Path,
        settings: &ParsimonySettings,
    ) -> PythiaResult<PathBuf> {
        tracing::info!(
            "Inferring {} parsimony trees for {}",
            settings.n_trees,
            msa_file.display()
        );

        self.alignment_invocation(msa_file, model, prefix)
            .arg("--start")
            .arg("--tree")
            .arg(format!("pars{{{}}}", settings.n_trees))
            .arg("--seed")
            .arg(settings.seed.to_string())
            .option("--threads", settings.threads)
            .flag_if("--redo", settings.redo)
            .run()?;

        let trees = start_tree_file(prefix);
        if !trees.exists() {
            return Err(PythiaError::Parse(format!(
                "RAxML-NG finished but wrote no trees to {}",
                trees.display()
            )));
        }
        Ok(trees)
    }

    fn rfdistance(
        &mut self,
        trees_file: &Path,
        prefix: &Path,
        settings: &RfDistSettings,
    ) -> PythiaResult<RfDistResult> {
        self.get_rfdistance_results(trees_file, Some(prefix), settings)
    }

    fn version(&self) -> PythiaResult<String> {
        Ok(self.version.clone())
    }

    fn is_available(&self) -> bool {
        self.executable.exists()
    }
}
