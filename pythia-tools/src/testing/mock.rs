//! Recording mock of a tree-search tool

use crate::raxmlng::start_tree_file;
use crate::traits::TreeSearch;
use crate::types::{ParsimonySettings, RfDistResult, RfDistSettings};
use pythia_core::{PythiaError, PythiaResult};
use std::path::{Path, PathBuf};

/// Tree written once per requested parsimony tree
const MOCK_TREE: &str = "((A:0.1,B:0.1):0.1,(C:0.1,D:0.1):0.1);";

/// One call received by [`MockTreeSearch`]
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Parsimony {
        msa_file: PathBuf,
        model: String,
        prefix: PathBuf,
        settings: ParsimonySettings,
    },
    RfDistance {
        trees_file: PathBuf,
        prefix: PathBuf,
    },
}

/// Tree search that records its calls and answers with canned results
#[derive(Debug, Clone)]
pub struct MockTreeSearch {
    calls: Vec<MockCall>,
    rf_result: RfDistResult,
    failure: Option<String>,
}

impl Default for MockTreeSearch {
    fn default() -> Self {
        Self::new(RfDistResult {
            num_topologies: 1,
            rel_rfdist: 0.0,
            abs_rfdist: Some(0.0),
        })
    }
}

impl MockTreeSearch {
    pub fn new(rf_result: RfDistResult) -> Self {
        Self {
            calls: Vec::new(),
            rf_result,
            failure: None,
        }
    }

    /// Make every call fail with an `ERROR` line carrying `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> &[MockCall] {
        &self.calls
    }

    fn check_failure(&self, command: &str) -> PythiaResult<()> {
        match &self.failure {
            Some(message) => Err(PythiaError::ExternalTool {
                command: format!("mock-raxml-ng {}", command),
                details: format!("exited with the following error:\n\tERROR: {}", message),
            }),
            None => Ok(()),
        }
    }
}

impl TreeSearch for MockTreeSearch {
    fn infer_parsimony_trees(
        &mut self,
        msa_file: &Path,
        model: &str,
        prefix: &Path,
        settings: &ParsimonySettings,
    ) -> PythiaResult<PathBuf> {
        self.calls.push(MockCall::Parsimony {
            msa_file: msa_file.to_path_buf(),
            model: model.to_string(),
            prefix: prefix.to_path_buf(),
            settings: settings.clone(),
        });
        self.check_failure("--start")?;

        let trees = start_tree_file(prefix);
        let contents: String = (0..settings.n_trees)
            .map(|_| format!("{}\n", MOCK_TREE))
            .collect();
        std::fs::write(&trees, contents)?;
        Ok(trees)
    }

    fn rfdistance(
        &mut self,
        trees_file: &Path,
        prefix: &Path,
        _settings: &RfDistSettings,
    ) -> PythiaResult<RfDistResult> {
        self.calls.push(MockCall::RfDistance {
            trees_file: trees_file.to_path_buf(),
            prefix: prefix.to_path_buf(),
        });
        self.check_failure("--rfdist")?;
        Ok(self.rf_result)
    }

    fn version(&self) -> PythiaResult<String> {
        Ok("RAxML-NG v. 0.0.0 (mock)".to_string())
    }
}
