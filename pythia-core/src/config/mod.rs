//! Configuration types for Pythia

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::PythiaError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub raxmlng: RaxmlNgConfig,
    #[serde(default)]
    pub reduction: ReductionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaxmlNgConfig {
    /// Path to the RAxML-NG binary; looked up on `$PATH` when unset
    #[serde(default)]
    pub executable: Option<PathBuf>,
    /// Seed for the parsimony tree inference
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Threads handed to RAxML-NG (unset = RAxML-NG autoconfig)
    #[serde(default)]
    pub threads: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReductionConfig {
    #[serde(default = "default_deduplicate")]
    pub deduplicate: bool,
    #[serde(default = "default_remove_full_gaps")]
    pub remove_full_gaps: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write the reduced MSA and the result CSV next to the prefix
    #[serde(default = "default_store_results")]
    pub store_results: bool,
    /// Keep the inferred parsimony trees
    #[serde(default = "default_store_trees")]
    pub store_trees: bool,
    /// Prefix for all result files (default: the MSA file path)
    #[serde(default)]
    pub prefix: Option<PathBuf>,
}

// Default value functions
fn default_seed() -> u64 { 0 }
fn default_deduplicate() -> bool { true }
fn default_remove_full_gaps() -> bool { true }
fn default_store_results() -> bool { true }
fn default_store_trees() -> bool { false }

impl Default for RaxmlNgConfig {
    fn default() -> Self {
        Self {
            executable: None,
            seed: default_seed(),
            threads: None,
        }
    }
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            deduplicate: default_deduplicate(),
            remove_full_gaps: default_remove_full_gaps(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            store_results: default_store_results(),
            store_trees: default_store_trees(),
            prefix: None,
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, PythiaError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| PythiaError::Configuration(format!("Failed to parse config: {}", e)))?;

    if config.raxmlng.threads == Some(0) {
        return Err(PythiaError::Configuration(
            "raxmlng.threads must be at least 1".to_string(),
        ));
    }
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), PythiaError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| PythiaError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.raxmlng.executable, None);
        assert_eq!(config.raxmlng.seed, 0);
        assert_eq!(config.raxmlng.threads, None);

        assert!(config.reduction.deduplicate);
        assert!(config.reduction.remove_full_gaps);

        assert!(config.output.store_results);
        assert!(!config.output.store_trees);
        assert_eq!(config.output.prefix, None);
    }

    #[test]
    fn test_load_valid_config() {
        let toml_content = r#"
[raxmlng]
executable = "/opt/raxml-ng/bin/raxml-ng"
seed = 42
threads = 8

[reduction]
deduplicate = false
remove_full_gaps = true

[output]
store_results = false
store_trees = true
prefix = "results/run1"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(
            config.raxmlng.executable,
            Some(PathBuf::from("/opt/raxml-ng/bin/raxml-ng"))
        );
        assert_eq!(config.raxmlng.seed, 42);
        assert_eq!(config.raxmlng.threads, Some(8));
        assert!(!config.reduction.deduplicate);
        assert!(config.reduction.remove_full_gaps);
        assert!(!config.output.store_results);
        assert!(config.output.store_trees);
        assert_eq!(config.output.prefix, Some(PathBuf::from("results/run1")));
    }

    #[test]
    fn test_load_partial_config() {
        let toml_content = r#"
[raxmlng]
seed = 7
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.raxmlng.seed, 7);
        assert_eq!(config.raxmlng.threads, None);
        assert!(config.reduction.deduplicate);
        assert!(config.output.store_results);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "this is not valid TOML {{").unwrap();

        match load_config(temp_file.path()).unwrap_err() {
            PythiaError::Configuration(msg) => assert!(msg.contains("Failed to parse config")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_threads_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[raxmlng]\nthreads = 0\n").unwrap();

        assert!(matches!(
            load_config(temp_file.path()),
            Err(PythiaError::Configuration(_))
        ));
    }

    #[test]
    fn test_load_nonexistent_file() {
        match load_config("/nonexistent/path/to/pythia.toml").unwrap_err() {
            PythiaError::Io(_) => {}
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = Config::default();
        config.raxmlng.seed = 1234;
        config.raxmlng.threads = Some(2);
        config.reduction.remove_full_gaps = false;
        config.output.prefix = Some(PathBuf::from("out/prefix"));

        let temp_file = NamedTempFile::new().unwrap();
        save_config(temp_file.path(), &config).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(loaded.raxmlng.seed, 1234);
        assert_eq!(loaded.raxmlng.threads, Some(2));
        assert!(!loaded.reduction.remove_full_gaps);
        assert_eq!(loaded.output.prefix, config.output.prefix);
    }
}
