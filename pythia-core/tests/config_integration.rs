use pythia_core::config::{default_config, load_config, save_config};
use pythia_core::{Config, PythiaError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_saved_default_config_is_readable_toml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pythia.toml");

    save_config(&path, &default_config()).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("[raxmlng]"));
    assert!(contents.contains("[reduction]"));
    assert!(contents.contains("deduplicate = true"));

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.raxmlng.seed, 0);
}

#[test]
fn test_unknown_sections_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pythia.toml");
    fs::write(&path, "[predictor]\nfile = \"latest.txt\"\n\n[output]\nstore_trees = true\n").unwrap();

    let config: Config = load_config(&path).unwrap();
    assert!(config.output.store_trees);
    assert!(config.output.store_results);
}

#[test]
fn test_wrong_value_type_is_configuration_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pythia.toml");
    fs::write(&path, "[raxmlng]\nseed = \"zero\"\n").unwrap();

    assert!(matches!(
        load_config(&path),
        Err(PythiaError::Configuration(_))
    ));
}
