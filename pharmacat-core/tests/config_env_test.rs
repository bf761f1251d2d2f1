//! Environment override of the catalog source path

use pharmacat_core::config::SOURCE_ENV_VAR;
use pharmacat_core::CatalogConfig;
use serial_test::serial;
use std::path::PathBuf;

#[test]
#[serial]
fn test_env_var_overrides_source() {
    std::env::set_var(SOURCE_ENV_VAR, "/tmp/override.json");
    let config = CatalogConfig::default().with_env_overrides();
    std::env::remove_var(SOURCE_ENV_VAR);

    assert_eq!(config.source, PathBuf::from("/tmp/override.json"));
}

#[test]
#[serial]
fn test_empty_env_var_is_ignored() {
    std::env::set_var(SOURCE_ENV_VAR, "");
    let config = CatalogConfig::with_source("medicines.json").with_env_overrides();
    std::env::remove_var(SOURCE_ENV_VAR);

    assert_eq!(config.source, PathBuf::from("medicines.json"));
}

#[test]
#[serial]
fn test_yaml_file_then_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.yaml");
    std::fs::write(&path, "source: from-file.json\nsearch_limit: 5\n").unwrap();

    std::env::remove_var(SOURCE_ENV_VAR);
    let config = CatalogConfig::load_from_path(&path).unwrap().with_env_overrides();
    assert_eq!(config.source, PathBuf::from("from-file.json"));
    assert_eq!(config.search_limit, 5);
}
