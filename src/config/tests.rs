//! Configuration tests

use super::*;
use tempfile::TempDir;

#[test]
fn default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.generate.interface_suffix, "Interface");
    assert!(config.generate.comment.contains("DO NOT EDIT"));
}

#[test]
fn minimal_yaml_gets_defaults() {
    let config: Config = serde_yaml::from_str("version: \"1.0\"\n").unwrap();
    assert!(config.sources.is_empty());
    assert!(config.output.is_none());
    assert_eq!(config.generate.interface_suffix, "Interface");
    assert!(!config.generate.copy_docs);
}

#[test]
fn save_and_reload_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".ifacegen.yaml");

    let mut config = Config::default();
    config.sources.push(PathBuf::from("pkg/store"));
    config.generate.copy_docs = true;
    config.save_to_file(&path).unwrap();

    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(reloaded.sources, vec![PathBuf::from("pkg/store")]);
    assert!(reloaded.generate.copy_docs);
}

#[test]
fn unsupported_version_rejected() {
    let config: Config = serde_yaml::from_str("version: \"2.0\"\n").unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn empty_suffix_rejected() {
    let mut config = Config::default();
    config.generate.interface_suffix.clear();
    assert!(config.validate().is_err());
}
