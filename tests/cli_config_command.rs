//! Integration tests for the `testscope config` template
//!
//! The generated template must load as a valid configuration and round-trip
//! through a file unchanged.

use std::fs;
use tempfile::TempDir;
use testscope::cli::generate_config_template;
use testscope::config::Config;
use testscope::suite::resolve_suite;

fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

#[test]
fn test_generated_template_creates_valid_config_file() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("testscope.toml");

    fs::write(&config_path, generate_config_template()).expect("Failed to write template");

    let config =
        Config::from_file(&config_path).expect("Generated template should load as valid Config");

    assert_eq!(config.suites.default, "smoke");
    assert_eq!(config.runner.program(), "npx");
    assert_eq!(config.runner.list_flag(), "--list");
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn test_template_suites_resolve() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("testscope.toml");
    fs::write(&config_path, generate_config_template()).expect("Failed to write template");
    let config = Config::from_file(&config_path).expect("valid template");

    for name in config.suites.names() {
        let suite = resolve_suite(&config.suites, Some(&name)).expect("defined suite resolves");
        assert_eq!(suite.name, name);
    }
}

#[test]
fn test_template_has_all_required_sections() {
    let template = generate_config_template();

    assert!(template.contains("[suites]"), "Missing [suites]");
    assert!(template.contains("[[mapping.rules]]"), "Missing [[mapping.rules]]");
    assert!(template.contains("[runner]"), "Missing [runner]");
    assert!(template.contains("[observability]"), "Missing [observability]");
}

#[test]
fn test_repository_config_is_valid() {
    let config = Config::from_file("testscope.toml").expect("shipped config should load");
    assert!(config.suites.definitions.contains_key(&config.suites.default));
}
