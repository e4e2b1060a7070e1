// tests/config_test.rs
use std::io::Write;

use tempfile::NamedTempFile;
use version_advisor::config::{load_config, Config};
use version_advisor::AdvisorError;

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_default_values() {
    let config = Config::default();
    assert_eq!(config.analysis.page_size, 100);
    assert_eq!(config.analysis.commit_threshold, 250);
    assert_eq!(config.comment.marker, "<!--version-advisor-->");
    assert_eq!(config.github.api_url, "https://api.github.com");
    assert!(config
        .conventional_commits
        .types
        .contains(&"feat".to_string()));
    assert!(config
        .conventional_commits
        .breaking_change_indicators
        .contains(&"BREAKING CHANGE:".to_string()));
    assert_eq!(config.conventional_commits.minor_types, vec!["feat"]);
    assert!(config.conventional_commits.header_pattern.is_none());
}

#[test]
fn test_load_from_file() {
    let temp_file = write_config(
        r#"
[analysis]
page_size = 30

[conventional_commits]
types = ["feat", "fix", "chore"]
"#,
    );

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.analysis.page_size, 30);
    // Unset keys keep their defaults
    assert_eq!(config.analysis.commit_threshold, 250);
    assert_eq!(
        config.conventional_commits.types,
        vec!["feat", "fix", "chore"]
    );
    assert_eq!(config.comment.marker, "<!--version-advisor-->");
}

#[test]
fn test_load_fixture() {
    let config = load_config(Some("tests/fixtures/custom_config.toml"))
        .expect("Failed to load test config");
    assert_eq!(config.analysis.commit_threshold, 50);
    assert_eq!(config.conventional_commits.minor_types, vec!["feat", "deps"]);
    assert_eq!(config.comment.marker, "<!--release-bot-->");
}

#[test]
fn test_invalid_page_size_rejected() {
    let temp_file = write_config("[analysis]\npage_size = 500\n");
    let result = load_config(Some(temp_file.path().to_str().unwrap()));
    assert!(matches!(result, Err(AdvisorError::Config(_))));
}

#[test]
fn test_blank_marker_rejected() {
    let temp_file = write_config("[comment]\nmarker = \"  \"\n");
    let result = load_config(Some(temp_file.path().to_str().unwrap()));
    assert!(matches!(result, Err(AdvisorError::Config(_))));
}

#[test]
fn test_malformed_toml_rejected() {
    let temp_file = write_config("[analysis\npage_size = ");
    let result = load_config(Some(temp_file.path().to_str().unwrap()));
    assert!(matches!(result, Err(AdvisorError::Config(_))));
}

#[test]
fn test_missing_explicit_file_is_io_error() {
    let result = load_config(Some("tests/fixtures/does-not-exist.toml"));
    assert!(matches!(result, Err(AdvisorError::Io(_))));
}
