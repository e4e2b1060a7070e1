use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AdvisorError, Result};

/// File name searched in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "version-advisor.toml";

/// Represents the complete configuration for version-advisor.
///
/// Contains commit analysis limits, conventional commit settings, the tracked comment
/// marker and the GitHub endpoint.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub conventional_commits: ConventionalCommitsConfig,

    #[serde(default)]
    pub comment: CommentConfig,

    #[serde(default)]
    pub github: GithubConfig,
}

fn default_page_size() -> u32 {
    100
}

fn default_commit_threshold() -> usize {
    250
}

/// Limits applied when retrieving the pull request's commits.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Commits requested per API page (GitHub caps this at 100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Only the first `commit_threshold` commits are analyzed
    #[serde(default = "default_commit_threshold")]
    pub commit_threshold: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            page_size: default_page_size(),
            commit_threshold: default_commit_threshold(),
        }
    }
}

/// Returns the default list of conventional commit types.
fn default_commit_types() -> Vec<String> {
    vec![
        "feat".to_string(),
        "fix".to_string(),
        "docs".to_string(),
        "style".to_string(),
        "refactor".to_string(),
        "test".to_string(),
        "chore".to_string(),
        "build".to_string(),
        "ci".to_string(),
        "perf".to_string(),
        "revert".to_string(),
    ]
}

/// Returns the default list of breaking change indicators.
fn default_breaking_change_indicators() -> Vec<String> {
    vec![
        "BREAKING CHANGE:".to_string(),
        "BREAKING-CHANGE:".to_string(),
    ]
}

/// Returns the default list of types that trigger minor version bumps.
fn default_minor_types() -> Vec<String> {
    vec!["feat".to_string()]
}

/// Returns the default headers identifying merge commits.
fn default_merge_patterns() -> Vec<String> {
    vec![
        "^Merge pull request ".to_string(),
        "^Merge branch ".to_string(),
        "^Merge remote-tracking branch ".to_string(),
    ]
}

/// Configuration for conventional commit analysis.
///
/// Defines the accepted types, breaking change indicators and the header grammar used to
/// classify commits.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConventionalCommitsConfig {
    #[serde(default = "default_commit_types")]
    pub types: Vec<String>,

    #[serde(default = "default_minor_types")]
    pub minor_types: Vec<String>,

    #[serde(default = "default_breaking_change_indicators")]
    pub breaking_change_indicators: Vec<String>,

    #[serde(default = "default_merge_patterns")]
    pub merge_patterns: Vec<String>,

    /// Custom header regex with named groups `type`, optional `scope` and `breaking`
    #[serde(default)]
    pub header_pattern: Option<String>,
}

impl Default for ConventionalCommitsConfig {
    fn default() -> Self {
        ConventionalCommitsConfig {
            types: default_commit_types(),
            minor_types: default_minor_types(),
            breaking_change_indicators: default_breaking_change_indicators(),
            merge_patterns: default_merge_patterns(),
            header_pattern: None,
        }
    }
}

fn default_marker() -> String {
    "<!--version-advisor-->".to_string()
}

/// Configuration of the tracked pull request comment.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommentConfig {
    /// Hidden sentinel placed on the first line of every tracked comment
    #[serde(default = "default_marker")]
    pub marker: String,
}

impl Default for CommentConfig {
    fn default() -> Self {
        CommentConfig {
            marker: default_marker(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

/// GitHub endpoint settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GithubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            api_url: default_api_url(),
        }
    }
}

impl Config {
    /// Checks limits that would otherwise fail late against the API.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.page_size == 0 || self.analysis.page_size > 100 {
            return Err(AdvisorError::config(format!(
                "analysis.page_size must be between 1 and 100, got {}",
                self.analysis.page_size
            )));
        }
        if self.analysis.commit_threshold == 0 {
            return Err(AdvisorError::config(
                "analysis.commit_threshold must be greater than 0",
            ));
        }
        if self.comment.marker.trim().is_empty() {
            return Err(AdvisorError::config("comment.marker must not be empty"));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `version-advisor.toml` in current directory
/// 3. `version-advisor.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded (and validated) or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(PathBuf::from(path)),
        None => discover_config_file(),
    };

    let config = match path {
        Some(path) => {
            let config_str = fs::read_to_string(&path)?;
            toml::from_str::<Config>(&config_str).map_err(|e| {
                AdvisorError::config(format!("cannot parse {}: {}", path.display(), e))
            })?
        }
        None => Config::default(),
    };

    config.validate()?;
    Ok(config)
}

fn discover_config_file() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}
