//! Job-level plumbing of the CI host: outputs and failure annotations.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::{AdvisorError, Result};

/// Environment variable naming the file job outputs are appended to
pub const OUTPUT_FILE_ENV: &str = "GITHUB_OUTPUT";

/// Sink for job outputs
pub trait JobOutput: Send {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Writes `name=value` lines to the job's output file, or to stdout when the run is
/// not hosted by a runner
#[derive(Debug, Clone, Default)]
pub struct GithubOutput {
    path: Option<PathBuf>,
}

impl GithubOutput {
    /// Use the file named by `GITHUB_OUTPUT`, if any
    pub fn from_env() -> Self {
        GithubOutput {
            path: std::env::var_os(OUTPUT_FILE_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        GithubOutput {
            path: Some(path.into()),
        }
    }
}

impl JobOutput for GithubOutput {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        if value.contains('\n') {
            return Err(AdvisorError::config(format!(
                "output '{}' must be a single line",
                name
            )));
        }
        match &self.path {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "{}={}", name, value)?;
            }
            None => println!("{}={}", name, value),
        }
        Ok(())
    }
}

/// Keeps outputs in memory; used by dry runs and tests
#[derive(Debug, Clone, Default)]
pub struct RecordedOutputs {
    pub values: HashMap<String, String>,
}

impl RecordedOutputs {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

impl JobOutput for RecordedOutputs {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        self.values.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// Workflow command marking the job as failed with `message`
pub fn failure_annotation(message: &str) -> String {
    // Workflow commands end at the first newline
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{}", escaped)
}
