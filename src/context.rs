use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{AdvisorError, Result};

/// Everything a run needs to know about where it executes.
///
/// Built once at the job boundary and passed explicitly to every component.
#[derive(Clone, PartialEq, Eq)]
pub struct RunContext {
    pub owner: String,
    pub repo: String,
    pub pull_number: u64,
    pub token: String,
}

// Keeps the token out of logs
impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("pull_number", &self.pull_number)
            .field("token", &"***")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct PullRequestEvent {
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
}

impl RunContext {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        pull_number: u64,
        token: impl Into<String>,
    ) -> Self {
        RunContext {
            owner: owner.into(),
            repo: repo.into(),
            pull_number,
            token: token.into(),
        }
    }

    /// Build a context from `owner/name`, an optional explicit pull request number and
    /// the path of the webhook event payload.
    ///
    /// # Returns
    /// * `Err(AdvisorError::Config)` - If the repository slug is malformed, the token is
    ///   empty, or no pull request number can be found
    pub fn resolve(
        repository: &str,
        pull_number: Option<u64>,
        event_path: Option<&Path>,
        token: &str,
    ) -> Result<Self> {
        let (owner, repo) = split_repository(repository)?;
        if token.trim().is_empty() {
            return Err(AdvisorError::config("a GitHub token is required"));
        }

        let pull_number = match (pull_number, event_path) {
            (Some(number), _) => number,
            (None, Some(path)) => pull_number_from_event(path)?,
            (None, None) => {
                return Err(AdvisorError::config(
                    "no pull request number given and no event payload available",
                ))
            }
        };

        Ok(RunContext::new(owner, repo, pull_number, token))
    }
}

/// Split an `owner/name` slug
pub fn split_repository(repository: &str) -> Result<(String, String)> {
    match repository.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(AdvisorError::config(format!(
            "repository must look like 'owner/name', got '{}'",
            repository
        ))),
    }
}

/// Read the pull request number from a webhook event payload file
pub fn pull_number_from_event(path: &Path) -> Result<u64> {
    let raw = fs::read_to_string(path)?;
    let event: PullRequestEvent = serde_json::from_str(&raw).map_err(|e| {
        AdvisorError::config(format!("cannot parse event payload {}: {}", path.display(), e))
    })?;
    event
        .pull_request
        .map(|pr| pr.number)
        .ok_or_else(|| AdvisorError::config("the triggering event is not a pull request"))
}
