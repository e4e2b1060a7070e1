//! Code-hosting API collaborators
//!
//! The run needs two things from GitHub: the pull request's commits ([CommitSource]) and
//! its comment collection ([CommentStore]). Implementations:
//!
//! - [client::GitHubClient]: REST client built on `reqwest`
//! - [mock::InMemoryGitHub]: in-memory pull request for tests, with injectable failures

pub mod client;
pub mod mock;

pub use client::GitHubClient;
pub use mock::{ApiCall, InMemoryGitHub};

use async_trait::async_trait;
use serde::Deserialize;

use crate::context::RunContext;
use crate::domain::Commit;
use crate::error::Result;

/// A comment on the pull request's conversation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Commits retrieved for analysis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestCommits {
    /// At most `limit` commits, oldest first
    pub commits: Vec<Commit>,
    /// Commit count reported for the whole pull request
    pub total: usize,
}

/// Read access to a pull request's commit list
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Fetch up to `limit` commits, `page_size` per request
    async fn pull_commits(
        &self,
        ctx: &RunContext,
        page_size: u32,
        limit: usize,
    ) -> Result<PullRequestCommits>;
}

/// The pull request's comment collection.
///
/// There is no edit primitive: replacing a comment means deleting it and creating a new
/// one.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn list_comments(&self, ctx: &RunContext) -> Result<Vec<IssueComment>>;

    async fn delete_comment(&self, ctx: &RunContext, comment_id: u64) -> Result<()>;

    async fn create_comment(&self, ctx: &RunContext, body: &str) -> Result<IssueComment>;
}
