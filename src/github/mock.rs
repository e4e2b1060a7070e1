use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::context::RunContext;
use crate::domain::Commit;
use crate::error::{AdvisorError, Result};
use crate::github::{CommentStore, CommitSource, IssueComment, PullRequestCommits};

/// A request made against the mock, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    PullCommits,
    ListComments,
    DeleteComment(u64),
    CreateComment(u64),
}

#[derive(Debug, Default)]
struct State {
    commits: Vec<Commit>,
    total: Option<usize>,
    comments: Vec<IssueComment>,
    next_id: u64,
    failing_deletes: HashSet<u64>,
    fail_commits: bool,
    fail_list: bool,
    fail_create: bool,
    calls: Vec<ApiCall>,
}

/// Mock pull request held in memory for testing without network access
#[derive(Debug, Default)]
pub struct InMemoryGitHub {
    state: Mutex<State>,
}

impl InMemoryGitHub {
    /// Create an empty pull request
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pull request containing `commits`
    pub fn with_commits(commits: Vec<Commit>) -> Self {
        let mock = Self::new();
        mock.state().commits = commits;
        mock
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Override the commit count the pull request reports
    pub fn set_total_commits(&self, total: usize) {
        self.state().total = Some(total);
    }

    /// Add an existing comment, returning its id
    pub fn add_comment(&self, body: impl Into<String>) -> u64 {
        let mut state = self.state();
        state.next_id += 1;
        let id = state.next_id;
        state.comments.push(IssueComment {
            id,
            body: body.into(),
        });
        id
    }

    /// Make deleting comment `id` fail
    pub fn fail_delete_of(&self, id: u64) {
        self.state().failing_deletes.insert(id);
    }

    pub fn fail_commit_listing(&self) {
        self.state().fail_commits = true;
    }

    pub fn fail_comment_listing(&self) {
        self.state().fail_list = true;
    }

    pub fn fail_comment_creation(&self) {
        self.state().fail_create = true;
    }

    /// Current comments, oldest first
    pub fn comments(&self) -> Vec<IssueComment> {
        self.state().comments.clone()
    }

    /// Comments whose body starts with `marker`
    pub fn tracked_comments(&self, marker: &str) -> Vec<IssueComment> {
        self.state()
            .comments
            .iter()
            .filter(|c| c.body.starts_with(marker))
            .cloned()
            .collect()
    }

    /// Requests received so far
    pub fn calls(&self) -> Vec<ApiCall> {
        self.state().calls.clone()
    }
}

#[async_trait]
impl CommitSource for InMemoryGitHub {
    async fn pull_commits(
        &self,
        _ctx: &RunContext,
        _page_size: u32,
        limit: usize,
    ) -> Result<PullRequestCommits> {
        let mut state = self.state();
        state.calls.push(ApiCall::PullCommits);
        if state.fail_commits {
            return Err(AdvisorError::api("commit listing failed"));
        }
        let total = state.total.unwrap_or(state.commits.len());
        Ok(PullRequestCommits {
            commits: state.commits.iter().take(limit).cloned().collect(),
            total,
        })
    }
}

#[async_trait]
impl CommentStore for InMemoryGitHub {
    async fn list_comments(&self, _ctx: &RunContext) -> Result<Vec<IssueComment>> {
        let mut state = self.state();
        state.calls.push(ApiCall::ListComments);
        if state.fail_list {
            return Err(AdvisorError::api("comment listing failed"));
        }
        Ok(state.comments.clone())
    }

    async fn delete_comment(&self, _ctx: &RunContext, comment_id: u64) -> Result<()> {
        let mut state = self.state();
        state.calls.push(ApiCall::DeleteComment(comment_id));
        if state.failing_deletes.contains(&comment_id) {
            return Err(AdvisorError::api(format!(
                "cannot delete comment {}",
                comment_id
            )));
        }
        let before = state.comments.len();
        state.comments.retain(|c| c.id != comment_id);
        if state.comments.len() == before {
            return Err(AdvisorError::api(format!("comment {} not found", comment_id)));
        }
        Ok(())
    }

    async fn create_comment(&self, _ctx: &RunContext, body: &str) -> Result<IssueComment> {
        let mut state = self.state();
        if state.fail_create {
            state.calls.push(ApiCall::CreateComment(0));
            return Err(AdvisorError::api("comment creation failed"));
        }
        state.next_id += 1;
        let comment = IssueComment {
            id: state.next_id,
            body: body.to_string(),
        };
        state.calls.push(ApiCall::CreateComment(comment.id));
        state.comments.push(comment.clone());
        Ok(comment)
    }
}
