use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::context::RunContext;
use crate::domain::Commit;
use crate::error::{AdvisorError, Result};
use crate::github::{CommentStore, CommitSource, IssueComment, PullRequestCommits};

const COMMENTS_PAGE_SIZE: u32 = 100;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const ERROR_BODY_LIMIT: usize = 200;

/// GitHub REST API client
pub struct GitHubClient {
    http: Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct PullRequestSummary {
    commits: usize,
}

#[derive(Debug, Deserialize)]
struct ApiCommit {
    sha: String,
    commit: ApiCommitDetail,
    #[serde(default)]
    parents: Vec<IgnoredAny>,
}

#[derive(Debug, Deserialize)]
struct ApiCommitDetail {
    #[serde(default)]
    message: String,
}

impl From<ApiCommit> for Commit {
    fn from(api: ApiCommit) -> Self {
        Commit::with_parents(api.sha, api.commit.message, api.parents.len())
    }
}

impl GitHubClient {
    /// Create a client authenticated with the run's token
    pub fn new(api_url: &str, ctx: &RunContext) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", ctx.token))
            .map_err(|_| AdvisorError::config("the GitHub token contains invalid characters"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );

        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("version-advisor/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(GitHubClient {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, ctx: &RunContext, path: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.api_url, ctx.owner, ctx.repo, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, u32)]) -> Result<T> {
        debug!(url, "GET");
        let response = self.http.get(url).query(query).send().await?;
        let response = ensure_success(response, url).await?;
        Ok(response.json().await?)
    }
}

/// Turn a non-2xx response into an API error carrying the start of its body
async fn ensure_success(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AdvisorError::api(format!(
        "{} returned {}: {}",
        url,
        status,
        body.chars().take(ERROR_BODY_LIMIT).collect::<String>()
    )))
}

#[async_trait]
impl CommitSource for GitHubClient {
    async fn pull_commits(
        &self,
        ctx: &RunContext,
        page_size: u32,
        limit: usize,
    ) -> Result<PullRequestCommits> {
        let summary: PullRequestSummary = self
            .get_json(&self.repo_url(ctx, &format!("pulls/{}", ctx.pull_number)), &[])
            .await?;

        let url = self.repo_url(ctx, &format!("pulls/{}/commits", ctx.pull_number));
        let mut commits: Vec<Commit> = Vec::new();
        let mut page = 1;
        while commits.len() < limit {
            let batch: Vec<ApiCommit> = self
                .get_json(&url, &[("per_page", page_size), ("page", page)])
                .await?;
            let last_page = batch.len() < page_size as usize;
            commits.extend(batch.into_iter().map(Commit::from));
            if last_page {
                break;
            }
            page += 1;
        }
        commits.truncate(limit);

        debug!(
            fetched = commits.len(),
            total = summary.commits,
            "pull request commits"
        );
        Ok(PullRequestCommits {
            commits,
            total: summary.commits,
        })
    }
}

#[async_trait]
impl CommentStore for GitHubClient {
    async fn list_comments(&self, ctx: &RunContext) -> Result<Vec<IssueComment>> {
        let url = self.repo_url(ctx, &format!("issues/{}/comments", ctx.pull_number));
        let mut comments = Vec::new();
        let mut page = 1;
        loop {
            let batch: Vec<IssueComment> = self
                .get_json(&url, &[("per_page", COMMENTS_PAGE_SIZE), ("page", page)])
                .await?;
            let last_page = batch.len() < COMMENTS_PAGE_SIZE as usize;
            comments.extend(batch);
            if last_page {
                break;
            }
            page += 1;
        }
        Ok(comments)
    }

    async fn delete_comment(&self, ctx: &RunContext, comment_id: u64) -> Result<()> {
        let url = self.repo_url(ctx, &format!("issues/comments/{}", comment_id));
        debug!(url, "DELETE");
        let response = self.http.delete(&url).send().await?;
        ensure_success(response, &url).await?;
        Ok(())
    }

    async fn create_comment(&self, ctx: &RunContext, body: &str) -> Result<IssueComment> {
        let url = self.repo_url(ctx, &format!("issues/{}/comments", ctx.pull_number));
        debug!(url, "POST");
        let response = self
            .http
            .post(&url)
            .json(&json!({ "body": body }))
            .send()
            .await?;
        let response = ensure_success(response, &url).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_commit_conversion() {
        let raw = r#"{
            "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
            "commit": {"message": "feat: add search\n\nbody"},
            "parents": [{"sha": "a"}, {"sha": "b"}]
        }"#;
        let api: ApiCommit = serde_json::from_str(raw).unwrap();
        let commit = Commit::from(api);
        assert_eq!(commit.sha, "6dcb09b5b57875f334f61aebed695e2e4193db5e");
        assert_eq!(commit.header(), "feat: add search");
        assert_eq!(commit.parent_count, 2);
    }

    #[test]
    fn test_comment_without_body() {
        let comment: IssueComment = serde_json::from_str(r#"{"id": 9, "body": null}"#).unwrap();
        assert_eq!(comment.id, 9);
        assert!(comment.body.is_empty());
        let comment: IssueComment = serde_json::from_str(r#"{"id": 10}"#).unwrap();
        assert!(comment.body.is_empty());
    }

    #[test]
    fn test_repo_url() {
        let ctx = RunContext::new("oat-sa", "tao-core", 3, "t");
        let client = GitHubClient::new("https://api.github.com/", &ctx).unwrap();
        assert_eq!(
            client.repo_url(&ctx, "issues/3/comments"),
            "https://api.github.com/repos/oat-sa/tao-core/issues/3/comments"
        );
    }
}
