use async_trait::async_trait;
use git2::{Oid, Repository as Git2Repo, Sort};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::tag::is_semver_like;
use crate::error::{AdvisorError, Result};
use crate::git::TagSource;
use crate::version::parse_version_from_tag;

/// Tag source backed by a git repository on disk
///
/// Only the repository location is kept; each lookup opens the repository on a
/// blocking worker thread.
#[derive(Debug, Clone)]
pub struct Git2Repository {
    git_dir: PathBuf,
}

impl Git2Repository {
    /// Discover the repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Git2Repository {
            git_dir: repo.path().to_path_buf(),
        })
    }

    /// Semantic-version-like tags reachable from HEAD, most recent first.
    ///
    /// Walks history from HEAD in topological and time order. Tags (lightweight and
    /// annotated) are peeled to the commit they mark. When several tags mark the same
    /// commit the highest version comes first.
    pub fn tags_by_recency(repo: &Git2Repo) -> Result<Vec<String>> {
        let mut tags_by_commit: HashMap<Oid, Vec<String>> = HashMap::new();
        let names = repo.tag_names(None)?;

        for name in names.iter().flatten().filter(|name| is_semver_like(name)) {
            let reference = match repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(reference) => reference,
                Err(_) => continue,
            };
            // Tags on trees or blobs have no place in history
            if let Ok(commit) = reference.peel_to_commit() {
                tags_by_commit
                    .entry(commit.id())
                    .or_default()
                    .push(name.to_string());
            }
        }

        if tags_by_commit.is_empty() {
            return Ok(Vec::new());
        }

        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;

        let mut ordered = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            if let Some(mut names) = tags_by_commit.remove(&oid) {
                names.sort_by(|a, b| {
                    parse_version_from_tag(b)
                        .cmp(&parse_version_from_tag(a))
                        .then_with(|| b.cmp(a))
                });
                ordered.extend(names);
            }
            if tags_by_commit.is_empty() {
                break;
            }
        }

        debug!(count = ordered.len(), "reachable release tags");
        Ok(ordered)
    }
}

#[async_trait]
impl TagSource for Git2Repository {
    async fn recent_tags(&self) -> Result<Vec<String>> {
        let git_dir = self.git_dir.clone();
        tokio::task::spawn_blocking(move || {
            let repo = Git2Repo::open(&git_dir)?;
            Git2Repository::tags_by_recency(&repo)
        })
        .await
        .map_err(|e| AdvisorError::tag(format!("tag lookup task failed: {}", e)))?
    }
}

