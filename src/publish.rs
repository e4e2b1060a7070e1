//! Keeps exactly one tracked comment on a pull request.
//!
//! Replacement is delete-then-create: every comment starting with the marker is deleted
//! (best-effort, each deletion independent of the others), and only once all deletions
//! have settled is the new comment created. No lock is held across runs, so two
//! concurrent runs may briefly leave zero or two tracked comments; the next run
//! converges back to one.

use futures::future::join_all;
use tracing::{info, warn};

use crate::boundary::BoundaryWarning;
use crate::context::RunContext;
use crate::error::Result;
use crate::github::CommentStore;

/// What a publish did to the comment collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub created_id: u64,
    pub deleted: Vec<u64>,
    /// Previous tracked comments that are still there
    pub stale: Vec<u64>,
}

/// Publishes markdown as the pull request's single tracked comment
pub struct CommentSynchronizer<'a, S: ?Sized> {
    store: &'a S,
    marker: &'a str,
}

impl<'a, S: CommentStore + ?Sized> CommentSynchronizer<'a, S> {
    pub fn new(store: &'a S, marker: &'a str) -> Self {
        CommentSynchronizer { store, marker }
    }

    /// Body actually stored: the marker line followed by the markdown
    pub fn marked_body(&self, markdown: &str) -> String {
        format!("{}\n{}", self.marker, markdown)
    }

    /// Replace any tracked comment with `markdown`.
    ///
    /// # Returns
    /// * `Err(AdvisorError::Api)` - If listing or creating fails; deletion failures are
    ///   reported in [`PublishReport::stale`] instead
    pub async fn publish(&self, ctx: &RunContext, markdown: &str) -> Result<PublishReport> {
        let existing = self.store.list_comments(ctx).await?;
        let tracked: Vec<u64> = existing
            .iter()
            .filter(|comment| comment.body.starts_with(self.marker))
            .map(|comment| comment.id)
            .collect();

        let outcomes = join_all(tracked.iter().map(|&id| async move {
            (id, self.store.delete_comment(ctx, id).await)
        }))
        .await;

        let mut deleted = Vec::new();
        let mut stale = Vec::new();
        for (id, outcome) in outcomes {
            match outcome {
                Ok(()) => deleted.push(id),
                Err(e) => {
                    warn!(
                        "{}",
                        BoundaryWarning::StaleCommentNotDeleted {
                            comment_id: id,
                            reason: e.to_string(),
                        }
                    );
                    stale.push(id);
                }
            }
        }

        let created = self
            .store
            .create_comment(ctx, &self.marked_body(markdown))
            .await?;
        info!(
            comment_id = created.id,
            replaced = deleted.len(),
            pull_request = ctx.pull_number,
            "tracked comment published"
        );

        Ok(PublishReport {
            created_id: created.id,
            deleted,
            stale,
        })
    }
}
