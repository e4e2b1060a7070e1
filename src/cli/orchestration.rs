//! Main workflow orchestration logic
//!
//! Sequences one run: tag resolution and commit retrieval (concurrently), the
//! recommendation, the rejection policy, version computation, rendering and finally the
//! tracked comment. Kept apart from `main.rs` so it can be driven with mock
//! collaborators.

use tracing::{info, warn};

use crate::action::JobOutput;
use crate::analyzer::{CommitClassifier, RecommendationEngine};
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::context::RunContext;
use crate::domain::{CommitStats, Recommendation, VersionPair};
use crate::error::{AdvisorError, Result};
use crate::git::{resolve_last_tag, TagSource};
use crate::github::{CommentStore, CommitSource};
use crate::publish::{CommentSynchronizer, PublishReport};
use crate::render::{render, render_rejection};
use crate::version::compute_target;

/// Name of the job output carrying the target version
pub const VERSION_OUTPUT: &str = "version";

/// Switches for a single run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowOptions {
    /// Render only: no comment is published and no output is set
    pub dry_run: bool,
}

/// External collaborators of a run
pub struct Collaborators<'a, T: ?Sized, G: ?Sized, C> {
    pub tags: &'a T,
    pub github: &'a G,
    pub engine: &'a RecommendationEngine<C>,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub recommendation: Recommendation,
    pub versions: VersionPair,
    /// Markdown of the comment, without the marker line
    pub body: String,
    /// Absent on dry runs
    pub published: Option<PublishReport>,
}

/// How a run that reached a verdict ended
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    Completed(WorkflowResult),
    /// Too many unconventional or merge commits; the job must fail
    Rejected {
        stats: CommitStats,
        body: String,
        published: Option<PublishReport>,
    },
}

impl WorkflowOutcome {
    /// Markdown of the comment, without the marker line
    pub fn body(&self) -> &str {
        match self {
            WorkflowOutcome::Completed(result) => &result.body,
            WorkflowOutcome::Rejected { body, .. } => body,
        }
    }

    /// Turn a rejection into [`AdvisorError::NonCompliantCommits`]
    pub fn into_result(self) -> Result<WorkflowResult> {
        match self {
            WorkflowOutcome::Completed(result) => Ok(result),
            WorkflowOutcome::Rejected { stats, .. } => Err(AdvisorError::NonCompliantCommits {
                commits: stats.commits,
                unset: stats.unset,
                merge: stats.merge,
            }),
        }
    }
}

/// Run the pipeline end to end.
///
/// # Returns
/// * `Ok(WorkflowOutcome::Completed)` - Comment published; the target version, when
///   there is one, was written to `outputs`
/// * `Ok(WorkflowOutcome::Rejected)` - Rejection comment published, no output written
/// * `Err(_)` - Any collaborator failure. A publish failure after the version output was
///   written leaves that output in place.
pub async fn run_workflow<T, G, C, O>(
    ctx: &RunContext,
    config: &Config,
    collaborators: Collaborators<'_, T, G, C>,
    outputs: &mut O,
    options: WorkflowOptions,
) -> Result<WorkflowOutcome>
where
    T: TagSource + ?Sized,
    G: CommitSource + CommentStore + ?Sized,
    C: CommitClassifier,
    O: JobOutput + ?Sized,
{
    let threshold = config.analysis.commit_threshold;
    info!(
        owner = %ctx.owner,
        repo = %ctx.repo,
        pull_request = ctx.pull_number,
        "analyzing pull request"
    );

    let (last_tag, fetched) = tokio::try_join!(
        resolve_last_tag(collaborators.tags),
        collaborators
            .github
            .pull_commits(ctx, config.analysis.page_size, threshold)
    )?;

    if fetched.total > threshold {
        warn!(
            "{}",
            BoundaryWarning::CommitThresholdExceeded {
                total: fetched.total,
                threshold,
            }
        );
    }

    let recommendation = collaborators.engine.recommend(&fetched.commits).await?;
    info!(
        bump = %recommendation.bump_level,
        commits = recommendation.stats.commits,
        unset = recommendation.stats.unset,
        merge = recommendation.stats.merge,
        "recommendation computed"
    );

    let synchronizer = CommentSynchronizer::new(collaborators.github, &config.comment.marker);

    let stats = recommendation.stats;
    if stats.meets_rejection_threshold() {
        let body = render_rejection(&stats);
        let published = if options.dry_run {
            info!("dry run, rejection comment not published");
            None
        } else {
            Some(synchronizer.publish(ctx, &body).await?)
        };
        return Ok(WorkflowOutcome::Rejected {
            stats,
            body,
            published,
        });
    }

    let versions = compute_target(&last_tag, recommendation.bump_level);
    if let Some(target) = &versions.target_version {
        info!(last = %versions.last_version, target = %target, "target version");
        if !options.dry_run {
            outputs.set_output(VERSION_OUTPUT, target)?;
        }
    }

    let body = render(&recommendation, &versions, fetched.total, threshold);
    let published = if options.dry_run {
        info!("dry run, comment not published");
        None
    } else {
        Some(synchronizer.publish(ctx, &body).await?)
    };

    Ok(WorkflowOutcome::Completed(WorkflowResult {
        recommendation,
        versions,
        body,
        published,
    }))
}
