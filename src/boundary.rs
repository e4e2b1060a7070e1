use std::fmt;

use crate::domain::commit::short_sha;

/// Warnings raised at the edges of a run: odd tags, truncated commit lists, comments
/// that could not be cleaned up. None of them fail the run; they are logged.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Tag follows a calendar scheme, no semantic target is proposed
    NonSemanticTag { tag: String },
    /// Tag exists but cannot be parsed as a semantic version
    UnparsableTag { tag: String, reason: String },
    /// The pull request has more commits than are analyzed
    CommitThresholdExceeded { total: usize, threshold: usize },
    /// None of the analyzed commits follow the conventional format
    NoConventionalCommits { commits: usize },
    /// An older tracked comment survived the replacement
    StaleCommentNotDeleted { comment_id: u64, reason: String },
    /// The classifier reported a commit that is not part of the pull request
    ForeignCommitIgnored { sha: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NonSemanticTag { tag } => {
                write!(
                    f,
                    "Tag '{}' follows a calendar scheme, no target version computed",
                    tag
                )
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::CommitThresholdExceeded { total, threshold } => {
                write!(
                    f,
                    "Pull request has {} commits, only the first {} are analyzed",
                    total, threshold
                )
            }
            BoundaryWarning::NoConventionalCommits { commits } => {
                write!(f, "None of the {} commits is conventional", commits)
            }
            BoundaryWarning::StaleCommentNotDeleted { comment_id, reason } => {
                write!(
                    f,
                    "Could not delete previous comment {}: {}",
                    comment_id, reason
                )
            }
            BoundaryWarning::ForeignCommitIgnored { sha } => {
                write!(
                    f,
                    "Ignoring commit {} which does not belong to the pull request",
                    short_sha(sha)
                )
            }
        }
    }
}
