use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::analyzer::classifier::{CommitClassifier, CommitKind};
use crate::boundary::BoundaryWarning;
use crate::domain::{BumpLevel, Commit, CommitStats, Recommendation};
use crate::error::Result;

/// Turns classifier verdicts into a single recommendation
pub struct RecommendationEngine<C> {
    classifier: C,
}

impl<C: CommitClassifier> RecommendationEngine<C> {
    /// Create a new engine around a classifier
    pub fn new(classifier: C) -> Self {
        RecommendationEngine { classifier }
    }

    /// Recommend a bump for exactly the given commits.
    ///
    /// Commits are counted by sha, so a sha listed twice counts once in
    /// `stats.commits`. Verdicts about commits outside `commits` are dropped. A commit
    /// the classifier stays silent about counts as unconventional. A fully unconventional set still
    /// yields a recommendation; rejecting it is the caller's decision.
    pub async fn recommend(&self, commits: &[Commit]) -> Result<Recommendation> {
        let classification = self.classifier.classify(commits).await?;

        let wanted: HashSet<&str> = commits.iter().map(|c| c.sha.as_str()).collect();
        let mut kinds: HashMap<&str, CommitKind> = HashMap::with_capacity(commits.len());
        for verdict in &classification.verdicts {
            match wanted.get(verdict.sha.as_str()) {
                Some(sha) => {
                    kinds.entry(*sha).or_insert(verdict.kind);
                }
                None => warn!(
                    "{}",
                    BoundaryWarning::ForeignCommitIgnored {
                        sha: verdict.sha.clone()
                    }
                ),
            }
        }

        let mut stats = CommitStats {
            commits: wanted.len(),
            ..CommitStats::default()
        };
        let mut bump_level = BumpLevel::NoBump;
        for sha in &wanted {
            match kinds.get(sha).copied().unwrap_or(CommitKind::Unset) {
                CommitKind::Merge => stats.merge += 1,
                CommitKind::Unset => stats.unset += 1,
                CommitKind::Conventional(level) => bump_level = bump_level.min(level),
            }
        }

        if stats.commits > 0 && bump_level == BumpLevel::NoBump {
            warn!(
                "{}",
                BoundaryWarning::NoConventionalCommits {
                    commits: stats.commits
                }
            );
        }
        debug!(
            bump = %bump_level,
            commits = stats.commits,
            unset = stats.unset,
            merge = stats.merge,
            "commits classified"
        );

        Ok(Recommendation {
            bump_level,
            reason: classification.reason,
            stats,
        })
    }
}
