use crate::domain::BumpLevel;

/// Aggregate counts over the analyzed commits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitStats {
    /// Commits considered
    pub commits: usize,
    /// Commits that are not conventional
    pub unset: usize,
    /// Merge commits
    pub merge: usize,
}

impl CommitStats {
    /// True when every analyzed commit is either unconventional or a merge.
    ///
    /// An empty set never meets the threshold.
    pub fn meets_rejection_threshold(&self) -> bool {
        self.commits > 0 && self.unset + self.merge >= self.commits
    }
}

/// Outcome of the recommendation engine for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub bump_level: BumpLevel,
    /// Classifier explanation, kept verbatim
    pub reason: String,
    pub stats: CommitStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(commits: usize, unset: usize, merge: usize) -> CommitStats {
        CommitStats {
            commits,
            unset,
            merge,
        }
    }

    #[test]
    fn test_rejection_threshold() {
        assert!(stats(2, 2, 0).meets_rejection_threshold());
        assert!(stats(3, 1, 2).meets_rejection_threshold());
        assert!(stats(1, 1, 1).meets_rejection_threshold());
        assert!(!stats(2, 1, 0).meets_rejection_threshold());
        assert!(!stats(0, 0, 0).meets_rejection_threshold());
    }
}
