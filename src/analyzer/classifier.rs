use async_trait::async_trait;
use regex::Regex;

use crate::config::ConventionalCommitsConfig;
use crate::domain::commit::DEFAULT_HEADER_PATTERN;
use crate::domain::{BumpLevel, Commit, ParsedCommit};
use crate::error::{AdvisorError, Result};

/// How a single commit counts towards the recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
    /// Merge commit, never contributes a bump
    Merge,
    /// Message does not follow the conventional format
    Unset,
    /// Conventional commit and the bump it asks for
    Conventional(BumpLevel),
}

/// Classifier output for one commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitVerdict {
    pub sha: String,
    pub kind: CommitKind,
}

/// Classifier output for a commit set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub verdicts: Vec<CommitVerdict>,
    /// Human readable explanation of the verdicts
    pub reason: String,
}

/// Commit message grammar collaborator.
///
/// Implementations may report verdicts for commits outside the given slice; callers are
/// expected to keep only the ones they asked about.
#[async_trait]
pub trait CommitClassifier: Send + Sync {
    async fn classify(&self, commits: &[Commit]) -> Result<Classification>;
}

/// Classifies commits with the conventional commits header grammar
#[derive(Debug)]
pub struct ConventionalClassifier {
    header: Regex,
    merge_patterns: Vec<Regex>,
    config: ConventionalCommitsConfig,
}

impl ConventionalClassifier {
    /// Build a classifier, compiling the configured grammar.
    ///
    /// Fails with a classification error when the configuration is unusable.
    pub fn new(config: ConventionalCommitsConfig) -> Result<Self> {
        if config.types.is_empty() {
            return Err(AdvisorError::classification(
                "conventional_commits.types must list at least one type",
            ));
        }

        let pattern = config
            .header_pattern
            .as_deref()
            .unwrap_or(DEFAULT_HEADER_PATTERN);
        let header = Regex::new(pattern).map_err(|e| {
            AdvisorError::classification(format!("invalid header_pattern '{}': {}", pattern, e))
        })?;
        if !header.capture_names().any(|name| name == Some("type")) {
            return Err(AdvisorError::classification(format!(
                "header_pattern '{}' has no named group 'type'",
                pattern
            )));
        }

        let merge_patterns = config
            .merge_patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| {
                    AdvisorError::classification(format!("invalid merge pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ConventionalClassifier {
            header,
            merge_patterns,
            config,
        })
    }

    /// Classify one commit
    pub fn classify_commit(&self, commit: &Commit) -> CommitKind {
        if commit.parent_count > 1 || self.is_merge_header(commit.header()) {
            return CommitKind::Merge;
        }

        let parsed = ParsedCommit::parse_with(
            &self.header,
            &commit.message,
            self.config.breaking_change_indicators.as_slice(),
        );
        match parsed {
            Some(parsed) if self.config.types.contains(&parsed.r#type) => {
                CommitKind::Conventional(self.significance(&parsed))
            }
            _ => CommitKind::Unset,
        }
    }

    fn is_merge_header(&self, header: &str) -> bool {
        self.merge_patterns.iter().any(|re| re.is_match(header))
    }

    fn significance(&self, parsed: &ParsedCommit) -> BumpLevel {
        if parsed.is_breaking_change {
            BumpLevel::Major
        } else if self.config.minor_types.contains(&parsed.r#type) {
            BumpLevel::Minor
        } else {
            BumpLevel::Patch
        }
    }
}

#[async_trait]
impl CommitClassifier for ConventionalClassifier {
    async fn classify(&self, commits: &[Commit]) -> Result<Classification> {
        let verdicts: Vec<CommitVerdict> = commits
            .iter()
            .map(|commit| CommitVerdict {
                sha: commit.sha.clone(),
                kind: self.classify_commit(commit),
            })
            .collect();

        let breakings = verdicts
            .iter()
            .filter(|v| v.kind == CommitKind::Conventional(BumpLevel::Major))
            .count();
        let features = verdicts
            .iter()
            .filter(|v| v.kind == CommitKind::Conventional(BumpLevel::Minor))
            .count();

        Ok(Classification {
            verdicts,
            reason: describe(breakings, features),
        })
    }
}

fn describe(breakings: usize, features: usize) -> String {
    let (verb, suffix) = if breakings == 1 { ("is", "") } else { ("are", "S") };
    let feature_word = if features == 1 { "feature" } else { "features" };
    format!(
        "There {} {} BREAKING CHANGE{} and {} {}",
        verb, breakings, suffix, features, feature_word
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> ConventionalClassifier {
        ConventionalClassifier::new(ConventionalCommitsConfig::default()).unwrap()
    }

    #[test]
    fn test_classify_significance() {
        let c = classifier();
        assert_eq!(
            c.classify_commit(&Commit::new("a", "feat(api)!: redesign endpoint")),
            CommitKind::Conventional(BumpLevel::Major)
        );
        assert_eq!(
            c.classify_commit(&Commit::new("b", "feat(auth): add oauth support")),
            CommitKind::Conventional(BumpLevel::Minor)
        );
        assert_eq!(
            c.classify_commit(&Commit::new("c", "fix(ui): button styling")),
            CommitKind::Conventional(BumpLevel::Patch)
        );
        assert_eq!(
            c.classify_commit(&Commit::new("d", "chore: update deps")),
            CommitKind::Conventional(BumpLevel::Patch)
        );
    }

    #[test]
    fn test_breaking_change_via_footer() {
        let c = classifier();
        let commit = Commit::new(
            "a",
            "fix: rename API field\n\nBREAKING CHANGE: field changed from X to Y",
        );
        assert_eq!(
            c.classify_commit(&commit),
            CommitKind::Conventional(BumpLevel::Major)
        );
    }

    #[test]
    fn test_non_conventional_and_unknown_types_are_unset() {
        let c = classifier();
        assert_eq!(c.classify_commit(&Commit::new("a", "Updated stuff")), CommitKind::Unset);
        assert_eq!(c.classify_commit(&Commit::new("b", "")), CommitKind::Unset);
        assert_eq!(c.classify_commit(&Commit::new("c", "wip: hack")), CommitKind::Unset);
    }

    #[test]
    fn test_merge_detection() {
        let c = classifier();
        assert_eq!(
            c.classify_commit(&Commit::new("a", "Merge pull request #12 from org/branch")),
            CommitKind::Merge
        );
        assert_eq!(
            c.classify_commit(&Commit::new("b", "Merge branch 'develop' into feature")),
            CommitKind::Merge
        );
        assert_eq!(
            c.classify_commit(&Commit::with_parents("c", "feat: looks fine", 2)),
            CommitKind::Merge
        );
    }

    #[test]
    fn test_custom_header_pattern() {
        let config = ConventionalCommitsConfig {
            header_pattern: Some(r"^\[(?P<type>\w+)\](?P<breaking>!)? (?P<description>.+)$".to_string()),
            ..ConventionalCommitsConfig::default()
        };
        let c = ConventionalClassifier::new(config).unwrap();
        assert_eq!(
            c.classify_commit(&Commit::new("a", "[feat] add search")),
            CommitKind::Conventional(BumpLevel::Minor)
        );
        assert_eq!(
            c.classify_commit(&Commit::new("b", "feat: add search")),
            CommitKind::Unset
        );
    }

    #[test]
    fn test_invalid_configuration_is_a_classification_error() {
        let bad_regex = ConventionalCommitsConfig {
            header_pattern: Some("(unclosed".to_string()),
            ..ConventionalCommitsConfig::default()
        };
        assert!(matches!(
            ConventionalClassifier::new(bad_regex),
            Err(AdvisorError::Classification(_))
        ));

        let no_type_group = ConventionalCommitsConfig {
            header_pattern: Some(r"^(\w+): .+$".to_string()),
            ..ConventionalCommitsConfig::default()
        };
        assert!(matches!(
            ConventionalClassifier::new(no_type_group),
            Err(AdvisorError::Classification(_))
        ));

        let no_types = ConventionalCommitsConfig {
            types: vec![],
            ..ConventionalCommitsConfig::default()
        };
        assert!(matches!(
            ConventionalClassifier::new(no_types),
            Err(AdvisorError::Classification(_))
        ));
    }

    #[test]
    fn test_reason_pluralization() {
        assert_eq!(describe(0, 2), "There are 0 BREAKING CHANGES and 2 features");
        assert_eq!(describe(1, 1), "There is 1 BREAKING CHANGE and 1 feature");
    }

    #[tokio::test]
    async fn test_classify_reports_every_commit() {
        let c = classifier();
        let commits = vec![
            Commit::new("a", "feat: one"),
            Commit::new("b", "feat!: two"),
            Commit::new("c", "nope"),
        ];
        let classification = c.classify(&commits).await.unwrap();
        assert_eq!(classification.verdicts.len(), 3);
        assert_eq!(
            classification.reason,
            "There is 1 BREAKING CHANGE and 1 feature"
        );
    }
}
