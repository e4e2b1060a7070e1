//! Markdown bodies for the tracked comment.
//!
//! Pure functions: identical inputs always give byte-identical output.

use crate::domain::{CommitStats, Recommendation, VersionPair};

const HEADING: &str = "### Version";
const CONVENTIONAL_COMMITS_URL: &str = "https://www.conventionalcommits.org/en/v1.0.0/";

/// Render the recommendation comment.
///
/// Sections, in order: heading, truncated analysis warning (when `total_commits`
/// exceeds `commit_threshold`), breaking change warning, non-conventional notice,
/// version table, classifier reason. Absent sections produce no line at all.
pub fn render(
    recommendation: &Recommendation,
    versions: &VersionPair,
    total_commits: usize,
    commit_threshold: usize,
) -> String {
    let mut lines: Vec<String> = vec![HEADING.to_string()];

    if total_commits > commit_threshold {
        lines.push(format!(
            "⚠️ This pull request has {} commits, only the first {} have been analyzed",
            total_commits, commit_threshold
        ));
    }
    if recommendation.bump_level.is_breaking() {
        lines.push(
            "🚨 Your pull request contains a BREAKING CHANGE, please be sure to communicate it"
                .to_string(),
        );
    }
    if recommendation.stats.unset > 0 {
        lines.push(format!(
            "❕ {} commits are not using the conventional commits formats. They will be ignored in version management.",
            recommendation.stats.unset
        ));
    }

    lines.push(format!(
        "| Target version | {} |",
        versions.target_version.as_deref().unwrap_or("")
    ));
    lines.push("| --- | --- |".to_string());
    lines.push(format!("| Last version | {} |", versions.last_version));

    if !recommendation.reason.is_empty() {
        lines.push(recommendation.reason.clone());
    }

    lines.join("\n")
}

/// Render the comment posted when the commit set is rejected
pub fn render_rejection(stats: &CommitStats) -> String {
    [
        HEADING.to_string(),
        format!(
            "❌ The commits messages are not compliant with the [conventional commits]({}) format!",
            CONVENTIONAL_COMMITS_URL
        ),
        format!(
            "{} of {} commits are not conventional and {} are merge commits.",
            stats.unset, stats.commits, stats.merge
        ),
    ]
    .join("\n")
}
