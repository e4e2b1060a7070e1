use regex::Regex;

/// Default conventional commit header grammar: `type(scope)!: description`
pub const DEFAULT_HEADER_PATTERN: &str =
    r"^(?P<type>[A-Za-z]+)(?:\((?P<scope>[^)]*)\))?(?P<breaking>!)?:\s+(?P<description>\S.*)$";

/// A commit belonging to the pull request under analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full content-addressed hash
    pub sha: String,
    /// Raw commit message, header first
    pub message: String,
    /// Number of parent commits (more than one means a merge)
    pub parent_count: usize,
}

impl Commit {
    /// Create a regular single-parent commit
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Commit {
            sha: sha.into(),
            message: message.into(),
            parent_count: 1,
        }
    }

    /// Create a commit with an explicit parent count
    pub fn with_parents(sha: impl Into<String>, message: impl Into<String>, parents: usize) -> Self {
        Commit {
            sha: sha.into(),
            message: message.into(),
            parent_count: parents,
        }
    }

    /// First line of the message
    pub fn header(&self) -> &str {
        self.message.lines().next().unwrap_or("").trim_end()
    }

}

/// First seven characters of a hash, for log lines.
///
/// Counts characters rather than bytes so arbitrary classifier output cannot split a
/// multibyte character.
pub fn short_sha(sha: &str) -> &str {
    match sha.char_indices().nth(7) {
        Some((end, _)) => &sha[..end],
        None => sha,
    }
}

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub is_breaking_change: bool,
}

impl ParsedCommit {
    /// Parse a commit message with a caller-provided header grammar.
    ///
    /// `header` must expose a `type` named group; `scope`, `breaking` and `description`
    /// are optional. A breaking change is signalled by the `!` marker or by any of
    /// `breaking_indicators` starting a line of the body.
    pub fn parse_with<S: AsRef<str>>(
        header: &Regex,
        message: &str,
        breaking_indicators: &[S],
    ) -> Option<Self> {
        let first_line = message.lines().next().unwrap_or("").trim_end();
        let captures = header.captures(first_line)?;

        let r#type = captures.name("type")?.as_str().to_lowercase();
        let scope = captures
            .name("scope")
            .map(|m| m.as_str().to_string())
            .filter(|s| !s.is_empty());
        let description = captures
            .name("description")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let has_exclamation = captures
            .name("breaking")
            .map(|m| !m.as_str().is_empty())
            .unwrap_or(false);

        let has_footer = message.lines().skip(1).any(|line| {
            breaking_indicators
                .iter()
                .any(|indicator| line.trim_start().starts_with(indicator.as_ref()))
        });

        Some(ParsedCommit {
            r#type,
            scope,
            description,
            is_breaking_change: has_exclamation || has_footer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(message: &str) -> Option<ParsedCommit> {
        let header = Regex::new(DEFAULT_HEADER_PATTERN).unwrap();
        let indicators: &[&str] = &["BREAKING CHANGE:", "BREAKING-CHANGE:"];
        ParsedCommit::parse_with(&header, message, indicators)
    }

    #[test]
    fn test_parse_with_scope() {
        let commit = parse("feat(auth): add login").unwrap();
        assert_eq!(commit.r#type, "feat");
        assert_eq!(commit.scope, Some("auth".to_string()));
        assert_eq!(commit.description, "add login");
        assert!(!commit.is_breaking_change);
    }

    #[test]
    fn test_parse_with_breaking_marker() {
        let commit = parse("feat(auth)!: redesign login").unwrap();
        assert_eq!(commit.r#type, "feat");
        assert!(commit.is_breaking_change);
    }

    #[test]
    fn test_parse_breaking_without_scope() {
        let commit = parse("feat!: redesign").unwrap();
        assert_eq!(commit.scope, None);
        assert!(commit.is_breaking_change);
    }

    #[test]
    fn test_parse_non_conventional() {
        assert!(parse("Random commit message").is_none());
        assert!(parse("").is_none());
        assert!(parse("feat:missing space").is_none());
    }

    #[test]
    fn test_parse_breaking_change_footer() {
        let commit = parse("fix: something\n\nBREAKING CHANGE: desc").unwrap();
        assert!(commit.is_breaking_change);
    }

    #[test]
    fn test_breaking_indicator_in_header_is_not_a_footer() {
        let commit = parse("docs: explain BREAKING CHANGE: usage").unwrap();
        assert!(!commit.is_breaking_change);
    }

    #[test]
    fn test_uppercase_type_is_normalized() {
        let commit = parse("Fix: casing").unwrap();
        assert_eq!(commit.r#type, "fix");
    }

    #[test]
    fn test_commit_header() {
        let commit = Commit::new("0123456789abcdef", "feat: a\n\nbody");
        assert_eq!(commit.header(), "feat: a");
        assert_eq!(commit.parent_count, 1);
    }

    #[test]
    fn test_short_sha() {
        assert_eq!(short_sha("0123456789abcdef"), "0123456");
        assert_eq!(short_sha("abc"), "abc");
        assert_eq!(short_sha("ééééééééé"), "ééééééé");
        assert_eq!(short_sha(""), "");
    }
}
