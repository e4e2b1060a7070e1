use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

const SEMVER_LIKE_PATTERN: &str =
    r"^[vV]?\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?$";

/// Calendar tags: four-digit year, a dot, then a month
const CALENDAR_PATTERN: &str = r"^[vV]?\d{4}\.(?:0?[1-9]|1[0-2])(?:\.|$)";

static SEMVER_LIKE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(SEMVER_LIKE_PATTERN).ok());

static CALENDAR_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(CALENDAR_PATTERN).ok());

/// Represents a git tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// Whether the tag follows a year-dot-month release scheme
    pub fn is_calendar_version(&self) -> bool {
        CALENDAR_RE
            .as_ref()
            .is_some_and(|re| re.is_match(&self.name))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Filter predicate used when listing repository tags.
///
/// Matches `major.minor.patch[-pre][+build]`; calendar tags such as `2024.03.1` pass.
pub fn is_semver_like(name: &str) -> bool {
    SEMVER_LIKE_RE
        .as_ref()
        .is_some_and(|re| re.is_match(name))
}
