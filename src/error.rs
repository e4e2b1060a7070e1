use thiserror::Error;

/// Unified error type for version-advisor operations
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("No semantic version tag found in the repository history")]
    MissingTag,

    #[error("Commit classification failed: {0}")]
    Classification(String),

    #[error(
        "The commits messages are not compliant: {unset} unconventional and {merge} merge commit(s) out of {commits}"
    )]
    NonCompliantCommits {
        commits: usize,
        unset: usize,
        merge: usize,
    },

    #[error("GitHub API error: {0}")]
    Api(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in version-advisor
pub type Result<T> = std::result::Result<T, AdvisorError>;

impl AdvisorError {
    /// Create a classification error with context
    pub fn classification(msg: impl Into<String>) -> Self {
        AdvisorError::Classification(msg.into())
    }

    /// Create an API error with context
    pub fn api(msg: impl Into<String>) -> Self {
        AdvisorError::Api(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AdvisorError::Config(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        AdvisorError::Tag(msg.into())
    }
}

impl From<reqwest::Error> for AdvisorError {
    fn from(err: reqwest::Error) -> Self {
        AdvisorError::Api(err.to_string())
    }
}
