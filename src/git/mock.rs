use async_trait::async_trait;

use crate::error::{AdvisorError, Result};
use crate::git::TagSource;

/// Mock tag source for testing without an actual repository
#[derive(Debug, Clone, Default)]
pub struct MockTagSource {
    tags: Vec<String>,
    failure: Option<String>,
}

impl MockTagSource {
    /// Create a source returning `tags` in the given order (most recent first)
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockTagSource {
            tags: tags.into_iter().map(Into::into).collect(),
            failure: None,
        }
    }

    /// Create a source whose listing always fails
    pub fn failing(reason: impl Into<String>) -> Self {
        MockTagSource {
            tags: Vec::new(),
            failure: Some(reason.into()),
        }
    }
}

#[async_trait]
impl TagSource for MockTagSource {
    async fn recent_tags(&self) -> Result<Vec<String>> {
        match &self.failure {
            Some(reason) => Err(AdvisorError::tag(reason.clone())),
            None => Ok(self.tags.clone()),
        }
    }
}
