//! Git tag discovery
//!
//! The [TagSource] trait abstracts where release tags come from so the tag resolver can
//! be exercised without a repository on disk. Implementations:
//!
//! - [repository::Git2Repository]: walks history with the `git2` crate
//! - [mock::MockTagSource]: canned tags for tests

pub mod mock;
pub mod repository;

pub use mock::MockTagSource;
pub use repository::Git2Repository;

use async_trait::async_trait;
use tracing::info;

use crate::domain::Tag;
use crate::error::{AdvisorError, Result};

/// Source of semantic-version-like tags
///
/// ## Ordering
///
/// Tags are returned most recent first, considering only tags reachable from the
/// current history. Names are only filtered loosely (see
/// [crate::domain::tag::is_semver_like]); calendar tags are kept.
#[async_trait]
pub trait TagSource: Send + Sync {
    async fn recent_tags(&self) -> Result<Vec<String>>;
}

/// Resolve the most recent release tag.
///
/// # Returns
/// * `Ok(Tag)` - First tag reported by the source
/// * `Err(AdvisorError::MissingTag)` - If the source has no tags
pub async fn resolve_last_tag<S: TagSource + ?Sized>(source: &S) -> Result<Tag> {
    let tags = source.recent_tags().await?;
    let tag = tags
        .into_iter()
        .next()
        .map(Tag::new)
        .ok_or(AdvisorError::MissingTag)?;
    info!(tag = %tag, "resolved last tag");
    Ok(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_picks_most_recent() {
        let source = MockTagSource::new(vec!["1.4.0", "1.3.2", "1.3.1"]);
        assert_eq!(resolve_last_tag(&source).await.unwrap(), Tag::new("1.4.0"));
    }

    #[tokio::test]
    async fn test_resolve_without_tags() {
        let source = MockTagSource::default();
        assert!(matches!(
            resolve_last_tag(&source).await,
            Err(AdvisorError::MissingTag)
        ));
    }

    #[tokio::test]
    async fn test_resolve_keeps_calendar_tags() {
        let source = MockTagSource::new(vec!["2024.03.1", "1.0.0"]);
        assert_eq!(
            resolve_last_tag(&source).await.unwrap(),
            Tag::new("2024.03.1")
        );
    }

    #[tokio::test]
    async fn test_resolve_propagates_source_errors() {
        let source = MockTagSource::failing("corrupt repository");
        assert!(matches!(
            resolve_last_tag(&source).await,
            Err(AdvisorError::Tag(_))
        ));
    }
}
