//! Domain logic - pure business rules independent of git and GitHub

pub mod commit;
pub mod recommendation;
pub mod tag;
pub mod version;

pub use commit::{Commit, ParsedCommit};
pub use recommendation::{CommitStats, Recommendation};
pub use tag::Tag;
pub use version::{BumpLevel, VersionPair};
