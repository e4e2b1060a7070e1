//! Analysis engine for determining version bumps from commits

pub mod classifier;
pub mod recommendation;

pub use classifier::{
    Classification, CommitClassifier, CommitKind, CommitVerdict, ConventionalClassifier,
};
pub use recommendation::RecommendationEngine;
