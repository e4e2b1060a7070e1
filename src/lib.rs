pub mod action;
pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod git;
pub mod github;
pub mod publish;
pub mod render;
pub mod version;

pub use error::{AdvisorError, Result};
