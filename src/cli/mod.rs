//! Command-line entry points

pub mod orchestration;

pub use orchestration::{
    run_workflow, Collaborators, WorkflowOptions, WorkflowOutcome, WorkflowResult,
};
