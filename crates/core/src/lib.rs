//! lintgate - run a repository's static-analysis gate from its version-control root
//!
//! This crate provides functionality to:
//! - Locate the enclosing version-control root of a checkout
//! - Load the repository's gate settings (tool, rule file, target tree)
//! - Build the tool invocation with caller flags passed through verbatim
//! - Execute it from the root and report the tool's exit status unchanged
pub mod command;
pub mod config;
pub mod error;
pub mod root;
pub mod runner;

// Re-export commonly used types and traits
pub use error::{Error, Result};

// Re-export main API components
pub use command::{Executor, LintCommand, LintOutcome, ProcessExecutor};
pub use config::GateSettings;
pub use root::{
    GitLocator, MarkerLocator, RepositoryRoot, RootLocator, RootStrategy, locate_with_fallback,
};
pub use runner::{LintPlan, LintRunner, RunPhase};
