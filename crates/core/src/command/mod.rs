//! Tool command construction and execution

pub mod executor;
pub mod lint_command;

// Re-export commonly used types
pub use executor::{Executor, LintOutcome, ProcessExecutor};
pub use lint_command::LintCommand;
