//! Executors run a [`LintCommand`] and report how the tool exited

use super::LintCommand;
use crate::error::Result;
use std::process::{ExitCode, ExitStatus};
use tracing::debug;

/// Exit status of the analysis tool, mirrored unchanged.
///
/// A violation exit and a tool crash are not told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintOutcome {
    code: i32,
}

impl LintOutcome {
    pub fn from_code(code: i32) -> Self {
        Self { code }
    }

    /// Signal termination maps to `128 + signal` on Unix, `1` elsewhere
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self { code };
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self { code: 128 + signal };
            }
        }

        Self { code: 1 }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Exit byte for the runner itself. Codes that do not fit keep their low
    /// byte, unless that would turn a failure into `0`.
    pub fn exit_byte(&self) -> u8 {
        let low = (self.code & 0xff) as u8;
        if low == 0 && self.code != 0 { 1 } else { low }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_byte())
    }
}

/// Trait for anything that can run a lint command
pub trait Executor: Send + Sync {
    fn execute(&self, command: &LintCommand) -> Result<LintOutcome>;
}

/// Spawns the tool as a child process and blocks until it exits
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for ProcessExecutor {
    fn execute(&self, command: &LintCommand) -> Result<LintOutcome> {
        let status = command.execute()?;
        debug!("{} exited with {}", command.program, status);
        Ok(LintOutcome::from_status(status))
    }
}
