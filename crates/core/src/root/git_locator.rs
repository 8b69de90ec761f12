//! Root detection through `git rev-parse --show-toplevel`

use super::{RepositoryRoot, RootLocator, normalize_anchor, within_ceiling};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct GitLocator {
    program: String,
    ceiling: Option<PathBuf>,
}

impl GitLocator {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
            ceiling: None,
        }
    }

    /// Use a specific git executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Reject roots that lie outside `dir`
    pub fn with_ceiling(mut self, dir: impl Into<PathBuf>) -> Self {
        self.ceiling = Some(dir.into());
        self
    }
}

impl Default for GitLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl RootLocator for GitLocator {
    fn locate(&self, anchor: &Path) -> Result<RepositoryRoot> {
        let start = normalize_anchor(anchor)?;
        debug!("Running {} rev-parse in {}", self.program, start.display());

        let output = Command::new(&self.program)
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(&start)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::SpawnError {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            debug!(
                "git rev-parse failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(Error::RootNotFound { anchor: start });
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| Error::GitError(format!("Non UTF-8 toplevel path: {e}")))?;
        let toplevel = stdout.trim();
        if toplevel.is_empty() {
            return Err(Error::GitError("rev-parse returned an empty path".to_string()));
        }

        let root = PathBuf::from(toplevel)
            .canonicalize()
            .unwrap_or_else(|_| PathBuf::from(toplevel));
        if !within_ceiling(&root, self.ceiling.as_deref()) {
            debug!("{} is above the ceiling", root.display());
            return Err(Error::RootNotFound { anchor: start });
        }

        Ok(RepositoryRoot::new(root))
    }

    fn name(&self) -> &'static str {
        "git"
    }
}
