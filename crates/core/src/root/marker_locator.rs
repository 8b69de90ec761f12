//! Marker based root detection
//!
//! Walks from the anchor towards the filesystem root and stops at the first
//! directory holding version-control metadata.

use super::{RepositoryRoot, RootLocator, normalize_anchor, within_ceiling};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Metadata entries that mark a checkout root. `.git` may be a file for
/// worktrees and submodules.
const DEFAULT_MARKERS: &[&str] = &[".git", ".hg", ".svn"];

#[derive(Debug, Clone)]
pub struct MarkerLocator {
    markers: Vec<String>,
    ceiling: Option<PathBuf>,
}

impl MarkerLocator {
    pub fn new() -> Self {
        Self {
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
            ceiling: None,
        }
    }

    pub fn with_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Never search above `dir`
    pub fn with_ceiling(mut self, dir: impl Into<PathBuf>) -> Self {
        self.ceiling = Some(dir.into());
        self
    }

    fn has_marker(&self, dir: &Path) -> Option<&str> {
        self.markers
            .iter()
            .find(|marker| dir.join(marker.as_str()).exists())
            .map(String::as_str)
    }
}

impl Default for MarkerLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl RootLocator for MarkerLocator {
    fn locate(&self, anchor: &Path) -> Result<RepositoryRoot> {
        let start = normalize_anchor(anchor)?;
        debug!("Searching for VCS markers from {}", start.display());

        for dir in start.ancestors() {
            if !within_ceiling(dir, self.ceiling.as_deref()) {
                debug!("Reached ceiling at {}", dir.display());
                break;
            }
            if let Some(marker) = self.has_marker(dir) {
                debug!("Found {} in {}", marker, dir.display());
                return Ok(RepositoryRoot::new(dir));
            }
        }

        Err(Error::RootNotFound { anchor: start })
    }

    fn name(&self) -> &'static str {
        "markers"
    }
}
