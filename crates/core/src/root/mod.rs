//! Version-control root resolution
//!
//! The root is always resolved fresh from an anchor directory. Nothing is
//! cached or persisted between invocations.

mod git_locator;
mod marker_locator;

pub use git_locator::GitLocator;
pub use marker_locator::MarkerLocator;

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Absolute path of the top-level directory of a checkout
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRoot(PathBuf);

impl RepositoryRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Resolve a root-relative path
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.0.join(relative)
    }
}

impl AsRef<Path> for RepositoryRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RepositoryRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Trait for finding the version-control root that encloses a directory
pub trait RootLocator: Send + Sync {
    /// Find the nearest root at or above `anchor`
    fn locate(&self, anchor: &Path) -> Result<RepositoryRoot>;

    /// Get the name of this locator
    fn name(&self) -> &'static str;
}

/// How the repository root is detected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RootStrategy {
    /// Walk upwards looking for `.git`, `.hg` or `.svn`
    #[default]
    Markers,
    /// Ask `git rev-parse --show-toplevel`
    Git,
}

impl RootStrategy {
    pub fn locator(self, ceiling: Option<PathBuf>) -> Box<dyn RootLocator> {
        match self {
            RootStrategy::Markers => {
                let locator = MarkerLocator::new();
                Box::new(match ceiling {
                    Some(dir) => locator.with_ceiling(dir),
                    None => locator,
                })
            }
            RootStrategy::Git => {
                let locator = GitLocator::new();
                Box::new(match ceiling {
                    Some(dir) => locator.with_ceiling(dir),
                    None => locator,
                })
            }
        }
    }
}

/// Locate from `anchor`, retrying from `fallback` when no root encloses the
/// anchor. The anchor's error is kept if both fail.
pub fn locate_with_fallback(
    locator: &dyn RootLocator,
    anchor: &Path,
    fallback: Option<&Path>,
) -> Result<RepositoryRoot> {
    match locator.locate(anchor) {
        Err(err @ Error::RootNotFound { .. }) => match fallback {
            Some(fallback) => {
                debug!("No root above {}, retrying from {}", anchor.display(), fallback.display());
                locator.locate(fallback).map_err(|_| err)
            }
            None => Err(err),
        },
        other => other,
    }
}

/// Make `anchor` absolute and resolve symlinks, starting from the parent if it
/// names a file.
pub(crate) fn normalize_anchor(anchor: &Path) -> Result<PathBuf> {
    let absolute = if anchor.is_absolute() {
        anchor.to_path_buf()
    } else {
        std::env::current_dir()?.join(anchor)
    };

    let canonical = absolute.canonicalize()?;
    if canonical.is_file() {
        if let Some(parent) = canonical.parent() {
            return Ok(parent.to_path_buf());
        }
    }
    Ok(canonical)
}

/// `true` when `path` is `ceiling` or lies below it
pub(crate) fn within_ceiling(path: &Path, ceiling: Option<&Path>) -> bool {
    match ceiling {
        Some(ceiling) => {
            let ceiling = ceiling
                .canonicalize()
                .unwrap_or_else(|_| ceiling.to_path_buf());
            path.starts_with(ceiling)
        }
        None => true,
    }
}
