//! Repository root discovery

use crate::Result;
use hookah_core::{Error, System};
use std::path::{Path, PathBuf};

/// Find the repository root: the nearest ancestor of `start` (inclusive)
/// that holds a `.git` entry
///
/// Only reads the filesystem.
pub fn find_repository_root(system: &dyn System, start: &Path) -> Result<PathBuf> {
    for dir in start.ancestors() {
        if system.exists(&dir.join(".git")) {
            tracing::debug!(root = %dir.display(), "Found repository root");
            return Ok(dir.to_path_buf());
        }
    }

    Err(Error::NotAGitRepository {
        start: start.to_path_buf(),
    })
}
