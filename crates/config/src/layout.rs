//! Resolved paths for hook operations
//!
//! A [`Layout`] is built once at startup from the repository root and the
//! effective [`Config`], then handed to every component.

use crate::config::{CONFIG_FILE_NAME, Config};
use hookah_core::HookName;
use std::path::{Path, PathBuf};

/// Suffix appended to a foreign hook when a dispatcher takes its place
pub const BACKUP_SUFFIX: &str = ".old";

/// Resolved paths for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    source_dir: PathBuf,
}

impl Layout {
    /// Resolve paths for `root` using the configured source directory
    pub fn new(root: impl Into<PathBuf>, config: &Config) -> Self {
        let root = root.into();
        let source_dir = if config.source_dir.is_absolute() {
            config.source_dir.clone()
        } else {
            root.join(&config.source_dir)
        };
        Self { root, source_dir }
    }

    /// Repository root (the directory holding `.git`)
    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `hookah.yml`
    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Hook source directory (absolute)
    #[inline]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Directory holding the scripts of one hook group
    pub fn group_dir(&self, hook: HookName) -> PathBuf {
        self.source_dir.join(hook.as_str())
    }

    /// `.git` directory
    pub fn git_dir(&self) -> PathBuf {
        self.root.join(".git")
    }

    /// `.git/hooks`
    pub fn git_hooks_dir(&self) -> PathBuf {
        self.git_dir().join("hooks")
    }

    /// Where git looks for the given hook
    pub fn hook_path(&self, hook: HookName) -> PathBuf {
        self.git_hooks_dir().join(hook.as_str())
    }

    /// Where a foreign hook is preserved
    pub fn backup_path(&self, hook: HookName) -> PathBuf {
        self.git_hooks_dir()
            .join(format!("{}{BACKUP_SUFFIX}", hook.as_str()))
    }
}
