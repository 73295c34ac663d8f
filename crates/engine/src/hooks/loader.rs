//! Hook group discovery
//!
//! Lists group directories under the source directory and the scripts inside
//! each group, in the order they run.

use hookah_config::Layout;
use hookah_core::{HookName, Result, System};
use std::path::PathBuf;

/// A directory found in the source directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDir {
    /// Directory name
    pub name: String,
    /// Parsed hook name, `None` if git has no such hook
    pub hook: Option<HookName>,
    /// Absolute path
    pub path: PathBuf,
}

/// Whether a file in a group directory should run
///
/// Hidden files and editor leftovers are skipped.
pub fn is_script_name(name: &str) -> bool {
    !name.starts_with('.') && !name.ends_with('~') && !name.to_lowercase().ends_with(".swp")
}

/// Discover hook groups and their scripts
pub struct HookLoader<'a> {
    system: &'a dyn System,
    layout: &'a Layout,
}

impl<'a> HookLoader<'a> {
    /// Create a loader over the given layout
    pub fn new(system: &'a dyn System, layout: &'a Layout) -> Self {
        Self { system, layout }
    }

    /// List group directories, sorted by name
    ///
    /// A missing source directory has no groups.
    pub fn groups(&self) -> Result<Vec<GroupDir>> {
        let source_dir = self.layout.source_dir();
        if !self.system.is_dir(source_dir) {
            tracing::debug!(
                "Source directory does not exist: {}",
                source_dir.display()
            );
            return Ok(Vec::new());
        }

        Ok(self
            .system
            .read_dir(source_dir)?
            .into_iter()
            .filter(|entry| entry.is_dir() && !entry.name.starts_with('.'))
            .map(|entry| GroupDir {
                hook: HookName::parse(&entry.name).ok(),
                path: source_dir.join(&entry.name),
                name: entry.name,
            })
            .collect())
    }

    /// List the scripts of one group in run order
    ///
    /// A group without a directory has no scripts.
    pub fn scripts(&self, hook: HookName) -> Result<Vec<PathBuf>> {
        let group_dir = self.layout.group_dir(hook);
        if !self.system.is_dir(&group_dir) {
            tracing::debug!("Hook group does not exist: {}", group_dir.display());
            return Ok(Vec::new());
        }

        // read_dir is sorted by file name, which fixes the run order
        Ok(self
            .system
            .read_dir(&group_dir)?
            .into_iter()
            .filter(|entry| entry.is_file() && is_script_name(&entry.name))
            .map(|entry| group_dir.join(entry.name))
            .collect())
    }
}
