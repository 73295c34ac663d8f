//! Removing dispatchers
//!
//! Takes every hookah stub out of `.git/hooks` and puts back the hook it
//! displaced, if any. Hook groups and `hookah.yml` stay.

use crate::dispatcher::{self, SlotState};
use hookah_config::Layout;
use hookah_core::{HookName, Result, System};

/// What [`Uninstaller::uninstall`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallReport {
    /// Hooks whose stub was removed
    pub removed: Vec<HookName>,
    /// Hooks whose `.old` backup was moved back
    pub restored: Vec<HookName>,
}

/// Removes hookah stubs from a repository
pub struct Uninstaller<'a> {
    system: &'a dyn System,
    layout: &'a Layout,
}

impl<'a> Uninstaller<'a> {
    /// Create an uninstaller
    pub fn new(system: &'a dyn System, layout: &'a Layout) -> Self {
        Self { system, layout }
    }

    /// Remove every stub and restore backups into the freed slots
    ///
    /// Foreign hooks are never touched.
    #[tracing::instrument(skip(self))]
    pub fn uninstall(&self) -> Result<UninstallReport> {
        let mut report = UninstallReport::default();
        if !self.system.is_dir(&self.layout.git_hooks_dir()) {
            return Ok(report);
        }

        // Inspect every slot before removing anything
        let mut stubs = Vec::new();
        for hook in HookName::ALL {
            if dispatcher::slot_state(self.system, self.layout, hook)? == SlotState::Dispatcher {
                stubs.push(hook);
            }
        }

        for hook in stubs {
            let path = self.layout.hook_path(hook);
            self.system.remove_file(&path)?;
            tracing::debug!("Removed {}", path.display());
            report.removed.push(hook);

            let backup = self.layout.backup_path(hook);
            if self.system.exists(&backup) {
                self.system.rename(&backup, &path)?;
                tracing::debug!("Restored {}", path.display());
                report.restored.push(hook);
            }
        }

        Ok(report)
    }
}
