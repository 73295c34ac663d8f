//! Repository setup
//!
//! `install` lays out the config file and the default hook groups, then wires
//! a dispatcher for every group that already holds scripts. Running it again
//! changes nothing.

use crate::dispatcher::{self, WireOutcome};
use crate::hooks::HookLoader;
use hookah_config::{Config, Layout};
use hookah_core::{DEFAULT_GROUPS, HookName, Result, System};
use std::path::PathBuf;

/// What [`Installer::install`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Config file written (was absent)
    pub config_created: Option<PathBuf>,
    /// Default groups whose directory was created
    pub groups_created: Vec<HookName>,
    /// Dispatchers wired, in group order
    pub wired: Vec<(HookName, WireOutcome)>,
    /// Directories in the source dir that are not hook names
    pub skipped: Vec<String>,
}

/// Sets up hookah in a repository
pub struct Installer<'a> {
    system: &'a dyn System,
    layout: &'a Layout,
    config: &'a Config,
}

impl<'a> Installer<'a> {
    /// Create an installer
    ///
    /// `config` is what gets written when `hookah.yml` does not exist yet.
    pub fn new(system: &'a dyn System, layout: &'a Layout, config: &'a Config) -> Self {
        Self {
            system,
            layout,
            config,
        }
    }

    /// Install hookah
    ///
    /// An existing `hookah.yml` is never rewritten. Any filesystem error
    /// aborts the install. Every populated group is checked for a
    /// [`hookah_core::Error::RenameConflict`] before the first stub is wired.
    #[tracing::instrument(skip(self), fields(root = %self.layout.root().display()))]
    pub fn install(&self) -> Result<InstallReport> {
        let mut report = InstallReport::default();

        let config_file = self.layout.config_file();
        if self.system.exists(&config_file) {
            tracing::debug!("Config file already exists: {}", config_file.display());
        } else {
            let path = self.config.save(self.system, self.layout.root())?;
            tracing::debug!("Created {}", path.display());
            report.config_created = Some(path);
        }

        self.system.create_dir_all(&self.layout.git_hooks_dir())?;
        self.system.create_dir_all(self.layout.source_dir())?;

        for hook in DEFAULT_GROUPS {
            let group_dir = self.layout.group_dir(hook);
            if !self.system.exists(&group_dir) {
                self.system.create_dir_all(&group_dir)?;
                tracing::debug!("Created hook group {}", group_dir.display());
                report.groups_created.push(hook);
            }
        }

        let loader = HookLoader::new(self.system, self.layout);
        let mut populated = Vec::new();
        for group in loader.groups()? {
            let Some(hook) = group.hook else {
                tracing::warn!(
                    "Ignoring {}: '{}' is not a git hook name",
                    group.path.display(),
                    group.name
                );
                report.skipped.push(group.name);
                continue;
            };

            // Empty groups are wired by `add`
            if !loader.scripts(hook)?.is_empty() {
                populated.push(hook);
            }
        }

        // No stub is written while any slot would conflict
        for &hook in &populated {
            dispatcher::check_wirable(self.system, self.layout, hook)?;
        }

        for hook in populated {
            let outcome = dispatcher::wire(self.system, self.layout, hook)?;
            report.wired.push((hook, outcome));
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use hookah_core::MemorySystem;
    use std::path::Path;

    fn setup() -> (MemorySystem, Layout, Config) {
        let system = MemorySystem::new();
        system.create_dir_all(Path::new("/repo/.git")).unwrap();
        let config = Config::default();
        let layout = Layout::new("/repo", &config);
        (system, layout, config)
    }

    /// Snapshot of every path and file content under `dir`
    fn snapshot(system: &MemorySystem, dir: &Path) -> Vec<(PathBuf, Option<Vec<u8>>)> {
        let mut out = Vec::new();
        for entry in system.read_dir(dir).unwrap() {
            let path = dir.join(&entry.name);
            if entry.is_dir() {
                out.push((path.clone(), None));
                out.extend(snapshot(system, &path));
            } else {
                let content = system.read_file(&path).unwrap();
                out.push((path, Some(content)));
            }
        }
        out
    }

    fn hook_files(system: &MemorySystem) -> Vec<String> {
        system
            .read_dir(Path::new("/repo/.git/hooks"))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect()
    }

    #[test]
    fn test_install_fresh_repository() {
        let (system, layout, config) = setup();

        let report = Installer::new(&system, &layout, &config).install().unwrap();

        assert_eq!(report.config_created, Some(PathBuf::from("/repo/hookah.yml")));
        assert_eq!(report.groups_created, DEFAULT_GROUPS.to_vec());
        assert!(report.wired.is_empty());
        assert!(system.is_dir(Path::new("/repo/.hookah/commit-msg")));
        assert!(system.is_dir(Path::new("/repo/.hookah/pre-commit")));
        assert!(system.is_dir(Path::new("/repo/.git/hooks")));
        // No scripts yet, so nothing is wired
        assert!(hook_files(&system).is_empty());

        let content = system.read_file(Path::new("/repo/hookah.yml")).unwrap();
        assert!(String::from_utf8(content).unwrap().contains("source-dir: .hookah"));
    }

    #[test]
    fn test_install_is_idempotent() {
        let (system, layout, config) = setup();
        let installer = Installer::new(&system, &layout, &config);

        installer.install().unwrap();
        let first = snapshot(&system, Path::new("/repo"));

        let report = installer.install().unwrap();
        let second = snapshot(&system, Path::new("/repo"));

        assert_eq!(first, second);
        assert_eq!(report.config_created, None);
        assert!(report.groups_created.is_empty());
    }

    #[test]
    fn test_install_keeps_existing_config() {
        let (system, layout, config) = setup();
        system
            .write_file(Path::new("/repo/hookah.yml"), b"source-dir: .hookah # mine\n", None)
            .unwrap();

        let report = Installer::new(&system, &layout, &config).install().unwrap();

        assert_eq!(report.config_created, None);
        assert_eq!(
            system.read_file(Path::new("/repo/hookah.yml")).unwrap(),
            b"source-dir: .hookah # mine\n"
        );
    }

    #[test]
    fn test_install_wires_populated_groups() {
        let (system, layout, config) = setup();
        system
            .write_file(Path::new("/repo/.hookah/commit-msg/check"), b"#!/bin/sh\n", Some(0o755))
            .unwrap();
        system
            .write_file(Path::new("/repo/.hookah/pre-commit/lint"), b"#!/bin/sh\n", Some(0o755))
            .unwrap();

        let report = Installer::new(&system, &layout, &config).install().unwrap();

        assert_eq!(hook_files(&system), vec!["commit-msg", "pre-commit"]);
        assert_eq!(
            report.wired,
            vec![
                (HookName::CommitMsg, WireOutcome::Created),
                (HookName::PreCommit, WireOutcome::Created),
            ]
        );

        // Second run leaves the stubs alone
        let report = Installer::new(&system, &layout, &config).install().unwrap();
        assert!(
            report
                .wired
                .iter()
                .all(|(_, outcome)| *outcome == WireOutcome::Unchanged)
        );
        assert_eq!(hook_files(&system), vec!["commit-msg", "pre-commit"]);
    }

    #[test]
    fn test_install_skips_unknown_group_dirs() {
        let (system, layout, config) = setup();
        system
            .write_file(Path::new("/repo/.hookah/helpers/common.sh"), b"", None)
            .unwrap();

        let report = Installer::new(&system, &layout, &config).install().unwrap();

        assert_eq!(report.skipped, vec!["helpers".to_string()]);
        assert!(!system.exists(Path::new("/repo/.git/hooks/helpers")));
    }

    #[test]
    fn test_install_preserves_foreign_hook_of_populated_group() {
        let (system, layout, config) = setup();
        system
            .write_file(Path::new("/repo/.git/hooks/pre-commit"), b"#!/bin/sh\nmake lint\n", Some(0o755))
            .unwrap();
        system
            .write_file(Path::new("/repo/.hookah/pre-commit/lint"), b"#!/bin/sh\n", Some(0o755))
            .unwrap();

        Installer::new(&system, &layout, &config).install().unwrap();

        assert_eq!(
            system
                .read_file(Path::new("/repo/.git/hooks/pre-commit.old"))
                .unwrap(),
            b"#!/bin/sh\nmake lint\n"
        );
    }

    #[test]
    fn test_install_custom_source_dir() {
        let system = MemorySystem::new();
        system.create_dir_all(Path::new("/repo/.git")).unwrap();
        let config = Config::default().with_source_dir(Some(PathBuf::from("tools/hooks")));
        let layout = Layout::new("/repo", &config);

        Installer::new(&system, &layout, &config).install().unwrap();

        assert!(system.is_dir(Path::new("/repo/tools/hooks/pre-commit")));
        let content = system.read_file(Path::new("/repo/hookah.yml")).unwrap();
        assert!(String::from_utf8(content).unwrap().contains("tools/hooks"));
    }

    #[test]
    fn test_install_conflict_wires_nothing() {
        let (system, layout, config) = setup();
        system
            .write_file(Path::new("/repo/.hookah/commit-msg/check"), b"#!/bin/sh\n", Some(0o755))
            .unwrap();
        system
            .write_file(Path::new("/repo/.hookah/pre-commit/lint"), b"#!/bin/sh\n", Some(0o755))
            .unwrap();
        system
            .write_file(Path::new("/repo/.git/hooks/pre-commit"), b"foreign", Some(0o755))
            .unwrap();
        system
            .write_file(Path::new("/repo/.git/hooks/pre-commit.old"), b"older", None)
            .unwrap();

        let err = Installer::new(&system, &layout, &config)
            .install()
            .unwrap_err();

        assert!(matches!(err, hookah_core::Error::RenameConflict { .. }));
        // commit-msg sorts first but was not wired either
        assert!(!system.exists(Path::new("/repo/.git/hooks/commit-msg")));
        assert_eq!(
            system
                .read_file(Path::new("/repo/.git/hooks/pre-commit"))
                .unwrap(),
            b"foreign"
        );
    }
}
