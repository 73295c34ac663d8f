//! Adding scripts to hook groups

use crate::dispatcher::{self, WireOutcome};
use hookah_config::Layout;
use hookah_core::{Error, HookName, Result, System};
use std::path::{Path, PathBuf};

/// What [`HookAdder::add`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddReport {
    /// Target hook
    pub hook: HookName,
    /// Group directory the scripts went into
    pub group_dir: PathBuf,
    /// Destination of every copied script
    pub copied: Vec<PathBuf>,
    /// How the dispatcher was wired
    pub wiring: WireOutcome,
}

/// Copies scripts into a hook group and wires its dispatcher
pub struct HookAdder<'a> {
    system: &'a dyn System,
    layout: &'a Layout,
}

impl<'a> HookAdder<'a> {
    /// Create an adder
    pub fn new(system: &'a dyn System, layout: &'a Layout) -> Self {
        Self { system, layout }
    }

    /// Add `scripts` to the group `hook`
    ///
    /// Everything is checked before the first write: the hook name, every
    /// source script (no two may share a file name), and the `.old` slot a
    /// foreign hook would move to.
    /// A script with the same file name as an existing one replaces it.
    /// With no scripts, the group is only created and wired.
    #[tracing::instrument(skip(self, scripts), fields(script_count = scripts.len()))]
    pub fn add(&self, hook: &str, scripts: &[PathBuf]) -> Result<AddReport> {
        let hook = HookName::parse(hook)?;

        let sources = scripts
            .iter()
            .map(|script| self.check_source(script))
            .collect::<Result<Vec<_>>>()?;

        for (i, (second, name)) in sources.iter().enumerate() {
            if let Some((first, _)) = sources[..i].iter().find(|(_, other)| other == name) {
                return Err(Error::DuplicateScriptName {
                    first: first.to_path_buf(),
                    second: second.to_path_buf(),
                });
            }
        }

        dispatcher::check_wirable(self.system, self.layout, hook)?;

        let group_dir = self.layout.group_dir(hook);
        self.system.create_dir_all(&group_dir)?;

        let mut copied = Vec::with_capacity(sources.len());
        for (source, file_name) in sources {
            let target = group_dir.join(file_name);
            let content = self.system.read_file(source)?;
            let mode = self.system.metadata(source)?.mode;
            self.system.write_file(&target, &content, Some(mode))?;
            tracing::debug!("Added {} to {hook}", target.display());
            copied.push(target);
        }

        let wiring = dispatcher::wire(self.system, self.layout, hook)?;

        Ok(AddReport {
            hook,
            group_dir,
            copied,
            wiring,
        })
    }

    /// Validate a source script and return it with its file name
    fn check_source<'p>(&self, script: &'p Path) -> Result<(&'p Path, &'p std::ffi::OsStr)> {
        let not_found = || Error::SourceScriptNotFound {
            path: script.to_path_buf(),
        };

        let file_name = script.file_name().ok_or_else(not_found)?;
        if !self.system.exists(script) || self.system.is_dir(script) {
            return Err(not_found());
        }
        Ok((script, file_name))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::dispatcher::is_dispatcher;
    use crate::installer::Installer;
    use hookah_config::Config;
    use hookah_core::MemorySystem;

    fn setup() -> (MemorySystem, Layout) {
        let system = MemorySystem::new();
        system.create_dir_all(Path::new("/repo/.git/hooks")).unwrap();
        system
            .write_file(Path::new("/src/lint.sh"), b"#!/bin/sh\nexit 0\n", Some(0o755))
            .unwrap();
        system
            .write_file(Path::new("/src/check"), b"#!/bin/sh\nexit 0\n", Some(0o700))
            .unwrap();
        (system, Layout::new("/repo", &Config::default()))
    }

    fn names(system: &MemorySystem, dir: &str) -> Vec<String> {
        system
            .read_dir(Path::new(dir))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect()
    }

    #[test]
    fn test_add_copies_script_and_wires_stub() {
        let (system, layout) = setup();

        let report = HookAdder::new(&system, &layout)
            .add("pre-commit", &[PathBuf::from("/src/lint.sh")])
            .unwrap();

        assert_eq!(report.hook, HookName::PreCommit);
        assert_eq!(
            report.copied,
            vec![PathBuf::from("/repo/.hookah/pre-commit/lint.sh")]
        );
        assert_eq!(report.wiring, WireOutcome::Created);

        let copy = Path::new("/repo/.hookah/pre-commit/lint.sh");
        assert_eq!(system.read_file(copy).unwrap(), b"#!/bin/sh\nexit 0\n");
        assert_eq!(system.metadata(copy).unwrap().mode, 0o755);
        assert!(is_dispatcher(
            &system
                .read_file(Path::new("/repo/.git/hooks/pre-commit"))
                .unwrap()
        ));
    }

    #[test]
    fn test_add_preserves_mode() {
        let (system, layout) = setup();
        HookAdder::new(&system, &layout)
            .add("pre-push", &[PathBuf::from("/src/check")])
            .unwrap();

        let stat = system
            .metadata(Path::new("/repo/.hookah/pre-push/check"))
            .unwrap();
        assert_eq!(stat.mode, 0o700);
    }

    #[test]
    fn test_add_creates_group_after_install() {
        let (system, layout) = setup();
        let config = Config::default();
        for group in ["commit-msg", "pre-commit"] {
            system
                .write_file(
                    &Path::new("/repo/.hookah").join(group).join("10-check"),
                    b"#!/bin/sh\n",
                    Some(0o755),
                )
                .unwrap();
        }
        Installer::new(&system, &layout, &config).install().unwrap();
        assert_eq!(
            names(&system, "/repo/.git/hooks"),
            vec!["commit-msg", "pre-commit"]
        );

        HookAdder::new(&system, &layout)
            .add("pre-push", &[PathBuf::from("/src/check")])
            .unwrap();

        assert_eq!(
            names(&system, "/repo/.git/hooks"),
            vec!["commit-msg", "pre-commit", "pre-push"]
        );
        assert_eq!(
            names(&system, "/repo/.hookah"),
            vec!["commit-msg", "pre-commit", "pre-push"]
        );
        assert_eq!(names(&system, "/repo/.hookah/pre-push"), vec!["check"]);
    }

    #[test]
    fn test_add_without_scripts_creates_group() {
        let (system, layout) = setup();

        let report = HookAdder::new(&system, &layout).add("pre-push", &[]).unwrap();

        assert!(report.copied.is_empty());
        assert_eq!(report.wiring, WireOutcome::Created);
        assert!(system.is_dir(Path::new("/repo/.hookah/pre-push")));
        assert!(system.exists(Path::new("/repo/.git/hooks/pre-push")));
    }

    #[test]
    fn test_add_moves_foreign_hook_aside_once() {
        let (system, layout) = setup();
        system
            .write_file(
                Path::new("/repo/.git/hooks/pre-push"),
                b"#!/bin/sh\necho legacy\n",
                Some(0o755),
            )
            .unwrap();

        let adder = HookAdder::new(&system, &layout);
        let report = adder.add("pre-push", &[PathBuf::from("/src/check")]).unwrap();
        assert_eq!(
            report.wiring,
            WireOutcome::Replaced {
                backup: PathBuf::from("/repo/.git/hooks/pre-push.old")
            }
        );

        // Adding again finds our stub and leaves it
        let report = adder.add("pre-push", &[PathBuf::from("/src/lint.sh")]).unwrap();
        assert_eq!(report.wiring, WireOutcome::Unchanged);

        assert_eq!(
            names(&system, "/repo/.git/hooks"),
            vec!["pre-push", "pre-push.old"]
        );
        assert_eq!(
            system
                .read_file(Path::new("/repo/.git/hooks/pre-push.old"))
                .unwrap(),
            b"#!/bin/sh\necho legacy\n"
        );
    }

    #[test]
    fn test_add_same_name_overwrites_only_that_script() {
        let (system, layout) = setup();
        let adder = HookAdder::new(&system, &layout);
        adder
            .add(
                "pre-commit",
                &[PathBuf::from("/src/lint.sh"), PathBuf::from("/src/check")],
            )
            .unwrap();

        system
            .write_file(Path::new("/src/lint.sh"), b"#!/bin/sh\nexit 1\n", None)
            .unwrap();
        adder
            .add("pre-commit", &[PathBuf::from("/src/lint.sh")])
            .unwrap();

        assert_eq!(
            names(&system, "/repo/.hookah/pre-commit"),
            vec!["check", "lint.sh"]
        );
        assert_eq!(
            system
                .read_file(Path::new("/repo/.hookah/pre-commit/lint.sh"))
                .unwrap(),
            b"#!/bin/sh\nexit 1\n"
        );
    }

    #[test]
    fn test_add_unknown_hook_writes_nothing() {
        let (system, layout) = setup();

        let err = HookAdder::new(&system, &layout)
            .add("pre-lunch", &[PathBuf::from("/src/lint.sh")])
            .unwrap_err();

        assert!(matches!(err, Error::UnknownHookGroup { .. }));
        assert!(!system.exists(Path::new("/repo/.hookah")));
    }

    #[test]
    fn test_add_missing_source_writes_nothing() {
        let (system, layout) = setup();

        let err = HookAdder::new(&system, &layout)
            .add(
                "pre-commit",
                &[PathBuf::from("/src/lint.sh"), PathBuf::from("/src/missing")],
            )
            .unwrap_err();

        match err {
            Error::SourceScriptNotFound { path } => {
                assert_eq!(path, PathBuf::from("/src/missing"));
            }
            other => panic!("expected SourceScriptNotFound, got {other:?}"),
        }
        assert!(!system.exists(Path::new("/repo/.hookah")));
        assert!(!system.exists(Path::new("/repo/.git/hooks/pre-commit")));
    }

    #[test]
    fn test_add_directory_source_is_not_a_script() {
        let (system, layout) = setup();
        let err = HookAdder::new(&system, &layout)
            .add("pre-commit", &[PathBuf::from("/src")])
            .unwrap_err();
        assert!(matches!(err, Error::SourceScriptNotFound { .. }));
    }

    #[test]
    fn test_add_rename_conflict_writes_nothing() {
        let (system, layout) = setup();
        system
            .write_file(Path::new("/repo/.git/hooks/pre-push"), b"foreign", None)
            .unwrap();
        system
            .write_file(Path::new("/repo/.git/hooks/pre-push.old"), b"older", None)
            .unwrap();

        let err = HookAdder::new(&system, &layout)
            .add("pre-push", &[PathBuf::from("/src/check")])
            .unwrap_err();

        assert!(matches!(err, Error::RenameConflict { .. }));
        assert!(!system.exists(Path::new("/repo/.hookah/pre-push")));
        assert_eq!(
            system
                .read_file(Path::new("/repo/.git/hooks/pre-push"))
                .unwrap(),
            b"foreign"
        );
    }

    #[test]
    fn test_add_duplicate_file_names_writes_nothing() {
        let (system, layout) = setup();
        system
            .write_file(Path::new("/other/lint.sh"), b"#!/bin/sh\nexit 1\n", Some(0o755))
            .unwrap();

        let err = HookAdder::new(&system, &layout)
            .add(
                "pre-commit",
                &[PathBuf::from("/src/lint.sh"), PathBuf::from("/other/lint.sh")],
            )
            .unwrap_err();

        match err {
            Error::DuplicateScriptName { first, second } => {
                assert_eq!(first, PathBuf::from("/src/lint.sh"));
                assert_eq!(second, PathBuf::from("/other/lint.sh"));
            }
            other => panic!("expected DuplicateScriptName, got {other:?}"),
        }
        assert!(!system.exists(Path::new("/repo/.hookah")));
        assert!(!system.exists(Path::new("/repo/.git/hooks/pre-commit")));
    }
}
