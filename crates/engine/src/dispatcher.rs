//! Dispatcher stubs in `.git/hooks`
//!
//! A dispatcher is the tiny shell script git actually runs. It hands over to
//! `hookah run <hook>` with the original arguments. Files carrying
//! [`MARKER`] are ours; everything else in `.git/hooks` is foreign and is
//! only ever moved aside, never deleted.

use hookah_config::Layout;
use hookah_core::{EntryKind, Error, HookName, Result, System};
use serde::Serialize;
use std::path::PathBuf;

/// Line that identifies a hookah-managed stub
pub const MARKER: &str = "# hookah:dispatcher";

/// Permissions for stubs (git skips non-executable hooks)
pub const STUB_MODE: u32 = 0o755;

/// Render the stub for `hook`
pub fn render(hook: HookName) -> String {
    format!("#!/bin/sh\n{MARKER} (managed by hookah, do not edit)\nexec hookah run {hook} \"$@\"\n")
}

/// Whether file content is a hookah stub (any version)
pub fn is_dispatcher(content: &[u8]) -> bool {
    String::from_utf8_lossy(content)
        .lines()
        .any(|line| line.trim_start().starts_with(MARKER))
}

/// What currently occupies `.git/hooks/<hook>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    /// Nothing there
    Missing,
    /// A hookah stub
    Dispatcher,
    /// Any other file (or directory)
    Foreign,
}

impl SlotState {
    /// Label used in listings
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Dispatcher => "dispatcher",
            Self::Foreign => "foreign",
        }
    }
}

/// Inspect the hook slot for `hook`
///
/// Anything occupying the slot that cannot be read as a file, such as a
/// dangling symlink, counts as foreign.
pub fn slot_state(system: &dyn System, layout: &Layout, hook: HookName) -> Result<SlotState> {
    let path = layout.hook_path(hook);
    if !system.exists(&path) {
        return Ok(SlotState::Missing);
    }

    let readable = system
        .metadata(&path)
        .is_ok_and(|stat| stat.kind == EntryKind::File);
    if !readable {
        tracing::debug!(path = %path.display(), "Hook slot is not a readable file");
        return Ok(SlotState::Foreign);
    }

    Ok(match system.read_file(&path) {
        Ok(content) if is_dispatcher(&content) => SlotState::Dispatcher,
        Ok(_) => SlotState::Foreign,
        Err(e) => {
            tracing::debug!("Treating unreadable hook as foreign: {e}");
            SlotState::Foreign
        }
    })
}

/// Result of [`wire`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireOutcome {
    /// Stub written into an empty slot
    Created,
    /// Current stub already in place
    Unchanged,
    /// An older hookah stub was rewritten
    Refreshed,
    /// A foreign hook was moved to `backup` and the stub written
    Replaced {
        /// Where the foreign hook now lives
        backup: PathBuf,
    },
}

/// Fail with [`Error::RenameConflict`] if wiring `hook` would need a backup
/// slot that is already taken
///
/// Lets callers refuse before they write anything else.
pub fn check_wirable(system: &dyn System, layout: &Layout, hook: HookName) -> Result<()> {
    if slot_state(system, layout, hook)? != SlotState::Foreign {
        return Ok(());
    }

    let backup = layout.backup_path(hook);
    if system.exists(&backup) {
        return Err(Error::RenameConflict {
            existing: layout.hook_path(hook),
            backup,
        });
    }
    Ok(())
}

/// Make `.git/hooks/<hook>` a current hookah stub
///
/// A foreign hook is renamed to `<hook>.old` first. If that name is taken
/// nothing is changed and [`Error::RenameConflict`] is returned.
#[tracing::instrument(skip_all, fields(hook = %hook))]
pub fn wire(system: &dyn System, layout: &Layout, hook: HookName) -> Result<WireOutcome> {
    let path = layout.hook_path(hook);
    let stub = render(hook);

    system.create_dir_all(&layout.git_hooks_dir())?;

    let outcome = match slot_state(system, layout, hook)? {
        SlotState::Missing => {
            system.write_file(&path, stub.as_bytes(), Some(STUB_MODE))?;
            WireOutcome::Created
        }
        SlotState::Dispatcher => {
            if system.read_file(&path)? == stub.as_bytes() {
                WireOutcome::Unchanged
            } else {
                system.write_file(&path, stub.as_bytes(), Some(STUB_MODE))?;
                WireOutcome::Refreshed
            }
        }
        SlotState::Foreign => {
            check_wirable(system, layout, hook)?;
            let backup = layout.backup_path(hook);
            system.rename(&path, &backup)?;
            tracing::debug!(backup = %backup.display(), "Preserved existing hook");
            system.write_file(&path, stub.as_bytes(), Some(STUB_MODE))?;
            WireOutcome::Replaced { backup }
        }
    };

    tracing::debug!(?outcome, "Wired dispatcher");
    Ok(outcome)
}
