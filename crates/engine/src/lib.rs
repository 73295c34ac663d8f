//! # Hookah Engine
//!
//! The operations behind the `hookah` command line:
//!
//! - **Installer**: config file, default groups, dispatchers for populated groups
//! - **Hook Adder**: copying scripts into a group and wiring its dispatcher
//! - **Hooks**: discovering and running the scripts of a group
//! - **Uninstaller**: taking dispatchers out again
//! - **Inspection**: group and hook slot status
//!
//! Every component borrows a [`hookah_core::System`] and a
//! [`hookah_config::Layout`], so the same code runs against the disk and
//! against an in-memory tree.

pub mod adder;
pub mod dispatcher;
pub mod hooks;
pub mod inspect;
pub mod installer;
pub mod uninstall;

// Re-export error types from core
pub use hookah_core::{Error, Result};

// Re-export commonly used types
pub use adder::{AddReport, HookAdder};
pub use dispatcher::{SlotState, WireOutcome};
pub use hooks::{HookRunner, RunReport, ScriptExecutor, ScriptInvocation};
pub use inspect::{GroupStatus, list_groups};
pub use installer::{InstallReport, Installer};
pub use uninstall::{UninstallReport, Uninstaller};
