//! Hook groups and their execution
//!
//! ## Execution Model
//!
//! - A hook group is a directory named after a git hook, e.g. `.hookah/pre-commit`
//! - Scripts run one at a time, sorted by file name (use numeric prefixes to order them)
//! - The first script that exits non-zero stops the group; its code is the hook's result
//!
//! ## Module Organization
//!
//! - `loader`: Group and script discovery
//! - `executor`: Sequential execution with a pluggable process layer

pub mod executor;
pub mod loader;

// Re-export main types for convenience
pub use executor::{
    HOOK_ENV, HookRunner, ProcessExecutor, RunReport, ScriptExecutor, ScriptFailure,
    ScriptInvocation,
};
pub use loader::{GroupDir, HookLoader, is_script_name};
