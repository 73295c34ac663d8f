//! Core types and utilities for hookah
//!
//! This is the foundation crate (Layer 0) that all other hookah crates depend on.
//! It provides:
//! - Base error types
//! - Filesystem abstraction (real disk and in-memory backends)
//! - The set of git hook names hookah recognizes
//!
//! This crate has no dependencies on other hookah crates.

pub mod error;
pub mod hook;
pub mod system;

pub use error::{Error, Result};
pub use hook::{DEFAULT_GROUPS, HookName};
pub use system::{DirEntry, EntryKind, FileStat, MemorySystem, RealSystem, System};
