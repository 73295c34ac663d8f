//! Base error types for hookah
//!
//! This module provides the error type shared by every hookah library crate.
//! We use `thiserror` for structured error handling with good error messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for hookah
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reading a file
    #[error("Failed to read file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a file
    #[error("Failed to write file {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error creating a directory
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error reading a directory
    #[error("Failed to read directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error with file metadata
    #[error("Failed to read metadata for {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error renaming a file
    #[error("Failed to rename {} to {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error removing a file
    #[error("Failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No `.git` entry in the start directory or any of its ancestors
    #[error("Not a git repository (or any of the parent directories): {}", start.display())]
    NotAGitRepository { start: PathBuf },

    /// Hook group name is not a git hook name
    #[error("Unknown hook group '{name}': not a git hook name")]
    UnknownHookGroup { name: String },

    /// Script passed to `add` does not exist
    #[error("Script not found: {}", path.display())]
    SourceScriptNotFound { path: PathBuf },

    /// Two scripts passed to one `add` would land on the same file
    #[error("Scripts {} and {} have the same file name", first.display(), second.display())]
    DuplicateScriptName { first: PathBuf, second: PathBuf },

    /// A foreign hook has to be moved aside, but the backup slot is taken
    #[error(
        "Refusing to replace {}: backup {} already exists. Move or delete one of them and retry.",
        existing.display(),
        backup.display()
    )]
    RenameConflict { existing: PathBuf, backup: PathBuf },

    /// Configuration file could not be parsed
    #[error("Invalid configuration file {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// A hook script could not be started
    #[error("Failed to start script {}: {source}", path.display())]
    ScriptSpawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
