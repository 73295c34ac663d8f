//! Error types for CLI commands
//!
//! This module defines structured error types using thiserror, providing better
//! type safety and error handling compared to using `anyhow::Error` everywhere.

use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// Error from the hookah library crates
    #[error(transparent)]
    Hookah(#[from] hookah_core::Error),

    /// Failed to serialize output
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to read hook input
    #[error("Failed to read standard input: {0}")]
    Stdin(#[source] std::io::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;
