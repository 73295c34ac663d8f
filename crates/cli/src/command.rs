//! Command trait for hookah CLI
//!
//! This module defines the `Command` trait that all hookah commands implement.
//! It provides a uniform interface for command execution, making it easier to
//! test, extend, and maintain commands.

use crate::common::RuntimeContext;
use crate::error::Result;

/// Trait for all hookah commands
///
/// The `execute` method receives a `RuntimeContext` containing the loaded
/// configuration, the resolved layout and the filesystem to act on.
///
/// Commands can specify their return type via the `Output` associated type.
/// Most commands return `()`; `run` returns the exit code for git.
///
/// # Example
///
/// ```rust,ignore
/// use crate::command::Command;
/// use crate::common::RuntimeContext;
/// use crate::error::Result;
/// use clap::Args;
///
/// #[derive(Debug, Args)]
/// pub struct MyCommand {
///     #[arg(short, long)]
///     pub some_flag: bool,
/// }
///
/// impl Command for MyCommand {
///     type Output = ();
///
///     fn execute(&self, context: &RuntimeContext) -> Result<()> {
///         // Access config: context.config
///         // Access paths: context.layout, context.root()
///         Ok(())
///     }
/// }
/// ```
pub trait Command {
    /// The type returned by this command
    type Output;

    /// Execute the command with the given runtime context
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` if the command fails to execute. Error messages should
    /// be descriptive enough for the user to understand what went wrong.
    fn execute(&self, context: &RuntimeContext) -> Result<Self::Output>;
}
