//! Run command implementation
//!
//! Entry point of every dispatcher: runs one hook group and hands the exit
//! code back to git.

use clap::Args;
use hookah_engine::HookRunner;
use owo_colors::OwoColorize;
use std::ffi::OsString;
use std::io::{IsTerminal, Read};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::{CommandError, Result};

/// Run every script of a hook group
#[derive(Debug, Clone, Args)]
pub struct RunCommand {
    /// Git hook name, e.g. pre-commit
    pub hook: String,

    /// Arguments from git, passed to every script
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<OsString>,
}

/// Read all of stdin unless it is a terminal
///
/// Some hooks (pre-push, post-rewrite, reference-transaction) get their
/// input on stdin; every script needs to see all of it.
fn read_stdin() -> Result<Option<Vec<u8>>> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = Vec::new();
    stdin
        .read_to_end(&mut buffer)
        .map_err(CommandError::Stdin)?;
    tracing::debug!(bytes = buffer.len(), "Read hook input");
    Ok(Some(buffer))
}

impl Command for RunCommand {
    /// Exit code for git
    type Output = i32;

    fn execute(&self, context: &RuntimeContext) -> Result<i32> {
        let stdin = read_stdin()?;

        let report = HookRunner::new(context.system(), &context.layout).run(
            &self.hook,
            &self.args,
            stdin.as_deref(),
        )?;

        if let Some(failure) = &report.failure {
            let name = failure.script.file_name().map_or_else(
                || failure.script.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            );
            eprintln!(
                "{} {}: {} exited with code {}",
                "✗".red(),
                report.hook.bold(),
                name.red(),
                failure.code
            );
        }

        Ok(report.exit_code())
    }
}
