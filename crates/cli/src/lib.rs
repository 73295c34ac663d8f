//! Hookah CLI library
//!
//! This library contains all the CLI logic for hookah, making it reusable
//! for testing and integration with other tools.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use command::Command;
use common::RuntimeContext;

/// Hookah - git hooks kept in your repository
#[derive(Parser)]
#[command(name = "hookah")]
#[command(about = "Manage git hook scripts from a directory in your repository")]
#[command(version)]
#[command(long_about = "Manage git hook scripts from a directory in your repository

Scripts live in one directory per hook (e.g. .hookah/pre-commit/) and are
committed with the project. A small dispatcher in .git/hooks runs every
script of the group in file name order and stops at the first failure.

Examples:
  • hookah install
      → Create hookah.yml and the default hook groups

  • hookah add pre-commit scripts/lint.sh
      → Copy lint.sh into .hookah/pre-commit/ and wire .git/hooks/pre-commit

  • hookah run pre-commit
      → Run the pre-commit group by hand")]
pub struct Cli {
    /// Hook source directory, relative to the repository root (overrides hookah.yml)
    #[arg(long, env = "HOOKAH_SOURCE_DIR", value_name = "DIR", global = true)]
    pub source_dir: Option<PathBuf>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging hooks run by git)
    #[arg(long, env = "HOOKAH_LOG_FILE", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for hookah CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Create the config file and default hook groups, wire populated groups
    Install(cmd::install::InstallCommand),

    /// Add scripts to a hook group and wire its dispatcher
    Add(cmd::add::AddCommand),

    /// Run every script of a hook group (called by the dispatcher)
    Run(cmd::run::RunCommand),

    /// Show hook groups, their scripts and dispatcher state
    List(cmd::list::ListCommand),

    /// Remove dispatchers and restore the hooks they replaced
    Uninstall(cmd::uninstall::UninstallCommand),
}

/// Run the CLI and return the process exit code
///
/// The code is 0 unless `run` stopped at a failing script, in which case it
/// is that script's code.
pub fn run(cli: Cli) -> Result<i32> {
    // Initialize logging based on verbosity
    hookah_config::logging::init(cli.verbose, cli.log_file.as_deref())
        .context("Failed to initialize logging")?;

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let context = RuntimeContext::new(&cwd, cli.source_dir)?;

    execute_command(cli.command, &context)
}

fn execute_command(command: Commands, context: &RuntimeContext) -> Result<i32> {
    match command {
        Commands::Install(install_cmd) => {
            install_cmd.execute(context)?;
        }
        Commands::Add(add_cmd) => {
            add_cmd.execute(context)?;
        }
        Commands::Run(run_cmd) => {
            return Ok(run_cmd.execute(context)?);
        }
        Commands::List(list_cmd) => {
            list_cmd.execute(context)?;
        }
        Commands::Uninstall(uninstall_cmd) => {
            uninstall_cmd.execute(context)?;
        }
    }

    Ok(0)
}
