//! Install command implementation
//!
//! Set up hookah in the current repository.

use clap::Args;
use hookah_engine::Installer;
use owo_colors::OwoColorize;

use crate::cmd::print_wiring;
use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Name of the executable the dispatchers call
const EXECUTABLE: &str = "hookah";

/// Create the config file and default hook groups
#[derive(Debug, Clone, Args)]
pub struct InstallCommand {}

impl Command for InstallCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let report =
            Installer::new(context.system(), &context.layout, &context.config).install()?;

        if let Some(path) = &report.config_created {
            println!("{} Created {}", "✓".green(), path.display());
        }
        for hook in &report.groups_created {
            println!(
                "{} Created hook group {}",
                "✓".green(),
                context.layout.group_dir(*hook).display()
            );
        }
        for (hook, outcome) in &report.wired {
            print_wiring(hook.as_str(), &context.layout.hook_path(*hook), outcome);
        }
        for name in &report.skipped {
            println!(
                "{} Skipped {}: not a git hook name",
                "!".yellow(),
                context.layout.source_dir().join(name).display()
            );
        }

        if report.config_created.is_none()
            && report.groups_created.is_empty()
            && report.wired.is_empty()
        {
            println!("{}", "Already installed.".dimmed());
        }

        // Dispatchers call `hookah` by name
        if which::which(EXECUTABLE).is_err() {
            tracing::warn!(
                "'{EXECUTABLE}' was not found on PATH; git will not be able to run the dispatchers"
            );
        }

        Ok(())
    }
}
