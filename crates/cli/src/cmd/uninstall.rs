//! Uninstall command implementation

use clap::Args;
use hookah_engine::Uninstaller;
use owo_colors::OwoColorize;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Remove dispatchers and restore the hooks they replaced
#[derive(Debug, Clone, Args)]
pub struct UninstallCommand {}

impl Command for UninstallCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let report = Uninstaller::new(context.system(), &context.layout).uninstall()?;

        for hook in &report.removed {
            println!("{} Removed dispatcher {}", "✓".green(), hook.bold());
        }
        for hook in &report.restored {
            println!(
                "{} Restored {}",
                "✓".green(),
                context.layout.hook_path(*hook).display()
            );
        }
        if report.removed.is_empty() {
            println!("{}", "No dispatchers installed.".dimmed());
        }

        Ok(())
    }
}
