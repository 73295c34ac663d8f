//! Add command implementation
//!
//! Add scripts to a hook group.

use clap::Args;
use hookah_engine::HookAdder;
use owo_colors::OwoColorize;
use std::path::PathBuf;

use crate::cmd::print_wiring;
use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Add scripts to a hook group
#[derive(Debug, Clone, Args)]
pub struct AddCommand {
    /// Git hook name, e.g. pre-commit
    pub hook: String,

    /// Scripts to copy into the group (none: only create the group)
    pub scripts: Vec<PathBuf>,
}

impl Command for AddCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let report =
            HookAdder::new(context.system(), &context.layout).add(&self.hook, &self.scripts)?;

        for path in &report.copied {
            println!("{} Added {}", "✓".green(), path.display());
        }
        if report.copied.is_empty() {
            println!("{} Hook group {}", "✓".green(), report.group_dir.display());
        }
        print_wiring(
            report.hook.as_str(),
            &context.layout.hook_path(report.hook),
            &report.wiring,
        );

        Ok(())
    }
}
