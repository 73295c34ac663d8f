//! CLI command implementations
//!
//! This module contains all command implementations for the hookah CLI.

pub mod add;
pub mod install;
pub mod list;
pub mod run;
pub mod uninstall;

use hookah_engine::WireOutcome;
use owo_colors::OwoColorize;
use std::path::Path;

/// Print one line describing how a dispatcher was wired
pub(crate) fn print_wiring(hook: &str, hook_path: &Path, outcome: &WireOutcome) {
    match outcome {
        WireOutcome::Created => {
            println!("{} {} → {}", "✓".green(), hook.bold(), hook_path.display());
        }
        WireOutcome::Refreshed => {
            println!("{} {} (dispatcher updated)", "✓".green(), hook.bold());
        }
        WireOutcome::Unchanged => {
            println!("{} {} (already wired)", "·".dimmed(), hook.bold());
        }
        WireOutcome::Replaced { backup } => {
            println!(
                "{} {} → {} (existing hook kept as {})",
                "✓".green(),
                hook.bold(),
                hook_path.display(),
                backup.display().yellow()
            );
        }
    }
}
