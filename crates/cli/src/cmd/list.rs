//! List command implementation
//!
//! Show hook groups with their scripts and dispatcher state.

use clap::Args;
use hookah_engine::{GroupStatus, SlotState, list_groups};
use owo_colors::OwoColorize;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Output format for list command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable listing
    Simple,
    /// JSON array of groups
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(OutputFormat::Simple),
            "json" => Ok(OutputFormat::Json),
            _ => anyhow::bail!("Invalid output format: {}. Use 'simple' or 'json'", s),
        }
    }
}

/// Show hook groups
#[derive(Debug, Clone, Args)]
pub struct ListCommand {
    /// Output format (simple, json)
    #[arg(long, default_value = "simple")]
    pub format: OutputFormat,
}

impl Command for ListCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let groups = list_groups(context.system(), &context.layout)?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&groups)?),
            OutputFormat::Simple => print_simple(context, &groups),
        }

        Ok(())
    }
}

fn print_simple(context: &RuntimeContext, groups: &[GroupStatus]) {
    if groups.is_empty() {
        println!(
            "{}",
            format!(
                "No hook groups in {}. Run 'hookah install' or 'hookah add <hook> <script>'.",
                context.layout.source_dir().display()
            )
            .yellow()
        );
        return;
    }

    for group in groups {
        let state = match group.slot {
            Some(SlotState::Dispatcher) => SlotState::Dispatcher.as_str().green().to_string(),
            Some(SlotState::Foreign) => SlotState::Foreign.as_str().yellow().to_string(),
            Some(SlotState::Missing) => SlotState::Missing.as_str().dimmed().to_string(),
            None => "not a git hook".red().to_string(),
        };
        println!("{} ({state})", group.name.bold());

        if group.scripts.is_empty() {
            println!("  {}", "(empty)".dimmed());
        }
        for script in &group.scripts {
            println!("  {script}");
        }
    }
}
