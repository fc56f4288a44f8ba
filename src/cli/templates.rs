//! `pr-agent templates`

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::AgentConfig;
use crate::mcp::tools;
use crate::templates::write_default_templates;

/// Template management.
#[derive(Parser)]
pub struct TemplatesCommand {
    /// Templates subcommand to execute.
    #[command(subcommand)]
    pub command: TemplatesSubcommands,
}

/// Templates subcommands.
#[derive(Subcommand)]
pub enum TemplatesSubcommands {
    /// Prints every template as JSON.
    List,
    /// Writes the built-in templates into the template directory.
    Init(InitCommand),
}

/// Init command options.
#[derive(Parser)]
pub struct InitCommand {
    /// Overwrite templates that already exist.
    #[arg(long)]
    pub force: bool,
}

impl TemplatesCommand {
    /// Executes the templates command.
    pub fn execute(self, config: &AgentConfig) -> Result<()> {
        match self.command {
            TemplatesSubcommands::List => {
                println!("{}", tools::get_pr_templates(config));
            }
            TemplatesSubcommands::Init(init) => {
                let report = write_default_templates(&config.templates_dir, init.force)?;
                for name in &report.written {
                    println!("✅ Wrote {}", config.templates_dir.join(name).display());
                }
                for name in &report.skipped {
                    println!("⏭️  Kept existing {}", config.templates_dir.join(name).display());
                }
            }
        }
        Ok(())
    }
}
