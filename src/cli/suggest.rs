//! `pr-agent suggest`

use anyhow::Result;
use clap::Parser;

use crate::config::AgentConfig;
use crate::mcp::tools;

/// Suggest command options.
#[derive(Parser)]
pub struct SuggestCommand {
    /// What the changes do.
    #[arg(long)]
    pub summary: String,

    /// Change type label (bug, feature, docs, refactor, test, performance, security).
    #[arg(long)]
    pub change_type: String,
}

impl SuggestCommand {
    /// Executes the suggest command.
    pub fn execute(self, config: &AgentConfig) -> Result<()> {
        println!(
            "{}",
            tools::suggest_template(config, &self.summary, &self.change_type)
        );
        Ok(())
    }
}
