//! `pr-agent analyze`

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::AgentConfig;
use crate::git::diff::{DEFAULT_BASE_BRANCH, DEFAULT_MAX_DIFF_LINES};
use crate::git::AnalyzeOptions;
use crate::mcp::tools;

/// Analyze command options.
#[derive(Parser)]
pub struct AnalyzeCommand {
    /// Base branch to compare against.
    #[arg(long, default_value = DEFAULT_BASE_BRANCH)]
    pub base_branch: String,

    /// Leave the diff text out of the output.
    #[arg(long)]
    pub no_diff: bool,

    /// Maximum number of diff lines to print.
    #[arg(long, default_value_t = DEFAULT_MAX_DIFF_LINES)]
    pub max_diff_lines: usize,

    /// Repository directory (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,
}

impl AnalyzeCommand {
    /// Executes the analyze command.
    pub async fn execute(self, config: &AgentConfig) -> Result<()> {
        let options = AnalyzeOptions {
            base_branch: self.base_branch,
            include_diff: !self.no_diff,
            max_diff_lines: self.max_diff_lines,
        };

        let body = tools::analyze_file_changes(config, self.repo.as_deref(), &options).await;
        println!("{body}");
        Ok(())
    }
}
