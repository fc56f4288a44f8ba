//! CLI interface for pr-agent.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::AgentConfig;

pub mod analyze;
pub mod suggest;
pub mod templates;

/// pr-agent: git change analysis and PR template suggestions over MCP.
#[derive(Parser)]
#[command(name = "pr-agent")]
#[command(about = "Analyze git changes and suggest PR templates", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the PR templates.
    #[arg(long, global = true, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run; serves MCP on stdio when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Runs the MCP server on stdin/stdout.
    Serve,
    /// Prints changed files and diff against a base branch.
    Analyze(analyze::AnalyzeCommand),
    /// Template management.
    Templates(templates::TemplatesCommand),
    /// Suggests a template for a change type.
    Suggest(suggest::SuggestCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        let config = AgentConfig::load(self.templates_dir)?;

        match self.command.unwrap_or(Commands::Serve) {
            Commands::Serve => crate::mcp::serve_stdio(config).await,
            Commands::Analyze(cmd) => cmd.execute(&config).await,
            Commands::Templates(cmd) => cmd.execute(&config),
            Commands::Suggest(cmd) => cmd.execute(&config),
        }
    }
}
