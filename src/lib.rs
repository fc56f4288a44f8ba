//! # pr-agent
//!
//! An MCP server that helps write pull request descriptions.
//!
//! ## Tools
//!
//! - `analyze_file_changes`: changed files and a size-limited diff between a
//!   base branch and `HEAD`
//! - `get_pr_templates`: every Markdown template in the template directory
//! - `suggest_template`: the template matching a change type label
//!
//! Each tool answers with a JSON string. Failures are reported in-band as
//! `{"error": "..."}`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pr_agent::config::AgentConfig;
//! use pr_agent::mcp::tools;
//!
//! let config = AgentConfig::with_templates_dir("templates");
//! println!("{}", tools::suggest_template(&config, "fixed a crash", "bug"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod mcp;
pub mod templates;
pub mod utils;

pub use crate::cli::Cli;
pub use crate::error::PrAgentError;

/// The current version of pr-agent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
