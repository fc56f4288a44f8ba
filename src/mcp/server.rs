//! MCP server exposing the PR agent tools over stdio.

use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::service::RequestContext;
use rmcp::transport::stdio;
use rmcp::{
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::AgentConfig;
use crate::error::PrAgentError;
use crate::git::diff::{DEFAULT_BASE_BRANCH, DEFAULT_MAX_DIFF_LINES};
use crate::git::AnalyzeOptions;
use crate::mcp::{roots, tools};

const INSTRUCTIONS: &str = "Helps write pull request descriptions. \
Call analyze_file_changes to see what changed on the current branch, \
get_pr_templates to browse the available templates, then suggest_template \
with your summary and the change type (bug, feature, docs, refactor, test, \
performance, security) to get the recommended template.";

/// Arguments for `analyze_file_changes`.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[schemars(crate = "rmcp::schemars")]
pub struct AnalyzeFileChangesParams {
    /// Base branch to compare against (default: main)
    #[serde(default = "default_base_branch")]
    pub base_branch: String,

    /// Include the full diff content (default: true)
    #[serde(default = "default_include_diff")]
    pub include_diff: bool,

    /// Maximum number of diff lines to return (default: 200)
    #[serde(default = "default_max_diff_lines")]
    pub max_diff_lines: usize,
}

fn default_base_branch() -> String {
    DEFAULT_BASE_BRANCH.to_string()
}

const fn default_include_diff() -> bool {
    true
}

const fn default_max_diff_lines() -> usize {
    DEFAULT_MAX_DIFF_LINES
}

impl From<AnalyzeFileChangesParams> for AnalyzeOptions {
    fn from(params: AnalyzeFileChangesParams) -> Self {
        Self {
            base_branch: params.base_branch,
            include_diff: params.include_diff,
            max_diff_lines: params.max_diff_lines,
        }
    }
}

/// Arguments for `suggest_template`.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[schemars(crate = "rmcp::schemars")]
pub struct SuggestTemplateParams {
    /// Your analysis of what the changes do
    pub changes_summary: String,

    /// The type of change you've identified (bug, feature, docs, refactor, test, etc.)
    pub change_type: String,
}

/// The PR agent MCP server.
#[derive(Clone)]
pub struct PrAgentServer {
    config: Arc<AgentConfig>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PrAgentServer {
    /// Creates a server sharing `config` across all calls.
    pub fn new(config: Arc<AgentConfig>) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Get the full diff and list of changed files in the current git repository.")]
    async fn analyze_file_changes(
        &self,
        Parameters(params): Parameters<AnalyzeFileChangesParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        debug!(?params, "analyze_file_changes called");
        let root = roots::caller_root(&context.peer).await;
        let body = tools::analyze_file_changes(&self.config, root.as_deref(), &params.into()).await;
        Ok(CallToolResult::success(vec![Content::text(body)]))
    }

    #[tool(description = "List available PR templates with their content.")]
    async fn get_pr_templates(&self) -> Result<CallToolResult, McpError> {
        debug!("get_pr_templates called");
        let config = Arc::clone(&self.config);
        let body = run_blocking("get_pr_templates", move || tools::get_pr_templates(&config)).await;
        Ok(CallToolResult::success(vec![Content::text(body)]))
    }

    #[tool(description = "Let Claude analyze the changes and suggest the most appropriate PR template.")]
    async fn suggest_template(
        &self,
        Parameters(params): Parameters<SuggestTemplateParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(change_type = %params.change_type, "suggest_template called");
        let config = Arc::clone(&self.config);
        let body = run_blocking("suggest_template", move || {
            tools::suggest_template(&config, &params.changes_summary, &params.change_type)
        })
        .await;
        Ok(CallToolResult::success(vec![Content::text(body)]))
    }
}

#[tool_handler]
impl ServerHandler for PrAgentServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = "pr-agent".into();
        info.server_info.version = crate::VERSION.into();
        info.instructions = Some(INSTRUCTIONS.into());
        info
    }
}

/// Runs a filesystem-bound tool off the async workers.
async fn run_blocking<F>(tool: &'static str, call: F) -> String
where
    F: FnOnce() -> String + Send + 'static,
{
    match tokio::task::spawn_blocking(call).await {
        Ok(body) => body,
        Err(e) => {
            let e = PrAgentError::from(e);
            warn!(tool, error = %e, "Tool call failed");
            tools::error_json(&e.to_string())
        }
    }
}

/// Serves the tools on stdin/stdout until the client disconnects.
pub async fn serve_stdio(config: AgentConfig) -> Result<()> {
    info!(templates_dir = %config.templates_dir.display(), "Starting pr-agent MCP server");

    let service = PrAgentServer::new(Arc::new(config))
        .serve(stdio())
        .await
        .context("Failed to start MCP server")?;

    let reason = service
        .waiting()
        .await
        .context("MCP server task failed")?;
    info!(?reason, "MCP server stopped");

    Ok(())
}
