//! The three PR agent operations, rendered as JSON strings.
//!
//! Every function here returns a JSON document. Failures never escape: they
//! come back as `{"error": "..."}` so callers only need to check for that key.

use std::path::Path;

use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::config::AgentConfig;
use crate::error::Result;
use crate::git::{AnalyzeOptions, ChangeAnalyzer};
use crate::templates::{TemplateCatalog, TemplateSuggester};

/// Changed files and (optionally truncated) diff against `options.base_branch`.
pub async fn analyze_file_changes(
    config: &AgentConfig,
    caller_root: Option<&Path>,
    options: &AnalyzeOptions,
) -> String {
    let analyzer = ChangeAnalyzer::new(config.git_program.as_str());
    render("analyze_file_changes", analyzer.analyze(caller_root, options).await)
}

/// Every template in the configured directory.
pub fn get_pr_templates(config: &AgentConfig) -> String {
    let templates = catalog(config).and_then(|catalog| catalog.list());
    render("get_pr_templates", templates)
}

/// The template best matching `change_type`, with reasoning.
pub fn suggest_template(config: &AgentConfig, changes_summary: &str, change_type: &str) -> String {
    let suggestion = catalog(config).and_then(|catalog| {
        TemplateSuggester::new(config, &catalog).suggest(changes_summary, change_type)
    });
    render("suggest_template", suggestion)
}

fn catalog(config: &AgentConfig) -> Result<TemplateCatalog> {
    TemplateCatalog::new(&config.templates_dir, &config.template_pattern)
}

/// Pretty JSON for a value, or an error object.
fn render<T: Serialize>(tool: &str, result: Result<T>) -> String {
    match result.and_then(|value| Ok(serde_json::to_string_pretty(&value)?)) {
        Ok(body) => body,
        Err(e) => {
            warn!(tool, error = %e, "Tool call failed");
            error_json(&e.to_string())
        }
    }
}

/// `{"error": message}` as a string.
pub fn error_json(message: &str) -> String {
    json!({ "error": message }).to_string()
}
