//! Error types shared by the PR agent tools.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while serving a tool call.
///
/// Each variant renders the message that ends up in the `error` field of the
/// tool's JSON response.
#[derive(Error, Debug)]
pub enum PrAgentError {
    /// git could not be started or exited with a non-zero status.
    #[error("Git error: {0}")]
    Git(String),

    /// The template directory could not be listed.
    #[error("Failed to read template directory {}: {source}", dir.display())]
    TemplateDir {
        /// Directory that was being listed.
        dir: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A template file could not be read as UTF-8 text.
    #[error("Failed to read template {}: {source}", path.display())]
    TemplateRead {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A template file name cannot be reported as a string.
    #[error("Template file name is not valid UTF-8: {}", path.display())]
    TemplateName {
        /// Offending file.
        path: PathBuf,
    },

    /// The configured template pattern is not a valid glob.
    #[error("Invalid template pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern taken from configuration.
        pattern: String,
        /// Glob compilation failure.
        #[source]
        source: globset::Error,
    },

    /// The template directory holds no templates at all.
    #[error("No PR templates found in {}", dir.display())]
    NoTemplates {
        /// Directory that was searched.
        dir: PathBuf,
    },

    /// Neither the requested template nor the default one is available.
    #[error("Template '{requested}' not found and default template '{default}' is missing")]
    TemplateNotFound {
        /// Filename resolved from the change type.
        requested: String,
        /// Configured default filename.
        default: String,
    },

    /// A blocking filesystem or repository task did not finish.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Response serialization failed.
    #[error("Failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result alias for tool operations.
pub type Result<T> = std::result::Result<T, PrAgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_error_carries_prefix() {
        let err = PrAgentError::Git("fatal: bad revision 'nope...HEAD'".to_string());
        assert_eq!(err.to_string(), "Git error: fatal: bad revision 'nope...HEAD'");
    }

    #[test]
    fn template_not_found_names_both_files() {
        let err = PrAgentError::TemplateNotFound {
            requested: "bug.md".to_string(),
            default: "feature.md".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("bug.md"));
        assert!(message.contains("feature.md"));
    }
}
