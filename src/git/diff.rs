//! Branch-relative change analysis.
//!
//! Runs `git diff` against `<base>...HEAD` and packages the output for the
//! `analyze_file_changes` tool. Diffs are cut to a line budget so the tool
//! response stays under the client's size ceiling.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{PrAgentError, Result};
use crate::git::GitRepository;

/// Base branch used when the caller does not name one.
pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Diff line budget used when the caller does not give one.
pub const DEFAULT_MAX_DIFF_LINES: usize = 200;

/// Options for one change analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Reference the current HEAD is compared against.
    pub base_branch: String,
    /// Whether to include the full diff text.
    pub include_diff: bool,
    /// Maximum number of diff lines returned.
    pub max_diff_lines: usize,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            include_diff: true,
            max_diff_lines: DEFAULT_MAX_DIFF_LINES,
        }
    }
}

/// Changed files and diff between a base branch and HEAD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeReport {
    /// Raw `git diff --name-status` output.
    pub files_changed: String,
    /// Possibly truncated diff; absent when not requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

/// Runs git to describe the changes on the current branch.
#[derive(Debug, Clone)]
pub struct ChangeAnalyzer {
    git_program: String,
}

impl Default for ChangeAnalyzer {
    fn default() -> Self {
        Self::new("git")
    }
}

impl ChangeAnalyzer {
    /// Creates an analyzer invoking the given git executable.
    pub fn new(git_program: impl Into<String>) -> Self {
        Self {
            git_program: git_program.into(),
        }
    }

    /// Analyzes changes in `caller_root`, or in the process directory when the
    /// caller supplied none.
    pub async fn analyze(
        &self,
        caller_root: Option<&Path>,
        options: &AnalyzeOptions,
    ) -> Result<ChangeReport> {
        let cwd = resolve_working_dir(caller_root)?;
        debug!(cwd = %cwd.display(), base = %options.base_branch, "Analyzing file changes");

        let check_dir = cwd.clone();
        let base_branch = options.base_branch.clone();
        tokio::task::spawn_blocking(move || check_base_branch(&check_dir, &base_branch)).await??;

        let range = format!("{}...HEAD", options.base_branch);

        let files_changed = self
            .run_git(&cwd, &["diff", "--name-status", range.as_str(), "--"])
            .await?;

        let diff = if options.include_diff {
            let full = self.run_git(&cwd, &["diff", range.as_str(), "--"]).await?;
            Some(truncate_diff(&full, options.max_diff_lines))
        } else {
            None
        };

        info!(
            files = files_changed.lines().count(),
            diff_included = diff.is_some(),
            "Analyzed changes against {}",
            options.base_branch
        );

        Ok(ChangeReport {
            files_changed,
            diff,
        })
    }

    /// Runs git in `cwd` and returns stdout.
    async fn run_git(&self, cwd: &Path, args: &[&str]) -> Result<String> {
        debug!(program = %self.git_program, ?args, "Running git");

        let output = Command::new(&self.git_program)
            .args(args)
            .current_dir(cwd)
            .output()
            .await
            .map_err(|e| {
                PrAgentError::Git(format!("failed to run {}: {e}", self.git_program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PrAgentError::Git(stderr.trim_end().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Fails unless `cwd` is inside a repository where `base_branch` resolves.
///
/// Names starting with `-` are refused so they never reach git as options.
fn check_base_branch(cwd: &Path, base_branch: &str) -> Result<()> {
    let repo = GitRepository::discover(cwd)?;
    if base_branch.starts_with('-') || !repo.branch_exists(base_branch) {
        return Err(PrAgentError::Git(format!(
            "unknown base branch '{base_branch}'"
        )));
    }
    Ok(())
}

/// Picks the directory git runs in.
fn resolve_working_dir(caller_root: Option<&Path>) -> Result<PathBuf> {
    match caller_root {
        Some(root) => Ok(root.to_path_buf()),
        None => std::env::current_dir().map_err(|e| {
            PrAgentError::Git(format!("cannot determine current directory: {e}"))
        }),
    }
}

/// Keeps the first `max_lines` lines of `diff`.
///
/// Lines are split after each `\n` and kept byte for byte, so `\r\n` endings
/// survive. When lines are dropped, a single marker line
/// `...truncated {max_lines}/{total} lines...` is appended. A diff that fits is
/// returned unchanged.
pub fn truncate_diff(diff: &str, max_lines: usize) -> String {
    let total = diff.split_inclusive('\n').count();
    if total <= max_lines {
        return diff.to_string();
    }

    let mut kept: String = diff.split_inclusive('\n').take(max_lines).collect();
    kept.push_str(&format!("...truncated {max_lines}/{total} lines..."));
    kept
}
