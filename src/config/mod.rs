//! Runtime configuration for the PR agent.
//!
//! The configuration is built once at start-up and shared read-only by every
//! tool call.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::utils::Settings;

/// Environment variable overriding the template directory.
pub const TEMPLATES_DIR_ENV: &str = "PR_AGENT_TEMPLATES_DIR";

/// Environment variable overriding the git executable.
pub const GIT_PROGRAM_ENV: &str = "PR_AGENT_GIT";

/// Template used when a change type is not in the mapping.
pub const DEFAULT_TEMPLATE: &str = "feature.md";

/// Glob matched against file names in the template directory.
pub const DEFAULT_TEMPLATE_PATTERN: &str = "*.md";

/// Built-in change type labels and the template each one selects.
const BUILTIN_TYPE_MAPPING: &[(&str, &str)] = &[
    ("bug", "bug.md"),
    ("fix", "bug.md"),
    ("feature", "feature.md"),
    ("enhancement", "feature.md"),
    ("docs", "docs.md"),
    ("documentation", "docs.md"),
    ("refactor", "refactor.md"),
    ("cleanup", "refactor.md"),
    ("test", "test.md"),
    ("testing", "test.md"),
    ("performance", "performance.md"),
    ("optimization", "performance.md"),
    ("security", "security.md"),
];

/// Maps lowercase change type labels to template filenames.
///
/// Targets are not checked against the template directory; a missing file is
/// reported when a suggestion is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    entries: BTreeMap<String, String>,
}

impl Default for TypeMapping {
    fn default() -> Self {
        Self {
            entries: BUILTIN_TYPE_MAPPING
                .iter()
                .map(|(label, file)| ((*label).to_string(), (*file).to_string()))
                .collect(),
        }
    }
}

impl TypeMapping {
    /// Adds or replaces an entry. The label is lowercased.
    pub fn insert(&mut self, label: &str, filename: impl Into<String>) {
        self.entries.insert(normalize_label(label), filename.into());
    }

    /// Looks up a label case-insensitively.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.get(&normalize_label(label)).map(String::as_str)
    }

    /// Iterates over `(label, filename)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no labels are mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Immutable configuration shared by all tools.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Directory holding the PR templates.
    pub templates_dir: PathBuf,
    /// Glob matched against template file names.
    pub template_pattern: String,
    /// Change type to template mapping.
    pub type_mapping: TypeMapping,
    /// Template used for unmapped change types.
    pub default_template: String,
    /// git executable to invoke.
    pub git_program: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            templates_dir: Self::default_templates_dir(),
            template_pattern: DEFAULT_TEMPLATE_PATTERN.to_string(),
            type_mapping: TypeMapping::default(),
            default_template: DEFAULT_TEMPLATE.to_string(),
            git_program: "git".to_string(),
        }
    }
}

impl AgentConfig {
    /// Configuration pointing at a specific template directory, otherwise default.
    pub fn with_templates_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            templates_dir: dir.into(),
            ..Self::default()
        }
    }

    /// Templates shipped alongside the crate sources.
    pub fn default_templates_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
    }

    /// Loads configuration from the settings file and environment.
    ///
    /// `templates_dir_override` comes from the command line and wins over
    /// every other source.
    pub fn load(templates_dir_override: Option<PathBuf>) -> Result<Self> {
        let settings = Settings::load()?;
        Ok(Self::from_settings(&settings, templates_dir_override))
    }

    /// Builds configuration from already loaded settings.
    ///
    /// Precedence: override, environment, settings file, built-in default.
    pub fn from_settings(settings: &Settings, templates_dir_override: Option<PathBuf>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = templates_dir_override
            .or_else(|| settings.get_env_var(TEMPLATES_DIR_ENV).map(PathBuf::from))
            .or_else(|| settings.templates_dir.clone())
        {
            config.templates_dir = dir;
        }

        if let Some(pattern) = &settings.template_pattern {
            config.template_pattern.clone_from(pattern);
        }

        if let Some(default_template) = &settings.default_template {
            config.default_template.clone_from(default_template);
        }

        for (label, filename) in &settings.type_mapping {
            config.type_mapping.insert(label, filename.clone());
        }

        if let Some(git) = settings.get_env_var(GIT_PROGRAM_ENV) {
            config.git_program = git;
        }

        config
    }

    /// Resolves a change type to a template filename, falling back to the default.
    pub fn template_for(&self, change_type: &str) -> &str {
        self.type_mapping
            .get(change_type)
            .unwrap_or(self.default_template.as_str())
    }
}
