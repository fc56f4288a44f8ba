//! Template recommendation from a change type label.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::AgentConfig;
use crate::error::{PrAgentError, Result};
use crate::templates::{Template, TemplateCatalog};

/// Hint returned with every suggestion.
pub const USAGE_HINT: &str =
    "Claude can help you fill out this template based on the specific changes in your PR.";

/// A recommended template and why it was picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Chosen template.
    pub recommended_template: Template,
    /// Sentence echoing the caller's summary and change type.
    pub reasoning: String,
    /// Body of the chosen template.
    pub template_content: String,
    /// How to use the template next.
    pub usage_hint: String,
}

/// Picks a template for a change type.
pub struct TemplateSuggester<'a> {
    config: &'a AgentConfig,
    catalog: &'a TemplateCatalog,
}

impl<'a> TemplateSuggester<'a> {
    /// Creates a suggester over a catalog, using the mapping in `config`.
    pub fn new(config: &'a AgentConfig, catalog: &'a TemplateCatalog) -> Self {
        Self { config, catalog }
    }

    /// Suggests a template for `change_type`.
    ///
    /// The mapped file is used when present, then the configured default. An
    /// empty catalog or a catalog missing both files is an error.
    pub fn suggest(&self, changes_summary: &str, change_type: &str) -> Result<Suggestion> {
        let mut templates = self.catalog.index()?;
        if templates.is_empty() {
            return Err(PrAgentError::NoTemplates {
                dir: self.catalog.dir().to_path_buf(),
            });
        }

        let requested = self.config.template_for(change_type);
        debug!(change_type, requested, "Resolved change type");

        let template = match templates.remove(requested) {
            Some(template) => template,
            None => {
                let default = self.config.default_template.as_str();
                warn!(requested, default, "Mapped template missing, trying default");
                templates
                    .remove(default)
                    .ok_or_else(|| PrAgentError::TemplateNotFound {
                        requested: requested.to_string(),
                        default: default.to_string(),
                    })?
            }
        };

        Ok(Suggestion {
            reasoning: format!(
                "Based on your analysis: '{changes_summary}', this appears to be a {change_type} change."
            ),
            template_content: template.content.clone(),
            recommended_template: template,
            usage_hint: USAGE_HINT.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup(files: &[(&str, &str)]) -> (TempDir, AgentConfig, TemplateCatalog) {
        let temp_dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).unwrap();
        }
        let config = AgentConfig::with_templates_dir(temp_dir.path());
        let catalog = TemplateCatalog::new(temp_dir.path(), &config.template_pattern).unwrap();
        (temp_dir, config, catalog)
    }

    #[test]
    fn fix_maps_to_bug_template() {
        let (_dir, config, catalog) = setup(&[("bug.md", "# Bug"), ("feature.md", "# Feature")]);

        let suggestion = TemplateSuggester::new(&config, &catalog)
            .suggest("fixed null pointer", "fix")
            .unwrap();

        assert_eq!(suggestion.recommended_template.filename, "bug.md");
        assert_eq!(suggestion.template_content, "# Bug");
        assert_eq!(
            suggestion.reasoning,
            "Based on your analysis: 'fixed null pointer', this appears to be a fix change."
        );
        assert_eq!(suggestion.usage_hint, USAGE_HINT);
    }

    #[test]
    fn change_type_is_case_insensitive() {
        let (_dir, config, catalog) = setup(&[("bug.md", "# Bug"), ("feature.md", "# Feature")]);
        let suggester = TemplateSuggester::new(&config, &catalog);

        for label in ["Bug", "bug", "BUG"] {
            let suggestion = suggester.suggest("summary", label).unwrap();
            assert_eq!(suggestion.recommended_template.filename, "bug.md");
        }
    }

    #[test]
    fn unknown_change_type_uses_feature_template() {
        let (_dir, config, catalog) = setup(&[("bug.md", "# Bug"), ("feature.md", "# Feature")]);

        let suggestion = TemplateSuggester::new(&config, &catalog)
            .suggest("bump deps", "chore")
            .unwrap();

        assert_eq!(suggestion.recommended_template.filename, "feature.md");
        assert_eq!(suggestion.template_content, "# Feature");
    }

    #[test]
    fn missing_mapped_template_falls_back_to_default() {
        let (_dir, config, catalog) = setup(&[("feature.md", "# Feature")]);

        let suggestion = TemplateSuggester::new(&config, &catalog)
            .suggest("tighten auth", "security")
            .unwrap();

        assert_eq!(suggestion.recommended_template.filename, "feature.md");
    }

    #[test]
    fn missing_mapped_and_default_templates_is_an_error() {
        let (_dir, config, catalog) = setup(&[("docs.md", "# Docs")]);

        let err = TemplateSuggester::new(&config, &catalog)
            .suggest("speed up parser", "performance")
            .unwrap_err();

        assert!(matches!(
            err,
            PrAgentError::TemplateNotFound { ref requested, ref default }
                if requested == "performance.md" && default == "feature.md"
        ));
    }

    #[test]
    fn empty_catalog_is_an_error() {
        let (_dir, config, catalog) = setup(&[]);

        let err = TemplateSuggester::new(&config, &catalog)
            .suggest("anything", "bug")
            .unwrap_err();

        assert!(matches!(err, PrAgentError::NoTemplates { .. }));
    }

    #[test]
    fn catalog_failure_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let config = AgentConfig::with_templates_dir(temp_dir.path().join("gone"));
        let catalog = TemplateCatalog::new(&config.templates_dir, "*.md").unwrap();

        let err = TemplateSuggester::new(&config, &catalog)
            .suggest("anything", "bug")
            .unwrap_err();

        assert!(matches!(err, PrAgentError::TemplateDir { .. }));
    }
}
