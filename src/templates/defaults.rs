//! Built-in PR templates written by `pr-agent templates init`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

// Embed the template files as strings
const BUG_TEMPLATE: &str = include_str!("../../templates/bug.md");
const FEATURE_TEMPLATE: &str = include_str!("../../templates/feature.md");
const DOCS_TEMPLATE: &str = include_str!("../../templates/docs.md");
const REFACTOR_TEMPLATE: &str = include_str!("../../templates/refactor.md");
const TEST_TEMPLATE: &str = include_str!("../../templates/test.md");
const PERFORMANCE_TEMPLATE: &str = include_str!("../../templates/performance.md");
const SECURITY_TEMPLATE: &str = include_str!("../../templates/security.md");

/// Built-in templates as `(filename, content)` pairs.
pub const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    ("bug.md", BUG_TEMPLATE),
    ("feature.md", FEATURE_TEMPLATE),
    ("docs.md", DOCS_TEMPLATE),
    ("refactor.md", REFACTOR_TEMPLATE),
    ("test.md", TEST_TEMPLATE),
    ("performance.md", PERFORMANCE_TEMPLATE),
    ("security.md", SECURITY_TEMPLATE),
];

/// Outcome of writing the built-in templates.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Files that were written.
    pub written: Vec<String>,
    /// Files left alone because they already existed.
    pub skipped: Vec<String>,
}

/// Writes the built-in templates into `dir`, creating it if needed.
///
/// Existing files are kept unless `force` is set.
pub fn write_default_templates(dir: &Path, force: bool) -> Result<InitReport> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create template directory {}", dir.display()))?;
    }

    let mut report = InitReport::default();
    for (filename, content) in DEFAULT_TEMPLATES {
        let path = dir.join(filename);
        if path.exists() && !force {
            report.skipped.push((*filename).to_string());
            continue;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        report.written.push((*filename).to_string());
    }

    info!(
        dir = %dir.display(),
        written = report.written.len(),
        skipped = report.skipped.len(),
        "Initialized PR templates"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TypeMapping;
    use tempfile::TempDir;

    #[test]
    fn every_mapping_target_has_a_builtin_template() {
        let mapping = TypeMapping::default();
        for (label, filename) in mapping.iter() {
            assert!(
                DEFAULT_TEMPLATES.iter().any(|(name, _)| *name == filename),
                "no built-in template for '{label}' -> {filename}"
            );
        }
    }

    #[test]
    fn init_writes_all_templates() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("templates");

        let report = write_default_templates(&dir, false).unwrap();

        assert_eq!(report.written.len(), DEFAULT_TEMPLATES.len());
        assert!(report.skipped.is_empty());
        assert_eq!(fs::read_to_string(dir.join("bug.md")).unwrap(), BUG_TEMPLATE);
    }

    #[test]
    fn init_keeps_existing_files_unless_forced() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("bug.md"), "# Custom").unwrap();

        let report = write_default_templates(temp_dir.path(), false).unwrap();
        assert_eq!(report.skipped, ["bug.md"]);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("bug.md")).unwrap(),
            "# Custom"
        );

        let report = write_default_templates(temp_dir.path(), true).unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("bug.md")).unwrap(),
            BUG_TEMPLATE
        );
    }
}
