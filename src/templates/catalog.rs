//! Reads PR templates from the template directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PrAgentError, Result};

/// A PR description template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// File name inside the template directory.
    pub filename: String,
    /// Raw file contents.
    pub content: String,
}

/// Lists templates in a directory. Nothing is cached: every call reads disk.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    dir: PathBuf,
    matcher: GlobMatcher,
}

impl TemplateCatalog {
    /// Creates a catalog over `dir`, matching file names against `pattern`.
    pub fn new<P: Into<PathBuf>>(dir: P, pattern: &str) -> Result<Self> {
        let matcher = Glob::new(pattern)
            .map_err(|source| PrAgentError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?
            .compile_matcher();

        Ok(Self {
            dir: dir.into(),
            matcher,
        })
    }

    /// Directory this catalog reads.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reads every matching template, sorted by file name.
    pub fn list(&self) -> Result<Vec<Template>> {
        let entries = fs::read_dir(&self.dir).map_err(|source| PrAgentError::TemplateDir {
            dir: self.dir.clone(),
            source,
        })?;

        let mut templates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| PrAgentError::TemplateDir {
                dir: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let name = entry.file_name();
            if !self.matcher.is_match(Path::new(&name)) {
                continue;
            }
            let Some(filename) = name.to_str().map(str::to_string) else {
                return Err(PrAgentError::TemplateName { path });
            };

            let content = fs::read_to_string(&path)
                .map_err(|source| PrAgentError::TemplateRead { path, source })?;
            templates.push(Template { filename, content });
        }

        templates.sort_by(|a, b| a.filename.cmp(&b.filename));
        debug!(dir = %self.dir.display(), count = templates.len(), "Loaded PR templates");

        Ok(templates)
    }

    /// Reads templates keyed by file name.
    pub fn index(&self) -> Result<BTreeMap<String, Template>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|t| (t.filename.clone(), t))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn catalog_with(files: &[(&str, &[u8])]) -> (TempDir, TemplateCatalog) {
        let temp_dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).unwrap();
        }
        let catalog = TemplateCatalog::new(temp_dir.path(), "*.md").unwrap();
        (temp_dir, catalog)
    }

    #[test]
    fn lists_only_markdown_files() {
        let (_dir, catalog) = catalog_with(&[
            ("feature.md", b"# Feature"),
            ("bug.md", b"# Bug"),
            ("notes.txt", b"ignore me"),
            ("README", b"ignore me too"),
        ]);

        let templates = catalog.list().unwrap();
        let names: Vec<_> = templates.iter().map(|t| t.filename.as_str()).collect();
        assert_eq!(names, ["bug.md", "feature.md"]);
        assert_eq!(templates[0].content, "# Bug");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_template_name_is_an_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (dir, catalog) = catalog_with(&[("bug.md", b"# Bug")]);
        fs::write(dir.path().join(OsStr::from_bytes(b"notes-\xff.txt")), "skip").unwrap();
        assert_eq!(catalog.list().unwrap().len(), 1);

        fs::write(dir.path().join(OsStr::from_bytes(b"fix-\xff.md")), "# Fix").unwrap();
        let err = catalog.list().unwrap_err();
        assert!(matches!(err, PrAgentError::TemplateName { .. }), "got {err}");
        assert!(err.to_string().starts_with("Template file name is not valid UTF-8"));
    }

    #[test]
    fn skips_subdirectories() {
        let (dir, catalog) = catalog_with(&[("bug.md", b"# Bug")]);
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let templates = catalog.list().unwrap();
        assert_eq!(templates.len(), 1);
    }

    #[test]
    fn content_round_trips_exactly() {
        let content = "## Title\r\n\n- item ✓\n\ttabbed\n";
        let (_dir, catalog) = catalog_with(&[("docs.md", content.as_bytes())]);

        let templates = catalog.list().unwrap();
        assert_eq!(templates[0].content, content);
    }

    #[test]
    fn empty_directory_is_empty_list() {
        let (_dir, catalog) = catalog_with(&[]);
        assert!(catalog.list().unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = TemplateCatalog::new(temp_dir.path().join("absent"), "*.md").unwrap();

        let err = catalog.list().unwrap_err();
        assert!(matches!(err, PrAgentError::TemplateDir { .. }));
        assert!(err.to_string().contains("absent"));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let (_dir, catalog) = catalog_with(&[("bad.md", &[0xff, 0xfe, 0x00])]);

        let err = catalog.list().unwrap_err();
        assert!(matches!(err, PrAgentError::TemplateRead { .. }));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = TemplateCatalog::new("templates", "[*.md").unwrap_err();
        assert!(matches!(err, PrAgentError::InvalidPattern { .. }));
    }

    #[test]
    fn index_is_keyed_by_filename() {
        let (_dir, catalog) = catalog_with(&[("bug.md", b"# Bug"), ("test.md", b"# Test")]);

        let index = catalog.index().unwrap();
        assert_eq!(index["test.md"].content, "# Test");
        assert!(!index.contains_key("feature.md"));
    }
}
