//! PR description templates: listing, suggestion and the built-in set.

pub mod catalog;
pub mod defaults;
pub mod suggest;

pub use catalog::{Template, TemplateCatalog};
pub use defaults::{write_default_templates, DEFAULT_TEMPLATES};
pub use suggest::{Suggestion, TemplateSuggester};
