//! Git operations and repository management.

pub mod diff;
pub mod repository;

pub use diff::{AnalyzeOptions, ChangeAnalyzer, ChangeReport};
pub use repository::GitRepository;
