//! Git repository lookups

use std::path::Path;

use git2::Repository;

use crate::error::{PrAgentError, Result};

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Finds the repository containing `path`, searching parent directories.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|e| {
            PrAgentError::Git(format!(
                "not a git repository ({}): {}",
                path.display(),
                e.message()
            ))
        })?;

        Ok(Self { repo })
    }

    /// Get workdir path
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Check if a branch or revision can be resolved
    pub fn branch_exists(&self, branch_name: &str) -> bool {
        if self
            .repo
            .find_branch(branch_name, git2::BranchType::Local)
            .is_ok()
        {
            return true;
        }

        if self
            .repo
            .find_branch(branch_name, git2::BranchType::Remote)
            .is_ok()
        {
            return true;
        }

        // Tags, hashes, HEAD~n and friends
        self.repo.revparse_single(branch_name).is_ok()
    }
}
