//! Repository descriptor

use serde::{Deserialize, Serialize};

/// Branch used as pull request base when the host does not report one
pub const FALLBACK_BASE_BRANCH: &str = "master";

/// A repository discovered in an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    /// Repository name, without the organization
    pub name: String,
    /// URL passed to `git clone`
    pub clone_url: String,
    /// API endpoint for creating pull requests
    pub pull_request_url: String,
    /// Base branch for pull requests
    pub default_branch: String,
}

impl RepositoryDescriptor {
    /// Creates a descriptor with the fallback base branch
    pub fn new(
        name: impl Into<String>,
        clone_url: impl Into<String>,
        pull_request_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            clone_url: clone_url.into(),
            pull_request_url: pull_request_url.into(),
            default_branch: FALLBACK_BASE_BRANCH.to_string(),
        }
    }

    /// Sets the base branch for pull requests
    pub fn with_default_branch(mut self, branch: impl Into<String>) -> Self {
        self.default_branch = branch.into();
        self
    }
}
