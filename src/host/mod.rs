//! Repository hosting service adapters
//!
//! This module provides:
//! - HTTP client shared foundation with authentication and retry logic
//! - GitHub adapter for repository discovery and pull request creation

mod client;
mod github;
#[cfg(test)]
mod test_server;

pub use client::{Credentials, HttpClient};
pub use github::GitHubHost;

use crate::domain::RepositoryDescriptor;
use crate::error::HostError;
use async_trait::async_trait;

/// Trait for repository hosting services
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// List every repository of an organization, in API order
    async fn list_repositories(
        &self,
        organization: &str,
    ) -> Result<Vec<RepositoryDescriptor>, HostError>;

    /// Open a pull request from `branch`; returns its URL
    async fn create_pull_request(
        &self,
        repository: &RepositoryDescriptor,
        branch: &str,
        title: &str,
    ) -> Result<String, HostError>;
}
