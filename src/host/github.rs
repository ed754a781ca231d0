//! GitHub adapter
//!
//! Lists an organization's repositories and opens pull requests.
//! API endpoints:
//! - GET https://api.github.com/orgs/{org}/repos?page={n}&per_page=50
//! - POST {pulls_url}

use crate::domain::RepositoryDescriptor;
use crate::error::HostError;
use crate::host::{HttpClient, RepositoryHost};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// GitHub API base URL
const GITHUB_API_URL: &str = "https://api.github.com";

/// Repositories requested per page
const PER_PAGE: u32 = 50;

/// Repository entry of the organization listing
#[derive(Debug, Deserialize)]
struct GitHubRepo {
    name: String,
    ssh_url: String,
    pulls_url: String,
    #[serde(default)]
    default_branch: Option<String>,
}

impl From<GitHubRepo> for RepositoryDescriptor {
    fn from(repo: GitHubRepo) -> Self {
        let descriptor = RepositoryDescriptor::new(
            repo.name,
            repo.ssh_url,
            strip_uri_template(&repo.pulls_url),
        );
        match repo.default_branch {
            Some(branch) if !branch.is_empty() => descriptor.with_default_branch(branch),
            _ => descriptor,
        }
    }
}

/// Pull request creation payload
#[derive(Debug, Serialize)]
struct NewPullRequest<'a> {
    title: &'a str,
    head: &'a str,
    base: &'a str,
    body: &'a str,
}

/// Pull request creation response
#[derive(Debug, Deserialize)]
struct CreatedPullRequest {
    html_url: String,
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Drop an RFC 6570 suffix such as `{/number}`
fn strip_uri_template(url: &str) -> &str {
    url.split_once('{').map_or(url, |(base, _)| base)
}

/// GitHub repository host
pub struct GitHubHost {
    client: HttpClient,
    api_url: String,
}

impl GitHubHost {
    /// Create a new GitHub adapter
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            api_url: GITHUB_API_URL.to_string(),
        }
    }

    /// Point the adapter at another API root (GitHub Enterprise)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the URL of one page of an organization's repositories
    fn build_page_url(&self, organization: &str, page: u32) -> String {
        format!(
            "{}/orgs/{}/repos?page={}&per_page={}",
            self.api_url, organization, page, PER_PAGE
        )
    }
}

#[async_trait]
impl RepositoryHost for GitHubHost {
    async fn list_repositories(
        &self,
        organization: &str,
    ) -> Result<Vec<RepositoryDescriptor>, HostError> {
        let mut repositories = Vec::new();

        for page in 1.. {
            let url = self.build_page_url(organization, page);
            log::debug!("Loading page {}", page);

            let entries: Vec<GitHubRepo> = self.client.get_json(&url).await?;
            if entries.is_empty() {
                break;
            }
            log::debug!("Page {} has {} repositories", page, entries.len());
            repositories.extend(entries.into_iter().map(RepositoryDescriptor::from));
        }

        Ok(repositories)
    }

    async fn create_pull_request(
        &self,
        repository: &RepositoryDescriptor,
        branch: &str,
        title: &str,
    ) -> Result<String, HostError> {
        let payload = NewPullRequest {
            title,
            head: branch,
            base: &repository.default_branch,
            body: "",
        };
        let url = &repository.pull_request_url;
        let response = self.client.post_json(url, &payload).await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.message)
                .unwrap_or(text);
            return Err(HostError::PullRequestFailed {
                repository: repository.name.clone(),
                status: status.as_u16(),
                message,
            });
        }

        let created: CreatedPullRequest = response
            .json()
            .await
            .map_err(|e| HostError::invalid_response(url, e.to_string()))?;
        Ok(created.html_url)
    }
}
