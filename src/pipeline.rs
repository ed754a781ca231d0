//! Repository pipeline coordinating the whole batch
//!
//! This module provides:
//! - Workflow coordination per repository: clone → task → publish → pull request
//! - Repository name filters
//! - Failure isolation: every error, and any panic, stays with its repository
//!
//! Repositories are processed strictly one after the other, in discovery
//! order, so log lines stay grouped and API calls are never concurrent.

use crate::domain::{BatchReport, PipelineOutcome, RepositoryDescriptor};
use crate::error::{HostError, PipelineError};
use crate::git::VersionControl;
use crate::host::RepositoryHost;
use crate::package_manager::DependencyResolver;
use crate::progress::Progress;
use crate::task::Task;
use std::any::Any;
use std::sync::Arc;

/// Filter on repository names
#[derive(Debug, Clone, Default)]
pub struct RepositoryFilter {
    /// If non-empty, only these repositories are processed
    pub only: Vec<String>,
    /// Repositories never processed
    pub exclude: Vec<String>,
}

impl RepositoryFilter {
    /// Create a filter that accepts every repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict processing to the given names
    pub fn with_only(mut self, only: Vec<String>) -> Self {
        self.only = only;
        self
    }

    /// Never process the given names
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Check if a repository should be processed
    pub fn allows(&self, name: &str) -> bool {
        if !self.only.is_empty() {
            return self.only.iter().any(|n| n == name);
        }
        !self.exclude.iter().any(|n| n == name)
    }
}

/// Collaborators and settings shared by every repository of a run
struct PipelineContext {
    host: Arc<dyn RepositoryHost>,
    vcs: Arc<dyn VersionControl>,
    resolver: Arc<dyn DependencyResolver>,
    task: Task,
    branch: String,
    message: String,
}

impl PipelineContext {
    /// Run every step for one repository
    async fn process(&self, repository: &RepositoryDescriptor) -> Result<String, PipelineError> {
        let clone = self
            .vcs
            .clone_repository(&repository.clone_url)
            .map_err(PipelineError::CloneFailed)?;
        let dir = clone.path();

        self.task.execute(dir, self.resolver.as_ref())?;

        self.vcs
            .commit_and_push_in_new_branch(dir, &self.branch, &self.message)
            .map_err(PipelineError::PublishFailed)?;

        let url = self
            .host
            .create_pull_request(repository, &self.branch, &self.message)
            .await?;
        Ok(url)
    }
}

/// Sequential batch runner
pub struct Pipeline {
    context: Arc<PipelineContext>,
    filter: RepositoryFilter,
    show_progress: bool,
}

impl Pipeline {
    /// Create a pipeline applying `task` and publishing on `branch` with `message`
    pub fn new(
        host: Arc<dyn RepositoryHost>,
        vcs: Arc<dyn VersionControl>,
        resolver: Arc<dyn DependencyResolver>,
        task: Task,
        branch: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            context: Arc::new(PipelineContext {
                host,
                vcs,
                resolver,
                task,
                branch: branch.into(),
                message: message.into(),
            }),
            filter: RepositoryFilter::new(),
            show_progress: false,
        }
    }

    /// Apply a repository name filter
    pub fn with_filter(mut self, filter: RepositoryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Show a spinner while discovering repositories
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Discover the organization's repositories and process each of them
    pub async fn run(&self, organization: &str) -> Result<BatchReport, HostError> {
        let mut progress = Progress::new(self.show_progress);
        progress.spinner(&format!("Discovering repositories of {}...", organization));
        let discovered = self.context.host.list_repositories(organization).await;
        progress.finish_and_clear();

        let repositories = discovered?;
        log::info!(
            "Found {} repositories in {}",
            repositories.len(),
            organization
        );
        Ok(self.run_repositories(repositories).await)
    }

    /// Process already discovered repositories in order
    pub async fn run_repositories(&self, repositories: Vec<RepositoryDescriptor>) -> BatchReport {
        let mut report = BatchReport::new();
        let selected: Vec<_> = repositories
            .into_iter()
            .filter(|repo| self.filter.allows(&repo.name))
            .collect();
        let total = selected.len();

        for (index, repository) in selected.into_iter().enumerate() {
            log::info!(
                "[{}/{}] {}: {}",
                index + 1,
                total,
                repository.name,
                self.context.task
            );
            let name = repository.name.clone();
            let outcome = self.process_isolated(repository).await;

            match &outcome {
                PipelineOutcome::Done { .. } => log::info!("{} -> {}", name, outcome),
                PipelineOutcome::Skipped { .. } => log::warn!("{} -> {}", name, outcome),
                PipelineOutcome::Failed { .. } => log::error!("{} -> {}", name, outcome),
            }
            report.record(name, outcome);
        }

        report
    }

    /// Process one repository on its own task so a panic only fails that repository
    async fn process_isolated(&self, repository: RepositoryDescriptor) -> PipelineOutcome {
        let context = Arc::clone(&self.context);
        let handle = tokio::spawn(async move { context.process(&repository).await });

        let result = match handle.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => Err(PipelineError::Panicked(panic_message(e.into_panic()))),
            Err(e) => Err(PipelineError::Panicked(e.to_string())),
        };

        match result {
            Ok(url) => PipelineOutcome::done(url),
            Err(e) if e.is_skip() => PipelineOutcome::skipped(e),
            Err(e) => PipelineOutcome::failed(e),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown error".to_string()
    }
}
