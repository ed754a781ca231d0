//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues with reading, patching or writing package.json
//! - ResolveError: Issues with the npm dependency report
//! - VcsError: Issues with git subprocesses
//! - HostError: Issues with the repository hosting API
//! - ConfigError: Issues with CLI configuration
//! - PipelineError: Per-repository failure wrapping the above

use std::path::PathBuf;
use thiserror::Error;

/// Failure of one repository in the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The repository could not be cloned
    #[error("clone failed: {0}")]
    CloneFailed(#[source] VcsError),

    /// The task could not be applied to the manifest
    #[error(transparent)]
    Task(#[from] ManifestError),

    /// Branch, stage, commit or push failed
    #[error("publish failed: {0}")]
    PublishFailed(#[source] VcsError),

    /// The pull request could not be opened
    #[error(transparent)]
    PullRequestFailed(#[from] HostError),

    /// Processing the repository panicked
    #[error("panicked: {0}")]
    Panicked(String),
}

impl PipelineError {
    /// True when the repository should be reported as skipped, not failed
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Task(e) if e.is_benign())
    }
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// No package.json in the working directory
    #[error("no package.json found in {dir}")]
    NoManifestFound { dir: PathBuf },

    /// The dependency key does not occur in the manifest
    #[error("dependency {dependency} not found in package.json")]
    DependencyNotFound { dependency: String },

    /// The dependency already has the requested value
    #[error("dependency {dependency} is already up to date ({version})")]
    DependencyUpToDate { dependency: String, version: String },

    /// The dependency key occurs more than once
    #[error("invalid package.json content: dependency {dependency} matched {matches} times")]
    InvalidManifestContent { dependency: String, matches: usize },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to resolve installed dependency versions
    #[error(transparent)]
    Resolution(#[from] ResolveError),
}

impl ManifestError {
    /// Create a NoManifestFound error
    pub fn no_manifest(dir: impl Into<PathBuf>) -> Self {
        Self::NoManifestFound { dir: dir.into() }
    }

    /// Create a DependencyNotFound error
    pub fn dependency_not_found(dependency: impl Into<String>) -> Self {
        Self::DependencyNotFound {
            dependency: dependency.into(),
        }
    }

    /// Create a DependencyUpToDate error
    pub fn up_to_date(dependency: impl Into<String>, version: impl Into<String>) -> Self {
        Self::DependencyUpToDate {
            dependency: dependency.into(),
            version: version.into(),
        }
    }

    /// Create an InvalidManifestContent error
    pub fn invalid_content(dependency: impl Into<String>, matches: usize) -> Self {
        Self::InvalidManifestContent {
            dependency: dependency.into(),
            matches,
        }
    }

    /// True when the repository simply does not need the change
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            Self::NoManifestFound { .. }
                | Self::DependencyNotFound { .. }
                | Self::DependencyUpToDate { .. }
        )
    }
}

/// Errors produced while resolving installed dependency versions
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Removing the previous install failed
    #[error("failed to clean {path}: {source}")]
    CleanFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A package manager command failed to spawn or exited non-zero
    #[error("`{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    /// The dependency report could not be parsed
    #[error("invalid dependency report: {message}")]
    InvalidReport { message: String },
}

impl ResolveError {
    /// Create a CommandFailed error
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }
}

/// Errors related to git operations
#[derive(Error, Debug)]
pub enum VcsError {
    /// The git process could not be started
    #[error("failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The git process exited with a failure status
    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// The temporary clone directory could not be created
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
}

impl VcsError {
    /// Create a CommandFailed error
    pub fn command_failed(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            stderr: stderr.into(),
        }
    }
}

/// Errors related to the repository hosting API
#[derive(Error, Debug)]
pub enum HostError {
    /// Network request failed
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// Unexpected HTTP status
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {url}")]
    RateLimitExceeded { url: String },

    /// Timeout
    #[error("timeout while requesting {url}")]
    Timeout { url: String },

    /// Invalid response body
    #[error("invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    /// Pull request creation was rejected
    #[error("failed to create pull request for {repository}: HTTP {status}: {message}")]
    PullRequestFailed {
        repository: String,
        status: u16,
        message: String,
    },
}

impl HostError {
    /// Create a Network error
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidResponse error
    pub fn invalid_response(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A flag required by the chosen task is missing
    #[error("--{name} is required {reason}")]
    MissingArgument { name: String, reason: String },

    /// git is not installed or not runnable
    #[error("git command not found: {message}")]
    GitUnavailable { message: String },
}
