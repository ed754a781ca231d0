//! Per-repository pipeline outcome

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to one repository during a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// The change was published; holds the pull request URL
    Done { pr_url: String },
    /// The repository does not need the change
    Skipped { reason: String },
    /// Something went wrong for this repository
    Failed { reason: String },
}

impl PipelineOutcome {
    /// Creates a Done outcome
    pub fn done(pr_url: impl Into<String>) -> Self {
        Self::Done {
            pr_url: pr_url.into(),
        }
    }

    /// Creates a Skipped outcome
    pub fn skipped(reason: impl fmt::Display) -> Self {
        Self::Skipped {
            reason: reason.to_string(),
        }
    }

    /// Creates a Failed outcome
    pub fn failed(reason: impl fmt::Display) -> Self {
        Self::Failed {
            reason: reason.to_string(),
        }
    }

    /// Returns true if a pull request was opened
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }

    /// Returns true if the repository was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// Returns true if processing failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Pull request URL of a Done outcome
    pub fn pr_url(&self) -> Option<&str> {
        match self {
            Self::Done { pr_url } => Some(pr_url),
            _ => None,
        }
    }
}

impl fmt::Display for PipelineOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done { pr_url } => write!(f, "done! ({})", pr_url),
            Self::Skipped { reason } => write!(f, "skip: {}", reason),
            Self::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}
