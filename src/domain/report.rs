//! Batch report aggregated over a run

use super::PipelineOutcome;
use serde::{Deserialize, Serialize};

/// Outcome of one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryResult {
    /// Repository name
    pub repository: String,
    /// What happened to it
    #[serde(flatten)]
    pub outcome: PipelineOutcome,
}

/// Outcomes of every processed repository, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<RepositoryResult>,
}

impl BatchReport {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of a fully processed repository
    pub fn record(&mut self, repository: impl Into<String>, outcome: PipelineOutcome) {
        self.results.push(RepositoryResult {
            repository: repository.into(),
            outcome,
        });
    }

    /// URLs of every opened pull request
    pub fn pull_request_urls(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter_map(|r| r.outcome.pr_url())
            .collect()
    }

    /// Number of repositories with an opened pull request
    pub fn done_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_done()).count()
    }

    /// Number of skipped repositories
    pub fn skipped_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_skipped()).count()
    }

    /// Number of failed repositories
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_failed()).count()
    }

    /// Total number of processed repositories
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if no repository was processed
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> BatchReport {
        let mut report = BatchReport::new();
        report.record("api", PipelineOutcome::done("https://github.com/acme/api/pull/3"));
        report.record("docs", PipelineOutcome::skipped("no package.json found"));
        report.record("web", PipelineOutcome::failed("push rejected"));
        report.record("worker", PipelineOutcome::done("https://github.com/acme/worker/pull/9"));
        report
    }

    #[test]
    fn test_empty_report() {
        let report = BatchReport::new();
        assert!(report.is_empty());
        assert!(report.pull_request_urls().is_empty());
    }

    #[test]
    fn test_counts() {
        let report = sample_report();
        assert_eq!(report.len(), 4);
        assert_eq!(report.done_count(), 2);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.failed_count(), 1);
    }

    #[test]
    fn test_pull_request_urls_keep_order() {
        let report = sample_report();
        assert_eq!(
            report.pull_request_urls(),
            vec![
                "https://github.com/acme/api/pull/3",
                "https://github.com/acme/worker/pull/9"
            ]
        );
    }

    #[test]
    fn test_result_serialization_is_flat() {
        let report = sample_report();
        let json = serde_json::to_value(&report.results[0]).unwrap();
        assert_eq!(json["repository"], "api");
        assert_eq!(json["status"], "done");
        assert_eq!(json["pr_url"], "https://github.com/acme/api/pull/3");
    }
}
