//! JSON output formatter for machine processing

use crate::domain::{BatchReport, RepositoryResult};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: JsonSummary,
    /// Every opened pull request, in processing order
    pull_requests: Vec<&'a str>,
    repositories: &'a [RepositoryResult],
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    done: usize,
    skipped: usize,
    failed: usize,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &BatchReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            summary: JsonSummary {
                total: report.len(),
                done: report.done_count(),
                skipped: report.skipped_count(),
                failed: report.failed_count(),
            },
            pull_requests: report.pull_request_urls(),
            repositories: &report.results,
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
