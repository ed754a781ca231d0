//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Per-repository outcome lines (verbose mode)
//! - Summary counts of done, skipped and failed repositories
//! - The list of opened pull requests under a `===== Done =====` banner

use crate::domain::{BatchReport, PipelineOutcome};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Banner printed before the pull request URLs
const DONE_BANNER: &str = "===== Done =====";

/// Text formatter for human-readable output
pub struct TextFormatter {
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn status_label(&self, outcome: &PipelineOutcome) -> String {
        let (label, painted) = match outcome {
            PipelineOutcome::Done { .. } => ("done", "done".green().bold()),
            PipelineOutcome::Skipped { .. } => ("skip", "skip".yellow()),
            PipelineOutcome::Failed { .. } => ("fail", "fail".red().bold()),
        };
        if self.color {
            painted.to_string()
        } else {
            label.to_string()
        }
    }

    fn detail(outcome: &PipelineOutcome) -> &str {
        match outcome {
            PipelineOutcome::Done { pr_url } => pr_url,
            PipelineOutcome::Skipped { reason } | PipelineOutcome::Failed { reason } => reason,
        }
    }

    fn format_repositories(&self, report: &BatchReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let width = report
            .results
            .iter()
            .map(|r| r.repository.len())
            .max()
            .unwrap_or(0);

        for result in &report.results {
            writeln!(
                writer,
                "  {}  {:<width$}  {}",
                self.status_label(&result.outcome),
                result.repository,
                Self::detail(&result.outcome),
                width = width
            )?;
        }
        writeln!(writer)
    }

    fn format_summary(&self, report: &BatchReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let done = format!("{} done", report.done_count());
        let skipped = format!("{} skipped", report.skipped_count());
        let failed = format!("{} failed", report.failed_count());

        if self.color {
            let failed = if report.failed_count() > 0 {
                failed.red().bold().to_string()
            } else {
                failed
            };
            writeln!(
                writer,
                "{} repositories: {}, {}, {}",
                report.len(),
                done.green(),
                skipped.yellow(),
                failed
            )
        } else {
            writeln!(
                writer,
                "{} repositories: {}, {}, {}",
                report.len(),
                done,
                skipped,
                failed
            )
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &BatchReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Verbose && !report.is_empty() {
            self.format_repositories(report, writer)?;
        }

        if self.verbosity != Verbosity::Quiet {
            self.format_summary(report, writer)?;
            writeln!(writer)?;
            if self.color {
                writeln!(writer, "{}", DONE_BANNER.bold())?;
            } else {
                writeln!(writer, "{}", DONE_BANNER)?;
            }
        }

        for url in report.pull_request_urls() {
            writeln!(writer, "{}", url)?;
        }

        Ok(())
    }
}
