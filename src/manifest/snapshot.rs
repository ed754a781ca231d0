//! Flattening of `npm list --json` reports into name → version maps

use crate::error::ResolveError;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Resolved version of every direct dependency, keyed by name
pub type DependencySnapshot = BTreeMap<String, String>;

/// Top level of an `npm list --depth 0 --json` report
#[derive(Debug, Default, Deserialize)]
pub struct DependencyReport {
    /// Direct dependencies; absent when the project has none
    #[serde(default)]
    pub dependencies: BTreeMap<String, ReportEntry>,
}

/// One dependency entry; everything but `version` is ignored
#[derive(Debug, Default, Deserialize)]
pub struct ReportEntry {
    pub version: Option<String>,
}

/// Copy the `version` of every entry that has one
pub fn extract_versions(report: &DependencyReport) -> DependencySnapshot {
    report
        .dependencies
        .iter()
        .filter_map(|(name, entry)| {
            entry
                .version
                .as_ref()
                .map(|version| (name.clone(), version.clone()))
        })
        .collect()
}

/// Parse raw report output and extract its versions
pub fn parse_report(output: &str) -> Result<DependencySnapshot, ResolveError> {
    let report: DependencyReport =
        serde_json::from_str(output).map_err(|e| ResolveError::InvalidReport {
            message: e.to_string(),
        })?;
    Ok(extract_versions(&report))
}
