//! Format-preserving edits of package.json content
//!
//! The manifest is never deserialized. A dependency is located by matching
//! `"<name>"<ws>:<ws>"<value>"` anywhere in the text and only the value span
//! is replaced, so indentation, key order and everything else survive as-is.
//!
//! The match is not scoped to a `dependencies` block: a name that also
//! appears verbatim as a key elsewhere makes the edit ambiguous and it is
//! refused with `InvalidManifestContent`.

use crate::error::ManifestError;
use regex::Regex;
use std::collections::BTreeMap;
use std::ops::Range;

/// Build the key/value pattern for a dependency; group 1 is the value
fn dependency_pattern(dependency: &str) -> Result<Regex, ManifestError> {
    let pattern = format!(r#""{}"\s*:\s*"([^"]+)""#, regex::escape(dependency));
    Regex::new(&pattern).map_err(|_| ManifestError::invalid_content(dependency, 0))
}

/// Byte ranges of every value span for `dependency`
fn value_spans(content: &str, dependency: &str) -> Result<Vec<Range<usize>>, ManifestError> {
    let re = dependency_pattern(dependency)?;
    Ok(re
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.range()))
        .collect())
}

/// Set the version of a single dependency.
///
/// Fails with `DependencyNotFound` when the key does not occur,
/// `InvalidManifestContent` when it occurs more than once and
/// `DependencyUpToDate` when the current value already equals `version`.
pub fn update_dependency(
    content: &str,
    dependency: &str,
    version: &str,
) -> Result<String, ManifestError> {
    let spans = value_spans(content, dependency)?;

    let span = match spans.as_slice() {
        [] => return Err(ManifestError::dependency_not_found(dependency)),
        [span] => span.clone(),
        _ => return Err(ManifestError::invalid_content(dependency, spans.len())),
    };

    if &content[span.clone()] == version {
        return Err(ManifestError::up_to_date(dependency, version));
    }

    let mut updated = String::with_capacity(content.len() + version.len());
    updated.push_str(&content[..span.start]);
    updated.push_str(version);
    updated.push_str(&content[span.end..]);
    Ok(updated)
}

/// Apply a set of version updates one after the other.
///
/// Missing and already up-to-date dependencies are logged and skipped; any
/// other failure aborts the whole set and nothing is returned.
pub fn update_dependencies(
    content: &str,
    updates: &BTreeMap<String, String>,
) -> Result<String, ManifestError> {
    let mut current = content.to_string();

    for (name, version) in updates {
        match update_dependency(&current, name, version) {
            Ok(updated) => current = updated,
            Err(
                e @ (ManifestError::DependencyNotFound { .. }
                | ManifestError::DependencyUpToDate { .. }),
            ) => log::info!("FYI: {}", e),
            Err(e) => return Err(e),
        }
    }

    Ok(current)
}

/// Current value of a dependency if it occurs exactly once
pub fn current_version<'a>(content: &'a str, dependency: &str) -> Option<&'a str> {
    match value_spans(content, dependency).ok()?.as_slice() {
        [span] => Some(&content[span.clone()]),
        _ => None,
    }
}
