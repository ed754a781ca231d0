//! package.json editing
//!
//! This module provides:
//! - Pure text patching of dependency versions
//! - Flattening of npm dependency reports
//! - File-level bump and freeze operations on a working directory

mod gateway;
mod patcher;
mod snapshot;

pub use gateway::{freeze_manifest_file, manifest_path, update_manifest_file, MANIFEST_FILENAME};
pub use patcher::{current_version, update_dependencies, update_dependency};
pub use snapshot::{extract_versions, parse_report, DependencyReport, DependencySnapshot, ReportEntry};
