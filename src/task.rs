//! Units of work applied to each cloned repository

use crate::error::ManifestError;
use crate::manifest::{freeze_manifest_file, update_manifest_file};
use crate::package_manager::DependencyResolver;
use std::fmt;
use std::path::Path;

/// The manifest mutation run against every repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Set one dependency to an exact version
    BumpSingleDependency { name: String, version: String },
    /// Pin every dependency to its currently installed version
    FreezeAllDependencies,
}

impl Task {
    /// Creates a bump task
    pub fn bump(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::BumpSingleDependency {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Apply the task to the working copy in `dir`
    pub fn execute(&self, dir: &Path, resolver: &dyn DependencyResolver) -> Result<(), ManifestError> {
        match self {
            Self::BumpSingleDependency { name, version } => {
                update_manifest_file(dir, name, version)
            }
            Self::FreezeAllDependencies => freeze_manifest_file(dir, resolver),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BumpSingleDependency { name, version } => write!(f, "bump {} to {}", name, version),
            Self::FreezeAllDependencies => write!(f, "freeze all dependencies"),
        }
    }
}
