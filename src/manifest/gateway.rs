//! File-level manifest operations on a working directory
//!
//! Every operation checks that package.json exists, reads it whole, patches
//! the text and writes it back in place. Any failure returns before the
//! write, so the file is either fully updated or untouched.

use crate::error::ManifestError;
use crate::manifest::patcher::{current_version, update_dependencies, update_dependency};
use crate::package_manager::DependencyResolver;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the manifest file at the repository root
pub const MANIFEST_FILENAME: &str = "package.json";

/// Path of the manifest inside `dir`
pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILENAME)
}

fn existing_manifest(dir: &Path) -> Result<PathBuf, ManifestError> {
    let path = manifest_path(dir);
    if path.is_file() {
        Ok(path)
    } else {
        Err(ManifestError::no_manifest(dir))
    }
}

fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|e| ManifestError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

// Truncating the existing file keeps its permission bits.
fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    fs::write(path, content).map_err(|e| ManifestError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Set one dependency of `<dir>/package.json` to `version`
pub fn update_manifest_file(dir: &Path, dependency: &str, version: &str) -> Result<(), ManifestError> {
    let path = existing_manifest(dir)?;
    let content = read_manifest(&path)?;

    if let Some(current) = current_version(&content, dependency) {
        log::debug!("{}: {} {} -> {}", path.display(), dependency, current, version);
    }

    let updated = update_dependency(&content, dependency, version)?;
    write_manifest(&path, &updated)
}

/// Pin every dependency of `<dir>/package.json` to its installed version
pub fn freeze_manifest_file(
    dir: &Path,
    resolver: &dyn DependencyResolver,
) -> Result<(), ManifestError> {
    log::info!("Freezing dependencies in {}", dir.display());
    let path = existing_manifest(dir)?;
    let content = read_manifest(&path)?;

    let snapshot = resolver.resolve(dir)?;
    log::debug!("Resolved {} dependency versions: {:?}", snapshot.len(), snapshot);

    let updated = update_dependencies(&content, &snapshot)?;
    write_manifest(&path, &updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::manifest::DependencySnapshot;
    use tempfile::TempDir;

    struct MockResolver {
        snapshot: Option<DependencySnapshot>,
    }

    impl DependencyResolver for MockResolver {
        fn resolve(&self, _dir: &Path) -> Result<DependencySnapshot, ResolveError> {
            self.snapshot
                .clone()
                .ok_or_else(|| ResolveError::command_failed("npm install", "exit status: 1"))
        }
    }

    fn write_package_json(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(MANIFEST_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_update_manifest_file() {
        let dir = TempDir::new().unwrap();
        let path = write_package_json(&dir, r#"{"dependencies": {"bunyan": "~1.8.1"}}"#);

        update_manifest_file(dir.path(), "bunyan", "1.8.2").unwrap();

        assert_eq!(
            fs::read_to_string(path).unwrap(),
            r#"{"dependencies": {"bunyan": "1.8.2"}}"#
        );
    }

    #[test]
    fn test_update_manifest_file_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let err = update_manifest_file(dir.path(), "bunyan", "1.8.2").unwrap_err();
        assert!(matches!(err, ManifestError::NoManifestFound { .. }));
    }

    #[test]
    fn test_update_manifest_file_leaves_file_on_failure() {
        let dir = TempDir::new().unwrap();
        let original = r#"{"dependencies": {"bunyan": "~1.8.1"}}"#;
        let path = write_package_json(&dir, original);

        let err = update_manifest_file(dir.path(), "left-pad", "1.0.0").unwrap_err();
        assert!(matches!(err, ManifestError::DependencyNotFound { .. }));
        assert_eq!(fs::read_to_string(path).unwrap(), original);
    }

    #[test]
    fn test_manifest_directory_is_not_a_manifest() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(MANIFEST_FILENAME)).unwrap();
        let err = update_manifest_file(dir.path(), "a", "1").unwrap_err();
        assert!(matches!(err, ManifestError::NoManifestFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_update_manifest_file_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = write_package_json(&dir, r#"{"dependencies": {"a": "^1.0.0"}}"#);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        update_manifest_file(dir.path(), "a", "1.0.1").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[test]
    fn test_freeze_manifest_file() {
        let dir = TempDir::new().unwrap();
        let path = write_package_json(
            &dir,
            r#"{
  "dependencies": {
    "express": "^4.18.0",
    "lodash": "4.17.21"
  }
}"#,
        );
        let resolver = MockResolver {
            snapshot: Some(DependencySnapshot::from([
                ("express".to_string(), "4.18.2".to_string()),
                ("lodash".to_string(), "4.17.21".to_string()),
                ("debug".to_string(), "2.6.9".to_string()),
            ])),
        };

        freeze_manifest_file(dir.path(), &resolver).unwrap();

        assert_eq!(
            fs::read_to_string(path).unwrap(),
            r#"{
  "dependencies": {
    "express": "4.18.2",
    "lodash": "4.17.21"
  }
}"#
        );
    }

    #[test]
    fn test_freeze_manifest_file_resolver_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let original = r#"{"dependencies": {"express": "^4.18.0"}}"#;
        let path = write_package_json(&dir, original);
        let resolver = MockResolver { snapshot: None };

        let err = freeze_manifest_file(dir.path(), &resolver).unwrap_err();
        assert!(matches!(err, ManifestError::Resolution(_)));
        assert!(!err.is_benign());
        assert_eq!(fs::read_to_string(path).unwrap(), original);
    }

    #[test]
    fn test_freeze_manifest_file_missing_manifest_skips_resolution() {
        let dir = TempDir::new().unwrap();
        let resolver = MockResolver { snapshot: None };
        let err = freeze_manifest_file(dir.path(), &resolver).unwrap_err();
        assert!(matches!(err, ManifestError::NoManifestFound { .. }));
    }
}
