//! npm integration for resolving installed dependency versions
//!
//! Freezing needs the versions npm actually installed, so the resolver
//! removes any previous install, runs a clean `npm install` and reads the
//! `npm list --depth 0 --json` report.

use crate::command::{command_line, CommandRunner};
use crate::error::ResolveError;
use crate::manifest::{parse_report, DependencySnapshot};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

/// Directory holding installed packages
const NODE_MODULES: &str = "node_modules";

const NPM: &str = "npm";

const INSTALL_ARGS: &[&str] = &["install"];
const LIST_ARGS: &[&str] = &["list", "--depth", "0", "--json"];

/// Trait for producing a snapshot of installed dependency versions
pub trait DependencyResolver: Send + Sync {
    /// Resolve the direct dependencies of the project in `dir`
    fn resolve(&self, dir: &Path) -> Result<DependencySnapshot, ResolveError>;
}

/// Resolver that shells out to npm
pub struct NpmResolver {
    runner: Arc<dyn CommandRunner>,
}

impl NpmResolver {
    /// Create a resolver running `npm` through `runner`
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn clean(&self, dir: &Path) -> Result<(), ResolveError> {
        let path = dir.join(NODE_MODULES);
        match fs::remove_dir_all(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ResolveError::CleanFailed { path, source: e }),
        }
    }

    fn install(&self, dir: &Path) -> Result<(), ResolveError> {
        let command = command_line(NPM, INSTALL_ARGS);
        let output = self
            .runner
            .run(NPM, INSTALL_ARGS, dir)
            .map_err(|e| ResolveError::command_failed(&command, e.to_string()))?;

        if !output.success {
            return Err(ResolveError::command_failed(command, output.stderr.trim()));
        }
        Ok(())
    }

    fn list(&self, dir: &Path) -> Result<DependencySnapshot, ResolveError> {
        let command = command_line(NPM, LIST_ARGS);
        let output = self
            .runner
            .run(NPM, LIST_ARGS, dir)
            .map_err(|e| ResolveError::command_failed(&command, e.to_string()))?;

        if !output.stderr.is_empty() {
            log::debug!("{} stderr: {}", command, output.stderr.trim());
        }

        // npm list exits non-zero on peer dependency problems but still
        // prints a complete report
        match parse_report(&output.stdout) {
            Ok(snapshot) => Ok(snapshot),
            Err(_) if !output.success => {
                Err(ResolveError::command_failed(command, output.stderr.trim()))
            }
            Err(e) => Err(e),
        }
    }
}

impl DependencyResolver for NpmResolver {
    fn resolve(&self, dir: &Path) -> Result<DependencySnapshot, ResolveError> {
        self.clean(dir)?;
        self.install(dir)?;
        self.list(dir)
    }
}
