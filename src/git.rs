//! git operations on temporary clones
//!
//! A clone lives in a [`TempDir`]: dropping it removes the checkout, so the
//! directory is released on every exit path of whoever holds it, including
//! unwinding.

use crate::command::{command_line, CommandOutput, CommandRunner};
use crate::error::{ConfigError, VcsError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Prefix of every temporary clone directory
const CLONE_DIR_PREFIX: &str = "foreachrepo-";

/// Trait for the version-control steps of the pipeline
pub trait VersionControl: Send + Sync {
    /// Clone `url` into a fresh temporary directory
    fn clone_repository(&self, url: &str) -> Result<TempDir, VcsError>;

    /// Create and switch to `branch`
    fn create_branch(&self, dir: &Path, branch: &str) -> Result<(), VcsError>;

    /// Stage every change in the working tree
    fn stage_all(&self, dir: &Path) -> Result<(), VcsError>;

    /// Commit staged changes
    fn commit(&self, dir: &Path, message: &str) -> Result<(), VcsError>;

    /// Push `branch` to origin and set it as upstream
    fn push(&self, dir: &Path, branch: &str) -> Result<(), VcsError>;

    /// Full publish workflow: branch, stage, commit and push
    fn commit_and_push_in_new_branch(
        &self,
        dir: &Path,
        branch: &str,
        message: &str,
    ) -> Result<(), VcsError> {
        self.create_branch(dir, branch)?;
        self.stage_all(dir)?;
        self.commit(dir, message)?;
        self.push(dir, branch)
    }
}

/// VersionControl backed by the git command line
pub struct GitCli {
    runner: Arc<dyn CommandRunner>,
    temp_root: Option<PathBuf>,
}

impl GitCli {
    /// Create a git client running commands through `runner`
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            temp_root: None,
        }
    }

    /// Create clone directories under `root` instead of the system temp dir
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    /// Fail unless `git --version` runs successfully
    pub fn ensure_installed(&self) -> Result<(), ConfigError> {
        let cwd = std::env::temp_dir();
        self.run_git(&["--version"], &cwd)
            .map(|output| log::debug!("{}", output.stdout.trim()))
            .map_err(|e| ConfigError::GitUnavailable {
                message: e.to_string(),
            })
    }

    fn run_git(&self, args: &[&str], dir: &Path) -> Result<CommandOutput, VcsError> {
        let command = command_line("git", args);
        let output = self
            .runner
            .run("git", args, dir)
            .map_err(|e| VcsError::Spawn {
                command: command.clone(),
                source: e,
            })?;
        Self::ensure_success(output, &command)
    }

    fn ensure_success(output: CommandOutput, command: &str) -> Result<CommandOutput, VcsError> {
        if output.success {
            return Ok(output);
        }
        Err(VcsError::command_failed(command, output.stderr.trim()))
    }

    fn temp_dir(&self) -> Result<TempDir, VcsError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(CLONE_DIR_PREFIX);
        match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(VcsError::TempDir)
    }
}

impl VersionControl for GitCli {
    fn clone_repository(&self, url: &str) -> Result<TempDir, VcsError> {
        let dir = self.temp_dir()?;
        log::debug!("Cloning {} into {}", url, dir.path().display());
        self.run_git(&["clone", url, "."], dir.path())?;
        Ok(dir)
    }

    fn create_branch(&self, dir: &Path, branch: &str) -> Result<(), VcsError> {
        self.run_git(&["checkout", "-b", branch], dir).map(drop)
    }

    fn stage_all(&self, dir: &Path) -> Result<(), VcsError> {
        self.run_git(&["add", "."], dir).map(drop)
    }

    fn commit(&self, dir: &Path, message: &str) -> Result<(), VcsError> {
        self.run_git(&["commit", "-m", message], dir).map(drop)
    }

    fn push(&self, dir: &Path, branch: &str) -> Result<(), VcsError> {
        self.run_git(&["push", "-u", "origin", branch], dir).map(drop)
    }
}
