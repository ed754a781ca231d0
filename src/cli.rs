//! CLI argument parsing module for foreachrepo

use crate::error::ConfigError;
use crate::task::Task;
use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Parser, ValueEnum};

/// Public GitHub API root
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Task selector accepted by `--task`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TaskKind {
    /// Set one npm dependency to an exact version
    Bump,
    /// Pin every npm dependency to its installed version
    Freeze,
}

/// Apply one package.json change to every repository of a GitHub organization
#[derive(Parser, Debug, Clone)]
#[command(
    name = "foreachrepo",
    version,
    about = "Apply a package.json change to every repository of a GitHub organization and open pull requests"
)]
pub struct CliArgs {
    /// GitHub organization whose repositories are processed
    #[arg(long)]
    pub org: String,

    /// Task to run against each repository
    #[arg(long, value_enum, ignore_case = true)]
    pub task: TaskKind,

    /// Branch created in each repository
    #[arg(long)]
    pub branch: String,

    /// Commit message, also used as pull request title
    #[arg(long)]
    pub message: String,

    /// Dependency to bump (bump task)
    #[arg(long)]
    pub npm_dep: Option<String>,

    /// Version to bump the dependency to (bump task)
    #[arg(long)]
    pub npm_dep_ver: Option<String>,

    /// GitHub username
    #[arg(
        long,
        env = "GITHUB_USERNAME",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub github_username: String,

    /// GitHub password or personal access token
    #[arg(
        long,
        env = "GITHUB_PASSWORD",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub github_password: String,

    /// GitHub API root (GitHub Enterprise: https://<host>/api/v3)
    #[arg(
        long,
        env = "GITHUB_API_URL",
        default_value = DEFAULT_GITHUB_API_URL,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub github_api_url: String,

    // Repository filters
    /// Process only these repositories (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub only: Vec<String>,

    /// Never process these repositories (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    // Output options
    /// Output the report in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - warnings and the final report only
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Build the task selected by `--task`
    pub fn to_task(&self) -> Result<Task, ConfigError> {
        match self.task {
            TaskKind::Bump => {
                let name = required(&self.npm_dep, "npm-dep")?;
                let version = required(&self.npm_dep_ver, "npm-dep-ver")?;
                Ok(Task::bump(name, version))
            }
            TaskKind::Freeze => Ok(Task::FreezeAllDependencies),
        }
    }

    /// Default log level derived from the output flags
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Warn
        } else if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }

    /// Whether the discovery spinner should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ConfigError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingArgument {
            name: name.to_string(),
            reason: "when task is bump".to_string(),
        }),
    }
}
