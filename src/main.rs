//! foreachrepo - apply one package.json change across a GitHub organization
//!
//! Every repository gets its own branch, commit and pull request; the URLs
//! of the opened pull requests are printed at the end.

use clap::Parser;
use foreachrepo::cli::CliArgs;
use foreachrepo::command::SystemCommandRunner;
use foreachrepo::git::GitCli;
use foreachrepo::host::{Credentials, GitHubHost, HttpClient};
use foreachrepo::output::{create_formatter, OutputConfig};
use foreachrepo::package_manager::NpmResolver;
use foreachrepo::pipeline::{Pipeline, RepositoryFilter};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .format_target(false)
        .init();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let task = args.to_task()?;
    log::debug!("foreachrepo v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Organization: {}, task: {}", args.org, task);

    let runner = Arc::new(SystemCommandRunner::new());
    let git = GitCli::new(runner.clone());
    git.ensure_installed()?;

    let client = HttpClient::new(Credentials::new(
        args.github_username.clone(),
        args.github_password.clone(),
    ))?;
    let host = GitHubHost::new(client).with_api_url(args.github_api_url.clone());

    let filter = RepositoryFilter::new()
        .with_only(args.only.clone())
        .with_exclude(args.exclude.clone());
    let pipeline = Pipeline::new(
        Arc::new(host),
        Arc::new(git),
        Arc::new(NpmResolver::new(runner)),
        task,
        args.branch.clone(),
        args.message.clone(),
    )
    .with_filter(filter)
    .with_progress(args.show_progress());

    let report = pipeline.run(&args.org).await?;

    let formatter = create_formatter(OutputConfig::from_cli(args.json, args.verbose, args.quiet));
    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
