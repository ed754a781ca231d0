//! foreachrepo - apply one package.json change across a GitHub organization
//!
//! For every repository of an organization this library can:
//! - Clone it into a scoped temporary directory
//! - Bump one npm dependency, or freeze all of them to installed versions
//! - Commit and push the change on a new branch
//! - Open a pull request and collect its URL

pub mod cli;
pub mod command;
pub mod domain;
pub mod error;
pub mod git;
pub mod host;
pub mod manifest;
pub mod output;
pub mod package_manager;
pub mod pipeline;
pub mod progress;
pub mod task;
