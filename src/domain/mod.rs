//! Core domain models for foreachrepo
//!
//! This module contains the fundamental types used throughout the application:
//! - Repository descriptors returned by discovery
//! - Per-repository pipeline outcomes
//! - The batch report aggregated over a run

mod outcome;
mod report;
mod repository;

pub use outcome::PipelineOutcome;
pub use report::{BatchReport, RepositoryResult};
pub use repository::RepositoryDescriptor;
