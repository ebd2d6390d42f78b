//! Core domain models for monorelease
//!
//! This module contains the fundamental types used throughout the application:
//! - Release increments offered when no version is given
//! - The release plan (target version, distribution tag, dry-run flag)
//! - Per-package publish outcomes and the overall release summary

mod increment;
mod release_plan;
mod summary;

pub use increment::ReleaseIncrement;
pub use release_plan::{resolve_dist_tag, ReleasePlan};
pub use summary::{PackageOutcome, PublishOutcome, ReleaseSummary};
