//! Manifest file reading, rewriting and version propagation
//!
//! This module provides functionality to:
//! - Parse package.json while keeping field order
//! - Write manifests back with two-space indentation and a trailing newline
//! - Propagate a release version across the whole workspace

mod package_json;
mod propagate;

pub use package_json::{PackageManifest, MANIFEST_FILENAME, PINNED_DEPENDENCY_FIELDS};
pub use propagate::{update_all, update_package, ManifestUpdate, PinnedDependency};
