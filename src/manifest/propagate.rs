//! Workspace-wide version propagation
//!
//! Sets the root manifest and every package manifest to the release version
//! and pins internal dependencies to it. Each manifest is read fresh, updated
//! and written back before the next one is touched. The first failure stops
//! the run; manifests already written stay written.

use crate::error::ManifestError;
use crate::manifest::package_json::{PackageManifest, PINNED_DEPENDENCY_FIELDS};
use crate::output::Reporter;
use std::path::{Path, PathBuf};

/// A dependency entry that was pinned to the release version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedDependency {
    /// `dependencies` or `peerDependencies`
    pub field: &'static str,
    /// Dependency name
    pub name: String,
}

/// Result of updating one manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestUpdate {
    /// Path of the manifest file
    pub path: PathBuf,
    /// Version before the update
    pub previous_version: Option<String>,
    /// Internal dependencies that were pinned
    pub pinned: Vec<PinnedDependency>,
}

/// Update a single package directory's manifest
pub async fn update_package(
    dir: &Path,
    internal_prefix: &str,
    version: &str,
    reporter: &Reporter,
) -> Result<ManifestUpdate, ManifestError> {
    let mut manifest = PackageManifest::load(dir).await?;
    let previous_version = manifest.version().map(str::to_string);
    let display_name = manifest.display_name();

    manifest.set_version(version);

    let mut pinned = Vec::new();
    for field in PINNED_DEPENDENCY_FIELDS {
        for name in manifest.pin_internal_dependencies(field, internal_prefix, version) {
            reporter.dependency(&display_name, field, &name, version);
            pinned.push(PinnedDependency { field, name });
        }
    }

    manifest.save().await?;

    Ok(ManifestUpdate {
        path: manifest.path().to_path_buf(),
        previous_version,
        pinned,
    })
}

/// Update the root manifest, then every package directory in order
pub async fn update_all(
    root: &Path,
    package_dirs: &[PathBuf],
    internal_prefix: &str,
    version: &str,
    reporter: &Reporter,
) -> Result<Vec<ManifestUpdate>, ManifestError> {
    let mut updates = Vec::with_capacity(package_dirs.len() + 1);

    updates.push(update_package(root, internal_prefix, version, reporter).await?);
    for dir in package_dirs {
        updates.push(update_package(dir, internal_prefix, version, reporter).await?);
    }

    Ok(updates)
}
