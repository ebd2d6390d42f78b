//! Shared state for one release run
//!
//! Built once at startup and handed to every phase. Nothing here is global.

use crate::config::ReleaseConfig;
use crate::error::{ManifestError, ReleaseError};
use crate::manifest::PackageManifest;
use crate::output::Reporter;
use crate::runner::CommandRunner;
use crate::workspace::{package_root, scan_packages};
use semver::Version;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// npm scope of a package name, e.g. `@acme/` for `@acme/ui`
fn scope_of(name: &str) -> Option<&str> {
    if !name.starts_with('@') {
        return None;
    }
    let slash = name.find('/')?;
    (slash > 1).then(|| &name[..=slash])
}

/// Prefix used when release.toml does not set one
///
/// A scope shared by every package wins, then the root name's scope, then
/// the root name itself. An empty root name never becomes a prefix.
pub fn default_internal_prefix(
    root_name: Option<&str>,
    package_names: &[String],
) -> Option<String> {
    let mut scopes = package_names.iter().map(|name| scope_of(name));
    if let Some(Some(first)) = scopes.next() {
        if scopes.all(|scope| scope == Some(first)) {
            return Some(first.to_string());
        }
    }

    let root_name = root_name.filter(|name| !name.is_empty())?;
    Some(scope_of(root_name).unwrap_or(root_name).to_string())
}

/// Names of the packages whose manifests can be read
async fn read_package_names(
    root: &Path,
    config: &ReleaseConfig,
    packages: &[String],
) -> Vec<String> {
    let mut names = Vec::with_capacity(packages.len());
    for package in packages {
        let dir = package_root(root, &config.packages_dir, package);
        match PackageManifest::load(&dir).await {
            Ok(manifest) => names.extend(manifest.name().map(str::to_string)),
            Err(e) => log::debug!("ignoring {} for prefix detection: {}", package, e),
        }
    }
    names
}

/// Everything the release phases need
pub struct ReleaseContext {
    /// Workspace root (holds the root package.json)
    pub root: PathBuf,
    /// Settings from release.toml
    pub config: ReleaseConfig,
    /// Package directory names, in scan order
    pub packages: Vec<String>,
    /// Version of the root manifest before the release
    pub current_version: Version,
    /// Dependency name prefix identifying workspace packages
    pub internal_prefix: String,
    /// Runner for all external commands
    pub runner: Arc<dyn CommandRunner>,
    /// Status line output
    pub reporter: Arc<Reporter>,
    /// Set once version propagation has started writing manifests
    pub versions_touched: bool,
}

impl ReleaseContext {
    /// Load config, root manifest and package list for a workspace
    pub async fn load(
        root: impl Into<PathBuf>,
        runner: Arc<dyn CommandRunner>,
        reporter: Arc<Reporter>,
    ) -> Result<Self, ReleaseError> {
        let root = root.into();
        let config = ReleaseConfig::from_dir(&root)?;
        Self::with_config(root, config, runner, reporter).await
    }

    /// Build a context with an explicit config
    pub async fn with_config(
        root: PathBuf,
        config: ReleaseConfig,
        runner: Arc<dyn CommandRunner>,
        reporter: Arc<Reporter>,
    ) -> Result<Self, ReleaseError> {
        let manifest = PackageManifest::load(&root).await?;
        let raw_version = manifest.version().ok_or_else(|| ManifestError::MissingVersion {
            path: manifest.path().to_path_buf(),
        })?;
        let current_version = Version::parse(raw_version)
            .map_err(|_| ReleaseError::invalid_version(raw_version))?;

        let packages = scan_packages(&root.join(&config.packages_dir))?;

        let internal_prefix = match &config.internal_prefix {
            Some(prefix) => prefix.clone(),
            None => {
                let package_names = read_package_names(&root, &config, &packages).await;
                default_internal_prefix(manifest.name(), &package_names).ok_or_else(|| {
                    ManifestError::invalid_shape(
                        manifest.path(),
                        "root manifest has no \"name\" and release.toml sets no internal_prefix",
                    )
                })?
            }
        };
        log::debug!("internal dependency prefix: {:?}", internal_prefix);

        Ok(Self {
            root,
            config,
            packages,
            current_version,
            internal_prefix,
            runner,
            reporter,
            versions_touched: false,
        })
    }

    /// Directory of a workspace package
    pub fn package_dir(&self, package: &str) -> PathBuf {
        package_root(&self.root, &self.config.packages_dir, package)
    }

    /// Directories of all workspace packages, in scan order
    pub fn package_dirs(&self) -> Vec<PathBuf> {
        self.packages.iter().map(|p| self.package_dir(p)).collect()
    }

    /// Workspace root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether commands are only logged
    pub fn is_dry_run(&self) -> bool {
        self.runner.is_dry_run()
    }
}
