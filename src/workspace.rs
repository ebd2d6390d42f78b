//! Workspace package discovery
//!
//! Lists the packages directory and keeps every entry that can hold a
//! package:
//! - hidden entries (`.turbo`, `.DS_Store`) are skipped
//! - `.ts` entries (shared type declarations next to the packages) are skipped
//! - plain files are skipped
//!
//! Private packages are kept; privacy only matters at publish time.

use crate::error::WorkspaceError;
use std::path::{Path, PathBuf};

/// Suffix of source-only entries living beside the package folders
const SOURCE_ONLY_SUFFIX: &str = ".ts";

/// Returns true if a directory entry name can be a workspace package
pub fn is_package_entry(name: &str) -> bool {
    !name.starts_with('.') && !name.ends_with(SOURCE_ONLY_SUFFIX)
}

/// Enumerate package directory names under `packages_dir`, sorted by name
pub fn scan_packages(packages_dir: &Path) -> Result<Vec<String>, WorkspaceError> {
    if !packages_dir.is_dir() {
        return Err(WorkspaceError::directory_not_found(packages_dir));
    }

    let entries = std::fs::read_dir(packages_dir)
        .map_err(|e| WorkspaceError::read_error(packages_dir, e))?;

    let mut packages = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| WorkspaceError::read_error(packages_dir, e))?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            log::debug!("skipping non UTF-8 entry {:?}", entry.file_name());
            continue;
        };

        if !is_package_entry(&name) {
            continue;
        }
        if !entry.path().is_dir() {
            continue;
        }
        packages.push(name);
    }

    packages.sort();
    log::debug!(
        "found {} package(s) in {}: {:?}",
        packages.len(),
        packages_dir.display(),
        packages
    );
    Ok(packages)
}

/// Directory of a package inside the workspace
pub fn package_root(root: &Path, packages_dir: &Path, package: &str) -> PathBuf {
    root.join(packages_dir).join(package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_workspace(entries: &[&str], files: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let packages = temp_dir.path().join("packages");
        fs::create_dir(&packages).unwrap();
        for dir in entries {
            fs::create_dir(packages.join(dir)).unwrap();
        }
        for file in files {
            fs::write(packages.join(file), "").unwrap();
        }
        temp_dir
    }

    #[test]
    fn test_is_package_entry() {
        assert!(is_package_entry("core"));
        assert!(is_package_entry("ui-kit"));
        assert!(!is_package_entry(".DS_Store"));
        assert!(!is_package_entry(".turbo"));
        assert!(!is_package_entry("global.d.ts"));
        assert!(!is_package_entry("shims.ts"));
    }

    #[test]
    fn test_scan_sorted() {
        let ws = make_workspace(&["sheet", "core", "bridge"], &[]);
        let packages = scan_packages(&ws.path().join("packages")).unwrap();
        assert_eq!(packages, vec!["bridge", "core", "sheet"]);
    }

    #[test]
    fn test_scan_skips_hidden_and_source_only() {
        let ws = make_workspace(&["core", ".cache"], &["env.d.ts", ".DS_Store"]);
        let packages = scan_packages(&ws.path().join("packages")).unwrap();
        assert_eq!(packages, vec!["core"]);
    }

    #[test]
    fn test_scan_skips_plain_files() {
        let ws = make_workspace(&["core"], &["README.md"]);
        let packages = scan_packages(&ws.path().join("packages")).unwrap();
        assert_eq!(packages, vec!["core"]);
    }

    #[test]
    fn test_scan_empty() {
        let ws = make_workspace(&[], &[]);
        let packages = scan_packages(&ws.path().join("packages")).unwrap();
        assert!(packages.is_empty());
    }

    #[test]
    fn test_scan_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = scan_packages(&temp_dir.path().join("packages"));
        assert!(matches!(
            result,
            Err(WorkspaceError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_package_root() {
        let root = package_root(Path::new("/repo"), Path::new("packages"), "core");
        assert_eq!(root, PathBuf::from("/repo/packages/core"));
    }
}
