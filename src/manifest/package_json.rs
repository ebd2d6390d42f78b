//! package.json model for workspace packages
//!
//! Handles:
//! - name / version / private
//! - dependencies
//! - peerDependencies
//!
//! The whole document is kept as an ordered JSON map so that fields this
//! tool does not know about survive a rewrite untouched and in place.

use crate::error::ManifestError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// File name of a package manifest
pub const MANIFEST_FILENAME: &str = "package.json";

/// Dependency tables whose internal entries follow the release version
pub const PINNED_DEPENDENCY_FIELDS: [&str; 2] = ["dependencies", "peerDependencies"];

/// A parsed package.json
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    path: PathBuf,
    document: Map<String, Value>,
}

impl PackageManifest {
    /// Parse manifest text; the top level must be a JSON object
    pub fn parse(content: &str, path: impl Into<PathBuf>) -> Result<Self, ManifestError> {
        let path = path.into();
        let value: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error(&path, e.to_string()))?;

        match value {
            Value::Object(document) => Ok(Self { path, document }),
            _ => Err(ManifestError::invalid_shape(
                &path,
                "top-level value is not an object",
            )),
        }
    }

    /// Read `package.json` from a package directory
    pub async fn load(dir: &Path) -> Result<Self, ManifestError> {
        let path = dir.join(MANIFEST_FILENAME);
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ManifestError::not_found(&path)
            } else {
                ManifestError::read_error(&path, e)
            }
        })?;
        Self::parse(&content, path)
    }

    /// Path of the file this manifest was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `name` field
    pub fn name(&self) -> Option<&str> {
        self.document.get("name").and_then(Value::as_str)
    }

    /// The `version` field
    pub fn version(&self) -> Option<&str> {
        self.document.get("version").and_then(Value::as_str)
    }

    /// Name used in log lines; falls back to the file path
    pub fn display_name(&self) -> String {
        match self.name() {
            Some(name) => name.to_string(),
            None => self.path.display().to_string(),
        }
    }

    /// Whether the package is marked `"private": true`
    pub fn is_private(&self) -> bool {
        matches!(self.document.get("private"), Some(Value::Bool(true)))
    }

    /// A dependency table, if present and an object
    pub fn dependencies(&self, field: &str) -> Option<&Map<String, Value>> {
        self.document.get(field).and_then(Value::as_object)
    }

    /// Set the `version` field (appended at the end when missing)
    pub fn set_version(&mut self, version: &str) {
        self.document
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// Pin every dependency in `field` whose name starts with `prefix` to
    /// `version`. Returns the names that were rewritten.
    pub fn pin_internal_dependencies(
        &mut self,
        field: &str,
        prefix: &str,
        version: &str,
    ) -> Vec<String> {
        let Some(table) = self.document.get_mut(field) else {
            return Vec::new();
        };
        let Some(deps) = table.as_object_mut() else {
            log::debug!(
                "{} in {} is not an object, leaving it alone",
                field,
                self.path.display()
            );
            return Vec::new();
        };

        let mut rewritten = Vec::new();
        for (name, range) in deps.iter_mut() {
            if name.starts_with(prefix) {
                *range = Value::String(version.to_string());
                rewritten.push(name.clone());
            }
        }
        rewritten
    }

    /// Serialize with two-space indentation and a trailing newline
    pub fn to_json_string(&self) -> Result<String, ManifestError> {
        let mut text = serde_json::to_string_pretty(&self.document)
            .map_err(|e| ManifestError::invalid_shape(&self.path, e.to_string()))?;
        text.push('\n');
        Ok(text)
    }

    /// Write the manifest back to the file it came from
    pub async fn save(&self) -> Result<(), ManifestError> {
        let text = self.to_json_string()?;
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| ManifestError::write_error(&self.path, e))?;
        log::debug!("wrote {}", self.path.display());
        Ok(())
    }
}
