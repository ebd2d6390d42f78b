//! Workspace release settings
//!
//! Reads optional `release.toml` from the workspace root. Every key has a
//! default, so a workspace without the file works out of the box:
//!
//! ```toml
//! packages_dir = "packages"
//! internal_prefix = "@acme/"
//! publish_client = "yarn"
//! access = "public"
//! already_published_pattern = "previously published"
//! remote = "origin"
//! commit_message = "release: v{version}"
//! tag_prefix = "v"
//! ```

use crate::error::ConfigError;
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings file name looked up in the workspace root
pub const CONFIG_FILENAME: &str = "release.toml";

const DEFAULT_PACKAGES_DIR: &str = "packages";
const DEFAULT_PUBLISH_CLIENT: &str = "yarn";
const DEFAULT_ACCESS: &str = "public";
const DEFAULT_ALREADY_PUBLISHED: &str = "previously published";
const DEFAULT_REMOTE: &str = "origin";
const DEFAULT_COMMIT_MESSAGE: &str = "release: v{version}";
const DEFAULT_TAG_PREFIX: &str = "v";

/// Raw file contents, all keys optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    packages_dir: Option<PathBuf>,
    internal_prefix: Option<String>,
    publish_client: Option<String>,
    access: Option<String>,
    already_published_pattern: Option<String>,
    remote: Option<String>,
    commit_message: Option<String>,
    tag_prefix: Option<String>,
}

/// Release settings with defaults applied
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    /// Directory (relative to the root) holding one folder per package
    pub packages_dir: PathBuf,
    /// Dependency names starting with this are rewritten to the release version;
    /// `None` means "use the root manifest's name"
    pub internal_prefix: Option<String>,
    /// Program used to publish (`<client> publish --new-version ...`)
    pub publish_client: String,
    /// Value passed to `--access`
    pub access: String,
    /// Registry error text meaning the version already exists
    pub already_published: Regex,
    /// Remote used when pushing tags
    pub remote: String,
    /// Commit message template; `{version}` is replaced
    pub commit_message: String,
    /// Prefix for release tags
    pub tag_prefix: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            packages_dir: PathBuf::from(DEFAULT_PACKAGES_DIR),
            internal_prefix: None,
            publish_client: DEFAULT_PUBLISH_CLIENT.to_string(),
            access: DEFAULT_ACCESS.to_string(),
            already_published: Regex::new(DEFAULT_ALREADY_PUBLISHED)
                .expect("Invalid default pattern"),
            remote: DEFAULT_REMOTE.to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
        }
    }
}

impl ReleaseConfig {
    /// Read settings from `release.toml` in a directory
    ///
    /// A missing file yields the defaults; an unreadable or malformed file is
    /// an error.
    pub fn from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILENAME);
        if !path.exists() {
            log::debug!("no {} in {}, using defaults", CONFIG_FILENAME, dir.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;
        Self::parse(&content, &path)
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut config = Self::default();
        if let Some(dir) = raw.packages_dir {
            config.packages_dir = dir;
        }
        config.internal_prefix = raw.internal_prefix.filter(|p| !p.is_empty());
        if let Some(client) = raw.publish_client {
            config.publish_client = client;
        }
        if let Some(access) = raw.access {
            config.access = access;
        }
        if let Some(pattern) = raw.already_published_pattern {
            config.already_published =
                Regex::new(&pattern).map_err(|e| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
        }
        if let Some(remote) = raw.remote {
            config.remote = remote;
        }
        if let Some(message) = raw.commit_message {
            config.commit_message = message;
        }
        if let Some(prefix) = raw.tag_prefix {
            config.tag_prefix = prefix;
        }

        Ok(config)
    }

    /// Commit message for a release
    pub fn commit_message_for(&self, version: &str) -> String {
        self.commit_message.replace("{version}", version)
    }

    /// Git tag name for a release
    pub fn tag_for(&self, version: &str) -> String {
        format!("{}{}", self.tag_prefix, version)
    }
}
