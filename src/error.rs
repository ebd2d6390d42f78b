//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ReleaseError: top-level error returned by every release phase
//! - ManifestError: Issues reading, parsing or writing package.json files
//! - CommandError: External processes that could not be started
//! - PromptError: Interactive input failures
//! - ConfigError: Issues with release.toml
//! - WorkspaceError: Issues listing the packages directory
//! - IncrementError: A version that cannot be bumped

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Requested or computed version is not a valid semantic version
    #[error("invalid target version: {version}")]
    InvalidVersion { version: String },

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// A version-control command exited with a non-zero status
    #[error("`{command}` failed with {}: {stderr}", describe_code(*.code))]
    VcsCommand {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The registry rejected a publish for a reason other than "already published"
    #[error("failed to publish {package}: {stderr}")]
    Publish { package: String, stderr: String },

    /// Process spawn failures
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Interactive prompt failures
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Workspace scanning errors
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code".to_string(),
    }
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// Manifest or one of its dependency tables has the wrong JSON type
    #[error("unexpected manifest shape in {path}: {message}")]
    InvalidShape { path: PathBuf, message: String },

    /// Manifest has no usable version field
    #[error("manifest {path} has no \"version\" string")]
    MissingVersion { path: PathBuf },
}

/// Errors related to spawning external commands
#[derive(Error, Debug)]
pub enum CommandError {
    /// The process could not be started at all
    #[error("failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to interactive input
#[derive(Error, Debug)]
pub enum PromptError {
    /// Terminal read or write failed
    #[error("failed to interact with terminal: {0}")]
    Io(#[from] std::io::Error),

    /// Input stream ended while an answer was required
    #[error("input closed before an answer was given")]
    Closed,

    /// Selection outside the offered choices
    #[error("invalid choice '{input}': expected a number between 1 and {max}")]
    InvalidChoice { input: String, max: usize },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read release.toml
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse release.toml
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// already_published_pattern is not a valid regex
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Errors related to workspace scanning
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// Packages directory not found
    #[error("packages directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Directory listing failed
    #[error("failed to list {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors computing the next version of a release increment
#[derive(Error, Debug)]
pub enum IncrementError {
    /// The requested pre-release identifier is not valid semver
    #[error("invalid pre-release identifier: {0}")]
    InvalidIdentifier(#[from] semver::Error),

    /// A numeric component is already at the largest representable value
    #[error("cannot increment '{value}': number too large")]
    Overflow { value: String },
}

impl ReleaseError {
    /// Creates a new InvalidVersion error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        ReleaseError::InvalidVersion {
            version: version.into(),
        }
    }

    /// Creates a new Publish error
    pub fn publish(package: impl Into<String>, stderr: impl Into<String>) -> Self {
        ReleaseError::Publish {
            package: package.into(),
            stderr: stderr.into(),
        }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidShape error
    pub fn invalid_shape(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::InvalidShape {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl CommandError {
    /// Creates a new Spawn error
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        CommandError::Spawn {
            command: command.into(),
            source,
        }
    }
}

impl IncrementError {
    /// Creates a new Overflow error
    pub fn overflow(value: impl Into<String>) -> Self {
        IncrementError::Overflow {
            value: value.into(),
        }
    }
}

impl WorkspaceError {
    /// Creates a new DirectoryNotFound error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        WorkspaceError::DirectoryNotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WorkspaceError::ReadError {
            path: path.into(),
            source,
        }
    }
}
