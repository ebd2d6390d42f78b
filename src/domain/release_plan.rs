//! Release plan and distribution tag resolution

use semver::Version;
use std::fmt;

/// Version pre-release markers that map onto a distribution tag, in priority order
const TAGGED_CHANNELS: [&str; 3] = ["alpha", "beta", "rc"];

/// What a single release run is going to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    /// Version every manifest is set to
    pub target_version: Version,
    /// Distribution tag passed to the registry (`None` means registry default)
    pub dist_tag: Option<String>,
    /// Whether external commands are only logged
    pub dry_run: bool,
}

impl ReleasePlan {
    /// Build a plan, resolving the distribution tag from the version when no
    /// explicit tag is given
    pub fn new(target_version: Version, explicit_tag: Option<&str>, dry_run: bool) -> Self {
        let dist_tag = resolve_dist_tag(explicit_tag, &target_version.to_string());
        Self {
            target_version,
            dist_tag,
            dry_run,
        }
    }

    /// Target version as written into manifests
    pub fn version_string(&self) -> String {
        self.target_version.to_string()
    }
}

impl fmt::Display for ReleasePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.target_version)?;
        if let Some(ref tag) = self.dist_tag {
            write!(f, " ({})", tag)?;
        }
        if self.dry_run {
            write!(f, " [dry run]")?;
        }
        Ok(())
    }
}

/// Pick the distribution tag for a version
///
/// An explicit tag always wins. Otherwise the first of `alpha`, `beta`, `rc`
/// found anywhere in the version string is used.
pub fn resolve_dist_tag(explicit: Option<&str>, version: &str) -> Option<String> {
    if let Some(tag) = explicit {
        return Some(tag.to_string());
    }

    TAGGED_CHANNELS
        .iter()
        .find(|channel| version.contains(*channel))
        .map(|channel| channel.to_string())
}
