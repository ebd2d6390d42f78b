//! Release increment types
//!
//! Increments follow npm's semver `inc` rules, so a pre-release of the
//! next patch can be promoted with `patch` and `x.y.0-rc.1` promotes to
//! `x.y.0` with `minor`.

use crate::error::IncrementError;
use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;

/// The kind of release bump offered when no version is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseIncrement {
    Patch,
    Minor,
    Major,
    Prepatch,
    Preminor,
    Premajor,
    Prerelease,
}

impl ReleaseIncrement {
    /// Increments that never need a pre-release identifier
    pub fn stable() -> &'static [ReleaseIncrement] {
        &[
            ReleaseIncrement::Patch,
            ReleaseIncrement::Minor,
            ReleaseIncrement::Major,
        ]
    }

    /// Increments that produce a pre-release version
    pub fn prerelease() -> &'static [ReleaseIncrement] {
        &[
            ReleaseIncrement::Prepatch,
            ReleaseIncrement::Preminor,
            ReleaseIncrement::Premajor,
            ReleaseIncrement::Prerelease,
        ]
    }

    /// Increments to offer, in menu order
    pub fn candidates(with_prerelease: bool) -> Vec<ReleaseIncrement> {
        let mut increments = Self::stable().to_vec();
        if with_prerelease {
            increments.extend_from_slice(Self::prerelease());
        }
        increments
    }

    /// Returns the lowercase name used in menus
    pub fn label(&self) -> &'static str {
        match self {
            ReleaseIncrement::Patch => "patch",
            ReleaseIncrement::Minor => "minor",
            ReleaseIncrement::Major => "major",
            ReleaseIncrement::Prepatch => "prepatch",
            ReleaseIncrement::Preminor => "preminor",
            ReleaseIncrement::Premajor => "premajor",
            ReleaseIncrement::Prerelease => "prerelease",
        }
    }

    /// Compute the next version from `current`
    ///
    /// Fails when `preid` is not a valid pre-release identifier or a numeric
    /// component cannot be incremented.
    pub fn apply(&self, current: &Version, preid: Option<&str>) -> Result<Version, IncrementError> {
        let mut next = current.clone();
        next.build = BuildMetadata::EMPTY;

        match self {
            ReleaseIncrement::Patch => bump_patch(&mut next)?,
            ReleaseIncrement::Minor => bump_minor(&mut next)?,
            ReleaseIncrement::Major => bump_major(&mut next)?,
            ReleaseIncrement::Prepatch => {
                next.pre = Prerelease::EMPTY;
                bump_patch(&mut next)?;
                next.pre = next_prerelease(&next.pre, preid)?;
            }
            ReleaseIncrement::Preminor => {
                next.pre = Prerelease::EMPTY;
                next.patch = 0;
                next.minor = increment(next.minor)?;
                next.pre = next_prerelease(&next.pre, preid)?;
            }
            ReleaseIncrement::Premajor => {
                next.pre = Prerelease::EMPTY;
                next.patch = 0;
                next.minor = 0;
                next.major = increment(next.major)?;
                next.pre = next_prerelease(&next.pre, preid)?;
            }
            ReleaseIncrement::Prerelease => {
                let pre = next.pre.clone();
                if pre.is_empty() {
                    bump_patch(&mut next)?;
                }
                next.pre = next_prerelease(&pre, preid)?;
            }
        }

        Ok(next)
    }
}

impl fmt::Display for ReleaseIncrement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn increment(value: u64) -> Result<u64, IncrementError> {
    value
        .checked_add(1)
        .ok_or_else(|| IncrementError::overflow(value.to_string()))
}

fn bump_patch(version: &mut Version) -> Result<(), IncrementError> {
    if version.pre.is_empty() {
        version.patch = increment(version.patch)?;
    }
    version.pre = Prerelease::EMPTY;
    Ok(())
}

fn bump_minor(version: &mut Version) -> Result<(), IncrementError> {
    if version.patch != 0 || version.pre.is_empty() {
        version.minor = increment(version.minor)?;
    }
    version.patch = 0;
    version.pre = Prerelease::EMPTY;
    Ok(())
}

fn bump_major(version: &mut Version) -> Result<(), IncrementError> {
    if version.minor != 0 || version.patch != 0 || version.pre.is_empty() {
        version.major = increment(version.major)?;
    }
    version.minor = 0;
    version.patch = 0;
    version.pre = Prerelease::EMPTY;
    Ok(())
}

fn is_numeric(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}

/// Advance a pre-release, switching to `preid` when it differs
fn next_prerelease(
    current: &Prerelease,
    preid: Option<&str>,
) -> Result<Prerelease, IncrementError> {
    let mut identifiers: Vec<String> = if current.is_empty() {
        Vec::new()
    } else {
        current.as_str().split('.').map(str::to_string).collect()
    };

    if identifiers.is_empty() {
        identifiers = match preid {
            Some(id) => vec![id.to_string(), "0".to_string()],
            None => vec!["0".to_string()],
        };
    } else {
        let last_numeric = identifiers.iter().rposition(|id| is_numeric(id));
        match last_numeric {
            Some(index) => {
                let value: u64 = identifiers[index]
                    .parse()
                    .map_err(|_| IncrementError::overflow(identifiers[index].as_str()))?;
                identifiers[index] = increment(value)?.to_string();
            }
            None => identifiers.push("0".to_string()),
        }

        if let Some(id) = preid {
            let same_identifier = identifiers[0] == id;
            let has_counter = identifiers.get(1).is_some_and(|s| is_numeric(s));
            if !same_identifier || !has_counter {
                identifiers = vec![id.to_string(), "0".to_string()];
            }
        }
    }

    Ok(Prerelease::new(&identifiers.join("."))?)
}
