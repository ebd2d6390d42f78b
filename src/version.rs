//! Target version resolution
//!
//! The release version comes from the command line when given. Otherwise the
//! user picks from the next patch/minor/major versions (plus the pre-release
//! bumps when a pre-release identifier is active) or types a custom one.
//! Whatever is chosen must be a valid semantic version.

use crate::domain::ReleaseIncrement;
use crate::error::ReleaseError;
use crate::prompt::UserInteraction;
use semver::Version;

/// Menu entry for a custom version
pub const CUSTOM_CHOICE: &str = "custom";

/// One entry of the release-type menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChoice {
    /// Increment that produced the version
    pub increment: ReleaseIncrement,
    /// Resulting version
    pub version: Version,
}

impl VersionChoice {
    /// Menu label, e.g. `minor (1.3.0)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.increment, self.version)
    }
}

/// Parse and validate a version typed by the user or given on the command line
///
/// Surrounding whitespace and a leading `v` or `=` are accepted and dropped.
pub fn parse_version(input: &str) -> Result<Version, ReleaseError> {
    let trimmed = input.trim();
    let bare = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('='))
        .unwrap_or(trimmed);
    Version::parse(bare).map_err(|_| ReleaseError::invalid_version(input))
}

/// Pre-release identifier in effect
///
/// `--preid` wins; otherwise the first identifier of the current version's
/// pre-release is used unless it is purely numeric.
pub fn active_preid(requested: Option<&str>, current: &Version) -> Option<String> {
    if let Some(id) = requested.filter(|id| !id.is_empty()) {
        return Some(id.to_string());
    }
    if current.pre.is_empty() {
        return None;
    }
    current
        .pre
        .as_str()
        .split('.')
        .next()
        .filter(|first| !first.bytes().all(|b| b.is_ascii_digit()))
        .map(str::to_string)
}

/// Candidate versions offered in the menu, in order
pub fn build_choices(
    current: &Version,
    preid: Option<&str>,
) -> Result<Vec<VersionChoice>, ReleaseError> {
    ReleaseIncrement::candidates(preid.is_some())
        .into_iter()
        .map(|increment| {
            let version = increment.apply(current, preid).map_err(|e| {
                ReleaseError::invalid_version(format!(
                    "{} of {} with pre-release id '{}' ({})",
                    increment,
                    current,
                    preid.unwrap_or_default(),
                    e
                ))
            })?;
            Ok(VersionChoice { increment, version })
        })
        .collect()
}

/// Determine the release version, asking the user when none was given
pub async fn resolve_target_version(
    requested: Option<&str>,
    current: &Version,
    preid: Option<&str>,
    ui: &dyn UserInteraction,
) -> Result<Version, ReleaseError> {
    if let Some(version) = requested {
        return parse_version(version);
    }

    let preid = active_preid(preid, current);
    let choices = build_choices(current, preid.as_deref())?;

    let mut labels: Vec<String> = choices.iter().map(VersionChoice::label).collect();
    labels.push(CUSTOM_CHOICE.to_string());

    let selected = ui.select_one("Select release type", &labels).await?;
    match choices.get(selected) {
        Some(choice) => {
            log::debug!("selected {}", choice.label());
            Ok(choice.version.clone())
        }
        None => {
            let typed = ui
                .input_text("Input custom version", &current.to_string())
                .await?;
            parse_version(&typed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{Answer, ScriptedInteraction};

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("1.2.3").unwrap(), v("1.2.3"));
        assert_eq!(parse_version(" v2.0.0-beta.1 ").unwrap(), v("2.0.0-beta.1"));
        assert_eq!(parse_version("=1.0.0").unwrap(), v("1.0.0"));
    }

    #[test]
    fn test_parse_version_invalid() {
        for bad in ["", "1", "1.2", "1.2.x", "latest", "01.0.0"] {
            let err = parse_version(bad).unwrap_err();
            assert!(matches!(err, ReleaseError::InvalidVersion { .. }), "{}", bad);
        }
    }

    #[test]
    fn test_active_preid() {
        assert_eq!(active_preid(Some("rc"), &v("1.0.0")), Some("rc".to_string()));
        assert_eq!(
            active_preid(None, &v("1.0.0-beta.2")),
            Some("beta".to_string())
        );
        assert_eq!(active_preid(None, &v("1.0.0")), None);
        assert_eq!(active_preid(None, &v("1.0.0-0")), None);
        assert_eq!(active_preid(Some(""), &v("1.0.0")), None);
    }

    #[test]
    fn test_build_choices_stable() {
        let choices = build_choices(&v("1.0.0"), None).unwrap();
        let labels: Vec<_> = choices.iter().map(VersionChoice::label).collect();
        assert_eq!(
            labels,
            vec!["patch (1.0.1)", "minor (1.1.0)", "major (2.0.0)"]
        );
    }

    #[test]
    fn test_build_choices_with_preid() {
        let choices = build_choices(&v("1.0.0-beta.0"), Some("beta")).unwrap();
        let labels: Vec<_> = choices.iter().map(VersionChoice::label).collect();
        assert_eq!(
            labels,
            vec![
                "patch (1.0.0)",
                "minor (1.0.0)",
                "major (1.0.0)",
                "prepatch (1.0.1-beta.0)",
                "preminor (1.1.0-beta.0)",
                "premajor (2.0.0-beta.0)",
                "prerelease (1.0.0-beta.1)",
            ]
        );
    }

    #[test]
    fn test_build_choices_counter_overflow() {
        let result = build_choices(&v("1.0.0-beta.18446744073709551615"), Some("beta"));
        assert!(matches!(result, Err(ReleaseError::InvalidVersion { .. })));
    }

    #[tokio::test]
    async fn test_menu_with_oversized_counter_fails() {
        let ui = ScriptedInteraction::new([Answer::Select(0)]);
        let result =
            resolve_target_version(None, &v("1.0.0-99999999999999999999"), Some("alpha"), &ui)
                .await;
        assert!(matches!(result, Err(ReleaseError::InvalidVersion { .. })));
        assert!(ui.asked().is_empty());
    }

    #[tokio::test]
    async fn test_explicit_version_skips_prompt() {
        let ui = ScriptedInteraction::new([]);
        let version = resolve_target_version(Some("3.1.0"), &v("1.0.0"), None, &ui)
            .await
            .unwrap();
        assert_eq!(version, v("3.1.0"));
        assert!(ui.asked().is_empty());
    }

    #[tokio::test]
    async fn test_explicit_invalid_version() {
        let ui = ScriptedInteraction::new([]);
        let result = resolve_target_version(Some("next"), &v("1.0.0"), None, &ui).await;
        assert!(matches!(result, Err(ReleaseError::InvalidVersion { .. })));
    }

    #[tokio::test]
    async fn test_select_minor() {
        let ui = ScriptedInteraction::new([Answer::Select(1)]);
        let version = resolve_target_version(None, &v("1.0.0"), None, &ui)
            .await
            .unwrap();
        assert_eq!(version, v("1.1.0"));
    }

    #[tokio::test]
    async fn test_select_prerelease_with_preid() {
        let ui = ScriptedInteraction::new([Answer::Select(6)]);
        let version = resolve_target_version(None, &v("1.0.0"), Some("alpha"), &ui)
            .await
            .unwrap();
        assert_eq!(version, v("1.0.1-alpha.0"));
    }

    #[tokio::test]
    async fn test_custom_version() {
        // patch, minor, major, custom
        let ui = ScriptedInteraction::new([
            Answer::Select(3),
            Answer::Text("4.0.0-rc.0".to_string()),
        ]);
        let version = resolve_target_version(None, &v("1.0.0"), None, &ui)
            .await
            .unwrap();
        assert_eq!(version, v("4.0.0-rc.0"));
        assert_eq!(ui.asked(), vec!["Select release type", "Input custom version"]);
    }

    #[tokio::test]
    async fn test_custom_version_defaults_to_current() {
        let ui = ScriptedInteraction::new([Answer::Select(3), Answer::Text(String::new())]);
        let version = resolve_target_version(None, &v("1.0.0"), None, &ui)
            .await
            .unwrap();
        assert_eq!(version, v("1.0.0"));
    }

    #[tokio::test]
    async fn test_custom_version_invalid() {
        let ui = ScriptedInteraction::new([Answer::Select(3), Answer::Text("1.0".to_string())]);
        let result = resolve_target_version(None, &v("1.0.0"), None, &ui).await;
        assert!(matches!(result, Err(ReleaseError::InvalidVersion { .. })));
    }
}
