//! Release result summary types
//!
//! Provides structures for tracking publish results per package and for the
//! run as a whole.

use super::ReleasePlan;

/// Result of publishing a single package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The registry accepted the package
    Published,
    /// The registry already had this version; not an error
    AlreadyPublished,
    /// The manifest is marked private and was never sent to the registry
    SkippedPrivate,
}

impl PublishOutcome {
    /// Short label for recap lines
    pub fn label(&self) -> &'static str {
        match self {
            PublishOutcome::Published => "published",
            PublishOutcome::AlreadyPublished => "already published",
            PublishOutcome::SkippedPrivate => "private",
        }
    }
}

/// Publish result for one workspace package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutcome {
    /// Package directory name
    pub package: String,
    /// What happened to it
    pub outcome: PublishOutcome,
}

/// Overall summary of a release run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    /// The plan that was executed
    pub plan: ReleasePlan,
    /// Whether a release commit was created
    pub committed: bool,
    /// Whether tags were pushed
    pub pushed: bool,
    /// Per-package publish results, in workspace order
    pub packages: Vec<PackageOutcome>,
}

impl ReleaseSummary {
    /// Creates an empty summary for a plan
    pub fn new(plan: ReleasePlan) -> Self {
        Self {
            plan,
            committed: false,
            pushed: false,
            packages: Vec::new(),
        }
    }

    /// Records one package's publish outcome
    pub fn record(&mut self, package: impl Into<String>, outcome: PublishOutcome) {
        self.packages.push(PackageOutcome {
            package: package.into(),
            outcome,
        });
    }

    /// Number of packages with the given outcome
    pub fn count(&self, outcome: PublishOutcome) -> usize {
        self.packages.iter().filter(|p| p.outcome == outcome).count()
    }

    /// Names of packages that were actually published
    pub fn published(&self) -> impl Iterator<Item = &str> {
        self.packages
            .iter()
            .filter(|p| p.outcome == PublishOutcome::Published)
            .map(|p| p.package.as_str())
    }

    /// One-line recap printed at the end of a run
    pub fn recap(&self) -> String {
        let counts: Vec<String> = [
            PublishOutcome::Published,
            PublishOutcome::AlreadyPublished,
            PublishOutcome::SkippedPrivate,
        ]
        .iter()
        .map(|outcome| format!("{} {}", self.count(*outcome), outcome.label()))
        .collect();
        format!("Released {}: {}", self.plan, counts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;

    fn sample_plan() -> ReleasePlan {
        ReleasePlan::new(Version::parse("1.1.0").unwrap(), None, false)
    }

    #[test]
    fn test_new_summary_is_empty() {
        let summary = ReleaseSummary::new(sample_plan());
        assert!(!summary.committed);
        assert!(!summary.pushed);
        assert!(summary.packages.is_empty());
    }

    #[test]
    fn test_record_and_count() {
        let mut summary = ReleaseSummary::new(sample_plan());
        summary.record("a", PublishOutcome::Published);
        summary.record("b", PublishOutcome::SkippedPrivate);
        summary.record("c", PublishOutcome::AlreadyPublished);
        summary.record("d", PublishOutcome::Published);

        assert_eq!(summary.count(PublishOutcome::Published), 2);
        assert_eq!(summary.count(PublishOutcome::SkippedPrivate), 1);
        assert_eq!(summary.published().collect::<Vec<_>>(), vec!["a", "d"]);
    }

    #[test]
    fn test_recap() {
        let mut summary = ReleaseSummary::new(sample_plan());
        summary.record("a", PublishOutcome::Published);
        summary.record("b", PublishOutcome::SkippedPrivate);
        assert_eq!(
            summary.recap(),
            "Released v1.1.0: 1 published, 0 already published, 1 private"
        );
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(PublishOutcome::Published.label(), "published");
        assert_eq!(PublishOutcome::AlreadyPublished.label(), "already published");
        assert_eq!(PublishOutcome::SkippedPrivate.label(), "private");
    }
}
