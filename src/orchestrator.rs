//! Release orchestrator coordinating the whole workflow
//!
//! This module provides:
//! - Workflow coordination: resolve → confirm → propagate → commit → publish → push
//! - Rollback of manifest versions when a phase fails after propagation began
//! - The run summary

use crate::context::ReleaseContext;
use crate::domain::{ReleasePlan, ReleaseSummary};
use crate::error::ReleaseError;
use crate::manifest::update_all;
use crate::progress::Progress;
use crate::prompt::UserInteraction;
use crate::publish::publish_all;
use crate::vcs::{commit_changes, push_release};
use crate::version::resolve_target_version;
use std::sync::Arc;

/// Phases that only print their header
const BEFORE_PROPAGATION_HOOKS: &[&str] = &["Running tests..."];
const AFTER_PROPAGATION_HOOKS: &[&str] = &[
    "Building all packages...",
    "Generating changelog...",
    "Updating lockfile...",
];

/// Options taken from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseOptions {
    /// Explicit target version
    pub version: Option<String>,
    /// Pre-release identifier
    pub preid: Option<String>,
    /// Distribution tag override
    pub tag: Option<String>,
    /// Skip the confirmation prompt
    pub yes: bool,
    /// Tag and push after publishing
    pub push: bool,
    /// Stop after committing
    pub skip_publish: bool,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The workflow ran to completion
    Released(ReleaseSummary),
    /// The user declined the confirmation prompt; nothing was changed
    Declined,
}

/// Orchestrator for one release run
pub struct Orchestrator {
    ctx: ReleaseContext,
    ui: Arc<dyn UserInteraction>,
    options: ReleaseOptions,
    progress: Progress,
}

impl Orchestrator {
    /// Create an orchestrator; the spinner is off until `with_progress`
    pub fn new(ctx: ReleaseContext, ui: Arc<dyn UserInteraction>, options: ReleaseOptions) -> Self {
        Self {
            ctx,
            ui,
            options,
            progress: Progress::disabled(),
        }
    }

    /// Use the given progress display for publishing
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    /// The release context
    pub fn context(&self) -> &ReleaseContext {
        &self.ctx
    }

    /// Run the release, rolling manifest versions back on failure
    ///
    /// Rollback only restores manifest versions; commits and publishes that
    /// already happened stay. The failing phase's error is always returned.
    pub async fn run(&mut self) -> Result<ReleaseOutcome, ReleaseError> {
        match self.execute().await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.rollback().await;
                Err(err)
            }
        }
    }

    async fn execute(&mut self) -> Result<ReleaseOutcome, ReleaseError> {
        let target = resolve_target_version(
            self.options.version.as_deref(),
            &self.ctx.current_version,
            self.options.preid.as_deref(),
            self.ui.as_ref(),
        )
        .await?;
        let plan = ReleasePlan::new(target, self.options.tag.as_deref(), self.ctx.is_dry_run());
        let version = plan.version_string();
        log::debug!("release plan: {}", plan);

        if !self.options.yes {
            let message = format!("Releasing v{}. Confirm?", version);
            if !self.ui.confirm(&message).await? {
                log::debug!("release declined");
                return Ok(ReleaseOutcome::Declined);
            }
        }

        let mut summary = ReleaseSummary::new(plan.clone());

        for hook in BEFORE_PROPAGATION_HOOKS {
            self.ctx.reporter.step(hook);
        }

        self.ctx.reporter.step("Updating cross dependencies...");
        self.ctx.versions_touched = true;
        update_all(
            self.ctx.root(),
            &self.ctx.package_dirs(),
            &self.ctx.internal_prefix,
            &version,
            &self.ctx.reporter,
        )
        .await?;

        for hook in AFTER_PROPAGATION_HOOKS {
            self.ctx.reporter.step(hook);
        }

        summary.committed = commit_changes(&self.ctx, &version).await?;

        if self.options.skip_publish {
            self.ctx.reporter.notice("Skipping publish.");
        } else {
            self.ctx.reporter.step("Publishing packages...");
            publish_all(&self.ctx, &plan, &mut summary, &mut self.progress).await?;
        }

        if self.options.push {
            self.ctx.reporter.step("Pushing to Git...");
            push_release(&self.ctx, &version).await?;
            summary.pushed = true;
        } else {
            self.ctx
                .reporter
                .notice("Skipping git push (pass --push to tag and push).");
        }

        if plan.dry_run {
            self.ctx
                .reporter
                .notice("\nDry run finished - run git diff to see package changes.");
        }

        self.ctx.reporter.success(&summary.recap());
        Ok(ReleaseOutcome::Released(summary))
    }

    /// Restore the pre-release version in every manifest
    async fn rollback(&mut self) {
        if !self.ctx.versions_touched {
            return;
        }

        let previous = self.ctx.current_version.to_string();
        log::debug!("rolling manifests back to {}", previous);
        if let Err(e) = update_all(
            self.ctx.root(),
            &self.ctx.package_dirs(),
            &self.ctx.internal_prefix,
            &previous,
            &self.ctx.reporter,
        )
        .await
        {
            log::error!("rollback to {} failed: {}", previous, e);
        }
    }
}
