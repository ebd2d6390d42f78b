//! Package publishing
//!
//! Publishes workspace packages one at a time, in scan order:
//! - private packages are skipped without calling the registry
//! - the registry reporting the version as already published is a skip
//! - any other failure stops the run; earlier publishes stay published

use crate::context::ReleaseContext;
use crate::domain::{PublishOutcome, ReleasePlan, ReleaseSummary};
use crate::error::ReleaseError;
use crate::manifest::PackageManifest;
use crate::progress::Progress;
use crate::runner::{CommandOutput, CommandSpec};
use std::path::Path;

/// Command used to publish one package
pub fn publish_command(
    ctx: &ReleaseContext,
    package_dir: &Path,
    version: &str,
    dist_tag: Option<&str>,
) -> CommandSpec {
    let mut command = CommandSpec::new(&ctx.config.publish_client)
        .args(["publish", "--new-version", version]);
    if let Some(tag) = dist_tag {
        command = command.args(["--tag", tag]);
    }
    command
        .args(["--access", ctx.config.access.as_str()])
        .current_dir(package_dir)
        .capture()
}

/// Classify a finished publish command
fn classify(
    ctx: &ReleaseContext,
    package: &str,
    output: CommandOutput,
) -> Result<PublishOutcome, ReleaseError> {
    if output.success {
        return Ok(PublishOutcome::Published);
    }
    if ctx.config.already_published.is_match(&output.stderr) {
        return Ok(PublishOutcome::AlreadyPublished);
    }
    Err(ReleaseError::publish(package, output.stderr.trim()))
}

/// Publish one package directory
pub async fn publish_package(
    ctx: &ReleaseContext,
    package: &str,
    version: &str,
    dist_tag: Option<&str>,
    progress: &mut Progress,
) -> Result<PublishOutcome, ReleaseError> {
    let dir = ctx.package_dir(package);
    let manifest = PackageManifest::load(&dir).await?;
    if manifest.is_private() {
        log::debug!("{} is private, not publishing", package);
        ctx.reporter
            .muted(&format!("Skipping private package: {}", package));
        return Ok(PublishOutcome::SkippedPrivate);
    }

    ctx.reporter.step(&format!("Publishing {}...", package));
    let command = publish_command(ctx, &dir, version, dist_tag);

    progress.spinner(&command.display());
    let result = ctx.runner.run(&command).await;
    progress.finish_and_clear();

    let outcome = classify(ctx, package, result?)?;
    match outcome {
        PublishOutcome::Published => ctx
            .reporter
            .success(&format!("Successfully published {}@{}", package, version)),
        PublishOutcome::AlreadyPublished => ctx
            .reporter
            .warning(&format!("Skipping already published: {}", package)),
        PublishOutcome::SkippedPrivate => {}
    }
    Ok(outcome)
}

/// Publish every workspace package, recording outcomes in `summary`
pub async fn publish_all(
    ctx: &ReleaseContext,
    plan: &ReleasePlan,
    summary: &mut ReleaseSummary,
    progress: &mut Progress,
) -> Result<(), ReleaseError> {
    let version = plan.version_string();
    for package in &ctx.packages {
        let outcome =
            publish_package(ctx, package, &version, plan.dist_tag.as_deref(), progress).await?;
        summary.record(package.clone(), outcome);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReleaseConfig;
    use crate::output::{MemorySink, Reporter};
    use crate::runner::RealRunner;
    use semver::Version;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn context() -> (ReleaseContext, MemorySink) {
        let sink = MemorySink::new();
        let ctx = ReleaseContext {
            root: PathBuf::from("/repo"),
            config: ReleaseConfig::default(),
            packages: vec!["a".to_string()],
            current_version: Version::parse("1.0.0").unwrap(),
            internal_prefix: "tgtest".to_string(),
            runner: Arc::new(RealRunner::new()),
            reporter: Arc::new(Reporter::new(sink.clone(), false)),
            versions_touched: false,
        };
        (ctx, sink)
    }

    #[test]
    fn test_publish_command_without_tag() {
        let (ctx, _) = context();
        let command = publish_command(&ctx, Path::new("/repo/packages/a"), "1.1.0", None);
        assert_eq!(
            command.display(),
            "yarn publish --new-version 1.1.0 --access public"
        );
        assert_eq!(command.cwd, Some(PathBuf::from("/repo/packages/a")));
        assert_eq!(command.output, crate::runner::OutputMode::Capture);
    }

    #[test]
    fn test_publish_command_with_tag() {
        let (ctx, _) = context();
        let command = publish_command(
            &ctx,
            Path::new("/repo/packages/a"),
            "2.0.0-beta.0",
            Some("beta"),
        );
        assert_eq!(
            command.display(),
            "yarn publish --new-version 2.0.0-beta.0 --tag beta --access public"
        );
    }

    #[test]
    fn test_classify_success() {
        let (ctx, _) = context();
        let outcome = classify(&ctx, "a", CommandOutput::success("done")).unwrap();
        assert_eq!(outcome, PublishOutcome::Published);
    }

    #[test]
    fn test_classify_already_published() {
        let (ctx, _) = context();
        let output = CommandOutput::failure(
            1,
            "error Couldn't publish package: \"You cannot publish over the previously published versions: 1.1.0.\"",
        );
        let outcome = classify(&ctx, "a", output).unwrap();
        assert_eq!(outcome, PublishOutcome::AlreadyPublished);
    }

    #[test]
    fn test_classify_other_failure() {
        let (ctx, _) = context();
        let output = CommandOutput::failure(1, "error An unexpected error occurred: 401\n");
        let err = classify(&ctx, "a", output).unwrap_err();
        assert!(matches!(err, ReleaseError::Publish { ref package, .. } if package == "a"));
        assert!(err.to_string().contains("401"));
    }
}
