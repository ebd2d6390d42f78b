//! Git operations for a release
//!
//! - Detect whether the working tree has changes
//! - Stage everything and create the release commit
//! - Tag the release and push tag and branch
//!
//! Every git call goes through the context's `CommandRunner`. Any non-zero
//! exit is fatal; nothing is retried.

use crate::context::ReleaseContext;
use crate::error::ReleaseError;
use crate::runner::{CommandOutput, CommandSpec};

const GIT: &str = "git";

fn git<I, S>(ctx: &ReleaseContext, args: I) -> CommandSpec
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CommandSpec::new(GIT).args(args).current_dir(ctx.root())
}

/// Run a git command and turn a non-zero exit into `VcsCommand`
async fn run_git(
    ctx: &ReleaseContext,
    command: CommandSpec,
) -> Result<CommandOutput, ReleaseError> {
    let output = ctx.runner.run(&command).await?;
    if !output.success {
        return Err(ReleaseError::VcsCommand {
            command: command.display(),
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        });
    }
    Ok(output)
}

/// Whether `git diff` reports any unstaged change
pub async fn has_changes(ctx: &ReleaseContext) -> Result<bool, ReleaseError> {
    let output = run_git(ctx, git(ctx, ["diff"]).capture()).await?;
    Ok(!output.stdout.trim().is_empty())
}

/// Commit all changes as `release: v<version>`
///
/// Returns false (and prints a notice) when there was nothing to commit.
pub async fn commit_changes(ctx: &ReleaseContext, version: &str) -> Result<bool, ReleaseError> {
    if !has_changes(ctx).await? {
        ctx.reporter.notice("No changes to commit.");
        if ctx.is_dry_run() {
            ctx.reporter.muted(
                "(dry run: git diff was not executed, so git add and git commit were skipped)",
            );
        }
        return Ok(false);
    }

    ctx.reporter.step("Committing changes...");
    run_git(ctx, git(ctx, ["add", "-A"])).await?;
    let message = ctx.config.commit_message_for(version);
    run_git(ctx, git(ctx, ["commit".to_string(), "-m".to_string(), message])).await?;
    Ok(true)
}

/// Tag the release and push the tag and the current branch
pub async fn push_release(ctx: &ReleaseContext, version: &str) -> Result<(), ReleaseError> {
    let tag = ctx.config.tag_for(version);
    let remote = ctx.config.remote.clone();

    run_git(ctx, git(ctx, ["tag".to_string(), tag.clone()])).await?;
    run_git(
        ctx,
        git(ctx, ["push".to_string(), remote, format!("refs/tags/{}", tag)]),
    )
    .await?;
    run_git(ctx, git(ctx, ["push"])).await?;
    Ok(())
}
