//! monorelease - Monorepo release automation CLI tool
//!
//! Bumps the root and every workspace package to one version, pins internal
//! dependencies, commits, and publishes each public package.

use clap::Parser;
use colored::Colorize;
use monorelease::cli::CliArgs;
use monorelease::context::ReleaseContext;
use monorelease::orchestrator::{Orchestrator, ReleaseOutcome};
use monorelease::output::Reporter;
use monorelease::progress::Progress;
use monorelease::prompt::TerminalPrompt;
use monorelease::runner::select_runner;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Handle version flag
    if args.print_version {
        println!("monorelease {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{}", format!("Error: {:#}", e).red());
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    log::debug!("monorelease v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("workspace root: {}", args.root.display());

    let reporter = Arc::new(Reporter::stdout(!args.no_color));
    let runner = select_runner(args.dry, reporter.clone());
    let ctx = ReleaseContext::load(&args.root, runner, reporter).await?;

    let progress = if args.dry {
        Progress::disabled()
    } else {
        Progress::for_stdout()
    };
    let mut orchestrator =
        Orchestrator::new(ctx, Arc::new(TerminalPrompt::stdio()), args.release_options())
            .with_progress(progress);

    match orchestrator.run().await? {
        ReleaseOutcome::Released(summary) => {
            log::debug!("released: {:?}", summary.published().collect::<Vec<_>>());
        }
        ReleaseOutcome::Declined => log::debug!("nothing released"),
    }

    Ok(ExitCode::SUCCESS)
}
