//! CLI argument parsing module for monorelease

use crate::orchestrator::ReleaseOptions;
use clap::Parser;
use std::path::PathBuf;

/// Release every package of a JavaScript monorepo at one version
#[derive(Parser, Debug, Clone)]
#[command(
    name = "monorelease",
    disable_version_flag = true,
    about = "Monorepo release automation"
)]
pub struct CliArgs {
    /// Target version (prompted for when omitted)
    pub version: Option<String>,

    /// Pre-release identifier used for the pre* increments (e.g. beta)
    #[arg(long, value_name = "ID")]
    pub preid: Option<String>,

    /// Distribution tag to publish under (inferred from the version otherwise)
    #[arg(long)]
    pub tag: Option<String>,

    // General options
    /// Dry run mode - print external commands instead of running them
    #[arg(long, alias = "dry-run")]
    pub dry: bool,

    /// Workspace root (default: current directory)
    #[arg(short = 'C', long, default_value = ".")]
    pub root: PathBuf,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Tag the release and push it after publishing
    #[arg(long)]
    pub push: bool,

    /// Stop after the release commit
    #[arg(long)]
    pub skip_publish: bool,

    // Output options
    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print version information
    #[arg(short = 'V', long)]
    pub print_version: bool,
}

impl CliArgs {
    /// Options for the release workflow
    pub fn release_options(&self) -> ReleaseOptions {
        ReleaseOptions {
            version: self.version.clone(),
            preid: self.preid.clone(),
            tag: self.tag.clone(),
            yes: self.yes,
            push: self.push,
            skip_publish: self.skip_publish,
        }
    }

    /// Default log filter for env_logger
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
