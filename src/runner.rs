//! External command execution
//!
//! This module provides:
//! - A description of a command to run (`CommandSpec`)
//! - The `CommandRunner` capability used by every release phase
//! - `RealRunner`, which spawns processes
//! - `LoggingRunner`, which only prints what would have run (dry-run mode)
//!
//! A runner is picked once at startup; phases never check the dry-run flag
//! themselves.

use crate::error::CommandError;
use crate::output::Reporter;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;

/// How the child's stdout/stderr are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Child writes straight to our terminal
    #[default]
    Inherit,
    /// Child output is captured and returned
    Capture,
}

/// A command to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Working directory; `None` inherits ours
    pub cwd: Option<PathBuf>,
    /// Output wiring
    pub output: OutputMode,
}

impl CommandSpec {
    /// Create a command with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            output: OutputMode::Inherit,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run inside a directory
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Capture output instead of inheriting it
    pub fn capture(mut self) -> Self {
        self.output = OutputMode::Capture;
        self
    }

    /// Shell-like rendering used in logs and error messages
    pub fn display(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// What a finished command produced
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Whether the process exited with status 0
    pub success: bool,
    /// Captured standard output (empty when inherited)
    pub stdout: String,
    /// Captured standard error (empty when inherited)
    pub stderr: String,
}

impl CommandOutput {
    /// A successful result with the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed result with the given exit code and stderr
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Capability for running external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion
    ///
    /// A non-zero exit is reported through `CommandOutput::success`, not as an
    /// error; only a failure to start the process is an error.
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, CommandError>;

    /// Whether this runner skips execution
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Runner that spawns real processes
#[derive(Debug, Default)]
pub struct RealRunner;

impl RealRunner {
    /// Create a new real runner
    pub fn new() -> Self {
        Self
    }

    fn build(&self, command: &CommandSpec) -> Command {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        if let Some(ref dir) = command.cwd {
            cmd.current_dir(dir);
        }
        match command.output {
            OutputMode::Inherit => {
                cmd.stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());
            }
            OutputMode::Capture => {
                cmd.stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());
            }
        }
        cmd
    }
}

#[async_trait]
impl CommandRunner for RealRunner {
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, CommandError> {
        let dir = command.cwd.as_deref().unwrap_or(Path::new("."));
        log::debug!("running `{}` in {}", command.display(), dir.display());

        let mut cmd = self.build(command);
        let result = match command.output {
            OutputMode::Inherit => {
                let status = cmd
                    .status()
                    .await
                    .map_err(|e| CommandError::spawn(command.display(), e))?;
                CommandOutput {
                    code: status.code(),
                    success: status.success(),
                    stdout: String::new(),
                    stderr: String::new(),
                }
            }
            OutputMode::Capture => {
                let output = cmd
                    .output()
                    .await
                    .map_err(|e| CommandError::spawn(command.display(), e))?;
                CommandOutput {
                    code: output.status.code(),
                    success: output.status.success(),
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                }
            }
        };

        log::debug!("`{}` exited with {:?}", command.display(), result.code);
        Ok(result)
    }
}

/// Runner that prints commands instead of executing them
pub struct LoggingRunner {
    reporter: Arc<Reporter>,
}

impl LoggingRunner {
    /// Create a logging runner that reports through `reporter`
    pub fn new(reporter: Arc<Reporter>) -> Self {
        Self { reporter }
    }
}

#[async_trait]
impl CommandRunner for LoggingRunner {
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, CommandError> {
        self.reporter
            .dry_run(&command.display(), command.cwd.as_deref());
        Ok(CommandOutput::success(String::new()))
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

/// Pick the runner for this invocation
pub fn select_runner(dry_run: bool, reporter: Arc<Reporter>) -> Arc<dyn CommandRunner> {
    if dry_run {
        Arc::new(LoggingRunner::new(reporter))
    } else {
        Arc::new(RealRunner::new())
    }
}
