//! Colored status line writer
//!
//! Every user-visible line of a release run goes through a [`Reporter`].
//! The binary writes to stdout; tests hand in a [`MemorySink`] and assert on
//! the captured text.

use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Visual weight of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Phase headers
    Step,
    /// Commands that a dry run would have executed
    DryRun,
    /// Manifest rewrites
    Change,
    /// Completed actions
    Success,
    /// Skips the user should notice
    Warning,
    /// Low-importance detail
    Muted,
    /// No styling
    Plain,
}

/// Writes colored status lines to a sink
pub struct Reporter {
    sink: Mutex<Box<dyn Write + Send>>,
    color: bool,
}

impl Reporter {
    /// Create a reporter that writes to the given sink
    pub fn new(sink: impl Write + Send + 'static, color: bool) -> Self {
        Self {
            sink: Mutex::new(Box::new(sink)),
            color,
        }
    }

    /// Create a reporter that writes to stdout
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }

    /// Phase header, preceded by a blank line
    pub fn step(&self, message: &str) {
        self.line(&format!("\n{}", message), Tone::Step);
    }

    /// A command that was not executed because of dry-run mode
    pub fn dry_run(&self, command: &str, cwd: Option<&Path>) {
        let text = match cwd {
            Some(dir) => format!("[dryrun] {} (cwd: {})", command, dir.display()),
            None => format!("[dryrun] {}", command),
        };
        self.line(&text, Tone::DryRun);
    }

    /// An internal dependency pin that was rewritten
    pub fn dependency(&self, package: &str, dep_type: &str, dependency: &str, version: &str) {
        self.line(
            &format!("{} -> {} -> {}@{}", package, dep_type, dependency, version),
            Tone::Change,
        );
    }

    /// Successful action
    pub fn success(&self, message: &str) {
        self.line(message, Tone::Success);
    }

    /// Skipped action worth noticing
    pub fn warning(&self, message: &str) {
        self.line(message, Tone::Warning);
    }

    /// Minor detail
    pub fn muted(&self, message: &str) {
        self.line(message, Tone::Muted);
    }

    /// Unstyled line
    pub fn notice(&self, message: &str) {
        self.line(message, Tone::Plain);
    }

    /// Write one line with the given tone
    pub fn line(&self, text: &str, tone: Tone) {
        let rendered = self.paint(text, tone);
        let mut sink = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(sink, "{}", rendered).and_then(|_| sink.flush()) {
            log::warn!("failed to write status line: {}", e);
        }
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        match tone {
            Tone::Step => text.cyan().to_string(),
            Tone::DryRun => text.blue().to_string(),
            Tone::Change => text.yellow().to_string(),
            Tone::Success => text.green().to_string(),
            Tone::Warning => text.red().to_string(),
            Tone::Muted => text.dimmed().to_string(),
            Tone::Plain => text.to_string(),
        }
    }
}

/// Cloneable in-memory sink
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        let buffer = match self.buffer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = match self.buffer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_reporter() -> (Reporter, MemorySink) {
        let sink = MemorySink::new();
        (Reporter::new(sink.clone(), false), sink)
    }

    #[test]
    fn test_step_has_leading_blank_line() {
        let (reporter, sink) = plain_reporter();
        reporter.step("Publishing packages...");
        assert_eq!(sink.contents(), "\nPublishing packages...\n");
    }

    #[test]
    fn test_dry_run_line() {
        let (reporter, sink) = plain_reporter();
        reporter.dry_run("git add -A", None);
        reporter.dry_run("yarn publish", Some(Path::new("/repo/packages/a")));
        let out = sink.contents();
        assert!(out.contains("[dryrun] git add -A\n"));
        assert!(out.contains("[dryrun] yarn publish (cwd: /repo/packages/a)"));
    }

    #[test]
    fn test_dependency_line() {
        let (reporter, sink) = plain_reporter();
        reporter.dependency("@acme/ui", "dependencies", "@acme/core", "2.0.0");
        assert_eq!(
            sink.contents(),
            "@acme/ui -> dependencies -> @acme/core@2.0.0\n"
        );
    }

    #[test]
    fn test_plain_mode_has_no_escape_codes() {
        let (reporter, sink) = plain_reporter();
        reporter.success("done");
        reporter.warning("skipped");
        reporter.muted("detail");
        assert!(!sink.contents().contains('\u{1b}'));
    }

    #[test]
    fn test_memory_sink_is_shared_between_clones() {
        let sink = MemorySink::new();
        let mut writer = sink.clone();
        writer.write_all(b"hello").unwrap();
        assert_eq!(sink.contents(), "hello");
    }
}
