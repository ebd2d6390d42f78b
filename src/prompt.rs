//! Interactive user input
//!
//! The release flow asks three kinds of questions: pick one of several
//! versions, type a custom version, and confirm. `UserInteraction` is the
//! seam; `TerminalPrompt` talks to a terminal (or any reader/writer pair)
//! and `ScriptedInteraction` replays canned answers.

use crate::error::PromptError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::Mutex as StdMutex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

/// Capability for asking the user questions
#[async_trait]
pub trait UserInteraction: Send + Sync {
    /// Pick one of `choices`; returns its index
    async fn select_one(&self, message: &str, choices: &[String]) -> Result<usize, PromptError>;

    /// Free-form text; empty input yields `default`
    async fn input_text(&self, message: &str, default: &str) -> Result<String, PromptError>;

    /// Yes/no question, defaulting to no
    async fn confirm(&self, message: &str) -> Result<bool, PromptError>;
}

/// Line-based prompt over a reader and a writer
pub struct TerminalPrompt<R, W> {
    input: Mutex<R>,
    output: StdMutex<W>,
}

impl TerminalPrompt<BufReader<Stdin>, std::io::Stdout> {
    /// Prompt on the process's stdin/stdout
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), std::io::stdout())
    }
}

impl<R, W> TerminalPrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    /// Prompt over arbitrary streams
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: StdMutex::new(output),
        }
    }

    fn write(&self, text: &str) -> Result<(), PromptError> {
        let mut output = match self.output.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        output.write_all(text.as_bytes())?;
        output.flush()?;
        Ok(())
    }

    async fn read_line(&self) -> Result<String, PromptError> {
        let mut input = self.input.lock().await;
        let mut line = String::new();
        if input.read_line(&mut line).await? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }
}

/// Parse a 1-based menu answer
fn parse_choice(answer: &str, max: usize) -> Result<usize, PromptError> {
    match answer.parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n - 1),
        _ => Err(PromptError::InvalidChoice {
            input: answer.to_string(),
            max,
        }),
    }
}

#[async_trait]
impl<R, W> UserInteraction for TerminalPrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn select_one(&self, message: &str, choices: &[String]) -> Result<usize, PromptError> {
        let mut menu = format!("? {}\n", message);
        for (i, choice) in choices.iter().enumerate() {
            menu.push_str(&format!("  {}) {}\n", i + 1, choice));
        }
        self.write(&menu)?;

        loop {
            self.write(&format!("Select [1-{}]: ", choices.len()))?;
            let answer = self.read_line().await?;
            match parse_choice(&answer, choices.len()) {
                Ok(index) => return Ok(index),
                Err(e) => self.write(&format!("{}\n", e))?,
            }
        }
    }

    async fn input_text(&self, message: &str, default: &str) -> Result<String, PromptError> {
        self.write(&format!("? {} ({}): ", message, default))?;
        let answer = self.read_line().await?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    async fn confirm(&self, message: &str) -> Result<bool, PromptError> {
        self.write(&format!("? {} (y/N): ", message))?;
        let answer = self.read_line().await?.to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

/// A canned answer for [`ScriptedInteraction`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Index picked in a selection
    Select(usize),
    /// Typed text
    Text(String),
    /// Confirmation answer
    Confirm(bool),
}

/// Non-interactive double that replays answers in order
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    answers: StdMutex<VecDeque<Answer>>,
    asked: StdMutex<Vec<String>>,
}

impl ScriptedInteraction {
    /// Create a script from answers in the order they will be asked
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: StdMutex::new(answers.into_iter().collect()),
            asked: StdMutex::new(Vec::new()),
        }
    }

    /// Messages of every question asked so far
    pub fn asked(&self) -> Vec<String> {
        match self.asked.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn next(&self, message: &str) -> Result<Answer, PromptError> {
        match self.asked.lock() {
            Ok(mut guard) => guard.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
        let mut answers = match self.answers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        answers.pop_front().ok_or(PromptError::Closed)
    }
}

#[async_trait]
impl UserInteraction for ScriptedInteraction {
    async fn select_one(&self, message: &str, choices: &[String]) -> Result<usize, PromptError> {
        match self.next(message)? {
            Answer::Select(index) if index < choices.len() => Ok(index),
            other => Err(PromptError::InvalidChoice {
                input: format!("{:?}", other),
                max: choices.len(),
            }),
        }
    }

    async fn input_text(&self, message: &str, default: &str) -> Result<String, PromptError> {
        match self.next(message)? {
            Answer::Text(text) if text.is_empty() => Ok(default.to_string()),
            Answer::Text(text) => Ok(text),
            other => Err(PromptError::InvalidChoice {
                input: format!("{:?}", other),
                max: 0,
            }),
        }
    }

    async fn confirm(&self, message: &str) -> Result<bool, PromptError> {
        match self.next(message)? {
            Answer::Confirm(yes) => Ok(yes),
            other => Err(PromptError::InvalidChoice {
                input: format!("{:?}", other),
                max: 0,
            }),
        }
    }
}
