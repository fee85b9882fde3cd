//! Console prompts with closed answer domains.
//!
//! Typing `end` at any prompt yields [`Reply::End`]; callers check for it and
//! hand it up unchanged until the session returns.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

const END: &str = "end";
const INVALID: &str = "\nInvalid input. Please enter a valid option:\n>";

/// An answer, or the user asking to stop everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Answer(T),
    End,
}

impl<T> Reply<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        match self {
            Reply::Answer(v) => Reply::Answer(f(v)),
            Reply::End => Reply::End,
        }
    }
}

/// Asks the user to pick from a fixed set of lower-case tokens.
pub trait Prompter {
    /// Returns one or more tokens from `domain`, re-asking until the input is valid.
    fn choose(&mut self, message: &str, domain: &[&str]) -> Result<Reply<Vec<String>>>;

    /// Yes/no question; anything but a single "y" counts as no.
    fn confirm(&mut self, message: &str) -> Result<Reply<bool>> {
        Ok(self
            .choose(message, &["y", "n"])?
            .map(|tokens| tokens == ["y"]))
    }
}

/// Shows rendered text to the user.
pub trait Screen {
    fn show(&mut self, text: &str) -> Result<()>;
}

/// [`Prompter`] and [`Screen`] over a line reader and a writer, usually stdin/stdout.
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn choose(&mut self, message: &str, domain: &[&str]) -> Result<Reply<Vec<String>>> {
        let mut message = message;
        loop {
            write!(self.output, "{message}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("Input closed");
                return Ok(Reply::End);
            }

            if let Some(tokens) = parse_selection(&line, domain) {
                return Ok(tokens);
            }
            debug!(input = line.trim(), "Rejected selection");
            message = INVALID;
        }
    }
}

impl<R: BufRead, W: Write> Screen for ConsolePrompter<R, W> {
    fn show(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

/// Interprets one line of input against `domain`.
///
/// Returns `None` when the line is not a valid selection.
pub fn parse_selection(line: &str, domain: &[&str]) -> Option<Reply<Vec<String>>> {
    let input = line.trim().to_lowercase();
    if input == END {
        return Some(Reply::End);
    }

    let tokens: Vec<String> = if input.contains(',') {
        input.split(',').map(|t| t.trim().to_string()).collect()
    } else {
        vec![input]
    };

    if tokens.iter().all(|t| domain.contains(&t.as_str())) {
        Some(Reply::Answer(tokens))
    } else {
        None
    }
}
