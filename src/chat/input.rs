//! Terminal input for the chat application.
//!
//! The loops read through the [`Input`] trait so they can be driven by a
//! script in tests. [`TerminalInput`] reads lines with `rustyline` and the
//! API key with `rpassword`, which does not echo.

use std::io;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::error::{Error, Result};

/// A source of user input.
pub trait Input {
    /// Reads one line after showing `prompt`.
    ///
    /// Returns `Ok(None)` at end of input. An interrupted read (Ctrl+C)
    /// yields an empty line.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Reads a secret without echoing it.
    fn read_secret(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Waits for the user to acknowledge a message.
    fn pause(&mut self, prompt: &str) -> Result<()> {
        self.read_line(prompt).map(|_| ())
    }
}

/// Interactive terminal input with line editing and history.
pub struct TerminalInput {
    editor: DefaultEditor,
}

impl TerminalInput {
    /// Opens the terminal for line editing.
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(readline_error)?;
        Ok(Self { editor })
    }
}

impl Input for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(readline_error(err)),
        }
    }

    fn read_secret(&mut self, prompt: &str) -> Result<Option<String>> {
        match rpassword::prompt_password(prompt) {
            Ok(secret) => Ok(Some(secret)),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(err) => Err(Error::io("failed to read API key", err)),
        }
    }
}

fn readline_error(err: ReadlineError) -> Error {
    match err {
        ReadlineError::Io(err) => Error::io("terminal I/O failed", err),
        other => Error::input(other.to_string()),
    }
}
