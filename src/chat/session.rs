//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the transcript of
//! one conversation, dispatches slash commands and sends everything else to
//! the completion client.
//!
//! A session moves through four states: it awaits a line, dispatches it,
//! calls the service for plain messages, and goes idle on `/exit` or end of
//! input, handing control back to the menu.

use std::any::Any;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};

use futures::FutureExt;

use crate::chat::commands::{ChatCommand, help_text, parse_command};
use crate::chat::config::ChatConfig;
use crate::chat::input::Input;
use crate::client::CompletionClient;
use crate::error::{Error, Result};
use crate::observability::{CHAT_COMMANDS, CHAT_TURN_FAILURES, CHAT_TURNS, TRANSCRIPT_SAVES};
use crate::render::{Renderer, role_label};
use crate::types::Message;
use crate::utils::time;

/// Prompt shown while the session awaits input.
const USER_PROMPT: &str = "You: ";

/// What the caller should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    /// Keep reading input.
    Continue,
    /// Leave the session.
    Exit,
}

/// A chat session that owns the transcript and talks to the completion client.
///
/// The transcript always starts with exactly one system message. Turns are
/// appended in pairs: a user message and the assistant's reply. A turn that
/// fails leaves the transcript as it was before the user message.
pub struct ChatSession<'a, C: CompletionClient + ?Sized> {
    client: &'a C,
    secret: String,
    system_prompt: String,
    transcript_dir: PathBuf,
    messages: Vec<Message>,
}

impl<'a, C: CompletionClient + ?Sized> ChatSession<'a, C> {
    /// Creates a new session that authenticates with `secret`.
    pub fn new(client: &'a C, secret: impl Into<String>, config: &ChatConfig) -> Self {
        Self {
            client,
            secret: secret.into(),
            system_prompt: config.system_prompt.clone(),
            transcript_dir: config.transcript_dir.clone(),
            messages: vec![Message::system(config.system_prompt.clone())],
        }
    }

    /// Returns the full transcript, system message included.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages in the transcript.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Returns the user and assistant messages, in order.
    pub fn history(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| !m.is_system())
    }

    /// Starts a new conversation: the transcript becomes the system message alone.
    pub fn reset(&mut self) {
        self.messages = vec![Message::system(self.system_prompt.clone())];
    }

    /// Sends a user message and returns the assistant's reply.
    ///
    /// On success both messages are appended. On failure the user message is
    /// removed again and the error is returned. A panic inside the client is
    /// caught here and reported as [`Error::Unknown`].
    pub async fn send(&mut self, user_input: &str, renderer: &mut dyn Renderer) -> Result<String> {
        let previous_len = self.messages.len();
        self.messages.push(Message::user(user_input));

        renderer.start_thinking();
        let outcome = AssertUnwindSafe(self.client.complete(&self.secret, &self.messages))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(Error::unknown(panic_message(panic.as_ref()))));
        renderer.finish_thinking();

        match outcome {
            Ok(reply) => {
                self.messages.push(Message::assistant(reply.clone()));
                CHAT_TURNS.click();
                Ok(reply)
            }
            Err(err) => {
                self.messages.truncate(previous_len);
                CHAT_TURN_FAILURES.click();
                Err(err)
            }
        }
    }

    /// Handles one line of user input.
    pub async fn handle_line(&mut self, line: &str, renderer: &mut dyn Renderer) -> SessionControl {
        let line = line.trim();
        if line.is_empty() {
            return SessionControl::Continue;
        }

        if let Some(command) = parse_command(line) {
            CHAT_COMMANDS.click();
            return self.dispatch(command, renderer);
        }

        match self.send(line, renderer).await {
            Ok(reply) => renderer.print_reply(&reply),
            Err(err) => renderer.print_error(&failure_message(&err)),
        }
        SessionControl::Continue
    }

    /// Runs the session until `/exit` or end of input.
    ///
    /// # Errors
    ///
    /// Only failures to read input are returned; every other failure is
    /// rendered and the loop continues.
    pub async fn run(&mut self, input: &mut dyn Input, renderer: &mut dyn Renderer) -> Result<()> {
        renderer.clear_screen();
        renderer.print_chat_intro();

        while let Some(line) = input.read_line(USER_PROMPT)? {
            if self.handle_line(&line, renderer).await == SessionControl::Exit {
                break;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, command: ChatCommand, renderer: &mut dyn Renderer) -> SessionControl {
        match command {
            ChatCommand::Exit => return SessionControl::Exit,
            ChatCommand::Clear => renderer.clear_screen(),
            ChatCommand::New => {
                self.reset();
                renderer.print_info("New chat started.");
            }
            ChatCommand::History => renderer.print_history(&self.messages),
            ChatCommand::Save => match self.save_transcript() {
                Ok(path) => {
                    renderer.print_info(&format!("Saved as {}", saved_location(&path).display()))
                }
                Err(err) => renderer.print_error(&format!("Failed to save chat: {err}")),
            },
            ChatCommand::Help => renderer.print_help(help_text()),
        }
        SessionControl::Continue
    }

    /// Saves the transcript to a new timestamped file in the transcript
    /// directory and returns its path.
    pub fn save_transcript(&self) -> Result<PathBuf> {
        let name = transcript_file_name(&time::file_stamp(time::now()));
        let path = self.transcript_dir.join(name);
        self.save_transcript_to(&path)?;
        Ok(path)
    }

    /// Writes one `<Label>: <content>` line per non-system message to `path`.
    ///
    /// An existing file is never replaced; saving onto one fails with
    /// [`Error::Io`] of kind `AlreadyExists`.
    pub fn save_transcript_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path.as_ref())
            .map_err(|err| Error::io("failed to create transcript file", err))?;
        let mut writer = BufWriter::new(file);
        for message in self.history() {
            writeln!(writer, "{}: {}", role_label(message.role), message.content)
                .map_err(|err| Error::io("failed to write transcript", err))?;
        }
        writer
            .flush()
            .map_err(|err| Error::io("failed to write transcript", err))?;
        TRANSCRIPT_SAVES.click();
        Ok(())
    }
}

/// Returns the path as reported to the user; a leading `./` is dropped.
fn saved_location(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}

/// Returns `delulu_chat_<stamp>.txt`.
pub fn transcript_file_name(stamp: &str) -> String {
    format!("delulu_chat_{stamp}.txt")
}

/// Maps a failed turn to the message shown to the user.
pub fn failure_message(err: &Error) -> String {
    match err {
        Error::Authentication { .. } => {
            "Authentication failed. Please verify your API key.".to_string()
        }
        Error::RateLimit {
            retry_after: Some(secs),
            ..
        } => format!("Rate limit exceeded. Please try again in {secs} seconds."),
        Error::RateLimit { .. } => "Rate limit exceeded. Please try again shortly.".to_string(),
        Error::Connection { .. } => {
            "Network error while contacting the completion service.".to_string()
        }
        Error::Api { .. } => format!("Service error: {err}"),
        Error::EmptyResponse { .. } => "Model returned an empty response.".to_string(),
        other => format!("Unexpected error: {other}"),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("completion client panicked: {message}")
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("completion client panicked: {message}")
    } else {
        "completion client panicked".to_string()
    }
}
