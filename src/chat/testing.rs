//! Test doubles for driving the chat loops headless.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::chat::Input;
use crate::client::CompletionClient;
use crate::error::{Error, Result};
use crate::render::Renderer;
use crate::types::Message;

/// Replays queued lines; runs out as end of input.
#[derive(Default)]
pub(crate) struct ScriptedInput {
    lines: VecDeque<String>,
    secrets: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_secrets(mut self, secrets: &[&str]) -> Self {
        self.secrets = secrets.iter().map(|s| s.to_string()).collect();
        self
    }
}

impl Input for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }

    fn read_secret(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.secrets.pop_front())
    }
}

/// Everything a [`RecordingRenderer`] was asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Shown {
    ClearScreen,
    Banner(bool),
    Menu,
    ChatIntro,
    Reply(String),
    History(Vec<Message>),
    Help,
    About(String),
    Thinking,
    DoneThinking,
    Error(String),
    Info(String),
}

#[derive(Default)]
pub(crate) struct RecordingRenderer {
    pub shown: Vec<Shown>,
}

impl RecordingRenderer {
    pub fn errors(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Error(e) => Some(e.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn infos(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Info(i) => Some(i.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Shown) -> usize {
        self.shown.iter().filter(|s| *s == wanted).count()
    }
}

impl Renderer for RecordingRenderer {
    fn clear_screen(&mut self) {
        self.shown.push(Shown::ClearScreen);
    }

    fn print_banner(&mut self, credential_configured: bool) {
        self.shown.push(Shown::Banner(credential_configured));
    }

    fn print_menu(&mut self) {
        self.shown.push(Shown::Menu);
    }

    fn print_chat_intro(&mut self) {
        self.shown.push(Shown::ChatIntro);
    }

    fn print_reply(&mut self, text: &str) {
        self.shown.push(Shown::Reply(text.to_string()));
    }

    fn print_history(&mut self, messages: &[Message]) {
        let visible = messages.iter().filter(|m| !m.is_system()).cloned().collect();
        self.shown.push(Shown::History(visible));
    }

    fn print_help(&mut self, _: &str) {
        self.shown.push(Shown::Help);
    }

    fn print_about(&mut self, version: &str) {
        self.shown.push(Shown::About(version.to_string()));
    }

    fn start_thinking(&mut self) {
        self.shown.push(Shown::Thinking);
    }

    fn finish_thinking(&mut self) {
        self.shown.push(Shown::DoneThinking);
    }

    fn print_error(&mut self, error: &str) {
        self.shown.push(Shown::Error(error.to_string()));
    }

    fn print_info(&mut self, info: &str) {
        self.shown.push(Shown::Info(info.to_string()));
    }
}

/// Answers from a queue and records every call.
#[derive(Default)]
pub(crate) struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String>>>,
    pub calls: Mutex<Vec<(String, Vec<Message>)>>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, secret: &str, messages: &[Message]) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((secret.to_string(), messages.to_vec()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::unknown("no scripted reply left")))
    }
}
