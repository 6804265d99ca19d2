//! Interactive terminal chat with Delulu Bot.
//!
//! This module provides the menu and chat loops built on top of the
//! completion client. It supports:
//!
//! - A main menu for running a chat, storing the API key and the about screen
//! - Slash commands for session control
//! - Saving transcripts to timestamped files
//! - Configurable model, system prompt and endpoint
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`menu`]: The outer loop and the credential workflow
//! - [`session`]: Core chat session management and API interaction
//! - [`commands`]: Slash command parsing
//! - [`input`]: Line and secret input
//!
//! Output goes through the [`Renderer`] trait and input through [`Input`], so
//! both loops can run headless.

mod commands;
mod config;
mod input;
mod menu;
mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::client::DEFAULT_BASE_URL;
pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig, DEFAULT_SYSTEM_PROMPT};
pub use input::{Input, TerminalInput};
pub use menu::{Menu, MenuChoice};
pub use session::{ChatSession, SessionControl, failure_message, transcript_file_name};
