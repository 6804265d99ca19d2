//! Interactive terminal chat with Delulu Bot.
//!
//! This binary shows a menu for running a chat, storing the API key and
//! reading the about screen, and talks to an OpenAI-compatible
//! `chat/completions` endpoint.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! delulu-bot
//!
//! # Specify a model
//! delulu-bot --model gpt-4o
//!
//! # Point at a local OpenAI-compatible server
//! delulu-bot --base-url http://localhost:11434/v1
//!
//! # Disable colors (useful for piping output)
//! delulu-bot --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/clear` - Clear the screen
//! - `/new` - Start a new chat
//! - `/history` - Show the conversation
//! - `/save` - Save the conversation to a file
//! - `/help` - Show available commands
//! - `/exit` - Return to the menu

use std::sync::Arc;

use arrrg::CommandLine;
use biometrics::Collector;

use delulu::chat::{ChatArgs, ChatConfig, Menu, PlainTextRenderer, TerminalInput};
use delulu::{FileLogger, OpenAi, register_biometrics};

/// Main entry point for the delulu-bot application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("delulu-bot [OPTIONS]");
    let config = ChatConfig::from(args);

    let collector = Collector::new();
    register_biometrics(&collector);

    let mut client = OpenAi::with_options(
        Some(config.base_url.clone()),
        Some(config.model.clone()),
        Some(config.timeout),
    )?;
    if let Some(path) = &config.log_file {
        client = client.with_logger(Arc::new(FileLogger::open(path)?));
    }

    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut input = TerminalInput::new()?;
    let menu = Menu::new(client, config);
    menu.run(&mut input, &mut renderer).await?;
    Ok(())
}
