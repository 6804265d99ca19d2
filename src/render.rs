//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction so the menu and
//! session loops never write to the terminal directly. The default
//! implementation writes ANSI-styled text; tests substitute a recorder.

use std::io::{self, Stdout, Write};

use crate::types::{Message, MessageRole};

/// ANSI escape code for bold text.
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text (used for the thinking indicator).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the banner and notices).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for yellow text (used for the user label).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for green text (used for the assistant label).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for magenta text (used for headings).
const ANSI_MAGENTA: &str = "\x1b[35m";

/// Clears the screen and moves the cursor home.
const ANSI_CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Returns to column zero and erases the line.
const ANSI_CLEAR_LINE: &str = "\r\x1b[2K";

const BANNER: &str = r"    ____       __      __         ____        __
   / __ \___  / /_  __/ /_  __   / __ )____  / /_
  / / / / _ \/ / / / / / / / /  / __  / __ \/ __/
 / /_/ /  __/ / /_/ / / /_/ /  / /_/ / /_/ / /_
/_____/\___/_/\__,_/_/\__,_/  /_____/\____/\__/";

/// Label shown for user turns in history and saved transcripts.
pub const USER_LABEL: &str = "You";

/// Label shown for assistant turns in history and saved transcripts.
pub const ASSISTANT_LABEL: &str = "Delulu";

/// Returns the display label for `role`.
pub fn role_label(role: MessageRole) -> &'static str {
    match role {
        MessageRole::System => "System",
        MessageRole::User => USER_LABEL,
        MessageRole::Assistant => ASSISTANT_LABEL,
    }
}

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
/// - Recording renderers for headless tests
pub trait Renderer: Send {
    /// Clear the whole screen.
    fn clear_screen(&mut self);

    /// Print the banner and whether a credential is configured.
    fn print_banner(&mut self, credential_configured: bool);

    /// Print the main menu options.
    fn print_menu(&mut self);

    /// Print the chat-mode header listing the slash commands.
    fn print_chat_intro(&mut self);

    /// Print the assistant's reply.
    fn print_reply(&mut self, text: &str);

    /// Print the non-system messages of a transcript, in order.
    fn print_history(&mut self, messages: &[Message]);

    /// Print the command help text.
    fn print_help(&mut self, help: &str);

    /// Print the about screen.
    fn print_about(&mut self, version: &str);

    /// Called just before a completion request is sent.
    fn start_thinking(&mut self);

    /// Called when the completion request finishes, successfully or not.
    fn finish_thinking(&mut self);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);
}

/// Plain text renderer with optional ANSI styling.
///
/// Writes to stdout unless built with [`PlainTextRenderer::with_writer`].
pub struct PlainTextRenderer<W: Write + Send = Stdout> {
    out: W,
    use_color: bool,
    thinking: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(io::stdout(), use_color)
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> PlainTextRenderer<W> {
    /// Creates a renderer writing to `out`.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            thinking: false,
        }
    }

    /// Consumes the renderer and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn style(&self, codes: &str, text: &str) -> String {
        if self.use_color {
            format!("{codes}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    fn role_prefix(&self, role: MessageRole) -> String {
        let label = format!("{}:", role_label(role));
        match role {
            MessageRole::User => self.style(&format!("{ANSI_BOLD}{ANSI_YELLOW}"), &label),
            MessageRole::Assistant => self.style(&format!("{ANSI_BOLD}{ANSI_GREEN}"), &label),
            MessageRole::System => self.style(ANSI_DIM, &label),
        }
    }
}

impl<W: Write + Send> Renderer for PlainTextRenderer<W> {
    fn clear_screen(&mut self) {
        if self.use_color {
            let _ = write!(self.out, "{ANSI_CLEAR_SCREEN}");
            let _ = self.out.flush();
        } else {
            self.line("");
        }
    }

    fn print_banner(&mut self, credential_configured: bool) {
        let banner = self.style(&format!("{ANSI_BOLD}{ANSI_CYAN}"), BANNER);
        let badge = if credential_configured {
            self.style(ANSI_GREEN, "● API Configured")
        } else {
            self.style(ANSI_RED, "● API Not Set")
        };
        self.line(&banner);
        self.line("");
        self.line(&badge);
        self.line("");
    }

    fn print_menu(&mut self) {
        let title = self.style(&format!("{ANSI_BOLD}{ANSI_MAGENTA}"), "Main Menu");
        self.line(&title);
        self.line("  [1] Run Chat");
        self.line("  [2] Set / Update API Key");
        self.line("  [3] About");
        self.line("  [4] Exit");
        self.line("");
    }

    fn print_chat_intro(&mut self) {
        let title = self.style(&format!("{ANSI_BOLD}{ANSI_GREEN}"), "Chat Mode");
        self.line(&title);
        self.line("Commands: /clear  /new  /save  /history  /help  /exit");
        self.line("");
    }

    fn print_reply(&mut self, text: &str) {
        let prefix = self.role_prefix(MessageRole::Assistant);
        self.line(&prefix);
        self.line(text);
        self.line("");
    }

    fn print_history(&mut self, messages: &[Message]) {
        let title = self.style(&format!("{ANSI_BOLD}{ANSI_MAGENTA}"), "Chat History");
        self.line("");
        self.line(&title);
        self.line("");
        for message in messages.iter().filter(|m| !m.is_system()) {
            let prefix = self.role_prefix(message.role);
            self.line(&format!("{prefix} {}", message.content));
        }
        self.line("");
    }

    fn print_help(&mut self, help: &str) {
        for (idx, line) in help.lines().enumerate() {
            if idx == 0 {
                let heading = self.style(&format!("{ANSI_BOLD}{ANSI_CYAN}"), line);
                self.line(&heading);
            } else {
                self.line(line);
            }
        }
    }

    fn print_about(&mut self, version: &str) {
        let title = self.style(
            &format!("{ANSI_BOLD}{ANSI_CYAN}"),
            &format!("Delulu Bot v{version}"),
        );
        self.line(&title);
        self.line("");
        self.line("Terminal AI chatbot");
        self.line("Talks to any OpenAI-compatible chat completions endpoint");
        self.line("");
        self.line("Built with Rust");
    }

    fn start_thinking(&mut self) {
        self.thinking = true;
        if self.use_color {
            let _ = write!(self.out, "{ANSI_DIM}Delulu is thinking...{ANSI_RESET}");
            let _ = self.out.flush();
        } else {
            self.line("Delulu is thinking...");
        }
    }

    fn finish_thinking(&mut self) {
        if self.thinking && self.use_color {
            let _ = write!(self.out, "{ANSI_CLEAR_LINE}");
            let _ = self.out.flush();
        }
        self.thinking = false;
    }

    fn print_error(&mut self, error: &str) {
        let text = self.style(&format!("{ANSI_BOLD}{ANSI_RED}"), error);
        self.line(&text);
    }

    fn print_info(&mut self, info: &str) {
        let text = self.style(&format!("{ANSI_BOLD}{ANSI_CYAN}"), info);
        self.line(&text);
    }
}
