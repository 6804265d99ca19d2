//! Slash command parsing for the chat application.
//!
//! This module handles parsing of the special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the endpoint.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    /// Leave the chat and return to the main menu.
    Exit,

    /// Clear the screen; the conversation is kept.
    Clear,

    /// Start a new conversation.
    New,

    /// Show the conversation so far.
    History,

    /// Save the conversation to a timestamped file.
    Save,

    /// Display help information.
    Help,
}

/// Parses user input for slash commands.
///
/// Matching ignores surrounding whitespace and case, and the whole line must
/// be the command. Returns `None` for anything else, including unknown
/// slash-prefixed text, which is sent to the endpoint as a message.
///
/// # Examples
///
/// ```
/// # use delulu::chat::{ChatCommand, parse_command};
/// assert_eq!(parse_command("/exit"), Some(ChatCommand::Exit));
/// assert_eq!(parse_command(" /HISTORY "), Some(ChatCommand::History));
/// assert!(parse_command("Hello, Delulu!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let command = input.trim().to_lowercase();

    let result = match command.as_str() {
        "/exit" => ChatCommand::Exit,
        "/clear" => ChatCommand::Clear,
        "/new" => ChatCommand::New,
        "/history" => ChatCommand::History,
        "/save" => ChatCommand::Save,
        "/help" => ChatCommand::Help,
        _ => return None,
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available Commands:
/clear    - Clear screen
/new      - Start new chat
/history  - Show chat history
/save     - Save chat to file
/help     - Show commands
/exit     - Return to menu"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_commands() {
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse_command("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse_command("/new"), Some(ChatCommand::New));
        assert_eq!(parse_command("/history"), Some(ChatCommand::History));
        assert_eq!(parse_command("/save"), Some(ChatCommand::Save));
        assert_eq!(parse_command("/help"), Some(ChatCommand::Help));
    }

    #[test]
    fn parse_ignores_case_and_padding() {
        assert_eq!(parse_command("  /EXIT  "), Some(ChatCommand::Exit));
        assert_eq!(parse_command("/New"), Some(ChatCommand::New));
    }

    #[test]
    fn unknown_or_extended_commands_are_messages() {
        assert_eq!(parse_command("/quit"), None);
        assert_eq!(parse_command("/save notes.txt"), None);
        assert_eq!(parse_command("/"), None);
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("Hello, Delulu!"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
    }

    #[test]
    fn help_text_lists_every_command() {
        let help = help_text();
        for command in ["/clear", "/new", "/history", "/save", "/help", "/exit"] {
            assert!(help.contains(command), "missing {command}");
            assert!(parse_command(command).is_some());
        }
    }
}
