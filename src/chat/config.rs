//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior. Every option is optional.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::DEFAULT_BASE_URL;
use crate::credentials::DEFAULT_CREDENTIAL_FILE;
use crate::types::Model;

/// System prompt inserted at the start of every conversation.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Delulu Bot.";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u32 = 60;

/// Command-line arguments for the delulu-bot tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: gpt-4o-mini)", "MODEL")]
    pub model: Option<String>,

    /// System prompt to set context for the conversation.
    #[arrrg(optional, "System prompt for the conversation", "PROMPT")]
    pub system: Option<String>,

    /// File holding the API key.
    #[arrrg(optional, "File holding the API key (default: .delulu_config)", "PATH")]
    pub credential_file: Option<String>,

    /// Endpoint base URL.
    #[arrrg(optional, "Endpoint base URL (default: https://api.openai.com/v1/)", "URL")]
    pub base_url: Option<String>,

    /// Request timeout.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout_secs: Option<u32>,

    /// Directory that receives saved transcripts.
    #[arrrg(optional, "Directory for /save transcripts (default: .)", "DIR")]
    pub transcript_dir: Option<String>,

    /// Append a JSON line per request/response/error to this file.
    #[arrrg(optional, "Log requests and responses as JSON lines", "PATH")]
    pub log_file: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for the chat application.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// The model to use for generating responses.
    pub model: Model,

    /// System prompt that opens every conversation.
    pub system_prompt: String,

    /// File holding the API key.
    pub credential_path: PathBuf,

    /// Endpoint base URL.
    pub base_url: String,

    /// Request timeout.
    pub timeout: Duration,

    /// Directory that receives saved transcripts.
    pub transcript_dir: PathBuf,

    /// Optional request log.
    pub log_file: Option<PathBuf>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: gpt-4o-mini
    /// - System prompt: "You are Delulu Bot."
    /// - Credential file: .delulu_config
    /// - Timeout: 60 seconds
    /// - Transcripts: the working directory
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            model: Model::default(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            credential_path: PathBuf::from(DEFAULT_CREDENTIAL_FILE),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS.into()),
            transcript_dir: PathBuf::from("."),
            log_file: None,
            use_color: true,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Sets the credential file.
    pub fn with_credential_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credential_path = path.into();
        self
    }

    /// Sets the endpoint base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the transcript directory.
    pub fn with_transcript_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.transcript_dir = dir.into();
        self
    }

    /// Sets the request log file.
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let defaults = ChatConfig::new();
        ChatConfig {
            model: args.model.map(Model::from).unwrap_or(defaults.model),
            system_prompt: args
                .system
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.system_prompt),
            credential_path: args
                .credential_file
                .map(PathBuf::from)
                .unwrap_or(defaults.credential_path),
            base_url: args.base_url.unwrap_or(defaults.base_url),
            timeout: args
                .timeout_secs
                .filter(|secs| *secs > 0)
                .map(|secs| Duration::from_secs(secs.into()))
                .unwrap_or(defaults.timeout),
            transcript_dir: args
                .transcript_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.transcript_dir),
            log_file: args.log_file.map(PathBuf::from),
            use_color: !args.no_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnownModel;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.model, Model::Known(KnownModel::Gpt4oMini));
        assert_eq!(config.system_prompt, "You are Delulu Bot.");
        assert_eq!(config.credential_path, PathBuf::from(".delulu_config"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.transcript_dir, PathBuf::from("."));
        assert!(config.log_file.is_none());
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_defaults() {
        let config = ChatConfig::from(ChatArgs::default());
        assert_eq!(config, ChatConfig::new());
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            model: Some("gpt-4o".to_string()),
            system: Some("You are terse.".to_string()),
            credential_file: Some("/tmp/key".to_string()),
            base_url: Some("http://localhost:11434/v1".to_string()),
            timeout_secs: Some(5),
            transcript_dir: Some("chats".to_string()),
            log_file: Some("delulu.log".to_string()),
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.model, Model::Known(KnownModel::Gpt4o));
        assert_eq!(config.system_prompt, "You are terse.");
        assert_eq!(config.credential_path, PathBuf::from("/tmp/key"));
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.transcript_dir, PathBuf::from("chats"));
        assert_eq!(config.log_file, Some(PathBuf::from("delulu.log")));
        assert!(!config.use_color);
    }

    #[test]
    fn zero_timeout_and_blank_system_fall_back() {
        let args = ChatArgs {
            system: Some("   ".to_string()),
            timeout_secs: Some(0),
            ..ChatArgs::default()
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_model(Model::from("llama3"))
            .with_system_prompt("Test prompt")
            .with_credential_path("key.txt")
            .with_base_url("http://localhost:8080/v1/")
            .with_timeout(Duration::from_secs(10))
            .with_transcript_dir("out")
            .with_log_file(Some(PathBuf::from("log.jsonl")))
            .without_color();

        assert_eq!(config.model, Model::Custom("llama3".to_string()));
        assert_eq!(config.system_prompt, "Test prompt");
        assert_eq!(config.credential_path, PathBuf::from("key.txt"));
        assert_eq!(config.base_url, "http://localhost:8080/v1/");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.transcript_dir, PathBuf::from("out"));
        assert_eq!(config.log_file, Some(PathBuf::from("log.jsonl")));
        assert!(!config.use_color);
    }
}
