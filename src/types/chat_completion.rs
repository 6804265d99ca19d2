use serde::{Deserialize, Serialize};

use crate::types::{Message, MessageRole, Model};

/// Request body for the `chat/completions` endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatCompletionRequest<'a> {
    /// The model that will complete the conversation.
    pub model: &'a Model,

    /// The full ordered transcript, system prompt included.
    pub messages: &'a [Message],
}

impl<'a> ChatCompletionRequest<'a> {
    /// Create a new request for `model` over `messages`.
    pub fn new(model: &'a Model, messages: &'a [Message]) -> Self {
        Self { model, messages }
    }
}

/// Response body of a successful `chat/completions` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionResponse {
    /// Unique identifier of the completion.
    #[serde(default)]
    pub id: Option<String>,

    /// The model that produced the completion.
    #[serde(default)]
    pub model: Option<String>,

    /// Generated choices; only the first one is used.
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Token accounting, when the endpoint reports it.
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One generated alternative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,

    pub message: ChoiceMessage,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The message carried by a [`Choice`].
///
/// Content is optional on the wire: refusals and tool calls come back with
/// `"content": null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub role: Option<MessageRole>,

    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage for one completion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,

    #[serde(default)]
    pub completion_tokens: u64,

    #[serde(default)]
    pub total_tokens: u64,
}

impl ChatCompletionResponse {
    /// Returns the first choice's text, if it carries any non-blank content.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .filter(|content| !content.trim().is_empty())
    }
}
