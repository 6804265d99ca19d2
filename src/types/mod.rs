// Public modules
pub mod chat_completion;
pub mod error_response;
pub mod message;
pub mod model;

// Re-exports
pub use chat_completion::{
    ChatCompletionRequest, ChatCompletionResponse, Choice, ChoiceMessage, Usage,
};
pub use error_response::{ErrorDetail, ErrorResponse};
pub use message::{Message, MessageRole};
pub use model::{KnownModel, Model};
