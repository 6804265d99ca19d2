// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod credentials;
pub mod error;
pub mod observability;
pub mod render;
pub mod types;
pub mod utils;

// Re-exports
pub use client::{CompletionClient, OpenAi};
pub use client_logger::{ClientLogger, FileLogger};
pub use credentials::CredentialStore;
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use types::*;
