use serde::{Deserialize, Serialize};

/// Represents an error body returned by the completion endpoint.
///
/// OpenAI-compatible servers wrap the details in an `error` object; every
/// field is optional because proxies and self-hosted servers vary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The error object containing specific error details.
    pub error: Option<ErrorDetail>,
}

/// Details of an endpoint error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable error message.
    #[serde(default)]
    pub message: Option<String>,

    /// Error type string, e.g. `invalid_request_error`.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,

    /// Parameter that caused the error.
    #[serde(default)]
    pub param: Option<String>,

    /// Machine-readable code; a string or a number depending on the server.
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Returns the error message, if any.
    pub fn message(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.message.as_deref())
    }

    /// Returns the error type, if any.
    pub fn error_type(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.error_type.as_deref())
    }
}
