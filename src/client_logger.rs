//! Logging trait for completion client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows callers to
//! capture every request, response and failure passing through the
//! [`OpenAi`](crate::OpenAi) client, plus [`FileLogger`], which appends one
//! JSON record per event to a file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde_json::{Value, json};

use crate::error::{Error, Result};
use crate::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::utils::time;

/// A trait for logging completion client operations.
///
/// Implementations must not fail the request they observe; errors while
/// logging are swallowed by the implementation.
pub trait ClientLogger: Send + Sync {
    /// Log a request just before it is sent.
    fn log_request(&self, request: &ChatCompletionRequest<'_>);

    /// Log a successful response.
    fn log_response(&self, response: &ChatCompletionResponse);

    /// Log a failed request.
    fn log_error(&self, error: &Error);
}

/// Appends JSON lines to a log file.
///
/// Each line has an RFC 3339 `ts`, an `event` of `request`, `response` or
/// `error`, and the event payload. The credential is never part of a record.
pub struct FileLogger {
    file: Mutex<File>,
}

impl FileLogger {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .map_err(|err| Error::io("failed to open log file", err))?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    fn write_record(&self, event: &str, payload: Value) {
        let record = json!({
            "ts": time::rfc3339(time::now()),
            "event": event,
            "payload": payload,
        });
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{record}");
            let _ = file.flush();
        }
    }
}

impl ClientLogger for FileLogger {
    fn log_request(&self, request: &ChatCompletionRequest<'_>) {
        let payload = serde_json::to_value(request).unwrap_or(Value::Null);
        self.write_record("request", payload);
    }

    fn log_response(&self, response: &ChatCompletionResponse) {
        let payload = serde_json::to_value(response).unwrap_or(Value::Null);
        self.write_record("response", payload);
    }

    fn log_error(&self, error: &Error) {
        self.write_record("error", json!({ "message": error.to_string() }));
    }
}
