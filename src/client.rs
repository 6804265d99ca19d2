use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response};
use url::Url;

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability::{
    CLIENT_EMPTY_RESPONSES, CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS,
};
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ErrorResponse, Message, Model};

/// Default endpoint base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
const COMPLETIONS_PATH: &str = "chat/completions";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Sends a transcript to a completion endpoint and returns the reply text.
///
/// Implementations must report failures with the categories the chat session
/// distinguishes: [`Error::Authentication`], [`Error::RateLimit`],
/// [`Error::Connection`], [`Error::Api`] and [`Error::EmptyResponse`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Completes `messages` using `secret` as the bearer credential.
    async fn complete(&self, secret: &str, messages: &[Message]) -> Result<String>;
}

/// Client for OpenAI-compatible `chat/completions` endpoints.
#[derive(Clone)]
pub struct OpenAi {
    client: ReqwestClient,
    base_url: Url,
    model: Model,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl OpenAi {
    /// Create a new client for the default endpoint and model.
    pub fn new() -> Result<Self> {
        Self::with_options(None, None, None)
    }

    /// Create a new client with custom settings.
    ///
    /// `base_url` must be absolute; a missing trailing slash is added so the
    /// completions path is joined beneath it.
    pub fn with_options(
        base_url: Option<String>,
        model: Option<Model>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            model: model.unwrap_or_default(),
            timeout,
            logger: None,
        })
    }

    /// Attach a logger that observes every request.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Returns the model sent with every request.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Returns the endpoint base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self, secret: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let mut bearer = HeaderValue::from_str(&format!("Bearer {secret}")).map_err(|_| {
            Error::authentication("API key contains characters that cannot be sent in a header")
        })?;
        bearer.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, bearer);
        Ok(headers)
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|val| val.to_str().ok())
            .map(String::from);

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.trim().parse::<u64>().ok());

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::connection(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let parsed_error = serde_json::from_str::<ErrorResponse>(&error_body).ok();
        let error_type = parsed_error
            .as_ref()
            .and_then(|e| e.error_type())
            .map(String::from);
        let error_message = parsed_error
            .as_ref()
            .and_then(|e| e.message())
            .map(String::from)
            .unwrap_or_else(|| {
                if error_body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                } else {
                    error_body.clone()
                }
            });

        match status_code {
            401 | 403 => Error::authentication(error_message),
            429 => Error::rate_limit(error_message, retry_after),
            _ => Error::api(status_code, error_type, error_message, request_id),
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::connection(
                format!(
                    "Request timed out after {} seconds: {}",
                    self.timeout.as_secs_f64(),
                    e
                ),
                Some(Box::new(e)),
            )
        } else if e.is_builder() {
            Error::http_client(format!("Invalid request: {}", e), Some(Box::new(e)))
        } else {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        }
    }

    /// Send one request and parse the response body.
    async fn send(
        &self,
        secret: &str,
        request: &ChatCompletionRequest<'_>,
    ) -> Result<ChatCompletionResponse> {
        let url = self.base_url.join(COMPLETIONS_PATH)?;

        let response = self
            .client
            .post(url)
            .headers(self.default_headers(secret)?)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        serde_json::from_str::<ChatCompletionResponse>(&body).map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAi {
    async fn complete(&self, secret: &str, messages: &[Message]) -> Result<String> {
        let request = ChatCompletionRequest::new(&self.model, messages);
        if let Some(logger) = &self.logger {
            logger.log_request(&request);
        }

        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.send(secret, &request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                CLIENT_REQUEST_ERRORS.click();
                if let Some(logger) = &self.logger {
                    logger.log_error(&err);
                }
                return Err(err);
            }
        };
        if let Some(logger) = &self.logger {
            logger.log_response(&response);
        }

        match response.first_content() {
            Some(content) => Ok(content.to_string()),
            None => {
                CLIENT_EMPTY_RESPONSES.click();
                Err(Error::empty_response("Model returned an empty response."))
            }
        }
    }
}

impl fmt::Debug for OpenAi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAi")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}
