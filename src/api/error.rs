//! API Error Types
//!
//! Errors produced while talking to the HQ API, and the decoding of error
//! bodies into the toast messages the user sees.

use serde::Deserialize;
use thiserror::Error;

/// API error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Transport failure that is neither a timeout nor a refused connection
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    /// The API could not be reached
    #[error("API unavailable")]
    Unavailable,

    /// Session missing or expired
    #[error("Not signed in: {0}")]
    Unauthorized(String),

    /// The API answered with a non-success status
    #[error("API error {status}: {}", .messages.join("; "))]
    Api { status: u16, messages: Vec<String> },

    /// The response body did not match the expected shape
    #[error("Parse error: {0}")]
    Decode(String),

    /// The request could not be built from the given input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// Decode a non-success response.
    ///
    /// When the body carries an `error` array, every entry becomes its own
    /// message. Otherwise the top-level `message` is used, falling back to the
    /// canonical status text.
    pub fn from_response(status: u16, body: &str) -> Self {
        let messages = ErrorBody::parse(body)
            .map(|b| b.into_messages())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| vec![status_text(status).to_string()]);

        if status == 401 {
            return ApiError::Unauthorized(messages.join("; "));
        }

        ApiError::Api { status, messages }
    }

    /// Messages to show, one toast each
    pub fn toasts(&self) -> Vec<String> {
        match self {
            ApiError::Api { messages, .. } => messages.clone(),
            ApiError::Unauthorized(msg) => vec![msg.clone()],
            other => vec![other.to_string()],
        }
    }

    /// Whether a fresh login would fix this error
    pub fn needs_login(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Unavailable
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Error body as the API sends it
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<ErrorField>,
}

/// `error` is either a list of issues or a free-form value
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorField {
    Issues(Vec<Issue>),
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub message: String,
}

impl ErrorBody {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    pub fn into_messages(self) -> Vec<String> {
        match self.error {
            Some(ErrorField::Issues(issues)) => issues
                .into_iter()
                .map(|i| i.message)
                .filter(|m| !m.is_empty())
                .collect(),
            _ => self.message.into_iter().collect(),
        }
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Request failed",
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
