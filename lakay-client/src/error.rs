//! Client error types

use http::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the request with a message of its own
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status
    #[error("Server error ({status}): {body}")]
    Status { status: u16, body: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Message supplied by the backend, if the failure carried one
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } | ClientError::Status { status, .. } => Some(*status),
            ClientError::NotFound(_) => Some(StatusCode::NOT_FOUND.as_u16()),
            ClientError::Validation(_) => Some(StatusCode::BAD_REQUEST.as_u16()),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Error body returned by the backend (`{ "message": "..." }`)
#[derive(serde::Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Map a non-success response to a `ClientError`
pub(crate) fn error_from_status(status: StatusCode, body: &[u8]) -> ClientError {
    let text = String::from_utf8_lossy(body).to_string();

    // 后端提供了错误信息时直接透传
    if let Ok(api_err) = serde_json::from_slice::<ApiErrorResponse>(body)
        && let Some(message) = api_err.message.or(api_err.error)
    {
        return ClientError::Api {
            status: status.as_u16(),
            message,
        };
    }

    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound(text),
        StatusCode::BAD_REQUEST => ClientError::Validation(text),
        _ => ClientError::Status {
            status: status.as_u16(),
            body: text,
        },
    }
}

/// Decode a success body; an empty body decodes as JSON `null`
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> ClientResult<T> {
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        body
    };
    serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}
