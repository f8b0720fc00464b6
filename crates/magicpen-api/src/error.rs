//! API error types

use thiserror::Error;

/// Message used when a failed response carries no `message` field.
pub const FALLBACK_ERROR_MESSAGE: &str = "Request failed";

/// The one failure kind surfaced by the client.
///
/// Covers non-2xx responses, transport failures and bodies that are not
/// valid JSON. `Display` yields the human-readable message only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{message}")]
    RequestFailed {
        /// HTTP status, when a response was received
        status: Option<u16>,
        message: String,
    },
}

impl ApiError {
    pub fn request_failed(message: impl Into<String>) -> Self {
        ApiError::RequestFailed {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        ApiError::RequestFailed {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Build the error for a non-success response from its decoded body.
    pub fn from_response(status: u16, body: &serde_json::Value) -> Self {
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or(FALLBACK_ERROR_MESSAGE);

        Self::with_status(status, message)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::RequestFailed { message, .. } => message,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::RequestFailed {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::request_failed(e.to_string())
    }
}
