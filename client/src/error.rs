//! Error handling for the Startup Planner client
//!
//! Request failures never reach the user as errors: orchestrators turn
//! them into notifications carrying the server's message when it sent one.

use serde_json::Value;
use shared::{Notification, ValidationFailure};
use thiserror::Error;

/// Description used when the server gave no usable message
pub const GENERIC_FAILURE: &str = "Please try again later.";

/// Failure of a single API request
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unauthorized: {}", .message.as_deref().unwrap_or("no active session"))]
    Unauthorized { message: Option<String> },

    #[error("Request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build the error for a non-2xx response from its status and body
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| extract_message(&v))
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty() && !trimmed.starts_with('{') && !trimmed.starts_with('['))
                    .then(|| trimmed.to_string())
            });

        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Status { status, message }
        }
    }

    /// Message supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message } | ApiError::Status { message, .. } => {
                message.as_deref()
            }
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Destructive toast for a failed operation
    pub fn to_notification(&self, title: &str) -> Notification {
        Notification::failure(title, self.server_message().unwrap_or(GENERIC_FAILURE))
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks at `message`, `error` and `detail` (recursing into nested
/// objects), then falls back to the first string found anywhere, which
/// covers field-keyed validation bodies like `{"name": ["required"]}`.
pub fn extract_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => {
            for key in ["message", "error", "detail"] {
                if let Some(found) = map.get(key).and_then(extract_message) {
                    return Some(found);
                }
            }
            map.values().find_map(extract_message)
        }
        Value::Array(items) => items.iter().find_map(extract_message),
        _ => None,
    }
}

/// Result type alias for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Application-level errors surfaced at the binary edge
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An operation finished with a failure toast
    #[error("{0}")]
    Rejected(Notification),
}

impl AppError {
    pub fn no_business(id: i64) -> Self {
        AppError::InvalidInput(format!("No business with id {}", id))
    }
}

impl From<Notification> for AppError {
    fn from(note: Notification) -> Self {
        AppError::Rejected(note)
    }
}

pub type AppResult<T> = Result<T, AppError>;
