//! DVB client error types
//!
//! Every failure is one variant of [`DvbError`], so callers can match on the
//! kind of failure (validation, transport, API, decode) and decide on retries
//! themselves. The client never retries.

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when calling the DVB API
#[derive(Debug, Error)]
pub enum DvbError {
    /// A required request parameter was missing or empty; no request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request could not be built, sent, or completed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The API answered with a non-2xx status
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A successful response carried a body that is not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Coarse classification of a [`DvbError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`DvbError::Validation`]
    Validation,
    /// See [`DvbError::Transport`]
    Transport,
    /// See [`DvbError::Api`]
    Api,
    /// See [`DvbError::Decode`]
    Decode,
}

impl DvbError {
    /// The kind of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Api(_) => ErrorKind::Api,
            Self::Decode(_) => ErrorKind::Decode,
        }
    }

    /// The API error, if the server answered with a non-2xx status
    #[must_use]
    pub const fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// The transport error, if the request never produced a response
    #[must_use]
    pub const fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if a required parameter was rejected before sending
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the request failed below the HTTP status level
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// A required parameter was missing or empty
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("validation error for field '{field}': {message}")]
pub struct ValidationError {
    /// Name of the offending field
    pub field: String,
    /// What was wrong with it
    pub message: String,
}

impl ValidationError {
    /// Error for a required field that was left empty
    #[must_use]
    pub fn empty(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("{field} can not be empty"),
        }
    }
}

/// Failures that happen before an HTTP status is available
#[derive(Debug, Error)]
pub enum TransportError {
    /// The configured base URL could not be parsed
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[source] url::ParseError),

    /// A caller supplied header name or value is not valid HTTP
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The request body could not be serialized
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The HTTP client failed to build, send, or read the request
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The client-wide timeout elapsed
    #[error("Request timed out{}", timeout_suffix(.timeout_secs))]
    Timeout {
        /// The timeout in seconds, unknown for an injected HTTP client
        timeout_secs: Option<u64>,
    },

    /// The deadline of the request context passed
    #[error("Request deadline exceeded")]
    DeadlineExceeded,

    /// The request context was cancelled
    #[error("Request cancelled")]
    Cancelled,
}

#[allow(clippy::ref_option)] // thiserror passes fields by reference
fn timeout_suffix(timeout_secs: &Option<u64>) -> String {
    timeout_secs.map_or_else(String::new, |secs| format!(" after {secs} seconds"))
}

impl TransportError {
    /// Returns true if the request was aborted by a timeout or deadline
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::DeadlineExceeded)
    }

    /// Returns true if the request context was cancelled
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// An error response from the DVB API
///
/// `status_code` always holds the HTTP status of the response, whatever the
/// body claimed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiError {
    /// HTTP status code of the response
    #[serde(skip_serializing_if = "is_zero")]
    pub status_code: u16,
    /// Human readable message
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Upstream error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde passes fields by reference
const fn is_zero(value: &u16) -> bool {
    *value == 0
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code.as_deref() {
            Some(code) if !code.is_empty() => write!(
                f,
                "API error {} ({code}): {}",
                self.status_code, self.message
            ),
            _ => write!(f, "API error {}: {}", self.status_code, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Classify an error response body
    ///
    /// Tries the structured error shape first and falls back to the raw body
    /// text. The HTTP status always wins over a status in the body.
    #[must_use]
    pub fn from_body(status: StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<Self>(body) {
            Ok(mut err) => {
                err.status_code = status.as_u16();
                err
            },
            Err(_) => Self {
                status_code: status.as_u16(),
                message: format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    String::from_utf8_lossy(body)
                ),
                code: None,
                details: None,
            },
        }
    }

    /// Error for a response whose body could not be read
    #[must_use]
    pub fn unreadable(status: StatusCode) -> Self {
        Self {
            status_code: status.as_u16(),
            message: format!("HTTP {}: failed to read error response", status.as_u16()),
            code: None,
            details: None,
        }
    }

    /// Returns true for 404 Not Found
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.status_code == 404
    }

    /// Returns true for 401 Unauthorized
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.status_code == 401
    }

    /// Returns true for 403 Forbidden
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        self.status_code == 403
    }

    /// Returns true for 429 Too Many Requests
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        self.status_code == 429
    }

    /// Returns true for any 5xx status
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code >= 500 && self.status_code < 600
    }
}
