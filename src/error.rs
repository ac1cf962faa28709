//! Normalized error types.
//!
//! # Responsibilities
//! - Collapse every failure of a resource call into [`ApiError`]
//! - Pick the human-readable message (server field, transport text, generic)
//! - Keep programmer errors ([`UnknownMethod`]) and setup failures
//!   ([`SetupError`]) out of the per-call error type
//!
//! # Design Decisions
//! - Callers never see `reqwest::Error`; the transport converts it into
//!   [`TransportError`] and the pipeline into [`ApiError::Transport`]
//! - 404 gets its own variant but carries the same normalized message, so
//!   code that only reads `message()` behaves as if all statuses were flat

use serde::Deserialize;
use thiserror::Error;

use crate::session::StoreError;

/// Fallback message when neither the server nor the transport said anything useful.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// The single error shape every resource call fails with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Network unreachable, timeout, connection reset.
    #[error("{message}")]
    Transport { message: String },

    /// The server answered 401. The session has already been torn down.
    #[error("{message}")]
    Unauthorized { message: String },

    /// The server answered 404.
    #[error("{message}")]
    NotFound { message: String },

    /// Any other non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The body did not have the expected shape.
    #[error("{message}")]
    Decode { message: String },

    /// The request could not be built (bad path, unencodable token).
    #[error("{message}")]
    InvalidRequest { message: String },

    /// The session slot could not be written.
    #[error("{message}")]
    Session { message: String },
}

impl ApiError {
    /// Human-readable message, never empty.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Transport { message }
            | ApiError::Unauthorized { message }
            | ApiError::NotFound { message }
            | ApiError::Status { message, .. }
            | ApiError::Decode { message }
            | ApiError::InvalidRequest { message }
            | ApiError::Session { message } => message,
        }
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Build the normalized error for a non-2xx response.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = server_message(body)
            .unwrap_or_else(|| non_empty(format!("Request failed with status code {}", status)));

        match status {
            401 => ApiError::Unauthorized { message },
            404 => ApiError::NotFound { message },
            _ => ApiError::Status { status, message },
        }
    }

    pub(crate) fn decode(err: impl std::fmt::Display) -> Self {
        ApiError::Decode {
            message: non_empty(format!("Unexpected response body: {}", err)),
        }
    }

    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::InvalidRequest {
            message: non_empty(message.into()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Session {
            message: non_empty(format!("Failed to persist session: {}", err)),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Transport {
            message: non_empty(err.to_string()),
        }
    }
}

/// Error body the server may send. Either field may be missing.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn server_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    parsed
        .message
        .filter(|m| !m.trim().is_empty())
        .or_else(|| parsed.error.filter(|e| !e.trim().is_empty()))
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

/// Failure below HTTP: the request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// A verb outside `GET`/`POST`/`PUT`/`DELETE` reached dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown method: {0}")]
pub struct UnknownMethod(pub String);

/// The client could not be assembled. Not recoverable.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid API root: {0}")]
    Root(String),

    #[error("failed to build HTTP transport: {0}")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_server_message() {
        let err = ApiError::from_status(422, br#"{"message":"Team still referenced","error":"conflict"}"#);
        assert_eq!(err.message(), "Team still referenced");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_falls_back_to_error_field() {
        let err = ApiError::from_status(400, br#"{"error":"bad payload"}"#);
        assert_eq!(err.message(), "bad payload");
    }

    #[test]
    fn test_falls_back_to_transport_text() {
        let err = ApiError::from_status(500, b"<html>oops</html>");
        assert_eq!(err.message(), "Request failed with status code 500");

        let err = ApiError::from_status(502, br#"{"message":"  "}"#);
        assert_eq!(err.message(), "Request failed with status code 502");
    }

    #[test]
    fn test_status_variants() {
        assert!(ApiError::from_status(404, b"").is_not_found());
        assert!(ApiError::from_status(401, b"").is_unauthorized());
        assert!(matches!(ApiError::from_status(409, b""), ApiError::Status { status: 409, .. }));
    }

    #[test]
    fn test_empty_transport_message_becomes_generic() {
        let err = ApiError::from(TransportError::Other(String::new()));
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::from(TransportError::Timeout("operation timed out".into()));
        assert_eq!(err.to_string(), "operation timed out");
        assert_eq!(UnknownMethod("PATCH".into()).to_string(), "unknown method: PATCH");
    }
}
