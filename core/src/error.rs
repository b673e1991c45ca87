use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// The error type for khata operations.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Payload cannot be serialized for signing
    PayloadInvalid,

    /// Request cannot be issued (failed local validation, e.g. an update
    /// without an id)
    RequestInvalid,

    /// The remote service answered with a non-success status
    Api,

    /// A local lookup exhausted its candidates without a match; no HTTP
    /// failure occurred
    NotFound,

    /// Unexpected errors (connection failures, timeouts, undecodable
    /// responses)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Add a source error.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The HTTP status of the failing response, present for `Api` errors.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// The server-provided message, empty when the response body carried
    /// none.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this error represents a missing entity, either reported by
    /// the remote (404) or detected by a local natural-key scan.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound || self.status == Some(StatusCode::NOT_FOUND)
    }
}

// Convenience constructors
impl Error {
    /// Create a config invalid error.
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a payload invalid error.
    pub fn payload_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PayloadInvalid, message)
    }

    /// Create a request invalid error.
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create an error from a non-success API response.
    pub fn api(status: StatusCode, message: impl Into<String>) -> Self {
        let mut err = Self::new(ErrorKind::Api, message);
        err.status = Some(status);
        err
    }

    /// Create a local not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::PayloadInvalid => write!(f, "invalid payload"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Api => write!(f, "api error"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::payload_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_carries_status_and_message() {
        let err = Error::api(StatusCode::NOT_FOUND, "not found");
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.message(), "not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_local_not_found_has_no_status() {
        let err = Error::not_found("account with code \"X\" not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status(), None);
        assert!(err.is_not_found());
    }
}
