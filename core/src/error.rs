//! Error types for the provider clients.
//!
//! # Design
//! A failed call lands in exactly one variant. `Http` keeps only the status
//! code: provider error bodies (rate-limit notices and the like) are dropped
//! so callers see the same shallow diagnostic regardless of provider.
//! `kind()` gives a fieldless discriminant for callers that only branch on
//! the class of failure.

use thiserror::Error;

/// Errors returned by `ResourceClient` and the service objects built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required argument was absent, blank, or malformed. No request was
    /// sent.
    #[error("{endpoint}: {reason}")]
    Caller { endpoint: &'static str, reason: String },

    /// The provider answered with a non-2xx status.
    #[error("HTTP error, status {status}")]
    Http { status: u16 },

    /// The response body was not valid JSON, or did not fit the requested
    /// typed shape.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The request never produced a response: DNS, connect, timeout, or a
    /// broken read.
    #[error("transport failed: {0}")]
    Transport(String),

    /// A base URL or configuration value could not be used.
    #[error("invalid configuration: {0}")]
    Config(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Caller,
    Http,
    Decode,
    Transport,
    Config,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Caller { .. } => ErrorKind::Caller,
            ApiError::Http { .. } => ErrorKind::Http,
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Config(_) => ErrorKind::Config,
        }
    }

    /// Status code for `Http` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn missing(endpoint: &'static str, arg: &str) -> Self {
        ApiError::Caller {
            endpoint,
            reason: format!("missing required argument `{arg}`"),
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Config(format!("bad base url: {err}"))
    }
}
