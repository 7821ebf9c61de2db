//! Error types for Yuque API operations.
//!
//! Every fallible operation in this crate returns [`ApiError`]. Errors are
//! raised at the transport layer and surface unmodified through the resource
//! clients and the [`Yuque`](crate::Yuque) facade — nothing is caught,
//! retried, or remapped on the way up.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors produced by the transport client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP request itself failed (connection, TLS, body transfer).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    ///
    /// `message` carries the upstream response body verbatim, or the status
    /// line when the body could not be read.
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// The response body was not valid JSON for the expected shape.
    #[error("failed to parse response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API token cannot be represented as an HTTP header value.
    #[error("API token contains characters not permitted in an HTTP header")]
    InvalidToken,

    /// The base URL did not parse.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// Environment-based construction found no token.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
}

impl ApiError {
    /// Returns the HTTP status code if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
