//! Transport failures.

use thiserror::Error;

/// Errors raised while performing the HTTP round trip.
///
/// These are always wrapped in an
/// [`ErrorKind::ExecuteRequest`](super::ErrorKind::ExecuteRequest) failure.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A path parameter value would be read as a dot segment.
    #[error("Invalid path parameter '{name}': '{value}' is a dot segment")]
    InvalidPathParam { name: String, value: String },

    /// A header name or value could not be encoded.
    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },
}

impl ClientError {
    /// Returns `true` if the transport gave up waiting on the server.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }

    /// Returns `true` if no connection could be established.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_connect())
    }
}
