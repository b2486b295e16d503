//! Client construction errors.

use thiserror::Error;

/// Errors raised while building an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot have a path appended to it (e.g. `mailto:`).
    #[error("Base URL cannot be a base: {url}")]
    CannotBeABase { url: String },

    /// A default header name or value is invalid.
    #[error("Invalid default header: {message}")]
    InvalidHeader { message: String },

    /// The underlying `reqwest::Client` could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl ConfigError {
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }
}
