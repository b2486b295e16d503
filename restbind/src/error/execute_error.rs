//! The error half of a typed execution.

use std::fmt;

use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::{self, Deserialize, Deserializer};

use super::{ErrorKind, RequestError};

/// Failure outcome of [`ApiClient::execute`](crate::ApiClient::execute).
///
/// Exactly one variant is produced per failed call:
///
/// - `Request` for local failures, tagged by [`ErrorKind`]
/// - `Api` when a 4xx/5xx response carried `application/json` and decoded
///   into the caller's error type `E`
/// - `Status` for any other 4xx/5xx response; its message is the raw body
///   as text, and the exact bytes stay available through
///   [`ExecuteError::body`]
///
/// ## Examples
///
/// ```rust,ignore
/// match client.execute::<_, MyApiError>(&req, []).await {
///     Ok(res) => println!("{res:?}"),
///     Err(ExecuteError::Api(e)) => eprintln!("api rejected: {e}"),
///     Err(e) if e.is_request_error() => eprintln!("local failure: {e}"),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug)]
pub enum ExecuteError<E> {
    /// Body serialization, transport or response decoding failed.
    Request(RequestError),

    /// Error response decoded into the declared error type.
    Api(E),

    /// Error response surfaced as text.
    Status {
        /// Status code of the error response.
        status: StatusCode,
        /// The response body, verbatim.
        body: Bytes,
    },
}

impl<E> ExecuteError<E> {
    /// Returns `true` for any kind-tagged local failure.
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    /// Returns the [`ErrorKind`] of a local failure.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Request(e) => Some(e.kind()),
            _ => None,
        }
    }

    pub fn api(&self) -> Option<&E> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_api(self) -> Option<E> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Status code of a text error response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Exact bytes of a text error response.
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl<E> From<RequestError> for ExecuteError<E> {
    fn from(err: RequestError) -> Self {
        Self::Request(err)
    }
}

impl<E: fmt::Display> fmt::Display for ExecuteError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(e) => fmt::Display::fmt(e, f),
            Self::Api(e) => fmt::Display::fmt(e, f),
            // Invalid UTF-8 is replaced here; `body()` keeps the original bytes.
            Self::Status { body, .. } => f.write_str(&String::from_utf8_lossy(body)),
        }
    }
}

impl<E: std::error::Error> std::error::Error for ExecuteError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(e) => std::error::Error::source(e),
            Self::Api(e) => e.source(),
            Self::Status { .. } => None,
        }
    }
}

/// Error type for callers that do not model their API's error bodies.
///
/// `Untyped` has no values and never deserializes, so every 4xx/5xx
/// response ends up as [`ExecuteError::Status`] with the raw body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Untyped {}

impl fmt::Display for Untyped {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl std::error::Error for Untyped {}

impl<'de> Deserialize<'de> for Untyped {
    fn deserialize<D>(_: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Err(de::Error::custom("untyped error bodies are surfaced as text"))
    }
}
