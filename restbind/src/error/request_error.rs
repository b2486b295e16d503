//! Kind-tagged local failures.

use strum::Display;
use thiserror::Error;

use super::BoxError;

/// The step of an execution that failed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// [`Request::body`](crate::Request::body) returned an error.
    #[strum(to_string = "error obtaining body from request")]
    BodyFromRequest,
    /// The HTTP round trip itself failed (network, timeout, invalid URL).
    #[strum(to_string = "error executing request")]
    ExecuteRequest,
    /// A success body could not be decoded into the response type.
    #[strum(to_string = "error deserializing response")]
    ResponseFromBytes,
}

/// A local failure tagged with the [`ErrorKind`] at which it happened.
///
/// Two `RequestError`s compare equal when their kinds match; the wrapped
/// cause is ignored. The cause stays reachable through
/// [`std::error::Error::source`] and [`RequestError::cause`].
///
/// ## Examples
///
/// ```rust
/// use restbind::error::{ErrorKind, RequestError};
///
/// let a = RequestError::new(ErrorKind::ExecuteRequest, "connection refused");
/// let b = RequestError::new(ErrorKind::ExecuteRequest, "timed out");
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "error executing request: connection refused");
/// ```
#[derive(Debug, Error)]
#[error("{kind}: {source}")]
pub struct RequestError {
    kind: ErrorKind,
    source: BoxError,
}

impl RequestError {
    /// Wraps `cause` under `kind`.
    pub fn new(kind: ErrorKind, cause: impl Into<BoxError>) -> Self {
        Self {
            kind,
            source: cause.into(),
        }
    }

    pub fn body_from_request(cause: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::BodyFromRequest, cause)
    }

    pub fn execute_request(cause: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::ExecuteRequest, cause)
    }

    pub fn response_from_bytes(cause: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::ResponseFromBytes, cause)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_body_from_request(&self) -> bool {
        self.kind == ErrorKind::BodyFromRequest
    }

    pub fn is_execute_request(&self) -> bool {
        self.kind == ErrorKind::ExecuteRequest
    }

    pub fn is_response_from_bytes(&self) -> bool {
        self.kind == ErrorKind::ResponseFromBytes
    }

    /// Returns the wrapped cause.
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.source.as_ref()
    }

    /// Attempts to view the cause as a concrete error type.
    pub fn downcast_ref<T: std::error::Error + 'static>(&self) -> Option<&T> {
        self.source.downcast_ref::<T>()
    }

    /// Consumes the error and returns the wrapped cause.
    pub fn into_cause(self) -> BoxError {
        self.source
    }
}

impl PartialEq for RequestError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}
