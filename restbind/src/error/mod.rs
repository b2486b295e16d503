//! Layered error types for typed request execution.
//!
//! - [`ExecuteError`] - What a typed execution hands back to the caller
//! - [`RequestError`] - Kind-tagged local failure (body, transport, decode)
//! - [`ClientError`] - Transport failures wrapped by `ExecuteRequest` errors
//! - [`ConfigError`] - Client construction errors
//! - [`ValidationError`] - Response format parsing errors

mod client_error;
mod config_error;
mod execute_error;
mod request_error;
mod validation_error;

pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use execute_error::{ExecuteError, Untyped};
pub use request_error::{ErrorKind, RequestError};
pub use validation_error::ValidationError;

/// Boxed cause carried by caller-defined contract methods.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
