//! Per-call request options.
//!
//! An option receives the [`RequestBuilder`] after the request's own
//! headers and parameters were applied, and before its body is attached.
//! Options run in the order given, so a later option overrides an earlier
//! one (and any value the request declared).
//!
//! ## Examples
//!
//! ```rust,ignore
//! use restbind::option;
//!
//! let res = client
//!     .execute::<_, Untyped>(
//!         &req,
//!         [
//!             option::header("logid", "logid-asdf"),
//!             option::timeout(Duration::from_secs(5)),
//!         ],
//!     )
//!     .await?;
//! ```

use std::time::Duration;

use super::RequestBuilder;

/// A builder mutator applied to one call.
pub type RequestOption = Box<dyn FnOnce(RequestBuilder) -> RequestBuilder + Send>;

/// Wraps an arbitrary closure as an option.
pub fn from_fn<F>(f: F) -> RequestOption
where
    F: FnOnce(RequestBuilder) -> RequestBuilder + Send + 'static,
{
    Box::new(f)
}

pub fn header(name: impl Into<String>, value: impl Into<String>) -> RequestOption {
    let (name, value) = (name.into(), value.into());
    from_fn(move |builder| builder.header(name, value))
}

pub fn query_param(name: impl Into<String>, value: impl Into<String>) -> RequestOption {
    let (name, value) = (name.into(), value.into());
    from_fn(move |builder| builder.query_param(name, value))
}

pub fn path_param(name: impl Into<String>, value: impl Into<String>) -> RequestOption {
    let (name, value) = (name.into(), value.into());
    from_fn(move |builder| builder.path_param(name, value))
}

pub fn timeout(timeout: Duration) -> RequestOption {
    from_fn(move |builder| builder.timeout(timeout))
}
