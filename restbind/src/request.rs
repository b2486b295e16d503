//! The typed request contract.
//!
//! A [`Request`] knows everything needed to perform one HTTP call and to
//! decode its success body: verb, path template, path/query parameters,
//! headers, serialized payload and the response format. Only `method`,
//! `path` and the `Format` type are required; every other member has a
//! no-op default, so an endpoint overrides just the parts it uses.
//!
//! ## Examples
//!
//! ```rust
//! use std::borrow::Cow;
//!
//! use bytes::Bytes;
//! use restbind::error::BoxError;
//! use restbind::request::{json_body, Params};
//! use restbind::response::JsonFormat;
//! use restbind::{Request, RestMethod};
//!
//! #[derive(serde::Serialize)]
//! struct CreateAccount {
//!     name: String,
//!     #[serde(skip)]
//!     id: u64,
//! }
//!
//! #[derive(Debug, Default, serde::Deserialize)]
//! struct Account {
//!     id: u64,
//! }
//!
//! impl Request for CreateAccount {
//!     type Format = JsonFormat<Account>;
//!
//!     fn method(&self) -> RestMethod {
//!         RestMethod::Post
//!     }
//!
//!     fn path(&self) -> Cow<'_, str> {
//!         Cow::Borrowed("/api/account/{account_id}")
//!     }
//!
//!     fn path_params(&self) -> Option<Params> {
//!         Some(Params::from([("account_id".to_string(), self.id.to_string())]))
//!     }
//!
//!     fn body(&self) -> Result<Option<Bytes>, BoxError> {
//!         json_body(self)
//!     }
//! }
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use bytes::Bytes;
use serde::Serialize;

use crate::error::BoxError;
use crate::method::RestMethod;
use crate::response::ResponseFormat;

/// Name/value pairs for path parameters, query parameters and headers.
///
/// Keys are unique and carry no iteration order.
pub type Params = HashMap<String, String>;

/// The decoded success type of a request.
pub type ResponseOf<R> = <<R as Request>::Format as ResponseFormat>::Output;

/// Contract for a value the executor can turn into one HTTP call.
///
/// Implementations are expected to be pure: every method reads the value's
/// current state and performs no I/O. An instance backs exactly one
/// in-flight call at a time.
pub trait Request: Send + Sync {
    /// Decoding strategy and output type for 2xx bodies.
    type Format: ResponseFormat;

    /// HTTP verb.
    fn method(&self) -> RestMethod;

    /// URL path, relative to the client's base URL.
    ///
    /// May contain `{name}` placeholders resolved from [`path_params`](Self::path_params).
    fn path(&self) -> Cow<'_, str>;

    /// Substitution values for `{name}` placeholders in the path.
    fn path_params(&self) -> Option<Params> {
        None
    }

    /// Appended to the URL as a query string.
    fn query_params(&self) -> Option<Params> {
        None
    }

    fn headers(&self) -> Option<Params> {
        None
    }

    /// Serialized payload.
    ///
    /// `Ok(None)` sends no body at all, while `Ok(Some(Bytes::new()))`
    /// sends an explicit empty one.
    fn body(&self) -> Result<Option<Bytes>, BoxError> {
        Ok(None)
    }

    /// Decodes a 2xx body. Never called for any other status.
    fn response_from_bytes(
        &self,
        body: Bytes,
    ) -> Result<<Self::Format as ResponseFormat>::Output, BoxError> {
        Ok(Self::Format::parse(body)?)
    }
}

/// Serializes `value` as a JSON request body.
pub fn json_body<T: Serialize + ?Sized>(value: &T) -> Result<Option<Bytes>, BoxError> {
    Ok(Some(Bytes::from(serde_json::to_vec(value)?)))
}
