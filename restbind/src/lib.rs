//! Typed request/response binding over `reqwest`.
//!
//! Describe an endpoint once as a [`Request`] (verb, path template,
//! parameters, headers, payload, response format) and hand it to
//! [`ApiClient::execute`]. The executor performs one HTTP round trip and
//! resolves the outcome into either the decoded response or an
//! [`ExecuteError`], without per-call marshaling or status branching.
//!
//! ## Features
//!
//! - **Typed responses**: JSON, YAML, XML, plain text, binary or no content
//! - **Typed error bodies**: 4xx/5xx JSON responses decode into a caller type
//! - **Kind-tagged local errors**: body, transport and decode failures are
//!   distinguishable by [`ErrorKind`] alone
//! - **Per-call options**: closures that adjust the outgoing call
//! - **Erased execution**: [`ApiClient::execute_any`] for code that cannot
//!   name response types
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::borrow::Cow;
//!
//! use restbind::response::JsonFormat;
//! use restbind::{ApiClient, Request, RestMethod, Untyped};
//!
//! #[derive(Debug, Default, serde::Deserialize)]
//! struct User { id: u64, name: String }
//!
//! struct GetUser;
//!
//! impl Request for GetUser {
//!     type Format = JsonFormat<User>;
//!
//!     fn method(&self) -> RestMethod {
//!         RestMethod::Get
//!     }
//!
//!     fn path(&self) -> Cow<'_, str> {
//!         Cow::Borrowed("/users/1")
//!     }
//! }
//!
//! let client = ApiClient::new(url::Url::parse("https://api.example.com")?)?;
//! let user = client.execute::<_, Untyped>(&GetUser, []).await?;
//! ```

pub mod any;
pub mod client;
pub mod error;
pub mod method;
pub mod request;
pub mod response;

pub use any::{AnyFormat, AnyRequest, AnyResponse};
pub use client::{option, ApiClient, ApiClientBuilder, RequestBuilder, RequestOption};
pub use error::{
    ClientError, ConfigError, ErrorKind, ExecuteError, RequestError, Untyped, ValidationError,
};
pub use method::RestMethod;
pub use request::{Params, Request, ResponseOf};
pub use response::{RawResponse, ResponseFormat};
