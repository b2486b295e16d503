//! HTTP client module.
//!
//! [`ApiClient`] wraps `reqwest::Client` with a base URL and executes
//! [`Request`](crate::Request) values. [`RequestBuilder`] is the per-call
//! builder the executor fills and [`RequestOption`]s adjust.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use restbind::{option, ApiClient, Untyped};
//! use url::Url;
//!
//! let client = ApiClient::builder(Url::parse("https://api.example.com")?)
//!     .default_header("accept", "application/json")?
//!     .build()?;
//!
//! let (raw, account) = client
//!     .execute_raw::<_, Untyped>(&req, [option::header("logid", "logid-asdf")])
//!     .await;
//! ```

mod builder;
mod executor;
pub mod option;

pub use builder::RequestBuilder;
pub use executor::{ApiClient, ApiClientBuilder};
pub use option::RequestOption;
