//! Response handling.
//!
//! [`ResponseFormat`] turns a success body into a typed value; the request
//! contract's default `response_from_bytes` delegates to it. [`RawResponse`]
//! is the status/header/body view the executor returns alongside the
//! decoded value.

mod format;
mod raw;

pub use format::{
    BinaryFormat, JsonFormat, NoContent, PlainTextFormat, ResponseFormat, XmlFormat, YamlFormat,
};
pub use raw::RawResponse;
