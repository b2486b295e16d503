//! Response format trait and implementations.

use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::ValidationError;

/// Strategy for decoding a success body into a typed value.
///
/// The format type encodes both the parsing strategy and the output type,
/// so a request declares its response shape with a single associated type:
///
/// ```rust,ignore
/// impl Request for GetUser {
///     type Format = JsonFormat<User>;
///     // ...
/// }
/// ```
pub trait ResponseFormat: Send + Sync {
    /// The decoded value.
    type Output: Send + Sync;

    /// Parses a success response body.
    fn parse(body: Bytes) -> Result<Self::Output, ValidationError>;
}

/// JSON body deserialized into `T`.
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat<T>(PhantomData<T>);

impl<T: DeserializeOwned + Send + Sync> ResponseFormat for JsonFormat<T> {
    type Output = T;

    fn parse(body: Bytes) -> Result<Self::Output, ValidationError> {
        serde_json::from_slice(&body).map_err(ValidationError::JsonParse)
    }
}

/// YAML body deserialized into `T`.
#[derive(Debug, Clone, Copy)]
pub struct YamlFormat<T>(PhantomData<T>);

impl<T: DeserializeOwned + Send + Sync> ResponseFormat for YamlFormat<T> {
    type Output = T;

    fn parse(body: Bytes) -> Result<Self::Output, ValidationError> {
        serde_yaml::from_slice(&body).map_err(ValidationError::YamlParse)
    }
}

/// XML body deserialized into `X`.
#[derive(Debug, Clone, Copy)]
pub struct XmlFormat<X>(PhantomData<X>);

impl<X: DeserializeOwned + Send + Sync> ResponseFormat for XmlFormat<X> {
    type Output = X;

    fn parse(body: Bytes) -> Result<Self::Output, ValidationError> {
        quick_xml::de::from_reader(body.as_ref()).map_err(ValidationError::XmlParse)
    }
}

/// Body returned as a UTF-8 string.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextFormat;

impl ResponseFormat for PlainTextFormat {
    type Output = String;

    fn parse(body: Bytes) -> Result<Self::Output, ValidationError> {
        Ok(String::from_utf8(body.to_vec())?)
    }
}

/// Body returned untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryFormat;

impl ResponseFormat for BinaryFormat {
    type Output = Bytes;

    fn parse(body: Bytes) -> Result<Self::Output, ValidationError> {
        Ok(body)
    }
}

/// For calls without a meaningful response payload.
///
/// The body is ignored and decoding always yields `()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl ResponseFormat for NoContent {
    type Output = ();

    fn parse(_body: Bytes) -> Result<Self::Output, ValidationError> {
        Ok(())
    }
}
