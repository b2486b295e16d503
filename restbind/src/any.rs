//! Type-erased execution.
//!
//! For code that cannot name a request's response type, [`AnyRequest`]
//! adapts a typed request to a single erased signature: responses come
//! back as an [`AnyResponse`] and error bodies are always text
//! ([`Untyped`]).
//!
//! ## Examples
//!
//! ```rust,ignore
//! use restbind::any::AnyRequest;
//!
//! let res = client.execute_any(&AnyRequest(GetAccount { id: 42 }), []).await?;
//! let account: Account = res.downcast().expect("GetAccount decodes Account");
//! ```

use std::any::Any;
use std::borrow::Cow;

use bytes::Bytes;

use crate::client::{ApiClient, RequestOption};
use crate::error::{BoxError, ExecuteError, Untyped, ValidationError};
use crate::method::RestMethod;
use crate::request::{Params, Request, ResponseOf};
use crate::response::ResponseFormat;

/// A decoded response of unknown type, or nothing.
#[derive(Debug, Default)]
pub struct AnyResponse(Option<Box<dyn Any + Send + Sync>>);

impl AnyResponse {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    /// `true` when the call produced no value.
    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_ref().and_then(|v| v.downcast_ref::<T>())
    }

    /// Takes the value out as `T`, handing `self` back on a type mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        match self.0 {
            Some(value) => value.downcast::<T>().map(|v| *v).map_err(|v| Self(Some(v))),
            None => Err(Self(None)),
        }
    }
}

/// Format for erased requests.
///
/// Used on its own it discards the body and yields an empty
/// [`AnyResponse`]; [`AnyRequest`] replaces that with the wrapped
/// request's decoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyFormat;

impl ResponseFormat for AnyFormat {
    type Output = AnyResponse;

    fn parse(_body: Bytes) -> Result<Self::Output, ValidationError> {
        Ok(AnyResponse::default())
    }
}

/// Adapts a typed request to the erased [`AnyFormat`] signature.
#[derive(Debug, Clone)]
pub struct AnyRequest<R>(pub R);

impl<R> Request for AnyRequest<R>
where
    R: Request,
    ResponseOf<R>: Any,
{
    type Format = AnyFormat;

    fn method(&self) -> RestMethod {
        self.0.method()
    }

    fn path(&self) -> Cow<'_, str> {
        self.0.path()
    }

    fn path_params(&self) -> Option<Params> {
        self.0.path_params()
    }

    fn query_params(&self) -> Option<Params> {
        self.0.query_params()
    }

    fn headers(&self) -> Option<Params> {
        self.0.headers()
    }

    fn body(&self) -> Result<Option<Bytes>, BoxError> {
        self.0.body()
    }

    fn response_from_bytes(&self, body: Bytes) -> Result<AnyResponse, BoxError> {
        self.0.response_from_bytes(body).map(AnyResponse::new)
    }
}

impl ApiClient {
    /// Executes an erased request.
    ///
    /// Equivalent to [`execute`](ApiClient::execute) with the response type
    /// fixed to [`AnyResponse`] and the error type to [`Untyped`].
    ///
    /// ## Errors
    ///
    /// See [`ExecuteError`]; the `Api` variant cannot occur.
    pub async fn execute_any(
        &self,
        request: &dyn Request<Format = AnyFormat>,
        options: impl IntoIterator<Item = RequestOption>,
    ) -> Result<AnyResponse, ExecuteError<Untyped>> {
        self.execute::<_, Untyped>(request, options).await
    }
}
