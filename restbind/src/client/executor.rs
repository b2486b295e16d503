//! Typed request execution with tracing instrumentation.
//!
//! [`ApiClient`] drives one HTTP round trip per [`Request`] and resolves the
//! outcome by status code:
//!
//! | Status | Outcome |
//! |---|---|
//! | 2xx | `Request::response_from_bytes` on the body |
//! | 4xx/5xx, `application/json` | body decoded into the caller's error type |
//! | 4xx/5xx, otherwise | [`ExecuteError::Status`] with the body as text |
//! | anything else | `Ok` with the response type's default value |

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn, Span};
use url::Url;

use super::{RequestBuilder, RequestOption};
use crate::error::{ConfigError, ExecuteError, RequestError};
use crate::request::Request;
use crate::response::{RawResponse, ResponseFormat};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Builder for configuring an [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl ApiClientBuilder {
    fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
        }
    }

    /// Sets the timeout applied to every call.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let client = ApiClient::builder(base_url)
    ///     .timeout(Duration::from_secs(60))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header sent with every call.
    ///
    /// Headers declared by a request or set by an option take precedence.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the `User-Agent` sent with every call.
    ///
    /// ## Errors
    ///
    /// Returns an error if the value is not a valid header value.
    pub fn user_agent(self, agent: impl AsRef<str>) -> Result<Self, ConfigError> {
        self.default_header(USER_AGENT, agent)
    }

    /// Builds the [`ApiClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the base URL cannot carry a path or the HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<ApiClient, ConfigError> {
        if self.base_url.cannot_be_a_base() {
            return Err(ConfigError::CannotBeABase {
                url: self.base_url.to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .build()?;

        Ok(ApiClient {
            client,
            base_url: self.base_url,
        })
    }
}

/// Async HTTP client that executes typed requests.
///
/// Cloning is cheap and clones share the underlying connection pool, so a
/// single client can serve any number of concurrent calls.
///
/// ## Examples
///
/// ```rust,ignore
/// use restbind::{ApiClient, Untyped};
/// use url::Url;
///
/// let client = ApiClient::new(Url::parse("https://api.example.com")?)?;
/// let account = client.execute::<_, Untyped>(&GetAccount { id: 42 }, []).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a new builder for configuring an API client.
    pub fn builder(base_url: Url) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url)
    }

    /// Creates a new API client with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, ConfigError> {
        Self::builder(base_url).build()
    }

    /// Creates a client with default settings from a base URL string.
    ///
    /// ## Errors
    ///
    /// Returns an error if `base_url` does not parse.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Self::new(Url::parse(base_url)?)
    }

    /// Wraps an already configured `reqwest::Client`.
    ///
    /// Use this to control transport concerns the builder does not expose,
    /// such as redirect policy or TLS roots.
    pub fn from_reqwest(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Starts an empty per-call builder against this client.
    pub fn request(&self) -> RequestBuilder {
        RequestBuilder::new(self.client.clone(), self.base_url.clone())
    }

    /// Executes a typed request and returns the raw response next to the
    /// resolved outcome.
    ///
    /// The raw response is `None` only when no response exists: the body
    /// could not be produced or the round trip failed.
    ///
    /// ## Type Parameters
    ///
    /// * `R` - The request contract implementation.
    /// * `E` - The error type JSON error bodies decode into. Use
    ///   [`Untyped`](crate::Untyped) to always get the body as text.
    #[instrument(
        name = "api_request",
        skip_all,
        fields(
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn execute_raw<R, E>(
        &self,
        request: &R,
        options: impl IntoIterator<Item = RequestOption>,
    ) -> (
        Option<RawResponse>,
        Result<<R::Format as ResponseFormat>::Output, ExecuteError<E>>,
    )
    where
        R: Request + ?Sized,
        E: std::error::Error + DeserializeOwned,
        <R::Format as ResponseFormat>::Output: Default,
    {
        let method = request.method();
        Span::current().record("http.method", method.as_str());

        let path = request.path();
        let path_params = request.path_params();
        let query_params = request.query_params();
        let headers = request.headers();

        let body = match request.body() {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "request body could not be produced");
                return (None, Err(RequestError::body_from_request(e).into()));
            }
        };

        let mut builder = self.request();
        if let Some(headers) = headers {
            builder = builder.headers(headers);
        }
        if let Some(query_params) = query_params {
            builder = builder.query_params(query_params);
        }
        if let Some(path_params) = path_params {
            builder = builder.path_params(path_params);
        }
        for option in options {
            builder = option(builder);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let raw = match builder.send(method, &path).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "request failed");
                Span::current().record("otel.status_code", "ERROR");
                return (None, Err(RequestError::execute_request(e).into()));
            }
        };

        let status = raw.status();
        Span::current().record("http.status_code", status.as_u16());
        let otel_status = if status.is_server_error() {
            "ERROR"
        } else if status.is_success() {
            "OK"
        } else {
            "UNSET"
        };
        Span::current().record("otel.status_code", otel_status);

        let outcome = resolve(request, &raw);
        (Some(raw), outcome)
    }

    /// Executes a typed request and returns only the resolved outcome.
    ///
    /// ## Errors
    ///
    /// See [`ExecuteError`] for the ways a call can fail.
    pub async fn execute<R, E>(
        &self,
        request: &R,
        options: impl IntoIterator<Item = RequestOption>,
    ) -> Result<<R::Format as ResponseFormat>::Output, ExecuteError<E>>
    where
        R: Request + ?Sized,
        E: std::error::Error + DeserializeOwned,
        <R::Format as ResponseFormat>::Output: Default,
    {
        self.execute_raw(request, options).await.1
    }
}

/// Maps a completed round trip onto the typed outcome.
fn resolve<R, E>(
    request: &R,
    raw: &RawResponse,
) -> Result<<R::Format as ResponseFormat>::Output, ExecuteError<E>>
where
    R: Request + ?Sized,
    E: DeserializeOwned,
    <R::Format as ResponseFormat>::Output: Default,
{
    let status = raw.status();

    if status.is_success() {
        return request.response_from_bytes(raw.body().clone()).map_err(|e| {
            warn!(error = %e, "response body could not be decoded");
            RequestError::response_from_bytes(e).into()
        });
    }

    if raw.is_error() {
        if raw.is_json() {
            match serde_json::from_slice::<E>(raw.body()) {
                Ok(api_error) => return Err(ExecuteError::Api(api_error)),
                Err(e) => debug!(error = %e, "JSON error body did not match error type"),
            }
        }
        return Err(ExecuteError::Status {
            status,
            body: raw.body().clone(),
        });
    }

    // Neither success nor error: 1xx, or 3xx with redirects disabled.
    debug!(status = status.as_u16(), "unhandled status, returning default response");
    Ok(Default::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    use bytes::Bytes;
    use reqwest::StatusCode;

    use crate::error::{ErrorKind, Untyped};
    use crate::method::RestMethod;
    use crate::response::{JsonFormat, NoContent};

    #[derive(Debug, Default, PartialEq, serde::Deserialize)]
    struct Thing {
        id: u64,
    }

    #[derive(Debug, PartialEq, serde::Deserialize, thiserror::Error)]
    #[error("{message}")]
    struct Problem {
        message: String,
    }

    struct GetThing;

    impl Request for GetThing {
        type Format = JsonFormat<Thing>;

        fn method(&self) -> RestMethod {
            RestMethod::Get
        }

        fn path(&self) -> Cow<'_, str> {
            Cow::Borrowed("/things/1")
        }
    }

    fn raw(status: u16, content_type: Option<&'static str>, body: &'static str) -> RawResponse {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(
                reqwest::header::CONTENT_TYPE,
                HeaderValue::from_static(ct),
            );
        }
        RawResponse::new(
            StatusCode::from_u16(status).unwrap(),
            headers,
            Bytes::from(body),
        )
    }

    #[test]
    fn success_decodes_body() {
        let out = resolve::<_, Problem>(&GetThing, &raw(201, None, r#"{"id":3}"#));
        assert_eq!(out.unwrap(), Thing { id: 3 });
    }

    #[test]
    fn success_decode_failure_is_tagged() {
        let out = resolve::<_, Problem>(&GetThing, &raw(200, None, "nope"));
        assert_eq!(out.unwrap_err().kind(), Some(ErrorKind::ResponseFromBytes));
    }

    #[test]
    fn json_error_decodes_into_error_type() {
        let out = resolve::<_, Problem>(
            &GetThing,
            &raw(422, Some("APPLICATION/JSON; charset=utf-8"), r#"{"message":"bad"}"#),
        );
        assert_eq!(
            out.unwrap_err().into_api(),
            Some(Problem {
                message: "bad".to_string()
            })
        );
    }

    #[test]
    fn undecodable_json_error_falls_back_to_text() {
        let out = resolve::<_, Problem>(
            &GetThing,
            &raw(400, Some("application/json"), "error: invalid request"),
        );
        let err = out.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.to_string(), "error: invalid request");
    }

    #[test]
    fn non_json_error_is_text_even_if_decodable() {
        let out = resolve::<_, Problem>(&GetThing, &raw(500, None, "{\"message\":\"x\"}\n"));
        assert_eq!(out.unwrap_err().to_string(), "{\"message\":\"x\"}\n");
    }

    #[test]
    fn text_error_keeps_exact_bytes() {
        let body = Bytes::from_static(b"\xffgateway\n");
        let raw = RawResponse::new(StatusCode::BAD_GATEWAY, HeaderMap::new(), body.clone());
        let err = resolve::<_, Untyped>(&GetThing, &raw).unwrap_err();
        assert_eq!(err.body(), Some(&body));
        assert_eq!(err.to_string(), "\u{fffd}gateway\n");
    }

    #[test]
    fn untyped_always_yields_text() {
        let out = resolve::<_, Untyped>(
            &GetThing,
            &raw(400, Some("application/json"), r#"{"message":"bad"}"#),
        );
        assert!(matches!(out, Err(ExecuteError::Status { .. })));
    }

    #[test]
    fn other_statuses_return_default() {
        let out = resolve::<_, Problem>(&GetThing, &raw(304, None, ""));
        assert_eq!(out.unwrap(), Thing::default());

        struct Fire;
        impl Request for Fire {
            type Format = NoContent;
            fn method(&self) -> RestMethod {
                RestMethod::Post
            }
            fn path(&self) -> Cow<'_, str> {
                Cow::Borrowed("/")
            }
        }
        resolve::<_, Untyped>(&Fire, &raw(101, None, "")).unwrap();
    }

    #[tracing_test::traced_test]
    #[test]
    fn fallback_and_decode_failures_are_logged() {
        let _ = resolve::<_, Problem>(&GetThing, &raw(302, None, ""));
        assert!(logs_contain("unhandled status"));

        let _ = resolve::<_, Problem>(&GetThing, &raw(200, None, "{"));
        assert!(logs_contain("response body could not be decoded"));
    }

    #[test]
    fn builder_rejects_invalid_default_header() {
        let base = Url::parse("http://localhost").unwrap();
        let result = ApiClient::builder(base).default_header("bad header", "x");
        assert!(matches!(result, Err(ConfigError::InvalidHeader { .. })));
    }

    #[test]
    fn unparsable_base_url_is_config_error() {
        let result = ApiClient::with_base_url("not a url");
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn builder_rejects_non_base_url() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        let result = ApiClient::new(base);
        assert!(matches!(result, Err(ConfigError::CannotBeABase { .. })));
    }

    #[test]
    fn custom_timeout_builds() {
        let base = Url::parse("https://example.com").unwrap();
        let client = ApiClient::builder(base)
            .timeout(Duration::from_secs(60))
            .user_agent("restbind-test")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "https://example.com/");
    }
}
