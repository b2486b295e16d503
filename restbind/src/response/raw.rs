//! Raw response metadata.

use std::borrow::Cow;

use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;

/// Status, headers and body of a completed round trip.
///
/// Returned by [`ApiClient::execute_raw`](crate::ApiClient::execute_raw)
/// next to the decoded value, for callers that need the status code or
/// response headers.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Returns a header value if present and valid ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// `true` when the `content-type` starts with `application/json`,
    /// compared case-insensitively.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("application/json"))
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// 4xx or 5xx.
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn with_content_type(value: &'static str) -> RawResponse {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(value));
        RawResponse::new(StatusCode::BAD_REQUEST, headers, Bytes::new())
    }

    #[test]
    fn json_detection_is_case_insensitive() {
        assert!(with_content_type("application/json").is_json());
        assert!(with_content_type("Application/JSON; charset=utf-8").is_json());
        assert!(!with_content_type("text/plain").is_json());
        // prefix match, not media type equality
        assert!(with_content_type("application/json-seq").is_json());
    }

    #[test]
    fn missing_content_type_is_not_json() {
        let raw = RawResponse::new(StatusCode::OK, HeaderMap::new(), Bytes::from("{}"));
        assert!(!raw.is_json());
        assert_eq!(raw.content_type(), None);
    }

    #[test]
    fn classification() {
        let ok = RawResponse::new(StatusCode::OK, HeaderMap::new(), Bytes::new());
        assert!(ok.is_success() && !ok.is_error());

        let server = RawResponse::new(StatusCode::BAD_GATEWAY, HeaderMap::new(), Bytes::new());
        assert!(server.is_error() && !server.is_success());

        let redirect = RawResponse::new(StatusCode::FOUND, HeaderMap::new(), Bytes::new());
        assert!(!redirect.is_error() && !redirect.is_success());
    }

    #[test]
    fn text_is_lossy() {
        let raw = RawResponse::new(StatusCode::OK, HeaderMap::new(), Bytes::from("hello\n"));
        assert_eq!(raw.text(), "hello\n");
        assert_eq!(raw.body().as_ref(), b"hello\n");
    }
}
