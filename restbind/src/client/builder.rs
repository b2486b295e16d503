//! Per-call request builder.

use std::collections::BTreeMap;
use std::time::Duration;

use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH};
use tracing::{debug, Span};
use url::Url;

use crate::error::ClientError;
use crate::method::RestMethod;
use crate::response::RawResponse;

/// Everything except RFC 3986 unreserved characters, so a value always
/// stays inside one path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Mutable description of a single outgoing call.
///
/// Obtained from [`ApiClient::request`](super::ApiClient::request). The
/// executor fills it from a [`Request`](crate::Request) and then hands it
/// to each [`RequestOption`](super::RequestOption) in turn, so options can
/// read and override anything the contract declared.
///
/// Header names are matched case-insensitively; setting the same header,
/// query parameter or path parameter twice keeps the last value.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    client: reqwest::Client,
    base_url: Url,
    headers: Vec<(String, String)>,
    query: BTreeMap<String, String>,
    path_params: BTreeMap<String, String>,
    body: Option<Bytes>,
    timeout: Option<Duration>,
}

impl RequestBuilder {
    pub(crate) fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self {
            client,
            base_url,
            headers: Vec::new(),
            query: BTreeMap::new(),
            path_params: BTreeMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Sets a header, replacing any value under the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some(existing) => *existing = (name, value),
            None => self.headers.push((name, value)),
        }
        self
    }

    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |builder, (k, v)| builder.header(k, v))
    }

    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn query_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the value substituted for `{name}` in the path template.
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    pub fn path_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.path_params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Attaches a payload. Without a call to `body` nothing is sent.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Overrides the client's timeout for this call only.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn path_value(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Replaces each `{name}` in `template` with its path parameter,
    /// percent-encoded as a single path segment.
    ///
    /// The template is scanned once, so substituted values are never
    /// expanded again. Placeholders without a matching parameter are left
    /// as-is.
    ///
    /// ## Errors
    ///
    /// Returns [`ClientError::InvalidPathParam`] for a value of `.` or `..`,
    /// which URL normalization would otherwise resolve against the path.
    pub fn resolve_path(&self, template: &str) -> Result<String, ClientError> {
        let mut path = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            path.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                rest = &rest[open..];
                break;
            };

            let name = &after[..close];
            match self.path_params.get(name) {
                Some(value) => path.push_str(&encode_segment(name, value)?),
                None => path.push_str(&rest[open..open + close + 2]),
            }
            rest = &after[close + 1..];
        }

        path.push_str(rest);
        Ok(path)
    }

    /// Builds the absolute URL for `template`: the base URL's path, the
    /// resolved path, then the query string.
    ///
    /// A query on the base URL is kept ahead of the call's own parameters;
    /// a fragment is dropped.
    pub fn url(&self, template: &str) -> Result<Url, ClientError> {
        let path = self.resolve_path(template)?;
        let mut url = self.base_url.clone();
        url.set_fragment(None);

        let base = url.path().trim_end_matches('/');
        let joined = if path.is_empty() || path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };
        url.set_path(&joined);

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    fn header_map(&self) -> Result<HeaderMap, ClientError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClientError::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }

    /// Performs the round trip and reads the whole response body.
    ///
    /// Any HTTP status is a successful round trip; only transport problems
    /// (and an unbuildable URL or header) produce an error.
    pub async fn send(self, method: RestMethod, template: &str) -> Result<RawResponse, ClientError> {
        let url = self.url(template)?;
        let headers = self.header_map()?;
        Span::current().record("http.url", url.as_str());

        let mut request = self
            .client
            .request(method.to_reqwest(), url)
            .headers(headers);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = self.body {
            debug!(bytes = body.len(), "attaching request body");
            // An empty payload is still declared, unlike an absent one.
            if body.is_empty() {
                request = request.header(CONTENT_LENGTH, HeaderValue::from_static("0"));
            }
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(RawResponse::new(status, headers, body))
    }
}

fn encode_segment(name: &str, value: &str) -> Result<String, ClientError> {
    if value == "." || value == ".." {
        return Err(ClientError::InvalidPathParam {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
    Ok(utf8_percent_encode(value, PATH_SEGMENT).to_string())
}
