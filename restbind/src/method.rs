//! HTTP verbs a [`Request`](crate::Request) can declare.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// HTTP method of a typed request.
///
/// Parsing is case-insensitive so contract implementations that carry the
/// verb as text (`"post"`, `"POST"`) resolve to the same variant.
///
/// ## Examples
///
/// ```rust
/// use restbind::RestMethod;
///
/// let method: RestMethod = "post".parse().unwrap();
/// assert_eq!(method, RestMethod::Post);
/// assert_eq!(method.as_str(), "POST");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum RestMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl RestMethod {
    /// Returns the canonical upper-case verb.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
            Self::Head => reqwest::Method::HEAD,
            Self::Options => reqwest::Method::OPTIONS,
            Self::Trace => reqwest::Method::TRACE,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}
