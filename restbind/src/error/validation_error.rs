//! Response format parsing errors.

use thiserror::Error;

/// Errors raised by [`ResponseFormat::parse`](crate::response::ResponseFormat::parse).
///
/// Surfacing through the executor, these become the cause of an
/// [`ErrorKind::ResponseFromBytes`](super::ErrorKind::ResponseFromBytes) failure.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// YAML parsing failed.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// XML parsing failed.
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::DeError),

    /// A text format received bytes that are not UTF-8.
    #[error("Response body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl ValidationError {
    /// Returns `true` if a structured format failed to parse.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::JsonParse(_) | Self::YamlParse(_) | Self::XmlParse(_)
        )
    }
}
