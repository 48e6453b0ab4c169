//! Data layer: immutable configuration and value types.

mod content_type;
mod query;
mod response;

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ErrorTransform;

pub use content_type::ContentType;
pub use query::{Query, QueryParams, QueryValue};
pub use response::{Body, Response};

pub(crate) mod header {
    pub const ACCEPT: &str = "Accept";
    pub const AUTHORIZATION: &str = "Authorization";
    pub const CONTENT_TYPE: &str = "Content-Type";
}

/// Immutable request configuration snapshot.
///
/// Never mutated in place: the builder derives every change by cloning
/// the current value and overlaying a single field. Header keys are
/// stored exactly as given; only the `Accept` default probes them
/// case-insensitively, once, at construction.
#[derive(Clone, Default)]
pub struct Config {
    pub headers: BTreeMap<String, String>,
    pub url: Option<String>,
    /// Pre-encoded query string, no leading separator.
    pub query: Option<String>,
    pub body: Option<RequestBody>,
    pub error_transform: Option<ErrorTransform>,
}

impl Config {
    /// Apply the `Accept: application/json` default unless any casing of
    /// `accept` is already present. Called once when a builder is
    /// constructed, never on derived configurations.
    pub(crate) fn with_default_accept(mut self) -> Self {
        if !self.has_header_ignore_case(header::ACCEPT) {
            self.headers.insert(
                header::ACCEPT.to_string(),
                ContentType::Json.as_str().to_string(),
            );
        }
        self
    }

    fn has_header_ignore_case(&self, name: &str) -> bool {
        self.headers.keys().any(|key| key.eq_ignore_ascii_case(name))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("headers", &self.headers)
            .field("url", &self.url)
            .field("query", &self.query)
            .field("body", &self.body)
            .field(
                "error_transform",
                &self.error_transform.as_ref().map(|_| ".."),
            )
            .finish()
    }
}

/// Configured request body, stored as-is until dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Raw string, sent verbatim.
    Text(String),
    /// Structured value, serialized at dispatch time according to the
    /// negotiated content type.
    Structured(serde_json::Value),
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        RequestBody::Structured(value)
    }
}

/// HTTP verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Delete => "DELETE",
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }

    /// Whether this verb carries a request body and gets the default
    /// `Content-Type` injection.
    pub fn has_body(&self) -> bool {
        matches!(
            self,
            Method::Delete | Method::Patch | Method::Post | Method::Put
        )
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finalized wire-level request handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParts {
    pub url: String,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    /// Encoded body; `None` for verbs that send none.
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_accept_applied_when_absent() {
        let config = Config::default().with_default_accept();
        assert_eq!(
            config.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn default_accept_skipped_for_existing_header() {
        let mut config = Config::default();
        config
            .headers
            .insert("Accept".to_string(), "text/plain".to_string());
        let config = config.with_default_accept();
        assert_eq!(
            config.headers.get("Accept").map(String::as_str),
            Some("text/plain")
        );
        assert_eq!(config.headers.len(), 1);
    }

    #[test]
    fn default_accept_probe_is_case_insensitive() {
        let mut config = Config::default();
        config
            .headers
            .insert("accept".to_string(), "text/plain".to_string());
        let config = config.with_default_accept();
        assert_eq!(
            config.headers.get("accept").map(String::as_str),
            Some("text/plain")
        );
        assert!(!config.headers.contains_key("Accept"));
    }

    #[test]
    fn body_bearing_verbs() {
        assert!(Method::Post.has_body());
        assert!(Method::Put.has_body());
        assert!(Method::Patch.has_body());
        assert!(Method::Delete.has_body());
        assert!(!Method::Get.has_body());
        assert!(!Method::Head.has_body());
        assert!(!Method::Options.has_body());
    }
}
