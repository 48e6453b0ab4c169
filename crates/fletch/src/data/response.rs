use std::collections::BTreeMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;

/// Decoded response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Structured data parsed from a JSON object or array body.
    Json(serde_json::Value),
    /// Raw text: non-JSON bodies, or bodies that failed to parse.
    Text(String),
    /// Opaque payload for binary media types.
    Bytes(Bytes),
}

impl Body {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Body::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Deserialize the payload into a typed value. Text and byte
    /// payloads are parsed as JSON text.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match self {
            Body::Json(value) => serde_json::from_value(value.clone()),
            Body::Text(text) => serde_json::from_str(text),
            Body::Bytes(bytes) => serde_json::from_slice(bytes),
        }
    }
}

/// Normalized success response.
///
/// Produced for every completed transport call whose status is in the
/// success range, across all verbs.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub data: Body,
    /// Response headers flattened to a key/value mapping.
    pub headers: BTreeMap<String, String>,
    pub status: u16,
    pub status_text: String,
    /// The resolved request URL.
    pub url: String,
}

impl Response {
    /// Deserialize `data` into a typed value.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        self.data.json()
    }
}
