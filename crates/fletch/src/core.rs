//! Core layer: pure request assembly and payload transformations.

use std::collections::BTreeMap;

use crate::data::{Body, Config, ContentType, Method, RequestBody, RequestParts, header};

/// Assemble the final URL: the base (or empty string) plus the stored
/// query string, joined with `?` unless the base already carries one.
/// Without a query string the base is returned unchanged.
pub fn full_url(config: &Config) -> String {
    let mut url = config.url.clone().unwrap_or_default();
    if let Some(query) = &config.query {
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(query);
    }
    url
}

/// Turn a configuration and verb into the wire-level request.
///
/// Body-bearing verbs inject `Content-Type: application/json` when that
/// exact key is absent and encode the configured body; other verbs send
/// headers only.
pub fn assemble(config: &Config, method: Method) -> RequestParts {
    let mut headers = config.headers.clone();
    let body = if method.has_body() {
        headers
            .entry(header::CONTENT_TYPE.to_string())
            .or_insert_with(|| ContentType::Json.as_str().to_string());
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .map(String::as_str)
            .unwrap_or_default();
        Some(encode_body(config.body.as_ref(), content_type))
    } else {
        None
    };
    RequestParts {
        url: full_url(config),
        method,
        headers,
        body,
    }
}

fn encode_body(body: Option<&RequestBody>, content_type: &str) -> String {
    match body {
        None => String::new(),
        Some(RequestBody::Text(text)) => text.clone(),
        Some(RequestBody::Structured(value)) => {
            if content_type == ContentType::FormUrlEncoded.as_str() {
                encode_form(value)
            } else {
                value.to_string()
            }
        }
    }
}

/// Encode a structured value as form pairs, one per key in insertion
/// order. Only scalar entries are supported at this layer; arrays
/// coerce to comma-joined element strings, other non-scalars to their
/// JSON text.
fn encode_form(value: &serde_json::Value) -> String {
    let Some(object) = value.as_object() else {
        return value.to_string();
    };
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, entry) in object {
        serializer.append_pair(key, &coerce_form_value(entry));
    }
    serializer.finish()
}

fn coerce_form_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(coerce_form_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// Decode a textual response body: a structured parse is attempted only
/// when the first non-whitespace character is `{` or `[`; a parse
/// failure or any other first character yields the raw text.
pub fn decode_text(text: String) -> Body {
    match text.trim_start().as_bytes().first() {
        Some(b'{') | Some(b'[') => match serde_json::from_str(&text) {
            Ok(value) => Body::Json(value),
            Err(_) => Body::Text(text),
        },
        _ => Body::Text(text),
    }
}

/// Whether a response `Content-Type` header value denotes an opaque
/// binary payload.
pub fn is_binary_media(content_type: &str) -> bool {
    ContentType::from_value(content_type).is_some_and(|kind| kind.is_binary())
}

/// Case-insensitive header lookup, for response header maps whose
/// casing the transport controls.
pub(crate) fn header_ignore_case<'a>(
    headers: &'a BTreeMap<String, String>,
    name: &str,
) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config_with(url: Option<&str>, query: Option<&str>) -> Config {
        Config {
            url: url.map(String::from),
            query: query.map(String::from),
            ..Config::default()
        }
    }

    #[test]
    fn full_url_without_query() {
        let config = config_with(Some("http://example.com"), None);
        assert_eq!(full_url(&config), "http://example.com");
    }

    #[test]
    fn full_url_appends_query() {
        let config = config_with(Some("http://example.com"), Some("foo=bar"));
        assert_eq!(full_url(&config), "http://example.com?foo=bar");
    }

    #[test]
    fn full_url_extends_existing_query() {
        let config = config_with(Some("http://example.com?foo=bar"), Some("baz=buzz"));
        assert_eq!(full_url(&config), "http://example.com?foo=bar&baz=buzz");
    }

    #[test]
    fn full_url_with_no_base() {
        let config = config_with(None, Some("foo=bar"));
        assert_eq!(full_url(&config), "?foo=bar");
    }

    #[test]
    fn assemble_injects_default_content_type_for_body_verbs() {
        let parts = assemble(&Config::default(), Method::Post);
        assert_eq!(
            parts.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(parts.body.as_deref(), Some(""));
    }

    #[test]
    fn assemble_keeps_explicit_content_type() {
        let mut config = Config::default();
        config
            .headers
            .insert("Content-Type".to_string(), "text/plain".to_string());
        let parts = assemble(&config, Method::Put);
        assert_eq!(
            parts.headers.get("Content-Type").map(String::as_str),
            Some("text/plain")
        );
    }

    #[test]
    fn assemble_sends_no_body_for_non_body_verbs() {
        let parts = assemble(&Config::default(), Method::Get);
        assert!(parts.body.is_none());
        assert!(!parts.headers.contains_key("Content-Type"));
    }

    #[test]
    fn structured_body_serializes_as_json_text() {
        let config = Config {
            body: Some(RequestBody::Structured(json!({"foo": "bar"}))),
            ..Config::default()
        };
        let parts = assemble(&config, Method::Post);
        assert_eq!(parts.body.as_deref(), Some(r#"{"foo":"bar"}"#));
    }

    #[test]
    fn structured_body_form_encodes_in_insertion_order() {
        let mut config = Config {
            body: Some(RequestBody::Structured(json!({"foo": "bar", "baz": "buzz"}))),
            ..Config::default()
        };
        config.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        let parts = assemble(&config, Method::Post);
        assert_eq!(parts.body.as_deref(), Some("foo=bar&baz=buzz"));
    }

    #[test]
    fn form_encoding_coerces_arrays_to_comma_strings() {
        let mut config = Config {
            body: Some(RequestBody::Structured(json!({"ids": [10, 20]}))),
            ..Config::default()
        };
        config.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        let parts = assemble(&config, Method::Post);
        assert_eq!(parts.body.as_deref(), Some("ids=10%2C20"));
    }

    #[test]
    fn text_body_passes_verbatim() {
        let config = Config {
            body: Some(RequestBody::Text("hello world".to_string())),
            ..Config::default()
        };
        let parts = assemble(&config, Method::Post);
        assert_eq!(parts.body.as_deref(), Some("hello world"));
    }

    #[test]
    fn decode_text_parses_json_object() {
        assert_eq!(
            decode_text(r#"{"hello":"world"}"#.to_string()),
            Body::Json(json!({"hello": "world"}))
        );
    }

    #[test]
    fn decode_text_parses_json_array() {
        assert_eq!(
            decode_text(r#"["hello","world"]"#.to_string()),
            Body::Json(json!(["hello", "world"]))
        );
    }

    #[test]
    fn decode_text_skips_leading_whitespace() {
        assert_eq!(
            decode_text("  \n {\"a\":1}".to_string()),
            Body::Json(json!({"a": 1}))
        );
    }

    #[test]
    fn decode_text_keeps_plain_text() {
        assert_eq!(
            decode_text("hello world".to_string()),
            Body::Text("hello world".to_string())
        );
    }

    #[test]
    fn decode_text_recovers_from_malformed_json() {
        assert_eq!(
            decode_text(r#"{"hello":"world""#.to_string()),
            Body::Text(r#"{"hello":"world""#.to_string())
        );
    }

    #[test]
    fn binary_media_detection() {
        assert!(is_binary_media("image/png"));
        assert!(is_binary_media("application/pdf; version=1.7"));
        assert!(!is_binary_media("application/json"));
        assert!(!is_binary_media("text/plain"));
        assert!(!is_binary_media(""));
    }
}
