use std::fmt;
use std::str::FromStr;

use crate::error::ParseContentTypeError;

/// Common media types, used for `accept`/`content_type` convenience and
/// for binary response detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// `*/*`
    Anything,
    /// `image/bmp`
    Bmp,
    /// `text/css`
    Css,
    /// `text/csv`
    Csv,
    /// `application/x-www-form-urlencoded`
    FormUrlEncoded,
    /// `image/gif`
    Gif,
    /// `application/gzip`
    Gzip,
    /// `text/html`
    Html,
    /// `image/jpeg`
    Jpeg,
    /// `application/json`
    Json,
    /// `application/octet-stream`
    OctetStream,
    /// `application/pdf`
    Pdf,
    /// `image/png`
    Png,
    /// `text/plain`
    Text,
    /// `application/xml`
    Xml,
    /// `application/zip`
    Zip,
}

/// Media kinds whose response bodies are read as opaque bytes rather
/// than text. Single source of truth for decode dispatch.
const BINARY_KINDS: [ContentType; 8] = [
    ContentType::Bmp,
    ContentType::Gif,
    ContentType::Jpeg,
    ContentType::Png,
    ContentType::Gzip,
    ContentType::OctetStream,
    ContentType::Pdf,
    ContentType::Zip,
];

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Anything => "*/*",
            ContentType::Bmp => "image/bmp",
            ContentType::Css => "text/css",
            ContentType::Csv => "text/csv",
            ContentType::FormUrlEncoded => "application/x-www-form-urlencoded",
            ContentType::Gif => "image/gif",
            ContentType::Gzip => "application/gzip",
            ContentType::Html => "text/html",
            ContentType::Jpeg => "image/jpeg",
            ContentType::Json => "application/json",
            ContentType::OctetStream => "application/octet-stream",
            ContentType::Pdf => "application/pdf",
            ContentType::Png => "image/png",
            ContentType::Text => "text/plain",
            ContentType::Xml => "application/xml",
            ContentType::Zip => "application/zip",
        }
    }

    /// Match a header value against the known media types, ignoring
    /// ASCII case and any parameters after `;`.
    pub fn from_value(value: &str) -> Option<Self> {
        let essence = value.split(';').next().unwrap_or_default().trim();
        [
            ContentType::Anything,
            ContentType::Bmp,
            ContentType::Css,
            ContentType::Csv,
            ContentType::FormUrlEncoded,
            ContentType::Gif,
            ContentType::Gzip,
            ContentType::Html,
            ContentType::Jpeg,
            ContentType::Json,
            ContentType::OctetStream,
            ContentType::Pdf,
            ContentType::Png,
            ContentType::Text,
            ContentType::Xml,
            ContentType::Zip,
        ]
        .into_iter()
        .find(|candidate| essence.eq_ignore_ascii_case(candidate.as_str()))
    }

    /// Whether bodies of this type are opaque binary payloads.
    pub fn is_binary(&self) -> bool {
        BINARY_KINDS.contains(self)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ParseContentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_value(s).ok_or_else(|| ParseContentTypeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_value_exact() {
        assert_eq!(
            ContentType::from_value("application/json"),
            Some(ContentType::Json)
        );
        assert_eq!(ContentType::from_value("*/*"), Some(ContentType::Anything));
        assert_eq!(ContentType::from_value("text/unknown"), None);
    }

    #[test]
    fn from_value_ignores_case_and_parameters() {
        assert_eq!(
            ContentType::from_value("Application/JSON; charset=utf-8"),
            Some(ContentType::Json)
        );
        assert_eq!(
            ContentType::from_value("IMAGE/PNG"),
            Some(ContentType::Png)
        );
    }

    #[test]
    fn binary_table() {
        for kind in [
            ContentType::Bmp,
            ContentType::Gif,
            ContentType::Jpeg,
            ContentType::Png,
            ContentType::Gzip,
            ContentType::OctetStream,
            ContentType::Pdf,
            ContentType::Zip,
        ] {
            assert!(kind.is_binary(), "{kind} should be binary");
        }
        assert!(!ContentType::Json.is_binary());
        assert!(!ContentType::Text.is_binary());
        assert!(!ContentType::Html.is_binary());
    }

    #[test]
    fn parse_round_trip() {
        let parsed: ContentType = "application/x-www-form-urlencoded".parse().unwrap();
        assert_eq!(parsed, ContentType::FormUrlEncoded);
        assert!("application/vnd.unknown".parse::<ContentType>().is_err());
    }
}
