//! Error types for fletch.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

/// Boxed error value produced by a caller-supplied error transform.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Caller-supplied conversion from a normalized error to an
/// application-specific error value. Runs after normalization, before
/// the error is raised.
pub type ErrorTransform = Arc<dyn Fn(ErrorResponse) -> BoxError + Send + Sync>;

/// Normalized failure for a completed transport call.
///
/// Built identically whether the failure came from a non-success status
/// or from a failed read of the error body, so calling code has one
/// shape to destructure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP {status} {status_text}: {message}")]
pub struct ErrorResponse {
    /// Best-effort raw body text; `None` when the body could not be read.
    pub data: Option<String>,
    /// Raw body text, or empty when unavailable.
    pub message: String,
    /// Response headers flattened to a key/value mapping.
    pub headers: BTreeMap<String, String>,
    pub status: u16,
    pub status_text: String,
    /// The resolved request URL.
    pub url: String,
}

/// Failure classification for a terminal verb call.
#[derive(Debug, Error)]
pub enum Error<E>
where
    E: std::error::Error,
{
    /// The transport call itself failed before producing a response.
    /// Propagated unnormalized; no status or headers are available.
    #[error(transparent)]
    Transport(E),

    /// A response arrived with a non-success status.
    #[error(transparent)]
    Status(ErrorResponse),

    /// A non-success response mapped through the configured error
    /// transform.
    #[error(transparent)]
    Transformed(BoxError),
}

impl<E: std::error::Error> Error<E> {
    /// Status code of the normalized response, when one was obtained.
    pub fn status(&self) -> Option<u16> {
        self.response().map(|response| response.status)
    }

    /// The normalized error response, unless the failure was
    /// transport-level or already transformed away.
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            Error::Status(response) => Some(response),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown media type: {0}")]
pub struct ParseContentTypeError(pub String);
