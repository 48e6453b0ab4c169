//! Immutable, chainable HTTP request builder with normalized responses
//! and errors.
//!
//! Chain configuration methods onto [`http`], finish with a verb, and
//! get back either a [`Response`] or an [`Error`] — one uniform shape
//! for every outcome, regardless of call site:
//!
//! ```no_run
//! use fletch::http;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let response = http("https://api.example.com/items")
//!     .bearer("my-token")
//!     .query([("page", 2)])
//!     .get()
//!     .await?;
//! println!("{}: {:?}", response.status, response.data);
//! # Ok(())
//! # }
//! ```
//!
//! Every chain method returns a new builder; the receiver is never
//! mutated, so one builder can serve as a template for many concurrent
//! requests.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - `data` - Immutable configuration and value types
//! - `core` - Pure transformations (URL assembly, body encoding and
//!   decoding)
//! - `effects` - The [`Transport`] trait abstraction and the
//!   dispatching builder
//!
//! The transport itself is a pluggable capability: the default
//! [`ReqwestTransport`] is feature-gated behind the default-on
//! `reqwest` feature, and anything implementing [`Transport`] can stand
//! in for it.

mod core;
mod data;
mod effects;
mod error;

pub use data::{
    Body, Config, ContentType, Method, Query, QueryParams, QueryValue, RequestBody,
    RequestParts, Response,
};
pub use effects::{Http, Transport, TransportResponse};
pub use error::{BoxError, Error, ErrorResponse, ErrorTransform, ParseContentTypeError};

#[cfg(feature = "reqwest")]
pub use effects::{ReqwestResponse, ReqwestTransport, http};
