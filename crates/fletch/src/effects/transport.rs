//! Transport capability: the external collaborator that performs the
//! actual network call.

use std::collections::BTreeMap;
use std::future::Future;

use bytes::Bytes;

use crate::data::RequestParts;

/// Asynchronous HTTP transport abstraction.
///
/// The builder performs exactly one `send` per terminal verb call and
/// never retries. Implementations handle their own connection
/// management, TLS, proxying and timeouts.
///
/// # Implementations
///
/// - [`ReqwestTransport`]: production implementation using `reqwest`
/// - Mock implementations for testing
pub trait Transport: Send + Sync {
    /// Error type for transport-level failures.
    type Error: std::error::Error + Send + Sync + 'static;
    /// Response handle produced by a completed call.
    type Response: TransportResponse<Error = Self::Error>;

    /// Perform one HTTP call.
    ///
    /// # Errors
    ///
    /// Fails when the call could not complete at the network level
    /// (DNS failure, connection error, invalid URL). A response with a
    /// non-success status is not a transport error.
    fn send(
        &self,
        request: RequestParts,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;
}

/// A response obtained from a [`Transport`].
///
/// Body readers consume the handle: each response body is read at most
/// once, either as text or as bytes.
pub trait TransportResponse: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether the status code is in the success range.
    fn ok(&self) -> bool;
    fn status(&self) -> u16;
    fn status_text(&self) -> String;
    /// The resolved request URL.
    fn url(&self) -> String;
    /// Response headers flattened to a key/value mapping.
    fn headers(&self) -> BTreeMap<String, String>;

    /// Read the full body as text.
    fn text(self) -> impl Future<Output = Result<String, Self::Error>> + Send;
    /// Read the full body as opaque bytes.
    fn bytes(self) -> impl Future<Output = Result<Bytes, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::data::Method;

    /// Production transport backed by a shared [`reqwest::Client`].
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self {
                client: reqwest::Client::new(),
            }
        }

        /// Wrap an existing client, keeping its pool and TLS settings.
        pub fn from_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    fn to_reqwest_method(method: Method) -> reqwest::Method {
        match method {
            Method::Delete => reqwest::Method::DELETE,
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
            Method::Options => reqwest::Method::OPTIONS,
            Method::Patch => reqwest::Method::PATCH,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        }
    }

    impl Transport for ReqwestTransport {
        type Error = reqwest::Error;
        type Response = ReqwestResponse;

        async fn send(&self, request: RequestParts) -> Result<Self::Response, Self::Error> {
            let mut builder = self
                .client
                .request(to_reqwest_method(request.method), request.url.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }
            let response = builder.send().await?;
            Ok(ReqwestResponse { response })
        }
    }

    /// Response handle for [`ReqwestTransport`].
    #[derive(Debug)]
    pub struct ReqwestResponse {
        response: reqwest::Response,
    }

    impl TransportResponse for ReqwestResponse {
        type Error = reqwest::Error;

        fn ok(&self) -> bool {
            self.response.status().is_success()
        }

        fn status(&self) -> u16 {
            self.response.status().as_u16()
        }

        fn status_text(&self) -> String {
            self.response
                .status()
                .canonical_reason()
                .unwrap_or_default()
                .to_string()
        }

        fn url(&self) -> String {
            self.response.url().to_string()
        }

        fn headers(&self) -> BTreeMap<String, String> {
            self.response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect()
        }

        async fn text(self) -> Result<String, Self::Error> {
            self.response.text().await
        }

        async fn bytes(self) -> Result<Bytes, Self::Error> {
            self.response.bytes().await
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::{ReqwestResponse, ReqwestTransport};
