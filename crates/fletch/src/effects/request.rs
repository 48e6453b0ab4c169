//! Request builder and dispatch pipeline.

use std::sync::Arc;

use tracing::debug;

use crate::core;
use crate::data::{
    Body, Config, ContentType, Method, Query, RequestBody, Response, header,
};
use crate::effects::transport::{Transport, TransportResponse};
use crate::error::{BoxError, Error, ErrorResponse, ErrorTransform};

#[cfg(feature = "reqwest")]
use crate::effects::transport::ReqwestTransport;

/// Immutable, chainable request builder.
///
/// Every chain method returns a new `Http` carrying a new [`Config`];
/// the receiver is never modified. A builder can therefore be shared as
/// a template for many independent, concurrently issued requests.
///
/// Terminal verb methods perform exactly one transport call and settle
/// exactly once: with a normalized [`Response`] on success, or with an
/// [`Error`] otherwise.
pub struct Http<C> {
    transport: Arc<C>,
    config: Config,
}

impl<C> Clone for Http<C> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: self.config.clone(),
        }
    }
}

impl<C: Transport> Http<C> {
    /// Build against an explicit transport and initial configuration.
    ///
    /// The `Accept: application/json` default is applied here, once,
    /// and only when no casing of `accept` is already present. It is
    /// never reapplied on derived instances.
    pub fn with_transport(transport: C, config: Config) -> Self {
        Self {
            transport: Arc::new(transport),
            config: config.with_default_accept(),
        }
    }

    /// The configuration snapshot this builder carries.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn derive(&self, overlay: impl FnOnce(&mut Config)) -> Self {
        let mut config = self.config.clone();
        overlay(&mut config);
        Self {
            transport: Arc::clone(&self.transport),
            config,
        }
    }

    /// Set `Accept` to the comma-space-joined media types. With no
    /// types the configuration is left unchanged.
    pub fn accept(&self, types: impl IntoIterator<Item = ContentType>) -> Self {
        let joined = types
            .into_iter()
            .map(|media_type| media_type.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.derive(|config| {
            if !joined.is_empty() {
                config.headers.insert(header::ACCEPT.to_string(), joined);
            }
        })
    }

    /// Attach `Authorization: Bearer <token>`. An empty or absent token
    /// is a safe no-op that still yields a distinct instance.
    pub fn bearer<'a>(&self, token: impl Into<Option<&'a str>>) -> Self {
        match token.into() {
            Some(token) if !token.is_empty() => self.derive(|config| {
                config
                    .headers
                    .insert(header::AUTHORIZATION.to_string(), format!("Bearer {token}"));
            }),
            _ => self.derive(|_| {}),
        }
    }

    /// Store the request body as-is; encoding happens at dispatch time
    /// according to the negotiated content type.
    pub fn body(&self, content: impl Into<RequestBody>) -> Self {
        let content = content.into();
        self.derive(|config| config.body = Some(content))
    }

    /// Set the `Content-Type` header.
    pub fn content_type(&self, media_type: ContentType) -> Self {
        self.derive(|config| {
            config.headers.insert(
                header::CONTENT_TYPE.to_string(),
                media_type.as_str().to_string(),
            );
        })
    }

    /// Convert normalized errors into an application-specific error
    /// before they are raised. Without a transform, errors propagate
    /// un-transformed.
    pub fn error_transform(
        &self,
        transform: impl Fn(ErrorResponse) -> BoxError + Send + Sync + 'static,
    ) -> Self {
        let transform: ErrorTransform = Arc::new(transform);
        self.derive(|config| config.error_transform = Some(transform))
    }

    /// Set an arbitrary header, overwriting any prior value stored
    /// under that exact key.
    pub fn header(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let (name, value) = (name.into(), value.into());
        self.derive(|config| {
            config.headers.insert(name, value);
        })
    }

    /// Store the query string: a mapping, a pre-encoded string, or a
    /// [`QueryParams`](crate::QueryParams) collection (see [`Query`]).
    pub fn query(&self, query: impl Into<Query>) -> Self {
        let encoded = query.into().into_query_string();
        self.derive(|config| config.query = Some(encoded))
    }

    /// Replace the base URL.
    pub fn url(&self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.derive(|config| config.url = Some(url))
    }

    pub async fn delete(&self) -> Result<Response, Error<C::Error>> {
        self.dispatch(Method::Delete).await
    }

    pub async fn get(&self) -> Result<Response, Error<C::Error>> {
        self.dispatch(Method::Get).await
    }

    pub async fn head(&self) -> Result<Response, Error<C::Error>> {
        self.dispatch(Method::Head).await
    }

    pub async fn options(&self) -> Result<Response, Error<C::Error>> {
        self.dispatch(Method::Options).await
    }

    pub async fn patch(&self) -> Result<Response, Error<C::Error>> {
        self.dispatch(Method::Patch).await
    }

    pub async fn post(&self) -> Result<Response, Error<C::Error>> {
        self.dispatch(Method::Post).await
    }

    pub async fn put(&self) -> Result<Response, Error<C::Error>> {
        self.dispatch(Method::Put).await
    }

    async fn dispatch(&self, method: Method) -> Result<Response, Error<C::Error>> {
        let request = core::assemble(&self.config, method);
        debug!(method = %request.method, url = %request.url, "dispatching request");
        let response = self
            .transport
            .send(request)
            .await
            .map_err(Error::Transport)?;
        if response.ok() {
            self.normalize_success(response).await
        } else {
            Err(self.normalize_failure(response).await)
        }
    }

    async fn normalize_success(
        &self,
        response: C::Response,
    ) -> Result<Response, Error<C::Error>> {
        let status = response.status();
        let status_text = response.status_text();
        let url = response.url();
        let headers = response.headers();
        let binary = core::header_ignore_case(&headers, header::CONTENT_TYPE)
            .is_some_and(core::is_binary_media);
        let data = if binary {
            Body::Bytes(response.bytes().await.map_err(Error::Transport)?)
        } else {
            core::decode_text(response.text().await.map_err(Error::Transport)?)
        };
        debug!(status, url = %url, "request settled");
        Ok(Response {
            data,
            headers,
            status,
            status_text,
            url,
        })
    }

    async fn normalize_failure(&self, response: C::Response) -> Error<C::Error> {
        let status = response.status();
        let status_text = response.status_text();
        let url = response.url();
        let headers = response.headers();
        debug!(status, url = %url, "request settled with error status");
        let normalized = match response.text().await {
            Ok(text) => ErrorResponse {
                data: Some(text.clone()),
                message: text,
                headers,
                status,
                status_text,
                url,
            },
            // The error body itself could not be read; keep the
            // response identity with no data.
            Err(_) => ErrorResponse {
                data: None,
                message: String::new(),
                headers,
                status,
                status_text,
                url,
            },
        };
        match &self.config.error_transform {
            Some(transform) => Error::Transformed(transform(normalized)),
            None => Error::Status(normalized),
        }
    }
}

#[cfg(feature = "reqwest")]
impl Http<ReqwestTransport> {
    /// Builder over a fresh [`ReqwestTransport`] from an initial
    /// configuration. Use this for the no-URL construction path.
    pub fn new(config: Config) -> Self {
        Self::with_transport(ReqwestTransport::new(), config)
    }
}

/// Start a builder chain for `url` using the default reqwest transport.
#[cfg(feature = "reqwest")]
pub fn http(url: impl Into<String>) -> Http<ReqwestTransport> {
    Http::new(Config {
        url: Some(url.into()),
        ..Config::default()
    })
}
