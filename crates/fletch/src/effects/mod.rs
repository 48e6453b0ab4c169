//! Effects layer: the transport abstraction and the dispatching builder.

mod request;
mod transport;

pub use request::Http;
pub use transport::{Transport, TransportResponse};

#[cfg(feature = "reqwest")]
pub use request::http;
#[cfg(feature = "reqwest")]
pub use transport::{ReqwestResponse, ReqwestTransport};
