//! Backend transports
//!
//! The controller talks to the backend only through [`Transport`]: one
//! JSON `POST` per call, answered by a decoded JSON body or a
//! transport-level failure. Domain errors travel inside the body.
//!
//! # Implementations
//!
//! - [`HttpTransport`] - native, `reqwest` (feature `http`)
//! - `FetchTransport` - browser `fetch` (feature `wasm`)
//! - [`MockTransport`] - scripted replies with request capture

#[cfg(feature = "http")]
mod http;
mod mock;

#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use mock::{CapturedRequest, MockReply, MockTransport};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Transport-level failure; the message is what the user sees after
/// "Connection error: "
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP client failure
    #[cfg(feature = "http")]
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    /// Request could not be sent or was refused
    #[error("{0}")]
    Rejected(String),
    /// Response body is not JSON
    #[error("{0}")]
    Decode(String),
}

/// One JSON request, one JSON response
///
/// Futures need not be `Send`: the controller runs on a single logical
/// thread and browser futures are not `Send`.
#[async_trait(?Send)]
pub trait Transport {
    /// POSTs `body` to `path` and decodes the response body as JSON
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError>;
}
