//! `reqwest` transport for native builds

use super::{Transport, TransportError};
use async_trait::async_trait;
use serde_json::Value;

/// HTTP client for the calculator backend
///
/// No timeout is configured: a request that never settles keeps its
/// button busy, matching the page.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for the given base URL
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the backend (e.g., `http://127.0.0.1:5000`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a transport with a custom reqwest client (for proxies, TLS roots, etc.)
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.url_for(path);
        let resp = self.client.post(&url).json(body).send().await?;
        let status = resp.status();
        tracing::debug!(%url, status = status.as_u16(), "backend responded");

        // The body is decoded whatever the status: backends report domain
        // errors in JSON, and a non-JSON error page is a decode failure.
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        let transport = HttpTransport::new("http://localhost:5000");
        assert_eq!(transport.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_transport_strips_trailing_slash() {
        let transport = HttpTransport::new("http://localhost:5000/");
        assert_eq!(transport.url_for("/unit_vector"), "http://localhost:5000/unit_vector");
    }

    #[test]
    fn test_transport_with_custom_client() {
        let http = reqwest::Client::builder().build().unwrap();
        let transport = HttpTransport::with_client("http://example.com", http);
        assert_eq!(transport.base_url(), "http://example.com");
    }
}
