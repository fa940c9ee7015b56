//! Scripted transport with request capture

use super::{Transport, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// What the mock answers for a path
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Decoded JSON body
    Json(Value),
    /// Transport rejection with this message
    Reject(String),
    /// Body that fails to decode
    Raw(String),
}

/// A request the mock received
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    /// Endpoint path
    pub path: String,
    /// JSON body
    pub body: Value,
}

/// Transport double: replies per path and records every call
///
/// Clones share the capture log, so a test can keep a handle while the
/// controller owns the transport.
#[derive(Debug, Clone)]
pub struct MockTransport {
    routes: HashMap<String, MockReply>,
    fallback: MockReply,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Mock that rejects unknown paths
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            fallback: MockReply::Reject("no route".to_string()),
            captured: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer `path` with `reply`
    #[must_use]
    pub fn route(mut self, path: &str, reply: MockReply) -> Self {
        self.routes.insert(path.to_string(), reply);
        self
    }

    /// Answer `path` with a JSON body
    #[must_use]
    pub fn respond(self, path: &str, body: Value) -> Self {
        self.route(path, MockReply::Json(body))
    }

    /// Answer every unrouted path with `reply`
    #[must_use]
    pub fn fallback(mut self, reply: MockReply) -> Self {
        self.fallback = reply;
        self
    }

    /// Requests received so far
    #[must_use]
    pub fn captured(&self) -> Vec<CapturedRequest> {
        self.captured
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests received
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.captured
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        self.captured
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedRequest {
                path: path.to_string(),
                body: body.clone(),
            });

        match self.routes.get(path).unwrap_or(&self.fallback) {
            MockReply::Json(value) => Ok(value.clone()),
            MockReply::Reject(message) => Err(TransportError::Rejected(message.clone())),
            MockReply::Raw(text) => {
                serde_json::from_str(text).map_err(|e| TransportError::Decode(e.to_string()))
            }
        }
    }
}
