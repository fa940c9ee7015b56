//! Browser integration
//!
//! Compiled only with the `wasm` feature. The controller logic is shared
//! with native builds; this module supplies the browser seams.

mod browser;

pub use browser::BrowserCalculator;

use crate::theme::{ThemeStore, ThemeStoreError};
use crate::transport::{Transport, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response, Storage};

/// `fetch`-based transport
#[derive(Debug, Clone)]
pub struct FetchTransport {
    base_url: String,
}

impl FetchTransport {
    /// Transport for the given base URL; empty means same origin
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

fn js_error(value: &JsValue) -> TransportError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    TransportError::Rejected(message)
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let url = format!("{}{path}", self.base_url);
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&JsValue::from_str(&body.to_string()));

        let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| js_error(&e))?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| js_error(&e))?;

        let window = web_sys::window()
            .ok_or_else(|| TransportError::Rejected("window is not available".to_string()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error(&e))?
            .dyn_into()
            .map_err(|e| js_error(&e))?;

        let text = JsFuture::from(response.text().map_err(|e| js_error(&e))?)
            .await
            .map_err(|e| js_error(&e))?
            .as_string()
            .unwrap_or_default();
        serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Theme store backed by `localStorage`
#[derive(Debug, Clone, Default)]
pub struct LocalStorageThemeStore {
    storage: Option<Storage>,
}

impl LocalStorageThemeStore {
    /// Store for the current window; inert when storage is blocked
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: web_sys::window().and_then(|w| w.local_storage().ok().flatten()),
        }
    }
}

impl ThemeStore for LocalStorageThemeStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ThemeStoreError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| ThemeStoreError::Unavailable("localStorage".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| ThemeStoreError::Unavailable(format!("{e:?}")))
    }
}

/// True when the host asks for a dark colour scheme
#[must_use]
pub fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|m| m.matches())
}
