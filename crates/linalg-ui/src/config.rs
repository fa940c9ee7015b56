//! Client configuration
//!
//! Defaults reproduce the page's timings. A YAML file may override any
//! subset of keys.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default backend location (the development server)
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Errors loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying error
        source: std::io::Error,
    },
    /// File is not valid YAML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend base URL; endpoint paths are appended
    pub base_url: String,
    /// How long a notification stays visible
    pub notification_duration_ms: u64,
    /// Exit animation length before a notification is removed
    pub notification_exit_ms: u64,
    /// How long a blank field keeps its error marker
    pub error_marker_ms: u64,
    /// Notification text is cut to this many characters
    pub notification_max_chars: usize,
    /// Half-width of the 3D plot cube
    pub plot_range: f64,
    /// Pixels per unit on the 2D canvas
    pub canvas_scale: f64,
    /// Canvas width in pixels
    pub canvas_width: f64,
    /// Canvas height in pixels
    pub canvas_height: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            notification_duration_ms: 3500,
            notification_exit_ms: 300,
            error_marker_ms: 1000,
            notification_max_chars: 80,
            plot_range: 10.0,
            canvas_scale: 30.0,
            canvas_width: 800.0,
            canvas_height: 500.0,
        }
    }
}

impl ClientConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the notification visible time
    #[must_use]
    pub const fn with_notification_duration_ms(mut self, ms: u64) -> Self {
        self.notification_duration_ms = ms;
        self
    }

    /// Set the error marker time
    #[must_use]
    pub const fn with_error_marker_ms(mut self, ms: u64) -> Self {
        self.error_marker_ms = ms;
        self
    }

    /// Set the canvas width
    #[must_use]
    pub const fn with_canvas_width(mut self, width: f64) -> Self {
        self.canvas_width = width;
        self
    }

    /// Parse from YAML text; missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        let base_url = config.base_url.clone();
        Ok(config.with_base_url(base_url))
    }

    /// Load from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Notification visible time
    #[must_use]
    pub const fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }

    /// Notification exit time
    #[must_use]
    pub const fn notification_exit(&self) -> Duration {
        Duration::from_millis(self.notification_exit_ms)
    }

    /// Error marker time
    #[must_use]
    pub const fn error_marker(&self) -> Duration {
        Duration::from_millis(self.error_marker_ms)
    }
}
