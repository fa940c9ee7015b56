//! Light/dark theme with injected persistence

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Storage key for the saved theme
pub const THEME_KEY: &str = "matrixpy-theme";

/// Page theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light palette
    #[default]
    Light,
    /// Dark palette
    Dark,
}

impl Theme {
    /// Stored representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// True for the dark palette
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ThemeStoreError::UnknownTheme(other.to_string())),
        }
    }
}

/// Errors from theme storage
#[derive(Debug, Error)]
pub enum ThemeStoreError {
    /// Stored value is not a theme name
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
    /// Backing file could not be read or written
    #[error("theme storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Backing file is not a JSON object of strings
    #[error("theme storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    /// Host storage refused the operation
    #[error("theme storage unavailable: {0}")]
    Unavailable(String),
}

/// Key/value persistence for the theme flag
pub trait ThemeStore {
    /// Reads a stored value
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value
    fn set(&mut self, key: &str, value: &str) -> Result<(), ThemeStoreError>;
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    values: HashMap<String, String>,
}

impl MemoryThemeStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ThemeStoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object on disk
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    /// Uses `path`; the file is created on first write
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, ThemeStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ThemeStore for FileThemeStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_all() {
            Ok(mut values) => values.remove(key),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable theme store");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ThemeStoreError> {
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());
        std::fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

/// Applies and persists the theme
#[derive(Debug)]
pub struct ThemeManager<S> {
    store: S,
    current: Theme,
}

impl<S: ThemeStore> ThemeManager<S> {
    /// Starts from the saved theme, else from the host preference
    pub fn init(store: S, prefers_dark: bool) -> Self {
        let saved = store.get(THEME_KEY).and_then(|s| s.parse::<Theme>().ok());
        let current = saved.unwrap_or(if prefers_dark { Theme::Dark } else { Theme::Light });
        let mut manager = Self { store, current };
        if let Err(e) = manager.apply(current) {
            tracing::warn!(error = %e, "theme not persisted");
        }
        manager
    }

    /// Current theme
    #[must_use]
    pub const fn current(&self) -> Theme {
        self.current
    }

    /// Sets and persists `theme`
    pub fn apply(&mut self, theme: Theme) -> Result<(), ThemeStoreError> {
        self.current = theme;
        self.store.set(THEME_KEY, theme.as_str())
    }

    /// Flips the theme, returning the new one
    pub fn toggle(&mut self) -> Result<Theme, ThemeStoreError> {
        let next = self.current.toggled();
        self.apply(next)?;
        Ok(next)
    }

    /// Backing store
    pub fn store(&self) -> &S {
        &self.store
    }
}
