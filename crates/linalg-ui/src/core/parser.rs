//! Field parsing
//!
//! Every operation field holds JSON text such as `[1,2,3]` or
//! `[[1,2],[3,4]]`. Parsing never panics; numeric shape is left to the
//! backend.

use serde_json::Value;
use thiserror::Error;

/// Failure to turn a field's text into a JSON value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Field is blank after trimming
    #[error("Please fill in all required fields.")]
    Empty,
    /// Field is not valid JSON
    #[error("Invalid input format. Please use JSON format like [1,2,3] or [[1,2],[3,4]]")]
    Malformed(String),
}

impl ParseError {
    /// Decoder message for malformed input, if any
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Malformed(detail) => Some(detail),
        }
    }
}

/// Parses a field's raw text as JSON
pub fn parse_field(raw: &str) -> Result<Value, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    serde_json::from_str(raw).map_err(|e| ParseError::Malformed(e.to_string()))
}

/// Returns true if the field has no content after trimming
#[must_use]
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}
