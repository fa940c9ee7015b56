//! Response interpretation and result formatting
//!
//! A decoded body carrying a truthy `error` field is a domain failure,
//! whatever the endpoint. Anything else is read for the operation's
//! success fields and formatted for display.

use super::Operation;
use serde::Serialize;
use serde_json::{Number, Value};
use thiserror::Error;

/// Outcome of one operation: exactly one of success or failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum OperationResult {
    /// Formatted success message
    Success(String),
    /// Error message, shown verbatim
    Failure(String),
}

impl OperationResult {
    /// The message to display
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(msg) | Self::Failure(msg) => msg,
        }
    }

    /// True for failures
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Heading shown above the message
    #[must_use]
    pub const fn label(&self) -> &'static str {
        if self.is_error() {
            "Error"
        } else {
            "Result"
        }
    }
}

/// A decodable body that lacks the fields an operation needs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseShapeError {
    /// Field absent
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    /// Field present but not a number
    #[error("field `{0}` is not a number")]
    NotANumber(&'static str),
    /// Field present but not an array of numbers
    #[error("field `{0}` is not a numeric vector")]
    NotAVector(&'static str),
}

/// Turns a decoded response body into a result for `operation`
#[must_use]
pub fn interpret(operation: Operation, body: &Value) -> OperationResult {
    if let Some(message) = domain_error(body) {
        return OperationResult::Failure(message);
    }
    match render_success(operation, body) {
        Ok(message) => OperationResult::Success(message),
        Err(e) => OperationResult::Failure(format!("Unexpected response: {e}")),
    }
}

fn domain_error(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

fn render_success(operation: Operation, body: &Value) -> Result<String, ResponseShapeError> {
    let message = match operation {
        Operation::UnitVector => {
            format!("Unit Vector: {}", fixed_vector(body, "unit_vector")?)
        }
        Operation::AngleBetween => {
            format!("Angle: {}° (degrees)", format_fixed(number(body, "angle")?, 2))
        }
        Operation::Orthogonality => {
            let dot = format_fixed(number(body, "dot_product")?, 4);
            let verdict = if truthy(body.get("orthogonal")) {
                "✓ Yes, vectors are orthogonal"
            } else {
                "✗ No, vectors are not orthogonal"
            };
            format!("{verdict} (dot product: {dot})")
        }
        Operation::Parallelism => {
            let cross = fixed_vector(body, "cross_product")?;
            let verdict = if truthy(body.get("parallel")) {
                "✓ Yes, vectors are parallel"
            } else {
                "✗ No, vectors are not parallel"
            };
            format!("{verdict} (cross product: {cross})")
        }
        Operation::LinearCombination => {
            format!("Linear Combination: {}", fixed_vector(body, "result")?)
        }
        Operation::SolveSystem => format!("Solution x: {}", fixed_vector(body, "solution")?),
        Operation::Transpose => format!("Transpose: {}", dump(field(body, "transpose")?)),
        Operation::Multiply => format!("Product: {}", dump(field(body, "product")?)),
    };
    Ok(message)
}

fn field<'a>(body: &'a Value, name: &'static str) -> Result<&'a Value, ResponseShapeError> {
    body.get(name).ok_or(ResponseShapeError::MissingField(name))
}

fn number(body: &Value, name: &'static str) -> Result<f64, ResponseShapeError> {
    field(body, name)?
        .as_f64()
        .ok_or(ResponseShapeError::NotANumber(name))
}

fn fixed_vector(body: &Value, name: &'static str) -> Result<String, ResponseShapeError> {
    let items = field(body, name)?
        .as_array()
        .ok_or(ResponseShapeError::NotAVector(name))?;
    let parts = items
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|x| format_fixed(x, 4))
                .ok_or(ResponseShapeError::NotAVector(name))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("[{}]", parts.join(", ")))
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => false,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|x| x != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Fixed-point formatting with `decimals` digits after the point.
///
/// Negative zero prints as zero and non-finite values print as `NaN`,
/// `Infinity` and `-Infinity`.
#[must_use]
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.decimals$}")
}

/// Compact structural dump of a matrix; integral floats print without a
/// fractional part.
fn dump(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(dump).collect();
            format!("[{}]", parts.join(","))
        }
        Value::Number(n) => dump_number(n),
        other => other.to_string(),
    }
}

fn dump_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(x) if x == 0.0 => "0".to_string(),
        Some(x) if (1e-6..1e21).contains(&x.abs()) => format!("{x}"),
        Some(x) => exponent_form(x),
        None => n.to_string(),
    }
}

/// `1e-7`, `1.5e+21`: shortest mantissa with a signed exponent
fn exponent_form(x: f64) -> String {
    let text = format!("{x:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}
