//! Raw, loosely typed arguments accepted at the API boundary.
//!
//! Vectors are built from heterogeneous input (numbers, numeric strings, holes)
//! and indexed by values that may be absent, negative or fractional. These types
//! carry such arguments unchanged until the operation validates them.

use crate::error::{VelaError, VelaResult};
use serde_json::Value;
use std::fmt;

/// One raw construction element, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Numeric value, stored as-is.
    Number(f64),
    /// String that still has to be parsed.
    Text(String),
    /// Missing element (null or undefined).
    Absent,
    /// Non-numeric, non-string value. Holds the kind name for diagnostics.
    Opaque(String),
}

impl Scalar {
    /// Short name of the variant, used in log fields and error messages.
    pub fn kind(&self) -> &str {
        match self {
            Scalar::Number(_) => "number",
            Scalar::Text(_) => "string",
            Scalar::Absent => "absent",
            Scalar::Opaque(kind) => kind.as_str(),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Scalar::Absent)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{:?}", s),
            Scalar::Absent => write!(f, "absent"),
            Scalar::Opaque(kind) => write!(f, "<{}>", kind),
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Number(f64::from(value))
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Number(f64::from(value))
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Number(f64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value as f64)
    }
}

impl From<usize> for Scalar {
    fn from(value: usize) -> Self {
        Scalar::Number(value as f64)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Absent, Into::into)
    }
}

impl From<Value> for Scalar {
    fn from(value: Value) -> Self {
        Scalar::from(&value)
    }
}

impl From<&Value> for Scalar {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Scalar::Absent,
            Value::Number(n) => n
                .as_f64()
                .map_or_else(|| Scalar::Opaque("number".to_string()), Scalar::Number),
            Value::String(s) => Scalar::Text(s.clone()),
            Value::Bool(_) => Scalar::Opaque("boolean".to_string()),
            Value::Array(_) => Scalar::Opaque("array".to_string()),
            Value::Object(_) => Scalar::Opaque("object".to_string()),
        }
    }
}

/// Parses the leading decimal integer of `text`, ignoring anything after it.
///
/// An optional sign is accepted. Returns None when no digit follows the sign.
pub(crate) fn parse_integer_prefix(text: &str, trim_whitespace: bool) -> Option<f64> {
    let text = if trim_whitespace { text.trim_start() } else { text };
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude: f64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parses the whole of `text` as a decimal float.
///
/// Infinity is only accepted spelled `Infinity` (optionally signed); Rust's own
/// `inf`, `infinity` and `NaN` spellings are rejected.
pub(crate) fn parse_float(text: &str, trim_whitespace: bool) -> Option<f64> {
    let text = if trim_whitespace { text.trim() } else { text };
    let unsigned = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    if unsigned == "Infinity" {
        return Some(if text.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }
    if !unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }
    text.parse().ok()
}

/// A raw component index, before validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    Absent,
    Signed(i64),
    Unsigned(usize),
    Real(f64),
}

impl Position {
    /// Validates the index against a vector of `dimensions` components.
    ///
    /// Absent, negative and NaN indices are errors. Indices at or past the end
    /// yield `Ok(None)`; that check runs before the integrality check, so a
    /// fractional index past the end is a miss rather than an error.
    pub(crate) fn locate(self, dimensions: usize) -> VelaResult<Option<usize>> {
        match self {
            Position::Absent => Err(VelaError::InvalidIndex("index can be neither null nor undefined".to_string())),
            Position::Signed(i) if i < 0 => Err(VelaError::InvalidIndex(format!("index {} is negative", i))),
            Position::Signed(i) => Ok(usize::try_from(i).ok().filter(|&i| i < dimensions)),
            Position::Unsigned(i) => Ok(Some(i).filter(|&i| i < dimensions)),
            Position::Real(x) if x.is_nan() => Err(VelaError::InvalidIndex("index is NaN".to_string())),
            Position::Real(x) if x < 0.0 => Err(VelaError::InvalidIndex(format!("index {} is negative", x))),
            Position::Real(x) if x >= dimensions as f64 => Ok(None),
            Position::Real(x) if x.fract() != 0.0 => Err(VelaError::InvalidIndex(format!("index {} is not an integer", x))),
            Position::Real(x) => Ok(Some(x as usize)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Absent => write!(f, "absent"),
            Position::Signed(i) => write!(f, "{}", i),
            Position::Unsigned(i) => write!(f, "{}", i),
            Position::Real(x) => write!(f, "{}", x),
        }
    }
}

impl From<usize> for Position {
    fn from(value: usize) -> Self {
        Position::Unsigned(value)
    }
}

impl From<u32> for Position {
    fn from(value: u32) -> Self {
        Position::Unsigned(value as usize)
    }
}

impl From<i32> for Position {
    fn from(value: i32) -> Self {
        Position::Signed(i64::from(value))
    }
}

impl From<i64> for Position {
    fn from(value: i64) -> Self {
        Position::Signed(value)
    }
}

impl From<isize> for Position {
    fn from(value: isize) -> Self {
        Position::Signed(value as i64)
    }
}

impl From<f64> for Position {
    fn from(value: f64) -> Self {
        Position::Real(value)
    }
}

impl From<f32> for Position {
    fn from(value: f32) -> Self {
        Position::Real(f64::from(value))
    }
}

impl<T: Into<Position>> From<Option<T>> for Position {
    fn from(value: Option<T>) -> Self {
        value.map_or(Position::Absent, Into::into)
    }
}
