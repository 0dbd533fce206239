//! Shape-tolerant decoding of indicator field values
//!
//! Indicator fields arrive in one of three accepted shapes: a bare
//! number, a bare string, or a wrapped literal `{"@value": ...}`.
//! Every other shape decodes to `Absent`, so malformed nodes degrade
//! to the documented defaults instead of failing extraction.

use serde_json::Value;

const VALUE_KEY: &str = "@value";

/// Decoded scalar from an indicator node field
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Literal {
    Absent,
    Number(f64),
    Text(String),
}

impl Literal {
    /// Decode a field value, unwrapping `{"@value": ...}` one level.
    pub(crate) fn decode(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => Literal::Number(n.as_f64().unwrap_or(0.0)),
            Some(Value::String(s)) => Literal::Text(s.clone()),
            Some(Value::Object(map)) => match map.get(VALUE_KEY) {
                Some(Value::Number(n)) => Literal::Number(n.as_f64().unwrap_or(0.0)),
                Some(Value::String(s)) => Literal::Text(s.clone()),
                _ => Literal::Absent,
            },
            _ => Literal::Absent,
        }
    }

    /// Non-negative integer view of the literal.
    ///
    /// Numbers truncate toward zero; strings are read as leading
    /// base-10 digits. Negative or unparsable input gives `None`.
    pub(crate) fn as_count(&self) -> Option<u32> {
        match self {
            Literal::Absent => None,
            Literal::Number(n) if *n >= 0.0 && *n <= u32::MAX as f64 => Some(n.trunc() as u32),
            Literal::Number(_) => None,
            Literal::Text(s) => parse_count(s),
        }
    }

    /// String view of the literal, for label fields.
    pub(crate) fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Parse the leading base-10 digits of a string ("12" and "12 buckets"
/// both give 12). No leading digits means no value.
pub(crate) fn parse_count(text: &str) -> Option<u32> {
    let trimmed = text.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if end == 0 {
        return None;
    }
    trimmed[..end].parse().ok()
}
