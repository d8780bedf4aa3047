//! Boundary for loosely typed input such as decoded JSON.
//!
//! A personnummer arrives either as text or as an integer. Anything that is
//! not a scalar at all (`null`, arrays, objects) is a caller bug and is
//! reported as a [`TypeError`], separate from the domain [`ParseError`].
//! Other scalars (booleans, fractional or negative numbers) are simply not
//! a valid number.
//!
//! [`ParseError`]: crate::ParseError

use serde_json::Value;

/// Contract violation: the value handed over cannot hold a personnummer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, got {found}")]
pub struct TypeError {
    expected: &'static str,
    found:    &'static str,
}

impl TypeError {
    pub(crate) const fn new(expected: &'static str, found: &'static str) -> Self {
        Self { expected, found }
    }

    /// Description of the value kind that was received
    pub const fn found(&self) -> &'static str {
        self.found
    }
}

/// A dynamic value sorted by how the parser should treat it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scalar<'a> {
    Text(&'a str),
    Integer(u64),
    /// A scalar that can never be a personnummer
    Unsupported(&'static str),
}

pub(crate) fn classify(value: &Value) -> Result<Scalar<'_>, TypeError> {
    match value {
        Value::String(s) => Ok(Scalar::Text(s)),
        Value::Number(n) => Ok(n
            .as_u64()
            .map_or(Scalar::Unsupported("a negative or fractional number"), Scalar::Integer)),
        Value::Bool(_) => Ok(Scalar::Unsupported(value_kind(value))),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(TypeError::new(
            "a string or an integer",
            value_kind(value),
        )),
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_scalars() {
        assert_eq!(classify(&json!("121212-1212")).unwrap(), Scalar::Text("121212-1212"));
        assert_eq!(classify(&json!(1212121212_u64)).unwrap(), Scalar::Integer(1_212_121_212));
        assert!(matches!(classify(&json!(true)).unwrap(), Scalar::Unsupported(_)));
        assert!(matches!(classify(&json!(false)).unwrap(), Scalar::Unsupported(_)));
        assert!(matches!(classify(&json!(-5)).unwrap(), Scalar::Unsupported(_)));
        assert!(matches!(classify(&json!(12.5)).unwrap(), Scalar::Unsupported(_)));
    }

    #[test]
    fn test_classify_non_scalars() {
        for value in [Value::Null, json!([]), json!([1, 2]), json!({}), json!({ "a": 1 })] {
            let err = classify(&value).unwrap_err();
            assert_eq!(err.found(), value_kind(&value));
            assert!(err.to_string().starts_with("expected a string or an integer"));
        }
    }
}
