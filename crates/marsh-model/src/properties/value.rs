//! Property value types and conversion traits.
//!
//! This module provides:
//! - [`PropertyValue`] - The dynamic value type for properties
//! - [`FromPropertyValue`] - Trait for extracting typed values from PropertyValue

use serde::{Deserialize, Serialize};

// ============================================================================
// Property Value Enum
// ============================================================================

/// A property value as written in YAML or on the command line.
///
/// Every property is numeric; strings and booleans are kept so that a
/// mistyped value is reported as a type mismatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Integer value (i64).
    Integer(i64),
    /// Floating point value (f64).
    Float(f64),
    /// String value.
    String(String),
    /// Boolean value.
    Bool(bool),
}

impl PropertyValue {
    /// Parse a command-line literal: integer, then float, then bool, else string.
    pub fn parse_literal(s: &str) -> Self {
        let s = s.trim();
        if let Ok(v) = s.parse::<i64>() {
            return PropertyValue::Integer(v);
        }
        if let Ok(v) = s.parse::<f64>() {
            return PropertyValue::Float(v);
        }
        match s {
            "true" => PropertyValue::Bool(true),
            "false" => PropertyValue::Bool(false),
            _ => PropertyValue::String(s.to_string()),
        }
    }

    /// Convert to i64 if possible.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(v) => Some(*v),
            PropertyValue::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    /// Convert to f64 if possible.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            PropertyValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Integer(v) => write!(f, "{}", v),
            PropertyValue::Float(v) => write!(f, "{}", v),
            PropertyValue::String(v) => write!(f, "{}", v),
            PropertyValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Integer(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(v)
    }
}

// ============================================================================
// Typed extraction
// ============================================================================

/// Trait for types that can be extracted from a PropertyValue.
pub trait FromPropertyValue: Sized {
    /// Extract a value, returning `None` if the conversion fails.
    fn from_property_value(value: &PropertyValue) -> Option<Self>;
}

impl FromPropertyValue for i64 {
    fn from_property_value(value: &PropertyValue) -> Option<Self> {
        value.as_i64()
    }
}

impl FromPropertyValue for f64 {
    fn from_property_value(value: &PropertyValue) -> Option<Self> {
        value.as_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_value_conversions() {
        let v = PropertyValue::Integer(42);
        assert_eq!(v.as_i64(), Some(42));
        assert_eq!(v.as_f64(), Some(42.0));

        let v = PropertyValue::Float(3.5);
        assert_eq!(v.as_f64(), Some(3.5));
        assert_eq!(v.as_i64(), None);

        let v = PropertyValue::String("hello".to_string());
        assert_eq!(v.as_i64(), None);
        assert_eq!(v.as_f64(), None);
        assert_eq!(PropertyValue::Bool(true).as_f64(), None);
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(PropertyValue::parse_literal("5"), PropertyValue::Integer(5));
        assert_eq!(PropertyValue::parse_literal("0.25"), PropertyValue::Float(0.25));
        assert_eq!(PropertyValue::parse_literal("1e-3"), PropertyValue::Float(0.001));
        assert_eq!(PropertyValue::parse_literal("true"), PropertyValue::Bool(true));
        assert_eq!(
            PropertyValue::parse_literal(" mean "),
            PropertyValue::String("mean".to_string())
        );
    }
}
