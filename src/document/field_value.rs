//! Field value types for response documents.
//!
//! This module defines the [`FieldValue`] enum which mirrors the JSON value
//! shapes a search response can carry in its document fields. Responses are
//! schema-less from this crate's point of view, so every JSON type has a
//! counterpart here.
//!
//! # Type Conversion
//!
//! The `FieldValue` enum provides conversion methods for extracting typed
//! values:
//!
//! ```
//! use sunspear::document::FieldValue;
//!
//! let text_value = FieldValue::Text("hello".to_string());
//! assert_eq!(text_value.as_text(), Some("hello"));
//!
//! let int_value = FieldValue::Integer(42);
//! assert_eq!(int_value.as_integer(), Some(42));
//!
//! let bool_value = FieldValue::Boolean(true);
//! assert_eq!(bool_value.as_boolean(), Some(true));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Represents a value for a field in a response document.
///
/// The variants cover the full JSON value space. Serialization is untagged,
/// so a `FieldValue` round-trips through JSON as the plain value it wraps.
///
/// # Examples
///
/// ```
/// use sunspear::document::FieldValue;
///
/// let text = FieldValue::Text("Rust Programming".to_string());
/// let number = FieldValue::Integer(2024);
/// let price = FieldValue::Float(39.99);
/// let active = FieldValue::Boolean(true);
/// let tags = FieldValue::Array(vec![FieldValue::Text("new".to_string())]);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
    /// Multi-valued field
    Array(Vec<FieldValue>),
    /// Nested document value
    Object(IndexMap<String, FieldValue>),
}

impl FieldValue {
    /// Get the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer content, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the numeric content as a float, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get the boolean content, if this is a boolean value.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the elements, if this is a multi-valued field.
    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Check whether this is an explicit null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    FieldValue::Float(f)
                } else {
                    FieldValue::Text(n.to_string())
                }
            }
            Value::String(s) => FieldValue::Text(s),
            Value::Array(items) => {
                FieldValue::Array(items.into_iter().map(FieldValue::from).collect())
            }
            Value::Object(map) => FieldValue::Object(
                map.into_iter()
                    .map(|(key, val)| (key, FieldValue::from(val)))
                    .collect(),
            ),
        }
    }
}
