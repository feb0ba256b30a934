//! Document structure for search response results.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::field_value::FieldValue;

/// A single result document returned by a query.
///
/// Documents are schema-less collections of field values, preserved in the
/// order the response listed them. Field values keep their JSON types apart
/// from the digit-string normalization applied at ingestion (see
/// [`Document::coerce_numeric_strings`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    /// The field values for this document
    fields: IndexMap<String, FieldValue>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Document {
            fields: IndexMap::new(),
        }
    }

    /// Create a document from a decoded JSON object.
    pub fn from_object(map: Map<String, Value>) -> Self {
        Document {
            fields: map
                .into_iter()
                .map(|(key, val)| (key, FieldValue::from(val)))
                .collect(),
        }
    }

    /// Add a field value to the document.
    pub fn add_field<S: Into<String>>(&mut self, name: S, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Get a field value from the document.
    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Check if the document has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get all field names, in document order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(|s| s.as_str()).collect()
    }

    /// Get all field values.
    pub fn fields(&self) -> &IndexMap<String, FieldValue> {
        &self.fields
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Replace every top-level text field consisting solely of decimal
    /// digits with the equivalent integer.
    ///
    /// This reproduces a lossy quirk of the classic client: `"007"` becomes
    /// `7` (leading zeros lost) and the numeric-looking-string vs. number
    /// distinction is unrecoverable afterwards. Strings nested inside arrays
    /// or objects are left alone. A digit run that overflows `i64` stays
    /// text.
    pub fn coerce_numeric_strings(&mut self) {
        for value in self.fields.values_mut() {
            if let FieldValue::Text(s) = value {
                if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                    if let Ok(n) = s.parse::<i64>() {
                        *value = FieldValue::Integer(n);
                    }
                }
            }
        }
    }
}
