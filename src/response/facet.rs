//! Facet count decoding from the flattened response encodings.
//!
//! Solr returns each field's facet as a single flat list alternating value
//! and count (`["red", 3, "blue", 5, ...]`), and each range facet's buckets
//! as the same encoding under a `counts` key. The decoders here rebuild
//! ordered value-to-count mappings from those lists, preserving source
//! order.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{Result, SunspearError};

/// Key of a decoded facet bucket or pivot value.
///
/// Facet values are usually strings, but range bucket starts and pivot
/// values over numeric fields arrive as numbers. Anything else (floats,
/// booleans, null) degrades to its JSON text, since map keys must be
/// hashable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetKey {
    /// Integer-valued facet key
    Integer(i64),
    /// Text facet key
    Text(String),
}

impl FacetKey {
    /// Build a key from a raw JSON value.
    pub fn from_value(value: &Value) -> FacetKey {
        match value {
            Value::String(s) => FacetKey::Text(s.clone()),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FacetKey::Integer(i),
                None => FacetKey::Text(n.to_string()),
            },
            other => FacetKey::Text(other.to_string()),
        }
    }

    /// Get the text content, if this is a text key.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FacetKey::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer content, if this is an integer key.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FacetKey::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for FacetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetKey::Integer(i) => write!(f, "{i}"),
            FacetKey::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for FacetKey {
    fn from(s: &str) -> Self {
        FacetKey::Text(s.to_string())
    }
}

impl From<i64> for FacetKey {
    fn from(i: i64) -> Self {
        FacetKey::Integer(i)
    }
}

/// Ordered facet counts per field: field name → facet value → count.
pub type FacetFieldCounts = IndexMap<String, IndexMap<FacetKey, i64>>;

/// Ordered range bucket counts per field: field name → bucket → count.
pub type FacetRangeCounts = IndexMap<String, IndexMap<FacetKey, i64>>;

/// Decode one flat alternating `[value, count, value, count, ...]` list.
///
/// Pairs are processed in source order, so insertion order equals list
/// order. A repeated value keeps the last count seen; a trailing value with
/// no count is dropped.
pub(crate) fn decode_flat_counts(field: &str, list: &[Value]) -> Result<IndexMap<FacetKey, i64>> {
    let mut counts = IndexMap::with_capacity(list.len() / 2);
    for pair in list.chunks_exact(2) {
        let key = FacetKey::from_value(&pair[0]);
        let count = pair[1].as_i64().ok_or_else(|| {
            SunspearError::malformed(format!(
                "facet count for '{key}' in field '{field}' is not an integer"
            ))
        })?;
        counts.insert(key, count);
    }
    Ok(counts)
}

/// Decode `facet_counts.facet_fields` from the raw response.
pub(crate) fn decode_facet_fields(raw: &Value) -> Result<FacetFieldCounts> {
    let fields = facet_section(raw, "facet_fields")?;
    let mut out = FacetFieldCounts::with_capacity(fields.len());
    for (field, value) in fields {
        let list = value.as_array().ok_or_else(|| {
            SunspearError::malformed(format!("facet field '{field}' is not a flat list"))
        })?;
        out.insert(field.clone(), decode_flat_counts(field, list)?);
        trace!(field = %field, "decoded facet field");
    }
    Ok(out)
}

/// Decode `facet_counts.facet_ranges` from the raw response.
pub(crate) fn decode_facet_ranges(raw: &Value) -> Result<FacetRangeCounts> {
    let ranges = facet_section(raw, "facet_ranges")?;
    let mut out = FacetRangeCounts::with_capacity(ranges.len());
    for (field, value) in ranges {
        let counts = value.get("counts").and_then(Value::as_array).ok_or_else(|| {
            SunspearError::malformed(format!("range facet '{field}' has no counts list"))
        })?;
        out.insert(field.clone(), decode_flat_counts(field, counts)?);
        trace!(field = %field, "decoded range facet");
    }
    Ok(out)
}

/// Look up a sub-section of `facet_counts`, requiring both levels to be
/// mappings.
pub(crate) fn facet_section<'a>(raw: &'a Value, section: &str) -> Result<&'a Map<String, Value>> {
    raw.get("facet_counts")
        .and_then(Value::as_object)
        .and_then(|counts| counts.get(section))
        .and_then(Value::as_object)
        .ok_or_else(|| SunspearError::no_facets(format!("{section} missing from the response")))
}
