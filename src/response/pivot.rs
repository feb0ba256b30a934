//! Recursive facet pivot decoding.
//!
//! Solr encodes a multi-field pivot (`facet.pivot=cat,price`) as a list of
//! entries `{value, count, pivot?}` where the optional `pivot` list carries
//! the next field's breakdown restricted to that value. Decoding rebuilds
//! the nested mapping form, one level per field in the pivot spec, to any
//! depth the input carries.
//!
//! Raw JSON is parsed into [`PivotEntry`] values in a single pass first;
//! the recursive decoder then walks those entries without ever touching
//! JSON typing mid-traversal.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::error::{Result, SunspearError};
use crate::response::facet::{FacetKey, facet_section};

/// One pivot entry, decoded from raw JSON before any recursion.
#[derive(Debug, Clone, PartialEq)]
pub enum PivotEntry {
    /// Terminal entry: a value with its document count.
    Leaf {
        /// The pivot field's value.
        value: FacetKey,
        /// Documents counted under this value.
        count: i64,
    },
    /// Entry carrying the next pivot level restricted to this value.
    Node {
        /// The pivot field's value.
        value: FacetKey,
        /// The next field's breakdown under this value.
        children: Vec<PivotEntry>,
    },
}

impl PivotEntry {
    /// Decode one raw pivot entry object.
    pub(crate) fn from_value(entry: &Value) -> Result<PivotEntry> {
        let obj = entry
            .as_object()
            .ok_or_else(|| SunspearError::malformed("pivot entry is not an object"))?;
        let value = obj
            .get("value")
            .map(FacetKey::from_value)
            .ok_or_else(|| SunspearError::malformed("pivot entry has no value"))?;

        match obj.get("pivot") {
            Some(Value::Array(children)) => {
                let children = children
                    .iter()
                    .map(PivotEntry::from_value)
                    .collect::<Result<Vec<_>>>()?;
                Ok(PivotEntry::Node { value, children })
            }
            Some(_) => Err(SunspearError::malformed(format!(
                "pivot sub-list under '{value}' is not a list"
            ))),
            None => {
                let count = obj.get("count").and_then(Value::as_i64).ok_or_else(|| {
                    SunspearError::malformed(format!(
                        "pivot entry '{value}' has no integer count"
                    ))
                })?;
                Ok(PivotEntry::Leaf { value, count })
            }
        }
    }
}

/// A decoded pivot tree level: pivot value → leaf count or nested level.
pub type PivotTree = IndexMap<FacetKey, PivotNode>;

/// Decoded pivots keyed by their field-spec string (e.g. `"cat,price"`).
pub type FacetPivots = IndexMap<String, PivotTree>;

/// One decoded position in a pivot tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PivotNode {
    /// Leaf count for a pivot value at the innermost queried field.
    Count(i64),
    /// Breakdown of the next pivot field under this value.
    Nested(PivotTree),
}

impl PivotNode {
    /// Get the leaf count, if this node is a leaf.
    pub fn as_count(&self) -> Option<i64> {
        match self {
            PivotNode::Count(count) => Some(*count),
            _ => None,
        }
    }

    /// Get the nested level, if this node has one.
    pub fn as_nested(&self) -> Option<&PivotTree> {
        match self {
            PivotNode::Nested(tree) => Some(tree),
            _ => None,
        }
    }
}

/// Decode a list of entries into one level of the pivot tree.
///
/// Entries are processed independently; a repeated value keeps the last
/// entry seen. Recursion terminates at leaf entries, so depth is bounded
/// only by the input data.
fn decode_level(entries: &[PivotEntry]) -> PivotTree {
    let mut level = PivotTree::with_capacity(entries.len());
    for entry in entries {
        match entry {
            PivotEntry::Leaf { value, count } => {
                level.insert(value.clone(), PivotNode::Count(*count));
            }
            PivotEntry::Node { value, children } => {
                level.insert(value.clone(), PivotNode::Nested(decode_level(children)));
            }
        }
    }
    level
}

/// Decode `facet_counts.facet_pivot` from the raw response.
pub(crate) fn decode_facet_pivots(raw: &Value) -> Result<FacetPivots> {
    let pivots = facet_section(raw, "facet_pivot")?;
    let mut out = FacetPivots::with_capacity(pivots.len());
    for (spec, value) in pivots {
        let raw_entries = value.as_array().ok_or_else(|| {
            SunspearError::malformed(format!("pivot spec '{spec}' is not an entry list"))
        })?;
        let entries = raw_entries
            .iter()
            .map(PivotEntry::from_value)
            .collect::<Result<Vec<_>>>()?;
        out.insert(spec.clone(), decode_level(&entries));
        trace!(spec = %spec, entries = entries.len(), "decoded facet pivot");
    }
    Ok(out)
}
