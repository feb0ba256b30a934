//! Result shape classification for a search response.
//!
//! A response carries its result documents in one of three mutually
//! exclusive top-level shapes: a plain document list under `response`, a
//! per-field grouped structure under `grouped`, or neither. The shape is
//! fixed once at construction as a [`ResultShape`] so the "exactly one shape
//! active" invariant is carried by the type instead of re-checked at every
//! accessor.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::document::{Document, FieldValue};

/// The documents nested under one group entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocList {
    /// Total matches for this group, when the engine reports it.
    #[serde(rename = "numFound", default)]
    pub num_found: Option<u64>,
    /// Documents returned for this group.
    pub docs: Vec<Document>,
}

/// One group of a grouped result, keyed by the grouping field's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEntry {
    /// The grouping field's value for this group (null for the null group).
    #[serde(rename = "groupValue", default)]
    pub group_value: FieldValue,
    /// The nested document list for this group.
    pub doclist: DocList,
}

/// All groups returned for one grouped field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupList {
    /// Number of distinct groups, when `group.ngroups` was requested.
    #[serde(default)]
    pub ngroups: Option<u64>,
    /// Number of matching documents across all groups.
    #[serde(default)]
    pub matches: Option<u64>,
    /// The group entries, in response order.
    pub groups: Vec<GroupEntry>,
}

/// Top-level shape of a response, determined once at construction and never
/// re-evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultShape {
    /// A plain document list from `response.docs`, with the total-match
    /// count when the response carried one.
    Ungrouped {
        /// The result documents, in response order.
        docs: Vec<Document>,
        /// `response.numFound`, when present.
        num_found: Option<u64>,
    },
    /// Grouped results, one [`GroupList`] per grouped field. Every grouped
    /// field keeps its own group list; fields never overwrite each other.
    Grouped {
        /// Group lists keyed by grouping field, in response order.
        fields: IndexMap<String, GroupList>,
    },
    /// Neither `response` nor `grouped` was present.
    Empty,
}

impl ResultShape {
    /// Iterate the working document collection for this shape.
    ///
    /// Ungrouped responses yield their document list; grouped responses
    /// yield every document nested in every field's group doclists, in
    /// field then group order; empty responses yield nothing.
    pub fn documents(&self) -> Box<dyn Iterator<Item = &Document> + '_> {
        match self {
            ResultShape::Ungrouped { docs, .. } => Box::new(docs.iter()),
            ResultShape::Grouped { fields } => Box::new(
                fields
                    .values()
                    .flat_map(|list| list.groups.iter())
                    .flat_map(|group| group.doclist.docs.iter()),
            ),
            ResultShape::Empty => Box::new(std::iter::empty()),
        }
    }

    /// Short name of the shape, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ResultShape::Ungrouped { .. } => "ungrouped",
            ResultShape::Grouped { .. } => "grouped",
            ResultShape::Empty => "empty",
        }
    }
}
