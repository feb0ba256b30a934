//! Queryable views over a decoded search response.
//!
//! Two layers live here: the [`SolrResponse`] wrapper, which classifies the
//! response shape and extracts the working documents at construction, and
//! the facet/pivot decoders, which rebuild Solr's flattened facet encodings
//! into ordered nested mappings on first access.

pub mod facet;
pub mod pivot;
pub mod response;
pub mod shape;

pub use self::facet::{FacetFieldCounts, FacetKey, FacetRangeCounts};
pub use self::pivot::{FacetPivots, PivotEntry, PivotNode, PivotTree};
pub use self::response::{ResponseHeader, SolrResponse};
pub use self::shape::{DocList, GroupEntry, GroupList, ResultShape};
