//! Queryable wrapper over a decoded search response.
//!
//! [`SolrResponse`] owns the raw JSON document for its whole lifetime,
//! classifies its result shape once at construction, and exposes accessor
//! methods over the documents and the derived facet views. Derived views
//! are computed lazily on first access and memoized per instance; the raw
//! document is never mutated.

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::document::{Document, FieldValue};
use crate::error::{Result, SunspearError};
use crate::response::facet::{
    FacetFieldCounts, FacetKey, FacetRangeCounts, decode_facet_fields, decode_facet_ranges,
};
use crate::response::pivot::{FacetPivots, decode_facet_pivots};
use crate::response::shape::{GroupList, ResultShape};

/// Header block present on every well-formed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseHeader {
    /// Engine status code.
    #[serde(default)]
    pub status: i64,
    /// Query execution time in milliseconds.
    #[serde(rename = "QTime")]
    pub q_time: i64,
    /// Echoed request parameters, when the engine returns them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// A search response, classified once at construction.
///
/// Construction extracts the header and the working document collection;
/// everything else is decoded on demand. Each instance owns its raw
/// document and its memoized views and shares nothing with other
/// instances.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sunspear::response::SolrResponse;
///
/// let res = SolrResponse::from_value(json!({
///     "responseHeader": {"status": 0, "QTime": 12},
///     "response": {"numFound": 2, "docs": [
///         {"id": "1", "price": "100"},
///         {"id": "2", "price": "250"}
///     ]}
/// }))?;
///
/// assert_eq!(res.results_count(), 2);
/// assert_eq!(res.num_found()?, 2);
/// # Ok::<(), sunspear::SunspearError>(())
/// ```
#[derive(Debug)]
pub struct SolrResponse {
    /// The raw decoded response document.
    raw: Value,
    /// Extracted response header.
    header: ResponseHeader,
    /// Result shape, fixed at construction.
    shape: ResultShape,
    /// Flat `<field>_ngroups` / `<field>_matches` metadata for grouped
    /// responses; empty otherwise.
    group_metadata: IndexMap<String, u64>,
    facets: OnceCell<FacetFieldCounts>,
    facet_ranges: OnceCell<FacetRangeCounts>,
    facet_pivots: OnceCell<FacetPivots>,
}

impl SolrResponse {
    /// Wrap a decoded response document.
    ///
    /// Fails with [`SunspearError::MalformedResponse`] when `responseHeader`
    /// is absent or unusable (`QTime` is required).
    pub fn from_value(raw: Value) -> Result<SolrResponse> {
        let header_value = raw
            .get("responseHeader")
            .ok_or_else(|| SunspearError::malformed("responseHeader missing from the response"))?;
        let header: ResponseHeader = serde_json::from_value(header_value.clone())
            .map_err(|e| SunspearError::malformed(format!("responseHeader is not usable: {e}")))?;

        let (shape, group_metadata) = classify(&raw)?;
        debug!(
            shape = shape.name(),
            query_time = header.q_time,
            "classified search response"
        );

        Ok(SolrResponse {
            raw,
            header,
            shape,
            group_metadata,
            facets: OnceCell::new(),
            facet_ranges: OnceCell::new(),
            facet_pivots: OnceCell::new(),
        })
    }

    /// Parse a JSON response body and wrap it.
    pub fn from_json(input: &str) -> Result<SolrResponse> {
        let raw: Value = serde_json::from_str(input)?;
        SolrResponse::from_value(raw)
    }

    /// Get the extracted response header.
    pub fn header(&self) -> &ResponseHeader {
        &self.header
    }

    /// Get the query execution time in milliseconds.
    pub fn query_time(&self) -> i64 {
        self.header.q_time
    }

    /// Get the raw response document.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Get the result shape.
    pub fn shape(&self) -> &ResultShape {
        &self.shape
    }

    /// Check whether this response is grouped.
    pub fn is_grouped(&self) -> bool {
        matches!(self.shape, ResultShape::Grouped { .. })
    }

    /// Get the total number of documents matching the query.
    ///
    /// Fails with [`SunspearError::MissingField`] for grouped or empty
    /// responses, or when the response carried no `numFound`; zero is a
    /// legitimate count and is never used as a stand-in for absence.
    pub fn num_found(&self) -> Result<u64> {
        match &self.shape {
            ResultShape::Ungrouped {
                num_found: Some(n), ..
            } => Ok(*n),
            _ => Err(SunspearError::missing_field("numFound")),
        }
    }

    /// Get the number of documents returned in this response.
    ///
    /// This counts the working document collection, not the total match
    /// count reported by [`SolrResponse::num_found`].
    pub fn results_count(&self) -> usize {
        self.shape.documents().count()
    }

    /// Collect the working document collection, in response order.
    pub fn documents(&self) -> Vec<&Document> {
        self.shape.documents().collect()
    }

    /// Collect the values of `field` across all documents that contain it.
    ///
    /// Documents missing the field are silently skipped; no placeholder is
    /// inserted. Values are not deduplicated.
    pub fn field_values(&self, field: &str) -> Vec<&FieldValue> {
        self.shape
            .documents()
            .filter_map(|doc| doc.get_field(field))
            .collect()
    }

    /// Get the value of `field` from the first document that contains it.
    ///
    /// Fails with [`SunspearError::FieldNotFound`] when no document does.
    pub fn first_field_value(&self, field: &str) -> Result<&FieldValue> {
        self.shape
            .documents()
            .find_map(|doc| doc.get_field(field))
            .ok_or_else(|| {
                SunspearError::field_not_found(format!(
                    "'{field}' is not present in any result document"
                ))
            })
    }

    /// Get the next cursor mark for forward-only pagination.
    ///
    /// Fails with [`SunspearError::MissingField`] when the query did not
    /// ask for a cursor.
    pub fn cursor_mark(&self) -> Result<&str> {
        self.raw
            .get("nextCursorMark")
            .and_then(Value::as_str)
            .ok_or_else(|| SunspearError::missing_field("nextCursorMark"))
    }

    /// Re-serialize the original raw response as JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.raw)?)
    }

    /// Get the flat group metadata mapping.
    ///
    /// Keys are `<field>_ngroups` and `<field>_matches` for every grouped
    /// field that reported the respective count; the mapping is empty for
    /// ungrouped and empty responses.
    pub fn group_metadata(&self) -> &IndexMap<String, u64> {
        &self.group_metadata
    }

    /// Get the per-field group lists of a grouped response.
    ///
    /// Fails with [`SunspearError::MissingField`] for ungrouped or empty
    /// responses.
    pub fn grouped_fields(&self) -> Result<&IndexMap<String, GroupList>> {
        match &self.shape {
            ResultShape::Grouped { fields } => Ok(fields),
            _ => Err(SunspearError::missing_field("grouped")),
        }
    }

    /// Get the decoded facet counts, keyed by facet field.
    ///
    /// Decoded from `facet_counts.facet_fields` on first call and memoized;
    /// fails with [`SunspearError::NoFacetInformation`] when that section
    /// is absent or wrong-typed.
    pub fn facets(&self) -> Result<&FacetFieldCounts> {
        self.facets.get_or_try_init(|| decode_facet_fields(&self.raw))
    }

    /// Get the decoded range facet counts, keyed by range field.
    ///
    /// Decoded from `facet_counts.facet_ranges` on first call and memoized;
    /// fails with [`SunspearError::NoFacetInformation`] when that section
    /// is absent or wrong-typed.
    pub fn facet_ranges(&self) -> Result<&FacetRangeCounts> {
        self.facet_ranges
            .get_or_try_init(|| decode_facet_ranges(&self.raw))
    }

    /// Get the decoded facet pivots, keyed by field-spec string.
    ///
    /// Decoded from `facet_counts.facet_pivot` on first call and memoized.
    /// Unlike the classic client, which silently returned nothing, absence
    /// of the section fails with [`SunspearError::NoFacetInformation`] for
    /// consistency with the other facet accessors.
    pub fn facet_pivots(&self) -> Result<&FacetPivots> {
        self.facet_pivots
            .get_or_try_init(|| decode_facet_pivots(&self.raw))
    }

    /// Collect the facet counts for `field`, in facet order.
    ///
    /// Fails with [`SunspearError::FieldNotFound`] when the field is absent
    /// from the facet output; failures from [`SolrResponse::facets`]
    /// propagate.
    pub fn facet_values(&self, field: &str) -> Result<Vec<i64>> {
        Ok(self.facet_counts_for(field)?.values().copied().collect())
    }

    /// Collect the facet keys for `field`, in facet order.
    ///
    /// `facet_keys(f)[i]` maps to `facet_values(f)[i]` in the underlying
    /// facet mapping. Fails identically to [`SolrResponse::facet_values`].
    pub fn facet_keys(&self, field: &str) -> Result<Vec<&FacetKey>> {
        Ok(self.facet_counts_for(field)?.keys().collect())
    }

    fn facet_counts_for(&self, field: &str) -> Result<&IndexMap<FacetKey, i64>> {
        self.facets()?.get(field).ok_or_else(|| {
            SunspearError::field_not_found(format!("'{field}' is not present in the facet output"))
        })
    }
}

/// Classify the top-level shape and extract the working documents.
///
/// Dispatch order matches the response contract: a `response` key wins,
/// then `grouped`, then the empty shape. Digit-string normalization is
/// applied to every extracted document here, before the wrapper is ever
/// observable.
fn classify(raw: &Value) -> Result<(ResultShape, IndexMap<String, u64>)> {
    if let Some(response) = raw.get("response") {
        let docs_value = response
            .get("docs")
            .ok_or_else(|| SunspearError::malformed("response.docs missing"))?;
        let mut docs: Vec<Document> = serde_json::from_value(docs_value.clone())
            .map_err(|e| SunspearError::malformed(format!("response.docs is not usable: {e}")))?;
        for doc in &mut docs {
            doc.coerce_numeric_strings();
        }
        let num_found = response.get("numFound").and_then(Value::as_u64);
        return Ok((ResultShape::Ungrouped { docs, num_found }, IndexMap::new()));
    }

    if let Some(grouped) = raw.get("grouped") {
        let grouped = grouped
            .as_object()
            .ok_or_else(|| SunspearError::malformed("grouped is not a mapping"))?;
        let mut fields = IndexMap::with_capacity(grouped.len());
        let mut metadata = IndexMap::new();
        for (field, value) in grouped {
            let mut list: GroupList = serde_json::from_value(value.clone()).map_err(|e| {
                SunspearError::malformed(format!("grouped field '{field}' is not usable: {e}"))
            })?;
            for group in &mut list.groups {
                for doc in &mut group.doclist.docs {
                    doc.coerce_numeric_strings();
                }
            }
            if let Some(ngroups) = list.ngroups {
                metadata.insert(format!("{field}_ngroups"), ngroups);
            }
            if let Some(matches) = list.matches {
                metadata.insert(format!("{field}_matches"), matches);
            }
            fields.insert(field.clone(), list);
        }
        return Ok((ResultShape::Grouped { fields }, metadata));
    }

    Ok((ResultShape::Empty, IndexMap::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_deserialization() {
        let header: ResponseHeader = serde_json::from_value(json!({
            "status": 0,
            "QTime": 42,
            "params": {"q": "*:*"}
        }))
        .unwrap();

        assert_eq!(header.status, 0);
        assert_eq!(header.q_time, 42);
        assert!(header.params.is_some());
    }

    #[test]
    fn test_header_requires_qtime() {
        let result: std::result::Result<ResponseHeader, _> =
            serde_json::from_value(json!({"status": 0}));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_header_is_malformed() {
        let err = SolrResponse::from_value(json!({"response": {"docs": []}})).unwrap_err();
        assert!(matches!(err, SunspearError::MalformedResponse(_)));
    }

    #[test]
    fn test_shape_dispatch_order_prefers_response() {
        // A document carrying both keys is classified by the first match.
        let res = SolrResponse::from_value(json!({
            "responseHeader": {"status": 0, "QTime": 1},
            "response": {"numFound": 1, "docs": [{"id": "1"}]},
            "grouped": {"f": {"matches": 0, "groups": []}}
        }))
        .unwrap();

        assert!(!res.is_grouped());
        assert_eq!(res.results_count(), 1);
    }
}
