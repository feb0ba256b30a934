//! Integration tests for facet, range facet, and facet pivot decoding.

use serde_json::{Value, json};
use sunspear::error::{Result, SunspearError};
use sunspear::response::{FacetKey, SolrResponse};

// ============================================================
// Shared fixtures
// ============================================================

fn faceted_response() -> Value {
    json!({
        "responseHeader": {"status": 0, "QTime": 9},
        "response": {"numFound": 4, "start": 0, "docs": [
            {"id": "1", "product_name": "Lorem"},
            {"id": "2", "product_name": "ipsum"}
        ]},
        "facet_counts": {
            "facet_queries": {},
            "facet_fields": {
                "facet_test": ["Lorem", 9, "ipsum", 6, "amet", 14, "dolor", 10, "sit", 11],
                "color": ["red", 3, "blue", 5, "red", 1]
            },
            "facet_ranges": {
                "price": {
                    "counts": [0, 3, 10, 5, 20, 7],
                    "gap": 10,
                    "start": 0,
                    "end": 30
                }
            },
            "facet_pivot": {
                "facet_test,price": [
                    {"value": "Lorem", "count": 2, "pivot": [
                        {"value": 89, "count": 1},
                        {"value": 75, "count": 1}
                    ]},
                    {"value": "ipsum", "count": 1, "pivot": [
                        {"value": 53, "count": 1}
                    ]},
                    {"value": "amet", "count": 1}
                ]
            }
        }
    })
}

fn bare_response() -> Value {
    json!({
        "responseHeader": {"status": 0, "QTime": 3},
        "response": {"numFound": 0, "docs": []}
    })
}

// ============================================================
// Facet fields
// ============================================================

#[test]
fn test_facets_decode_in_source_order() -> Result<()> {
    let res = SolrResponse::from_value(faceted_response())?;
    let facets = res.facets()?;

    let counts = &facets["facet_test"];
    let keys: Vec<String> = counts.keys().map(|k| k.to_string()).collect();
    assert_eq!(keys, vec!["Lorem", "ipsum", "amet", "dolor", "sit"]);
    assert_eq!(counts[&FacetKey::from("amet")], 14);
    Ok(())
}

#[test]
fn test_facets_last_seen_wins_on_duplicates() -> Result<()> {
    let res = SolrResponse::from_value(faceted_response())?;
    let counts = &res.facets()?["color"];

    assert_eq!(counts.len(), 2);
    assert_eq!(counts[&FacetKey::from("red")], 1);
    assert_eq!(counts[&FacetKey::from("blue")], 5);
    let keys: Vec<String> = counts.keys().map(|k| k.to_string()).collect();
    assert_eq!(keys, vec!["red", "blue"]);
    Ok(())
}

#[test]
fn test_facets_missing_section_fails() -> Result<()> {
    let res = SolrResponse::from_value(bare_response())?;

    let err = res.facets().unwrap_err();
    assert!(matches!(err, SunspearError::NoFacetInformation(_)));
    Ok(())
}

#[test]
fn test_facets_wrong_typed_section_fails() -> Result<()> {
    let res = SolrResponse::from_value(json!({
        "responseHeader": {"status": 0, "QTime": 3},
        "response": {"numFound": 0, "docs": []},
        "facet_counts": {"facet_fields": ["not", "a", "mapping"]}
    }))?;

    let err = res.facets().unwrap_err();
    assert!(matches!(err, SunspearError::NoFacetInformation(_)));
    Ok(())
}

#[test]
fn test_facets_odd_tail_is_dropped() -> Result<()> {
    let res = SolrResponse::from_value(json!({
        "responseHeader": {"status": 0, "QTime": 3},
        "response": {"numFound": 0, "docs": []},
        "facet_counts": {"facet_fields": {"f": ["a", 1, "dangling"]}}
    }))?;

    let counts = &res.facets()?["f"];
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[&FacetKey::from("a")], 1);
    Ok(())
}

#[test]
fn test_facets_non_integer_count_is_malformed() -> Result<()> {
    let res = SolrResponse::from_value(json!({
        "responseHeader": {"status": 0, "QTime": 3},
        "response": {"numFound": 0, "docs": []},
        "facet_counts": {"facet_fields": {"f": ["a", "one"]}}
    }))?;

    let err = res.facets().unwrap_err();
    assert!(matches!(err, SunspearError::MalformedResponse(_)));
    Ok(())
}

// ============================================================
// Range facets
// ============================================================

#[test]
fn test_facet_ranges_decode_with_integer_keys() -> Result<()> {
    let res = SolrResponse::from_value(faceted_response())?;
    let ranges = res.facet_ranges()?;

    let price = &ranges["price"];
    assert_eq!(price[&FacetKey::from(0)], 3);
    assert_eq!(price[&FacetKey::from(10)], 5);
    assert_eq!(price[&FacetKey::from(20)], 7);

    let keys: Vec<i64> = price.keys().filter_map(|k| k.as_integer()).collect();
    assert_eq!(keys, vec![0, 10, 20]);
    Ok(())
}

#[test]
fn test_facet_ranges_missing_section_fails() -> Result<()> {
    let res = SolrResponse::from_value(bare_response())?;

    let err = res.facet_ranges().unwrap_err();
    assert!(matches!(err, SunspearError::NoFacetInformation(_)));
    Ok(())
}

#[test]
fn test_facet_ranges_without_counts_is_malformed() -> Result<()> {
    let res = SolrResponse::from_value(json!({
        "responseHeader": {"status": 0, "QTime": 3},
        "response": {"numFound": 0, "docs": []},
        "facet_counts": {"facet_ranges": {"price": {"gap": 10}}}
    }))?;

    let err = res.facet_ranges().unwrap_err();
    assert!(matches!(err, SunspearError::MalformedResponse(_)));
    Ok(())
}

// ============================================================
// Facet pivots
// ============================================================

#[test]
fn test_facet_pivot_two_level_decode() -> Result<()> {
    let res = SolrResponse::from_value(faceted_response())?;
    let pivots = res.facet_pivots()?;

    let tree = &pivots["facet_test,price"];
    let lorem = tree[&FacetKey::from("Lorem")].as_nested().unwrap();
    assert_eq!(lorem[&FacetKey::from(89)].as_count(), Some(1));
    assert_eq!(lorem[&FacetKey::from(75)].as_count(), Some(1));

    let ipsum = tree[&FacetKey::from("ipsum")].as_nested().unwrap();
    assert_eq!(ipsum.len(), 1);

    // "amet" has no sub-pivot, so it decodes to a bare count.
    assert_eq!(tree[&FacetKey::from("amet")].as_count(), Some(1));
    Ok(())
}

#[test]
fn test_facet_pivot_arbitrary_depth() -> Result<()> {
    let res = SolrResponse::from_value(json!({
        "responseHeader": {"status": 0, "QTime": 5},
        "response": {"numFound": 3, "docs": []},
        "facet_counts": {"facet_pivot": {
            "country,city,year": [
                {"value": "jp", "count": 3, "pivot": [
                    {"value": "tokyo", "count": 3, "pivot": [
                        {"value": 2023, "count": 1},
                        {"value": 2024, "count": 2}
                    ]}
                ]}
            ]
        }}
    }))?;

    let tree = &res.facet_pivots()?["country,city,year"];
    let jp = tree[&FacetKey::from("jp")].as_nested().unwrap();
    let tokyo = jp[&FacetKey::from("tokyo")].as_nested().unwrap();
    assert_eq!(tokyo[&FacetKey::from(2023)].as_count(), Some(1));
    assert_eq!(tokyo[&FacetKey::from(2024)].as_count(), Some(2));
    Ok(())
}

#[test]
fn test_facet_pivot_missing_section_fails() -> Result<()> {
    // The classic client silently returned nothing here; absence now fails
    // the same way as the other facet accessors.
    let res = SolrResponse::from_value(bare_response())?;

    let err = res.facet_pivots().unwrap_err();
    assert!(matches!(err, SunspearError::NoFacetInformation(_)));
    Ok(())
}

// ============================================================
// Memoization
// ============================================================

#[test]
fn test_facet_views_are_memoized() -> Result<()> {
    let res = SolrResponse::from_value(faceted_response())?;

    let first = res.facets()?;
    let second = res.facets()?;
    assert!(std::ptr::eq(first, second));

    let first = res.facet_ranges()?;
    let second = res.facet_ranges()?;
    assert!(std::ptr::eq(first, second));

    let first = res.facet_pivots()?;
    let second = res.facet_pivots()?;
    assert!(std::ptr::eq(first, second));
    Ok(())
}

#[test]
fn test_facet_views_are_independent() -> Result<()> {
    // Pivot decoding works even when the fields accessor was never called,
    // and vice versa.
    let res = SolrResponse::from_value(faceted_response())?;
    assert!(res.facet_pivots().is_ok());

    let res = SolrResponse::from_value(json!({
        "responseHeader": {"status": 0, "QTime": 3},
        "response": {"numFound": 0, "docs": []},
        "facet_counts": {"facet_fields": {"f": ["a", 1]}}
    }))?;
    assert!(res.facets().is_ok());
    assert!(res.facet_pivots().is_err());
    Ok(())
}

// ============================================================
// List/lookup convenience accessors
// ============================================================

#[test]
fn test_facet_values_and_keys_align() -> Result<()> {
    let res = SolrResponse::from_value(faceted_response())?;

    let keys = res.facet_keys("facet_test")?;
    let values = res.facet_values("facet_test")?;
    assert_eq!(keys.len(), values.len());

    let facets = res.facets()?;
    for (key, value) in keys.iter().zip(&values) {
        assert_eq!(facets["facet_test"][*key], *value);
    }

    assert_eq!(values, vec![9, 6, 14, 10, 11]);
    Ok(())
}

#[test]
fn test_facet_values_unknown_field_fails() -> Result<()> {
    let res = SolrResponse::from_value(faceted_response())?;

    let err = res.facet_values("nonexistent").unwrap_err();
    assert!(matches!(err, SunspearError::FieldNotFound(_)));
    let err = res.facet_keys("nonexistent").unwrap_err();
    assert!(matches!(err, SunspearError::FieldNotFound(_)));
    Ok(())
}

#[test]
fn test_facet_values_propagate_missing_section() -> Result<()> {
    let res = SolrResponse::from_value(bare_response())?;

    let err = res.facet_values("any").unwrap_err();
    assert!(matches!(err, SunspearError::NoFacetInformation(_)));
    Ok(())
}
