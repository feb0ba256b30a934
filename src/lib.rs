//! # Sunspear
//!
//! Typed, lazily-decoded views over Solr search response JSON.
//!
//! ## Features
//!
//! - Response shape classification (plain, grouped, empty) fixed at
//!   construction
//! - Digit-string field normalization matching the classic client behavior
//! - Ordered facet and range facet count decoding from the flat
//!   alternating-list encoding
//! - Arbitrary-depth facet pivot reconstruction
//! - Per-instance memoized derived views
//!
//! The crate performs no network I/O: it receives an already-decoded JSON
//! document and exposes accessor methods over it.

pub mod document;
pub mod error;
pub mod response;

pub use crate::document::{Document, FieldValue};
pub use crate::error::{Result, SunspearError};
pub use crate::response::{FacetKey, PivotNode, ResultShape, SolrResponse};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
