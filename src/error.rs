//! Error types for the Sunspear library.
//!
//! All failures are represented by the [`SunspearError`] enum. Errors are
//! raised synchronously at the offending accessor call and never deferred;
//! callers are expected to match on the specific kind to decide whether an
//! absence is meaningful (a query without facets) or a bug.
//!
//! # Examples
//!
//! ```
//! use sunspear::error::{Result, SunspearError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SunspearError::missing_field("numFound"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use anyhow;
use thiserror::Error;

/// The main error type for Sunspear operations.
///
/// This enum represents all possible errors that can occur while classifying
/// a response or decoding its derived views. It uses the `thiserror` crate
/// for automatic `Error` trait implementation and provides convenient
/// constructor methods for creating specific error kinds.
#[derive(Error, Debug)]
pub enum SunspearError {
    /// The response envelope is missing required structure, or an inner
    /// facet/pivot encoding violates its documented shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A requested value was never populated by the current response shape.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// The facet, range, or pivot section is absent or wrong-typed.
    #[error("No facet information: {0}")]
    NoFacetInformation(String),

    /// The requested field is present in no entry of the relevant collection.
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SunspearError.
pub type Result<T> = std::result::Result<T, SunspearError>;

impl SunspearError {
    /// Create a new malformed-response error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        SunspearError::MalformedResponse(msg.into())
    }

    /// Create a new missing-field error.
    pub fn missing_field<S: Into<String>>(msg: S) -> Self {
        SunspearError::MissingField(msg.into())
    }

    /// Create a new missing-facet-information error.
    pub fn no_facets<S: Into<String>>(msg: S) -> Self {
        SunspearError::NoFacetInformation(msg.into())
    }

    /// Create a new field-not-found error.
    pub fn field_not_found<S: Into<String>>(msg: S) -> Self {
        SunspearError::FieldNotFound(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SunspearError::Other(msg.into())
    }
}
