//! Documents returned by a search response.

pub mod document;
pub mod field_value;

pub use self::document::Document;
pub use self::field_value::FieldValue;
