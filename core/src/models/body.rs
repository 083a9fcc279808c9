#![deny(missing_docs)]

//! # Request Bodies and Media Types

use super::{Example, Extensions, Header, ParameterStyle, RefOr, Schema};
use indexmap::IndexMap;
use serde_json::Value;

/// Request Body Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody {
    /// Description.
    pub description: Option<String>,
    /// Payload per media type.
    pub content: IndexMap<String, MediaType>,
    /// Required flag.
    pub required: bool,
    /// Vendor extensions.
    pub extensions: Extensions,
}

/// Media Type Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaType {
    /// Payload schema.
    pub schema: Option<RefOr<Schema>>,
    /// Single example.
    pub example: Option<Value>,
    /// Named examples.
    pub examples: IndexMap<String, RefOr<Example>>,
    /// Per-property encoding for form and multipart payloads.
    pub encoding: IndexMap<String, Encoding>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl MediaType {
    /// A media type wrapping only a schema.
    pub fn with_schema(schema: Option<RefOr<Schema>>) -> Self {
        Self {
            schema,
            ..Default::default()
        }
    }
}

/// Encoding Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Encoding {
    /// Content type of the property.
    pub content_type: Option<String>,
    /// Extra part headers.
    pub headers: IndexMap<String, RefOr<Header>>,
    /// Serialization style.
    pub style: Option<ParameterStyle>,
    /// Explode modifier.
    pub explode: Option<bool>,
    /// Allow reserved characters.
    pub allow_reserved: bool,
    /// Vendor extensions.
    pub extensions: Extensions,
}
