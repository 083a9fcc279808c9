#![deny(missing_docs)]

//! # Responses, Headers, Examples and Links

use super::{Extensions, MediaType, ParameterStyle, RefOr, RuntimeExpression, Schema, Server};
use indexmap::IndexMap;
use serde_json::Value;

/// Responses Object: status codes (or `default`) to responses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Responses {
    /// Responses keyed by status code.
    pub codes: IndexMap<String, RefOr<Response>>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl Responses {
    /// Looks up a response by status code.
    pub fn get(&self, code: &str) -> Option<&RefOr<Response>> {
        self.codes.get(code)
    }
}

/// Response Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// Description.
    pub description: String,
    /// Response headers.
    pub headers: IndexMap<String, RefOr<Header>>,
    /// Payload per media type.
    pub content: IndexMap<String, MediaType>,
    /// Links.
    pub links: IndexMap<String, RefOr<Link>>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

/// Header Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    /// Description.
    pub description: Option<String>,
    /// Required flag.
    pub required: bool,
    /// Deprecation flag.
    pub deprecated: bool,
    /// Allow empty value flag.
    pub allow_empty_value: bool,
    /// Serialization style.
    pub style: Option<ParameterStyle>,
    /// Explode modifier.
    pub explode: Option<bool>,
    /// Allow reserved characters.
    pub allow_reserved: bool,
    /// Value schema.
    pub schema: Option<RefOr<Schema>>,
    /// Single example.
    pub example: Option<Value>,
    /// Named examples.
    pub examples: IndexMap<String, RefOr<Example>>,
    /// Media-type keyed alternative to `schema`.
    pub content: IndexMap<String, MediaType>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

/// Example Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Example {
    /// Summary.
    pub summary: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Literal example value.
    pub value: Option<Value>,
    /// URL of an external example.
    pub external_value: Option<String>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

/// A link parameter or request body: a runtime expression or a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkParameter {
    /// A `$`-prefixed runtime expression.
    Expression(RuntimeExpression),
    /// Any other value.
    Value(Value),
}

/// Link Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    /// Reference to an operation.
    pub operation_ref: Option<String>,
    /// Id of an operation.
    pub operation_id: Option<String>,
    /// Parameters passed to the linked operation.
    pub parameters: IndexMap<String, LinkParameter>,
    /// Body passed to the linked operation.
    pub request_body: Option<LinkParameter>,
    /// Description.
    pub description: Option<String>,
    /// Server for the linked operation.
    pub server: Option<Server>,
    /// Vendor extensions.
    pub extensions: Extensions,
}
