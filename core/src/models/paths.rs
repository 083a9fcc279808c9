#![deny(missing_docs)]

//! # Paths and Operations

use super::{
    Extensions, ExternalDocs, Parameter, RefOr, RequestBody, Responses, RuntimeExpression,
    SecurityRequirement, Server, Tag,
};
use indexmap::IndexMap;
use std::fmt;

/// Paths Object: path templates to path items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paths {
    /// Path items keyed by template (`/pets/{id}`).
    pub items: IndexMap<String, RefOr<PathItem>>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

/// HTTP methods an operation can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum OperationType {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl OperationType {
    /// All methods in the order the OpenAPI Specification lists them.
    pub const ALL: [OperationType; 8] = [
        Self::Get,
        Self::Put,
        Self::Post,
        Self::Delete,
        Self::Options,
        Self::Head,
        Self::Patch,
        Self::Trace,
    ];

    /// Lowercase field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
            Self::Patch => "patch",
            Self::Trace => "trace",
        }
    }

    /// Methods that carry a request body.
    pub fn accepts_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path Item Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    /// Summary.
    pub summary: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Operations keyed by method.
    pub operations: IndexMap<OperationType, Operation>,
    /// Alternative servers.
    pub servers: Vec<Server>,
    /// Parameters shared by all operations.
    pub parameters: Vec<RefOr<Parameter>>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl PathItem {
    /// The operation bound to `method`.
    pub fn operation(&self, method: OperationType) -> Option<&Operation> {
        self.operations.get(&method)
    }
}

/// Operation Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operation {
    /// Tags, referenced by name.
    pub tags: Vec<RefOr<Tag>>,
    /// Summary.
    pub summary: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Additional documentation.
    pub external_docs: Option<ExternalDocs>,
    /// Unique operation id.
    pub operation_id: Option<String>,
    /// Parameters other than the request body.
    pub parameters: Vec<RefOr<Parameter>>,
    /// Request body.
    pub request_body: Option<RefOr<RequestBody>>,
    /// Responses.
    pub responses: Responses,
    /// Callbacks keyed by name.
    pub callbacks: IndexMap<String, RefOr<Callback>>,
    /// Deprecation flag.
    pub deprecated: bool,
    /// Security requirements; `None` inherits the document's.
    pub security: Option<Vec<SecurityRequirement>>,
    /// Alternative servers.
    pub servers: Vec<Server>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl Operation {
    /// Names of the tags attached to the operation.
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags
            .iter()
            .filter_map(|tag| match tag {
                RefOr::Item(tag) => Some(tag.name.as_str()),
                RefOr::Reference(reference) => reference.id.as_deref(),
            })
            .collect()
    }
}

/// Callback Object: runtime expressions to path items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Callback {
    /// Path items keyed by expression.
    pub path_items: IndexMap<RuntimeExpression, RefOr<PathItem>>,
    /// Vendor extensions.
    pub extensions: Extensions,
}
