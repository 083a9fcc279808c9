#![deny(missing_docs)]

//! # Components

use super::{
    Callback, Example, Extensions, Header, Link, Parameter, PathItem, RefOr, RequestBody,
    Response, Schema, SecurityScheme,
};
use indexmap::IndexMap;

/// Components Object: reusable objects keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Components {
    /// Schemas (`definitions` in 2.0).
    pub schemas: IndexMap<String, RefOr<Schema>>,
    /// Responses.
    pub responses: IndexMap<String, RefOr<Response>>,
    /// Parameters.
    pub parameters: IndexMap<String, RefOr<Parameter>>,
    /// Examples.
    pub examples: IndexMap<String, RefOr<Example>>,
    /// Request bodies (2.0 body and form parameters land here).
    pub request_bodies: IndexMap<String, RefOr<RequestBody>>,
    /// Headers.
    pub headers: IndexMap<String, RefOr<Header>>,
    /// Security schemes (`securityDefinitions` in 2.0).
    pub security_schemes: IndexMap<String, RefOr<SecurityScheme>>,
    /// Links.
    pub links: IndexMap<String, RefOr<Link>>,
    /// Callbacks.
    pub callbacks: IndexMap<String, RefOr<Callback>>,
    /// Path items (3.1).
    pub path_items: IndexMap<String, RefOr<PathItem>>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl Components {
    /// True when no component of any kind is declared.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
            && self.responses.is_empty()
            && self.parameters.is_empty()
            && self.examples.is_empty()
            && self.request_bodies.is_empty()
            && self.headers.is_empty()
            && self.security_schemes.is_empty()
            && self.links.is_empty()
            && self.callbacks.is_empty()
            && self.path_items.is_empty()
            && self.extensions.is_empty()
    }
}
