#![deny(missing_docs)]

//! # Document Model
//!
//! Version-neutral, OpenAPI 3.x shaped object graph. Swagger 2.0 documents
//! are loaded into the same types.
//!
//! Objects are plain records: one field per specification property plus an
//! extension map for `x-` fields. Fields that the grammar lets a `$ref` stand
//! in for hold a [`RefOr`].

mod body;
mod components;
mod document;
mod expression;
mod info;
mod parameter;
mod paths;
mod reference;
mod response;
mod schema;
mod security;

pub use body::{Encoding, MediaType, RequestBody};
pub use components::Components;
pub use document::OpenApiDocument;
pub use expression::RuntimeExpression;
pub use info::{Contact, ExternalDocs, Info, License, Server, ServerVariable, Tag};
pub use parameter::{Parameter, ParameterLocation, ParameterStyle};
pub use paths::{Callback, Operation, OperationType, PathItem, Paths};
pub use reference::{RefOr, Reference, ReferenceKind};
pub use response::{Example, Header, Link, LinkParameter, Response, Responses};
pub use schema::{AdditionalProperties, Discriminator, ExclusiveBound, Schema, SchemaType, Xml};
pub use security::{OAuthFlow, OAuthFlows, SecurityRequirement, SecurityScheme, SecuritySchemeType};

use indexmap::IndexMap;

/// `x-` fields, in source order.
pub type Extensions = IndexMap<String, serde_json::Value>;

/// Objects that carry vendor extensions.
pub trait Extensible {
    /// Mutable access to the extension map.
    fn extensions_mut(&mut self) -> &mut Extensions;
}

macro_rules! extensible {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Extensible for $ty {
                fn extensions_mut(&mut self) -> &mut Extensions {
                    &mut self.extensions
                }
            }
        )*
    };
}

extensible!(
    OpenApiDocument,
    Info,
    Contact,
    License,
    Server,
    ServerVariable,
    ExternalDocs,
    Tag,
    Components,
    Paths,
    PathItem,
    Operation,
    Callback,
    Parameter,
    RequestBody,
    MediaType,
    Encoding,
    Responses,
    Response,
    Header,
    Example,
    Link,
    SecurityScheme,
    OAuthFlows,
    OAuthFlow,
    Schema,
    Discriminator,
    Xml,
);
