#![deny(missing_docs)]

//! # Element Registry
//!
//! Every object a version service can load is named by an [`ElementKind`]
//! and carried in the matching [`Element`] variant. [`Loadable`] ties a model
//! type to its kind so generic call sites (`ctx.load::<Info>(node)`) get a
//! typed value back without a runtime cast.

use crate::error::{ReaderError, ReaderResult};
use crate::models::{
    Callback, Components, Contact, Discriminator, Encoding, Example, ExternalDocs, Header, Info,
    License, Link, MediaType, OAuthFlow, OAuthFlows, OpenApiDocument, Operation, Parameter,
    PathItem, Paths, RefOr, RequestBody, Response, Responses, Schema, SecurityRequirement,
    SecurityScheme, Server, ServerVariable, Tag, Xml,
};
use std::fmt;

/// Names a loadable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ElementKind {
    Document,
    Info,
    Contact,
    License,
    Server,
    ServerVariable,
    Components,
    Paths,
    PathItem,
    Operation,
    Parameter,
    RequestBody,
    MediaType,
    Encoding,
    Responses,
    Response,
    Header,
    Example,
    Link,
    Callback,
    SecurityScheme,
    SecurityRequirement,
    OAuthFlows,
    OAuthFlow,
    Tag,
    ExternalDocs,
    Schema,
    Discriminator,
    Xml,
}

impl ElementKind {
    /// All kinds, in declaration order.
    pub const ALL: [ElementKind; 29] = [
        Self::Document,
        Self::Info,
        Self::Contact,
        Self::License,
        Self::Server,
        Self::ServerVariable,
        Self::Components,
        Self::Paths,
        Self::PathItem,
        Self::Operation,
        Self::Parameter,
        Self::RequestBody,
        Self::MediaType,
        Self::Encoding,
        Self::Responses,
        Self::Response,
        Self::Header,
        Self::Example,
        Self::Link,
        Self::Callback,
        Self::SecurityScheme,
        Self::SecurityRequirement,
        Self::OAuthFlows,
        Self::OAuthFlow,
        Self::Tag,
        Self::ExternalDocs,
        Self::Schema,
        Self::Discriminator,
        Self::Xml,
    ];
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Document => "document",
            Self::Info => "info",
            Self::Contact => "contact",
            Self::License => "license",
            Self::Server => "server",
            Self::ServerVariable => "serverVariable",
            Self::Components => "components",
            Self::Paths => "paths",
            Self::PathItem => "pathItem",
            Self::Operation => "operation",
            Self::Parameter => "parameter",
            Self::RequestBody => "requestBody",
            Self::MediaType => "mediaType",
            Self::Encoding => "encoding",
            Self::Responses => "responses",
            Self::Response => "response",
            Self::Header => "header",
            Self::Example => "example",
            Self::Link => "link",
            Self::Callback => "callback",
            Self::SecurityScheme => "securityScheme",
            Self::SecurityRequirement => "securityRequirement",
            Self::OAuthFlows => "oAuthFlows",
            Self::OAuthFlow => "oAuthFlow",
            Self::Tag => "tag",
            Self::ExternalDocs => "externalDocs",
            Self::Schema => "schema",
            Self::Discriminator => "discriminator",
            Self::Xml => "xml",
        };
        f.write_str(name)
    }
}

/// A loaded object. Variants that the grammar lets a `$ref` stand in for carry a [`RefOr`].
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Element {
    Document(Box<OpenApiDocument>),
    Info(Info),
    Contact(Contact),
    License(License),
    Server(Server),
    ServerVariable(ServerVariable),
    Components(Components),
    Paths(Paths),
    PathItem(RefOr<PathItem>),
    Operation(Operation),
    Parameter(RefOr<Parameter>),
    RequestBody(RefOr<RequestBody>),
    MediaType(MediaType),
    Encoding(Encoding),
    Responses(Responses),
    Response(RefOr<Response>),
    Header(RefOr<Header>),
    Example(RefOr<Example>),
    Link(RefOr<Link>),
    Callback(RefOr<Callback>),
    SecurityScheme(RefOr<SecurityScheme>),
    SecurityRequirement(SecurityRequirement),
    OAuthFlows(OAuthFlows),
    OAuthFlow(OAuthFlow),
    Tag(Tag),
    ExternalDocs(ExternalDocs),
    Schema(RefOr<Schema>),
    Discriminator(Discriminator),
    Xml(Xml),
}

/// A value that can be produced by a version service's loader registry.
pub trait Loadable: Sized {
    /// Registry key.
    const KIND: ElementKind;

    /// Unwraps the matching variant.
    fn from_element(element: Element) -> ReaderResult<Self>;

    /// Wraps the value.
    fn into_element(self) -> Element;
}

macro_rules! loadable {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        impl Element {
            /// Kind of the carried value.
            pub fn kind(&self) -> ElementKind {
                match self {
                    Self::Document(_) => ElementKind::Document,
                    $(Self::$variant(_) => ElementKind::$variant,)*
                }
            }
        }

        $(
            impl Loadable for $ty {
                const KIND: ElementKind = ElementKind::$variant;

                fn from_element(element: Element) -> ReaderResult<Self> {
                    match element {
                        Element::$variant(value) => Ok(value),
                        other => Err(mismatch(Self::KIND, other.kind())),
                    }
                }

                fn into_element(self) -> Element {
                    Element::$variant(self)
                }
            }
        )*
    };
}

loadable! {
    Info => Info,
    Contact => Contact,
    License => License,
    Server => Server,
    ServerVariable => ServerVariable,
    Components => Components,
    Paths => Paths,
    RefOr<PathItem> => PathItem,
    Operation => Operation,
    RefOr<Parameter> => Parameter,
    RefOr<RequestBody> => RequestBody,
    MediaType => MediaType,
    Encoding => Encoding,
    Responses => Responses,
    RefOr<Response> => Response,
    RefOr<Header> => Header,
    RefOr<Example> => Example,
    RefOr<Link> => Link,
    RefOr<Callback> => Callback,
    RefOr<SecurityScheme> => SecurityScheme,
    SecurityRequirement => SecurityRequirement,
    OAuthFlows => OAuthFlows,
    OAuthFlow => OAuthFlow,
    Tag => Tag,
    ExternalDocs => ExternalDocs,
    RefOr<Schema> => Schema,
    Discriminator => Discriminator,
    Xml => Xml,
}

impl Loadable for OpenApiDocument {
    const KIND: ElementKind = ElementKind::Document;

    fn from_element(element: Element) -> ReaderResult<Self> {
        match element {
            Element::Document(document) => Ok(*document),
            other => Err(mismatch(Self::KIND, other.kind())),
        }
    }

    fn into_element(self) -> Element {
        Element::Document(Box::new(self))
    }
}

fn mismatch(expected: ElementKind, found: ElementKind) -> ReaderError {
    ReaderError::Structure(format!("expected a {expected} element, found a {found} element"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_element() {
        let tag = Tag {
            name: "pets".into(),
            ..Default::default()
        };
        let element = tag.clone().into_element();
        assert_eq!(element.kind(), ElementKind::Tag);
        assert_eq!(Tag::from_element(element).unwrap(), tag);
    }

    #[test]
    fn test_wrong_variant_is_structural_error() {
        let element = Info::default().into_element();
        let err = Tag::from_element(element).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected a tag element, found a info element"
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ElementKind::PathItem.to_string(), "pathItem");
        assert_eq!(ElementKind::OAuthFlow.to_string(), "oAuthFlow");
    }
}
