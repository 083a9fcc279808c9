#![deny(missing_docs)]

//! # References
//!
//! `$ref` descriptors and the `RefOr` wrapper used wherever the OpenAPI grammar
//! allows a Reference Object in place of an inline value.
//!
//! References stay lazy: loaders record what a pointer names and where it was
//! found, and resolution happens on access (see [`crate::resolve`]).

use crate::resolve::pointer::{escape_segment, resolve_location};
use crate::service::SpecVersion;
use std::fmt;

/// The component family a reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// `components/schemas` (`definitions` in 2.0).
    Schema,
    /// `components/responses`.
    Response,
    /// `components/parameters`.
    Parameter,
    /// `components/examples`.
    Example,
    /// `components/requestBodies`.
    RequestBody,
    /// `components/headers`.
    Header,
    /// `components/securitySchemes` (`securityDefinitions` in 2.0).
    SecurityScheme,
    /// `components/links`.
    Link,
    /// `components/callbacks`.
    Callback,
    /// Top-level `tags` list, addressed by name.
    Tag,
    /// `components/pathItems` (3.1).
    PathItem,
}

impl ReferenceKind {
    /// All kinds, in declaration order.
    pub const ALL: [ReferenceKind; 11] = [
        Self::Schema,
        Self::Response,
        Self::Parameter,
        Self::Example,
        Self::RequestBody,
        Self::Header,
        Self::SecurityScheme,
        Self::Link,
        Self::Callback,
        Self::Tag,
        Self::PathItem,
    ];

    /// Name of the `components` sub-map holding this kind.
    pub fn component_name(self) -> &'static str {
        match self {
            Self::Schema => "schemas",
            Self::Response => "responses",
            Self::Parameter => "parameters",
            Self::Example => "examples",
            Self::RequestBody => "requestBodies",
            Self::Header => "headers",
            Self::SecurityScheme => "securitySchemes",
            Self::Link => "links",
            Self::Callback => "callbacks",
            Self::Tag => "tags",
            Self::PathItem => "pathItems",
        }
    }

    /// Inverse of [`ReferenceKind::component_name`].
    pub fn from_component_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.component_name() == name)
    }

    /// Container name used by Swagger 2.0 pointers, where one exists.
    pub fn v2_container(self) -> Option<&'static str> {
        match self {
            Self::Schema => Some("definitions"),
            Self::Parameter | Self::RequestBody => Some("parameters"),
            Self::Response => Some("responses"),
            Self::Header => Some("headers"),
            Self::SecurityScheme => Some("securityDefinitions"),
            Self::Tag => Some("tags"),
            _ => None,
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component_name())
    }
}

/// A parsed `$ref`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// What the pointer refers to.
    pub kind: ReferenceKind,
    /// Component name (or tag name). `None` for whole-document references.
    pub id: Option<String>,
    /// Document part of the pointer when it targets another document.
    pub external_resource: Option<String>,
    /// True when `id` is a raw fragment of an external document rather than a component name.
    pub raw_fragment: bool,
    /// Reference Object `summary` (3.1).
    pub summary: Option<String>,
    /// Reference Object `description` (3.1).
    pub description: Option<String>,
    /// Location of the document the reference was read from.
    pub host_document: Option<String>,
}

impl Reference {
    /// A reference to a component of the current document.
    pub fn local(kind: ReferenceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: Some(id.into()),
            external_resource: None,
            raw_fragment: false,
            summary: None,
            description: None,
            host_document: None,
        }
    }

    /// A reference into another document. `id` is `None` for whole-document references.
    pub fn external(kind: ReferenceKind, resource: impl Into<String>, id: Option<String>) -> Self {
        Self {
            external_resource: Some(resource.into()),
            id,
            ..Self::local(kind, String::new())
        }
    }

    /// Marks `id` as a raw fragment of the external document.
    pub fn with_raw_fragment(mut self) -> Self {
        self.raw_fragment = true;
        self
    }

    /// Records the document the reference was found in.
    pub fn with_host(mut self, host: Option<String>) -> Self {
        self.host_document = host;
        self
    }

    /// True when the pointer leaves the current document.
    pub fn is_external(&self) -> bool {
        self.external_resource.is_some()
    }

    /// Location of the document the reference targets, when known.
    ///
    /// External locators are resolved relative to [`Reference::host_document`].
    pub fn target_location(&self) -> Option<String> {
        match &self.external_resource {
            Some(resource) => Some(resolve_location(resource, self.host_document.as_deref())),
            None => self.host_document.clone(),
        }
    }

    /// Renders the pointer in the grammar of `version`.
    pub fn to_pointer(&self, version: SpecVersion) -> String {
        let Some(id) = &self.id else {
            return self.external_resource.clone().unwrap_or_default();
        };
        let fragment = if self.raw_fragment {
            id.clone()
        } else {
            match (version, self.kind) {
                (_, ReferenceKind::Tag) => format!("/tags/{}", escape_segment(id)),
                (SpecVersion::V2, kind) => match kind.v2_container() {
                    Some(container) => format!("/{container}/{}", escape_segment(id)),
                    None => format!("/components/{}/{}", kind, escape_segment(id)),
                },
                (_, kind) => format!("/components/{}/{}", kind, escape_segment(id)),
            }
        };
        match &self.external_resource {
            Some(resource) => format!("{resource}#{fragment}"),
            None => format!("#{fragment}"),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pointer(SpecVersion::V3_1))
    }
}

/// Either an inline value or a reference to one.
#[derive(Debug, Clone, PartialEq)]
pub enum RefOr<T> {
    /// The value is written inline.
    Item(T),
    /// The value lives elsewhere.
    Reference(Reference),
}

impl<T> RefOr<T> {
    /// The inline value, if any.
    pub fn as_item(&self) -> Option<&T> {
        match self {
            Self::Item(item) => Some(item),
            Self::Reference(_) => None,
        }
    }

    /// Mutable access to the inline value, if any.
    pub fn as_item_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Item(item) => Some(item),
            Self::Reference(_) => None,
        }
    }

    /// The reference, if any.
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Item(_) => None,
            Self::Reference(reference) => Some(reference),
        }
    }

    /// True when this is a reference.
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }
}

impl<T: Default> Default for RefOr<T> {
    fn default() -> Self {
        Self::Item(T::default())
    }
}

impl<T> From<T> for RefOr<T> {
    fn from(item: T) -> Self {
        Self::Item(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_names_round_trip() {
        for kind in ReferenceKind::ALL {
            assert_eq!(
                ReferenceKind::from_component_name(kind.component_name()),
                Some(kind)
            );
        }
        assert_eq!(ReferenceKind::from_component_name("widgets"), None);
    }

    #[test]
    fn test_pointer_rendering() {
        let pet = Reference::local(ReferenceKind::Schema, "Pet");
        assert_eq!(pet.to_pointer(SpecVersion::V2), "#/definitions/Pet");
        assert_eq!(pet.to_pointer(SpecVersion::V3_0), "#/components/schemas/Pet");

        let path_item = Reference::local(ReferenceKind::PathItem, "/pets");
        assert_eq!(
            path_item.to_pointer(SpecVersion::V3_1),
            "#/components/pathItems/~1pets"
        );

        let whole = Reference::external(ReferenceKind::Schema, "pet.yaml", None);
        assert_eq!(whole.to_pointer(SpecVersion::V3_1), "pet.yaml");

        let raw = Reference::external(ReferenceKind::Schema, "pet.json", Some("/Pet".into()))
            .with_raw_fragment();
        assert_eq!(raw.to_pointer(SpecVersion::V3_1), "pet.json#/Pet");
    }

    #[test]
    fn test_target_location_uses_host() {
        let reference = Reference::external(ReferenceKind::Schema, "common.yaml", Some("Id".into()))
            .with_host(Some("https://example.com/api/openapi.yaml".into()));
        assert_eq!(
            reference.target_location().as_deref(),
            Some("https://example.com/api/common.yaml")
        );

        let local = Reference::local(ReferenceKind::Schema, "Id")
            .with_host(Some("https://example.com/api/openapi.yaml".into()));
        assert_eq!(
            local.target_location().as_deref(),
            Some("https://example.com/api/openapi.yaml")
        );
    }
}
