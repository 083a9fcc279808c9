//! # Swagger 2.0 Service
//!
//! Reads Swagger 2.0 documents into the OpenAPI 3 shaped model.
//!
//! Most of the work is structural conversion: body and form parameters
//! become request bodies, `consumes`/`produces` become media type keys,
//! `host`/`basePath`/`schemes` become servers and primitive parameter fields
//! become schemas. Objects whose grammar is shared with 3.0 (info, tags,
//! external docs, xml, security requirements) use the 3.0 loaders.

pub(crate) mod document;
pub(crate) mod operation;
pub(crate) mod parameter;
pub(crate) mod response;
pub(crate) mod schema;
pub(crate) mod security;

use crate::context::ParsingContext;
use crate::element::{Element, ElementKind};
use crate::error::{ReaderError, ReaderResult};
use crate::models::{OpenApiDocument, Reference, ReferenceKind};
use crate::node::ParseNode;
use crate::resolve::pointer::decode_segment;
use crate::service::{SpecVersion, VersionService};
use crate::v3;

/// The Swagger 2.0 version service.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiV2Service;

impl VersionService for OpenApiV2Service {
    fn version(&self) -> SpecVersion {
        SpecVersion::V2
    }

    fn parse_reference(
        &self,
        pointer: &str,
        expected: Option<ReferenceKind>,
    ) -> ReaderResult<Reference> {
        parse_v2_reference(pointer, expected)
    }

    fn load_element(
        &self,
        kind: ElementKind,
        node: ParseNode<'_>,
        ctx: &mut ParsingContext,
    ) -> ReaderResult<Element> {
        let element = match kind {
            ElementKind::Document => Element::Document(Box::new(document::load_document(node, ctx))),
            ElementKind::Paths => Element::Paths(v3::operation::load_paths(node, ctx)?),
            ElementKind::PathItem => Element::PathItem(operation::load_path_item(node, ctx)?),
            ElementKind::Operation => Element::Operation(operation::load_operation(node, ctx)?),
            ElementKind::Parameter => Element::Parameter(parameter::load_parameter(node, ctx)?),
            ElementKind::Header => Element::Header(parameter::load_header(node, ctx)?),
            ElementKind::Response => Element::Response(response::load_response(node, ctx)?),
            ElementKind::Schema => Element::Schema(schema::load_schema(node, ctx)?),
            ElementKind::SecurityScheme => {
                Element::SecurityScheme(security::load_security_scheme(node, ctx)?)
            }
            ElementKind::Info
            | ElementKind::Contact
            | ElementKind::License
            | ElementKind::ExternalDocs
            | ElementKind::Tag
            | ElementKind::Xml
            | ElementKind::Responses
            | ElementKind::SecurityRequirement => return v3::load_v3_element(kind, node, ctx),
            _ => {
                return Err(ReaderError::UnsupportedElement {
                    kind,
                    version: SpecVersion::V2,
                })
            }
        };
        Ok(element)
    }

    fn load_document(&self, root: ParseNode<'_>, ctx: &mut ParsingContext) -> OpenApiDocument {
        document::load_document(root, ctx)
    }
}

/// Parses a 2.0 `$ref`.
///
/// Component pointers are `#/{container}/{name}` where the container is
/// `definitions`, `parameters`, `responses`, `headers`, `tags` or
/// `securityDefinitions`. `#/parameters/...` addresses a request body when
/// the field expects one. The name is the rest of the pointer, unescaped,
/// so an unescaped `/` stays part of it.
pub(crate) fn parse_v2_reference(
    pointer: &str,
    expected: Option<ReferenceKind>,
) -> ReaderResult<Reference> {
    let invalid = || ReaderError::InvalidReference(pointer.to_string());
    let pointer = pointer.trim();
    if pointer.is_empty() {
        return Err(invalid());
    }
    let fallback = expected.unwrap_or(ReferenceKind::Schema);

    let Some((resource, fragment)) = pointer.split_once('#') else {
        return Ok(match expected {
            Some(kind @ (ReferenceKind::Tag | ReferenceKind::SecurityScheme)) => {
                Reference::local(kind, pointer)
            }
            _ => Reference::external(fallback, pointer, None),
        });
    };
    if fragment.is_empty() && !resource.is_empty() {
        return Ok(Reference::external(fallback, resource, None));
    }
    let raw = || {
        if resource.is_empty() {
            Err(invalid())
        } else {
            Ok(Reference::external(fallback, resource, Some(fragment.to_string())).with_raw_fragment())
        }
    };

    let Some((container, name)) = fragment
        .strip_prefix('/')
        .and_then(|rest| rest.split_once('/'))
    else {
        return raw();
    };
    if name.is_empty() {
        return Err(invalid());
    }
    let kind = match container {
        "definitions" => ReferenceKind::Schema,
        "parameters" if expected == Some(ReferenceKind::RequestBody) => ReferenceKind::RequestBody,
        "parameters" => ReferenceKind::Parameter,
        "responses" => ReferenceKind::Response,
        "headers" => ReferenceKind::Header,
        "tags" => ReferenceKind::Tag,
        "securityDefinitions" => ReferenceKind::SecurityScheme,
        _ if !resource.is_empty() => return raw(),
        other => return Err(ReaderError::UnknownReferenceKind(other.to_string())),
    };
    let id = decode_segment(name);
    Ok(if resource.is_empty() {
        Reference::local(kind, id)
    } else {
        Reference::external(kind, resource, Some(id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(pointer: &str, expected: Option<ReferenceKind>) -> ReaderResult<Reference> {
        OpenApiV2Service.parse_reference(pointer, expected)
    }

    #[test]
    fn test_container_pointers() {
        let reference = parse("#/definitions/Pet", Some(ReferenceKind::Schema)).unwrap();
        assert_eq!(reference, Reference::local(ReferenceKind::Schema, "Pet"));

        let body = parse("#/parameters/PetBody", Some(ReferenceKind::RequestBody)).unwrap();
        assert_eq!(body.kind, ReferenceKind::RequestBody);
        let parameter = parse("#/parameters/PetBody", Some(ReferenceKind::Parameter)).unwrap();
        assert_eq!(parameter.kind, ReferenceKind::Parameter);

        let nested = parse("#/definitions/pets/Pet", None).unwrap();
        assert_eq!(nested.id.as_deref(), Some("pets/Pet"));

        let escaped = parse("#/definitions/a~1b", Some(ReferenceKind::Schema)).unwrap();
        assert_eq!(escaped.id.as_deref(), Some("a/b"));
        assert_eq!(escaped.to_string(), "#/components/schemas/a~1b");
    }

    #[test]
    fn test_external_and_unknown() {
        let external = parse("common.json#/responses/NotFound", None).unwrap();
        assert_eq!(external.kind, ReferenceKind::Response);
        assert_eq!(external.external_resource.as_deref(), Some("common.json"));

        let raw = parse("pet.json#/Pet", Some(ReferenceKind::Schema)).unwrap();
        assert!(raw.raw_fragment);
        assert_eq!(raw.id.as_deref(), Some("/Pet"));

        assert!(matches!(
            parse("#/components/schemas/Pet", None),
            Err(ReaderError::UnknownReferenceKind(name)) if name == "components"
        ));
        assert!(matches!(
            parse("#/definitions/", None),
            Err(ReaderError::InvalidReference(_))
        ));
        assert!(matches!(parse("  ", None), Err(ReaderError::InvalidReference(_))));
    }

    #[test]
    fn test_round_trip() {
        for kind in ReferenceKind::ALL {
            if kind.v2_container().is_none() {
                continue;
            }
            for id in ["Pet", "a/b~c"] {
                let reference = Reference::local(kind, id);
                let pointer = reference.to_pointer(SpecVersion::V2);
                assert_eq!(parse(&pointer, Some(kind)).unwrap(), reference, "{pointer}");
            }
        }
    }

    #[test]
    fn test_registry() {
        let value = json!({});
        let mut ctx = ParsingContext::new(SpecVersion::V2, Default::default());
        let xml = OpenApiV2Service
            .load_element(ElementKind::Xml, ParseNode::new(&value), &mut ctx)
            .unwrap();
        assert_eq!(xml.kind(), ElementKind::Xml);
        let err = OpenApiV2Service
            .load_element(ElementKind::Link, ParseNode::new(&value), &mut ctx)
            .unwrap_err();
        assert!(matches!(err, ReaderError::UnsupportedElement { .. }));
    }
}
