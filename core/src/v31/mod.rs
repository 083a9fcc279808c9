//! # OpenAPI 3.1 Service
//!
//! Reuses the 3.0 loaders and overrides the objects whose grammar changed:
//! the document root (webhooks, `jsonSchemaDialect`), components
//! (`pathItems`), info (`summary`), license (`identifier`) and the schema,
//! which follows JSON Schema 2020-12.

pub(crate) mod document;
pub(crate) mod schema;

use crate::context::ParsingContext;
use crate::element::{Element, ElementKind};
use crate::error::ReaderResult;
use crate::models::{OpenApiDocument, Reference, ReferenceKind};
use crate::node::ParseNode;
use crate::service::{SpecVersion, VersionService};
use crate::v3;

/// The OpenAPI 3.1 version service.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiV31Service;

impl VersionService for OpenApiV31Service {
    fn version(&self) -> SpecVersion {
        SpecVersion::V3_1
    }

    fn parse_reference(
        &self,
        pointer: &str,
        expected: Option<ReferenceKind>,
    ) -> ReaderResult<Reference> {
        v3::parse_v3_reference(pointer, expected, SpecVersion::V3_1)
    }

    fn load_element(
        &self,
        kind: ElementKind,
        node: ParseNode<'_>,
        ctx: &mut ParsingContext,
    ) -> ReaderResult<Element> {
        match kind {
            ElementKind::Document => Ok(Element::Document(Box::new(document::load_document(
                node, ctx,
            )))),
            ElementKind::Components => Ok(Element::Components(document::load_components(node, ctx)?)),
            ElementKind::Info => Ok(Element::Info(document::load_info(node, ctx)?)),
            ElementKind::License => Ok(Element::License(document::load_license(node, ctx)?)),
            ElementKind::Schema => Ok(Element::Schema(schema::load_schema(node, ctx)?)),
            _ => v3::load_v3_element(kind, node, ctx),
        }
    }

    fn load_document(&self, root: ParseNode<'_>, ctx: &mut ParsingContext) -> OpenApiDocument {
        document::load_document(root, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Parameter;
    use crate::models::RefOr;
    use serde_json::json;

    fn parse(pointer: &str, expected: Option<ReferenceKind>) -> Reference {
        OpenApiV31Service.parse_reference(pointer, expected).unwrap()
    }

    #[test]
    fn test_path_item_pointer_round_trip() {
        let reference = parse("#/components/pathItems/~1pets~1{petId}", None);
        assert_eq!(reference, Reference::local(ReferenceKind::PathItem, "/pets/{petId}"));
        assert_eq!(
            reference.to_pointer(SpecVersion::V3_1),
            "#/components/pathItems/~1pets~1{petId}"
        );
    }

    #[test]
    fn test_fragments_are_kept_verbatim() {
        let external = parse("defs.json#/definitions/Pet", Some(ReferenceKind::Schema));
        assert!(external.raw_fragment);
        assert_eq!(external.id.as_deref(), Some("/definitions/Pet"));
        assert_eq!(
            parse(&external.to_pointer(SpecVersion::V3_1), Some(ReferenceKind::Schema)),
            external
        );

        let local = parse("#/$defs/name", Some(ReferenceKind::Schema));
        assert!(local.raw_fragment && !local.is_external());

        let whole = parse("https://example.com/pet.json", Some(ReferenceKind::Schema));
        assert_eq!(whole.id, None);
        assert_eq!(whole.external_resource.as_deref(), Some("https://example.com/pet.json"));
    }

    #[test]
    fn test_nested_loads_get_the_3_1_schema() {
        let value = json!({"name": "id", "in": "path", "schema": {"type": ["string", "null"]}});
        let mut ctx = ParsingContext::new(SpecVersion::V3_1, Default::default());
        let parameter: RefOr<Parameter> = ctx.load(ParseNode::new(&value)).unwrap();
        let schema = parameter.as_item().unwrap().schema.as_ref().unwrap();
        assert!(schema.as_item().unwrap().has_type("null"));
        assert!(ctx.diagnostic().is_clean());
    }
}
