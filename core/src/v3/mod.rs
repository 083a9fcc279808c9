//! # OpenAPI 3.0 Service
//!
//! Loader registry, `$ref` grammar and document assembler for OpenAPI 3.0.x.
//! The object loaders are shared with the 3.1 service, which overrides the
//! handful of objects whose grammar changed.

pub(crate) mod document;
pub(crate) mod info;
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

/// The OpenAPI 3.0 version service.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiV3Service;

impl VersionService for OpenApiV3Service {
    fn version(&self) -> SpecVersion {
        SpecVersion::V3_0
    }

    fn parse_reference(
        &self,
        pointer: &str,
        expected: Option<ReferenceKind>,
    ) -> ReaderResult<Reference> {
        parse_v3_reference(pointer, expected, SpecVersion::V3_0)
    }

    fn load_element(
        &self,
        kind: ElementKind,
        node: ParseNode<'_>,
        ctx: &mut ParsingContext,
    ) -> ReaderResult<Element> {
        load_v3_element(kind, node, ctx)
    }

    fn load_document(&self, root: ParseNode<'_>, ctx: &mut ParsingContext) -> OpenApiDocument {
        document::load_document(root, ctx)
    }
}

/// Parses a 3.x `$ref`.
///
/// Accepted shapes:
/// - `#/components/{kind}/{name}`, optionally prefixed by a document locator
/// - `#/tags/{name}`
/// - a bare locator (whole external document), or a bare tag / security scheme name
/// - a locator followed by any other fragment
///
/// 3.1 also accepts local fragments outside `components` (`#/$defs/...`) and
/// keeps non-component fragments verbatim; 3.0 keeps only their last segment.
pub(crate) fn parse_v3_reference(
    pointer: &str,
    expected: Option<ReferenceKind>,
    version: SpecVersion,
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

    let segments: Vec<&str> = fragment.split('/').collect();
    match segments.as_slice() {
        ["", "components", container, name] if !name.is_empty() => {
            let kind = ReferenceKind::from_component_name(container)
                .filter(|kind| *kind != ReferenceKind::Tag)
                .filter(|kind| version != SpecVersion::V3_0 || *kind != ReferenceKind::PathItem)
                .ok_or_else(|| ReaderError::UnknownReferenceKind(container.to_string()))?;
            let id = decode_segment(name);
            return Ok(if resource.is_empty() {
                Reference::local(kind, id)
            } else {
                Reference::external(kind, resource, Some(id))
            });
        }
        ["", "tags", name] if resource.is_empty() && !name.is_empty() => {
            return Ok(Reference::local(ReferenceKind::Tag, decode_segment(name)));
        }
        _ => {}
    }

    match (resource.is_empty(), version) {
        (true, SpecVersion::V3_1) if fragment.starts_with('/') => {
            Ok(Reference::local(fallback, fragment).with_raw_fragment())
        }
        (true, _) => Err(invalid()),
        (false, SpecVersion::V3_1) => {
            Ok(Reference::external(fallback, resource, Some(fragment.to_string())).with_raw_fragment())
        }
        (false, _) => {
            let last = segments.last().copied().unwrap_or_default();
            if last.is_empty() {
                return Err(invalid());
            }
            Ok(Reference::external(fallback, resource, Some(decode_segment(last))))
        }
    }
}

/// The 3.0 loader registry. Every element kind is registered.
pub(crate) fn load_v3_element(
    kind: ElementKind,
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<Element> {
    let element = match kind {
        ElementKind::Document => Element::Document(Box::new(document::load_document(node, ctx))),
        ElementKind::Info => Element::Info(info::load_info(node, ctx)?),
        ElementKind::Contact => Element::Contact(info::load_contact(node, ctx)?),
        ElementKind::License => Element::License(info::load_license(node, ctx)?),
        ElementKind::Server => Element::Server(info::load_server(node, ctx)?),
        ElementKind::ServerVariable => {
            Element::ServerVariable(info::load_server_variable(node, ctx)?)
        }
        ElementKind::Components => Element::Components(document::load_components(node, ctx)?),
        ElementKind::Paths => Element::Paths(operation::load_paths(node, ctx)?),
        ElementKind::PathItem => Element::PathItem(operation::load_path_item(node, ctx)?),
        ElementKind::Operation => Element::Operation(operation::load_operation(node, ctx)?),
        ElementKind::Parameter => Element::Parameter(parameter::load_parameter(node, ctx)?),
        ElementKind::RequestBody => {
            Element::RequestBody(operation::load_request_body(node, ctx)?)
        }
        ElementKind::MediaType => Element::MediaType(operation::load_media_type(node, ctx)?),
        ElementKind::Encoding => Element::Encoding(operation::load_encoding(node, ctx)?),
        ElementKind::Responses => Element::Responses(response::load_responses(node, ctx)?),
        ElementKind::Response => Element::Response(response::load_response(node, ctx)?),
        ElementKind::Header => Element::Header(parameter::load_header(node, ctx)?),
        ElementKind::Example => Element::Example(response::load_example(node, ctx)?),
        ElementKind::Link => Element::Link(response::load_link(node, ctx)?),
        ElementKind::Callback => Element::Callback(operation::load_callback(node, ctx)?),
        ElementKind::SecurityScheme => {
            Element::SecurityScheme(security::load_security_scheme(node, ctx)?)
        }
        ElementKind::SecurityRequirement => {
            Element::SecurityRequirement(security::load_security_requirement(node, ctx)?)
        }
        ElementKind::OAuthFlows => Element::OAuthFlows(security::load_oauth_flows(node, ctx)?),
        ElementKind::OAuthFlow => Element::OAuthFlow(security::load_oauth_flow(node, ctx)?),
        ElementKind::Tag => Element::Tag(info::load_tag(node, ctx)?),
        ElementKind::ExternalDocs => Element::ExternalDocs(info::load_external_docs(node, ctx)?),
        ElementKind::Schema => Element::Schema(schema::load_schema(node, ctx)?),
        ElementKind::Discriminator => {
            Element::Discriminator(schema::load_discriminator(node, ctx)?)
        }
        ElementKind::Xml => Element::Xml(schema::load_xml(node, ctx)?),
    };
    Ok(element)
}
