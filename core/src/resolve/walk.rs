#![deny(missing_docs)]

//! # Reference Walk
//!
//! Collects every reference held by an assembled document together with the
//! pointer of the field holding it, and checks them against a source once so
//! broken references surface as diagnostics right after a read.

use super::{resolve_reference, DocumentSource};
use crate::diagnostics::OpenApiError;
use crate::error::ReaderResult;
use crate::models::{
    AdditionalProperties, Callback, Components, Encoding, Example, Header, Link, MediaType,
    OpenApiDocument, Operation, Parameter, PathItem, RefOr, Reference, ReferenceKind, RequestBody,
    Response, Schema, SecurityRequirement, SecurityScheme, Tag,
};
use crate::resolve::pointer::escape_segment;
use crate::settings::ReferenceResolution;
use indexmap::IndexMap;
use tracing::debug;

/// Every reference in `document`, with the pointer of the field holding it.
pub fn collect_references(document: &OpenApiDocument) -> Vec<(String, Reference)> {
    let mut collector = Collector {
        path: Vec::new(),
        found: Vec::new(),
        host: document.location.clone(),
    };
    collector.document(document);
    collector.found
}

/// Resolves the references of `document` once, according to `mode`.
///
/// Local fragments that do not address a component (JSON Schema `#/$defs/...`
/// style pointers) are skipped in every mode.
pub fn check_references<S>(
    document: &OpenApiDocument,
    source: &S,
    mode: ReferenceResolution,
) -> Vec<OpenApiError>
where
    S: DocumentSource + ?Sized,
{
    if mode == ReferenceResolution::DoNotResolve {
        return Vec::new();
    }
    let references = collect_references(document);
    debug!(count = references.len(), ?mode, "checking references");
    references
        .into_iter()
        .filter(|(_, reference)| !(reference.raw_fragment && !reference.is_external()))
        .filter(|(_, reference)| mode == ReferenceResolution::ResolveAll || !reference.is_external())
        .filter_map(|(pointer, reference)| {
            check_one(&reference, source)
                .err()
                .map(|err| OpenApiError::new(pointer, err.to_string()))
        })
        .collect()
}

fn check_one<S: DocumentSource + ?Sized>(reference: &Reference, source: &S) -> ReaderResult<()> {
    match reference.kind {
        ReferenceKind::Schema => resolve_reference::<Schema, S>(reference, source).map(drop),
        ReferenceKind::Response => resolve_reference::<Response, S>(reference, source).map(drop),
        ReferenceKind::Parameter => resolve_reference::<Parameter, S>(reference, source).map(drop),
        ReferenceKind::Example => resolve_reference::<Example, S>(reference, source).map(drop),
        ReferenceKind::RequestBody => {
            resolve_reference::<RequestBody, S>(reference, source).map(drop)
        }
        ReferenceKind::Header => resolve_reference::<Header, S>(reference, source).map(drop),
        ReferenceKind::SecurityScheme => {
            resolve_reference::<SecurityScheme, S>(reference, source).map(drop)
        }
        ReferenceKind::Link => resolve_reference::<Link, S>(reference, source).map(drop),
        ReferenceKind::Callback => resolve_reference::<Callback, S>(reference, source).map(drop),
        ReferenceKind::Tag => resolve_reference::<Tag, S>(reference, source).map(drop),
        ReferenceKind::PathItem => resolve_reference::<PathItem, S>(reference, source).map(drop),
    }
}

struct Collector {
    path: Vec<String>,
    found: Vec<(String, Reference)>,
    host: Option<String>,
}

impl Collector {
    fn at(&mut self, segment: &str, f: impl FnOnce(&mut Self)) {
        self.path.push(segment.to_string());
        f(self);
        self.path.pop();
    }

    fn record(&mut self, reference: &Reference) {
        let mut pointer = String::from("#");
        for segment in &self.path {
            pointer.push('/');
            pointer.push_str(&escape_segment(segment));
        }
        self.found.push((pointer, reference.clone()));
    }

    fn ref_or<T>(&mut self, value: &RefOr<T>, inner: fn(&mut Self, &T)) {
        match value {
            RefOr::Item(item) => inner(self, item),
            RefOr::Reference(reference) => self.record(reference),
        }
    }

    fn map<T>(&mut self, segment: &str, map: &IndexMap<String, RefOr<T>>, inner: fn(&mut Self, &T)) {
        if map.is_empty() {
            return;
        }
        self.at(segment, |c| {
            for (key, value) in map {
                c.at(key, |c| c.ref_or(value, inner));
            }
        });
    }

    fn list<T>(&mut self, segment: &str, list: &[RefOr<T>], inner: fn(&mut Self, &T)) {
        if list.is_empty() {
            return;
        }
        self.at(segment, |c| {
            for (index, value) in list.iter().enumerate() {
                c.at(&index.to_string(), |c| c.ref_or(value, inner));
            }
        });
    }

    fn boxed(&mut self, segment: &str, value: &Option<Box<RefOr<Schema>>>) {
        if let Some(value) = value {
            self.at(segment, |c| c.ref_or(&**value, Self::schema));
        }
    }

    fn document(&mut self, document: &OpenApiDocument) {
        self.at("paths", |c| {
            for (template, item) in &document.paths.items {
                c.at(template, |c| c.ref_or(item, Self::path_item));
            }
        });
        self.map("webhooks", &document.webhooks, Self::path_item);
        if let Some(components) = &document.components {
            self.at("components", |c| c.components(components));
        }
        self.security("security", &document.security);
    }

    fn security(&mut self, segment: &str, requirements: &[SecurityRequirement]) {
        if requirements.is_empty() {
            return;
        }
        let host = self.host.clone();
        self.at(segment, |c| {
            for (index, requirement) in requirements.iter().enumerate() {
                c.at(&index.to_string(), |c| {
                    for reference in requirement.references(host.as_deref()) {
                        let name = reference.id.clone().unwrap_or_default();
                        c.at(&name, |c| c.record(&reference));
                    }
                });
            }
        });
    }

    fn components(&mut self, components: &Components) {
        self.map("schemas", &components.schemas, Self::schema);
        self.map("responses", &components.responses, Self::response);
        self.map("parameters", &components.parameters, Self::parameter);
        self.map("examples", &components.examples, Self::leaf::<Example>);
        self.map("requestBodies", &components.request_bodies, Self::request_body);
        self.map("headers", &components.headers, Self::header);
        self.map("securitySchemes", &components.security_schemes, Self::leaf::<SecurityScheme>);
        self.map("links", &components.links, Self::leaf::<Link>);
        self.map("callbacks", &components.callbacks, Self::callback);
        self.map("pathItems", &components.path_items, Self::path_item);
    }

    fn leaf<T>(&mut self, _value: &T) {}

    fn path_item(&mut self, item: &PathItem) {
        self.list("parameters", &item.parameters, Self::parameter);
        for (method, operation) in &item.operations {
            self.at(method.as_str(), |c| c.operation(operation));
        }
    }

    fn operation(&mut self, operation: &Operation) {
        self.list("tags", &operation.tags, Self::leaf::<Tag>);
        self.list("parameters", &operation.parameters, Self::parameter);
        if let Some(body) = &operation.request_body {
            self.at("requestBody", |c| c.ref_or(body, Self::request_body));
        }
        self.at("responses", |c| {
            for (code, response) in &operation.responses.codes {
                c.at(code, |c| c.ref_or(response, Self::response));
            }
        });
        self.map("callbacks", &operation.callbacks, Self::callback);
        if let Some(security) = &operation.security {
            self.security("security", security);
        }
    }

    fn parameter(&mut self, parameter: &Parameter) {
        if let Some(schema) = &parameter.schema {
            self.at("schema", |c| c.ref_or(schema, Self::schema));
        }
        self.map("examples", &parameter.examples, Self::leaf::<Example>);
        self.content(&parameter.content);
    }

    fn header(&mut self, header: &Header) {
        if let Some(schema) = &header.schema {
            self.at("schema", |c| c.ref_or(schema, Self::schema));
        }
        self.map("examples", &header.examples, Self::leaf::<Example>);
        self.content(&header.content);
    }

    fn request_body(&mut self, body: &RequestBody) {
        self.content(&body.content);
    }

    fn response(&mut self, response: &Response) {
        self.map("headers", &response.headers, Self::header);
        self.content(&response.content);
        self.map("links", &response.links, Self::leaf::<Link>);
    }

    fn content(&mut self, content: &IndexMap<String, MediaType>) {
        if content.is_empty() {
            return;
        }
        self.at("content", |c| {
            for (media_type, value) in content {
                c.at(media_type, |c| c.media_type(value));
            }
        });
    }

    fn media_type(&mut self, media_type: &MediaType) {
        if let Some(schema) = &media_type.schema {
            self.at("schema", |c| c.ref_or(schema, Self::schema));
        }
        self.map("examples", &media_type.examples, Self::leaf::<Example>);
        if !media_type.encoding.is_empty() {
            self.at("encoding", |c| {
                for (name, encoding) in &media_type.encoding {
                    c.at(name, |c| c.encoding(encoding));
                }
            });
        }
    }

    fn encoding(&mut self, encoding: &Encoding) {
        self.map("headers", &encoding.headers, Self::header);
    }

    fn callback(&mut self, callback: &Callback) {
        for (expression, item) in &callback.path_items {
            self.at(expression.as_str(), |c| c.ref_or(item, Self::path_item));
        }
    }

    fn schema(&mut self, schema: &Schema) {
        self.list("allOf", &schema.all_of, Self::schema);
        self.list("oneOf", &schema.one_of, Self::schema);
        self.list("anyOf", &schema.any_of, Self::schema);
        self.boxed("not", &schema.not);
        self.boxed("items", &schema.items);
        self.list("prefixItems", &schema.prefix_items, Self::schema);
        self.map("properties", &schema.properties, Self::schema);
        if let Some(AdditionalProperties::Schema(additional)) = &schema.additional_properties {
            self.at("additionalProperties", |c| c.ref_or(&**additional, Self::schema));
        }
        self.map("patternProperties", &schema.pattern_properties, Self::schema);
        self.map("dependentSchemas", &schema.dependent_schemas, Self::schema);
        self.boxed("if", &schema.if_schema);
        self.boxed("then", &schema.then_schema);
        self.boxed("else", &schema.else_schema);
        self.map("$defs", &schema.defs, Self::schema);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OperationType, Paths};

    fn document() -> OpenApiDocument {
        let mut operation = Operation::default();
        operation.parameters.push(RefOr::Reference(Reference::local(
            ReferenceKind::Parameter,
            "Limit",
        )));
        let mut pet = Schema::of_type("object");
        pet.properties.insert(
            "self".into(),
            RefOr::Reference(Reference::local(ReferenceKind::Schema, "Pet")),
        );
        let mut item = PathItem::default();
        item.operations.insert(OperationType::Get, operation);
        let mut paths = Paths::default();
        paths.items.insert("/pets".into(), RefOr::Item(item));
        let mut doc = OpenApiDocument {
            paths,
            security: vec![SecurityRequirement {
                schemes: [("api_key".to_string(), vec![])].into_iter().collect(),
            }],
            ..Default::default()
        };
        doc.components_mut()
            .schemas
            .insert("Pet".into(), RefOr::Item(pet));
        doc
    }

    #[test]
    fn test_collects_with_pointers() {
        let found: Vec<String> = collect_references(&document())
            .into_iter()
            .map(|(pointer, _)| pointer)
            .collect();
        assert_eq!(
            found,
            vec![
                "#/paths/~1pets/get/parameters/0",
                "#/components/schemas/Pet/properties/self",
                "#/security/0/api_key",
            ]
        );
    }

    #[test]
    fn test_check_reports_only_broken() {
        let doc = document();
        let errors = check_references(&doc, &doc, ReferenceResolution::ResolveLocal);
        let pointers: Vec<_> = errors.iter().map(|e| e.pointer.as_str()).collect();
        assert_eq!(
            pointers,
            vec!["#/paths/~1pets/get/parameters/0", "#/security/0/api_key"]
        );
        assert!(check_references(&doc, &doc, ReferenceResolution::DoNotResolve).is_empty());
    }
}
