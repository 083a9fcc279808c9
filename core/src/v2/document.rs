//! Swagger 2.0 document root, server synthesis and request body fixups.

use super::operation::{request_body_from, response_media_types};
use super::response::attach_content;
use crate::context::ParsingContext;
use crate::dispatch::{is_extension, set_extension, FixedFieldMap, PatternFieldMap};
use crate::error::{ReaderError, ReaderResult};
use crate::models::{
    Components, OpenApiDocument, Parameter, RefOr, Reference, ReferenceKind, Server,
};
use crate::node::{MapNode, ParseNode};
use crate::resolve::pointer::escape_segment;
use crate::temp_storage::{keys, TempValue};
use crate::v3::document::{assemble_document, require_fields};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use tracing::{debug, warn};
use url::Url;

/// Root fields read ahead of the field loop, so `paths` may precede them.
const GLOBALS: [(&str, &str, bool); 5] = [
    ("host", keys::HOST, false),
    ("basePath", keys::BASE_PATH, false),
    ("schemes", keys::SCHEMES, true),
    ("consumes", keys::GLOBAL_CONSUMES, true),
    ("produces", keys::GLOBAL_PRODUCES, true),
];

fn prime_globals(map: MapNode<'_>, ctx: &mut ParsingContext) {
    for (field, key, is_list) in GLOBALS {
        let Some(node) = map.get(field) else {
            continue;
        };
        let value = ctx.within(field, |ctx| {
            if is_list {
                node.create_simple_list(ctx, field).map(TempValue::Texts)
            } else {
                node.scalar().map(TempValue::Text)
            }
        });
        if let Some(value) = value {
            ctx.temp().set(key, value);
        }
    }
}

fn primed(_: &mut OpenApiDocument, _: ParseNode<'_>, _: &mut ParsingContext) -> ReaderResult<()> {
    Ok(())
}

static DOCUMENT_FIXED: Lazy<FixedFieldMap<OpenApiDocument>> = Lazy::new(|| {
    FixedFieldMap::<OpenApiDocument>::new()
        .field("swagger", |_, n, _| n.scalar().map(drop))
        .field("info", |o, n, ctx| {
            o.info = ctx.load(n)?;
            Ok(())
        })
        .field("host", primed)
        .field("basePath", primed)
        .field("schemes", primed)
        .field("consumes", primed)
        .field("produces", primed)
        .field("paths", |o, n, ctx| {
            o.paths = ctx.load(n)?;
            Ok(())
        })
        .field("definitions", |o, n, ctx| {
            o.components_mut().schemas = ctx.load_map(n, "definitions")?;
            Ok(())
        })
        .field("parameters", |o, n, ctx| {
            load_shared_parameters(o.components_mut(), n, ctx)
        })
        .field("responses", |o, n, ctx| {
            o.components_mut().responses = ctx.load_map(n, "responses")?;
            Ok(())
        })
        .field("securityDefinitions", |o, n, ctx| {
            o.components_mut().security_schemes = ctx.load_map(n, "securityDefinitions")?;
            Ok(())
        })
        .field("security", |o, n, ctx| {
            o.security = ctx.load_list(n, "security")?;
            Ok(())
        })
        .field("tags", |o, n, ctx| {
            o.tags = ctx.load_list(n, "tags")?;
            Ok(())
        })
        .field("externalDocs", |o, n, ctx| {
            o.external_docs = Some(ctx.load(n)?);
            Ok(())
        })
});

static DOCUMENT_PATTERNS: Lazy<PatternFieldMap<OpenApiDocument>> = Lazy::new(|| {
    PatternFieldMap::<OpenApiDocument>::new().pattern(is_extension, set_extension::<OpenApiDocument>)
});

/// `#/parameters`: body and form entries become request bodies, the rest stay parameters.
fn load_shared_parameters(
    components: &mut Components,
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<()> {
    node.create_map(ctx, "parameters", |name, value, ctx| {
        ctx.temp().clear(&[
            keys::BODY_PARAMETER,
            keys::FORM_PARAMETERS,
            keys::PARAMETER_IS_BODY_OR_FORM,
        ]);
        let parameter = ctx.load::<RefOr<Parameter>>(value)?;
        let body = ctx.temp().take_parameter(keys::BODY_PARAMETER);
        let form = ctx.temp().take_parameters(keys::FORM_PARAMETERS);
        if ctx.temp().take(keys::PARAMETER_IS_BODY_OR_FORM).is_none() {
            components.parameters.insert(name.to_string(), parameter);
        } else if let Some(request_body) = request_body_from(body, form, ctx) {
            components
                .request_bodies
                .insert(name.to_string(), RefOr::Item(request_body));
        }
        Ok(())
    })?;
    Ok(())
}

/// `host`, `basePath` and `schemes`, each possibly filled in from the base URL.
#[derive(Debug, Default)]
struct Origin {
    host: Option<String>,
    base_path: Option<String>,
    schemes: Option<Vec<String>>,
}

impl Origin {
    fn declared(ctx: &ParsingContext) -> Self {
        let temp = ctx.temp_ref();
        Self {
            host: temp.text(keys::HOST).map(str::to_string),
            base_path: temp.text(keys::BASE_PATH).map(str::to_string),
            schemes: temp.texts(keys::SCHEMES).map(<[String]>::to_vec),
        }
    }

    fn is_undeclared(&self) -> bool {
        self.host.is_none() && self.base_path.is_none() && self.schemes.is_none()
    }

    fn with_defaults(mut self, base: Option<&Url>) -> Self {
        if let Some(base) = base {
            self.host.get_or_insert_with(|| authority(base));
            self.base_path.get_or_insert_with(|| directory(base.path()));
            self.schemes
                .get_or_insert_with(|| vec![base.scheme().to_string()]);
        }
        self
    }

    fn servers(&self) -> Vec<Server> {
        let host = self.host.as_deref().unwrap_or_default();
        let base_path = match self.base_path.as_deref().unwrap_or_default() {
            "" => String::new(),
            path if path.starts_with('/') => path.to_string(),
            path => format!("/{path}"),
        };
        if host.is_empty() && base_path.is_empty() {
            return Vec::new();
        }
        let schemes = self.schemes.as_deref().unwrap_or_default();
        let mut urls: Vec<String> = if host.is_empty() {
            vec![base_path]
        } else if schemes.is_empty() {
            vec![format!("//{host}{base_path}")]
        } else {
            schemes
                .iter()
                .map(|scheme| format!("{scheme}://{host}{base_path}"))
                .collect()
        };
        urls.dedup();
        urls.into_iter()
            .map(|url| match url.trim_end_matches('/') {
                "" => Server::with_url("/"),
                trimmed => Server::with_url(trimmed),
            })
            .collect()
    }
}

fn authority(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Path of the directory holding the document the base URL names.
fn directory(path: &str) -> String {
    path.rsplit_once('/')
        .map_or_else(String::new, |(dir, _)| dir.to_string())
}

/// A host is a name or address with an optional port, and nothing else.
fn validate_host(host: &str) -> ReaderResult<()> {
    let invalid = || ReaderError::InvalidValue {
        value: host.to_string(),
        expected: "host",
    };
    if host.contains("://") {
        return Err(invalid());
    }
    let parsed = Url::parse(&format!("http://{host}")).map_err(|_| invalid())?;
    if parsed.path() != "/" || parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid());
    }
    Ok(())
}

fn base_url(ctx: &ParsingContext) -> Option<Url> {
    match ctx.settings().parsed_base_url() {
        Ok(url) => url,
        Err(err) => {
            warn!(%err, "ignoring base URL");
            None
        }
    }
}

/// Servers for an operation that overrides the document's `schemes`.
pub(crate) fn servers_for(ctx: &ParsingContext, schemes: &[String]) -> Vec<Server> {
    let mut origin = Origin::declared(ctx);
    if origin.host.as_deref().is_some_and(|host| validate_host(host).is_err()) {
        return Vec::new();
    }
    origin.schemes = Some(schemes.to_vec());
    origin.with_defaults(base_url(ctx).as_ref()).servers()
}

fn document_servers(ctx: &mut ParsingContext) -> Vec<Server> {
    let origin = Origin::declared(ctx);
    let base = base_url(ctx);
    if origin.is_undeclared() {
        return base
            .map(|base| {
                let url = format!("{}://{}", base.scheme(), authority(&base));
                vec![Server::with_url(url)]
            })
            .unwrap_or_default();
    }
    if let Some(host) = origin.host.as_deref() {
        if let Err(err) = validate_host(host) {
            ctx.report_at("#/host", err.to_string());
            return Vec::new();
        }
    }
    origin.with_defaults(base.as_ref()).servers()
}

/// Removes references to promoted `#/parameters` entries and returns the last one
/// as a request body reference.
fn take_body_reference(
    parameters: &mut Vec<RefOr<Parameter>>,
    bodies: &HashSet<String>,
) -> Option<Reference> {
    let mut found = None;
    parameters.retain(|parameter| match parameter {
        RefOr::Reference(reference)
            if !reference.is_external()
                && reference.id.as_ref().is_some_and(|id| bodies.contains(id)) =>
        {
            found = Some(Reference {
                kind: ReferenceKind::RequestBody,
                ..reference.clone()
            });
            false
        }
        _ => true,
    });
    found
}

fn promote_body_references(document: &mut OpenApiDocument) {
    let bodies: HashSet<String> = match &document.components {
        Some(components) => components.request_bodies.keys().cloned().collect(),
        None => return,
    };
    if bodies.is_empty() {
        return;
    }
    for item in document.paths.items.values_mut() {
        let RefOr::Item(item) = item else {
            continue;
        };
        let shared = take_body_reference(&mut item.parameters, &bodies);
        for (method, operation) in item.operations.iter_mut() {
            if let Some(reference) = take_body_reference(&mut operation.parameters, &bodies) {
                if operation.request_body.is_none() {
                    operation.request_body = Some(RefOr::Reference(reference));
                }
            } else if let Some(reference) = &shared {
                if method.accepts_body() && operation.request_body.is_none() {
                    operation.request_body = Some(RefOr::Reference(reference.clone()));
                }
            }
        }
    }
}

fn attach_shared_response_content(document: &mut OpenApiDocument, ctx: &mut ParsingContext) {
    let Some(components) = document.components.as_mut() else {
        return;
    };
    let produces = response_media_types(ctx);
    for (name, response) in components.responses.iter_mut() {
        if let RefOr::Item(response) = response {
            let scope = format!("#/responses/{}", escape_segment(name));
            attach_content(response, &scope, &produces, ctx);
        }
    }
}

pub(crate) fn load_document(root: ParseNode<'_>, ctx: &mut ParsingContext) -> OpenApiDocument {
    if let ParseNode::Map(map) = root {
        prime_globals(map, ctx);
    }
    let Some((mut document, map)) = assemble_document(root, ctx, &DOCUMENT_FIXED, &DOCUMENT_PATTERNS)
    else {
        return OpenApiDocument {
            location: ctx.document_location().map(str::to_string),
            ..Default::default()
        };
    };

    document.servers = document_servers(ctx);
    debug!(servers = document.servers.len(), "synthesized servers");
    attach_shared_response_content(&mut document, ctx);
    promote_body_references(&mut document);
    require_fields(map, &["info", "paths"], ctx);
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OperationType;
    use crate::service::SpecVersion;
    use crate::settings::ReaderSettings;
    use serde_json::{json, Value};

    fn load(value: &Value, settings: ReaderSettings) -> (OpenApiDocument, ParsingContext) {
        let mut ctx = ParsingContext::new(SpecVersion::V2, settings);
        let document = load_document(ParseNode::new(value), &mut ctx);
        (document, ctx)
    }

    fn urls(document: &OpenApiDocument) -> Vec<&str> {
        document.servers.iter().map(|s| s.url.as_str()).collect()
    }

    #[test]
    fn test_servers_from_host_base_path_and_schemes() {
        let value = json!({
            "swagger": "2.0",
            "info": {"title": "t", "version": "1"},
            "host": "petstore.example.com:8080",
            "basePath": "/v1/",
            "schemes": ["https", "http"],
            "paths": {}
        });
        let (document, ctx) = load(&value, ReaderSettings::default());
        assert!(ctx.diagnostic().is_clean(), "{:?}", ctx.diagnostic());
        assert_eq!(
            urls(&document),
            vec![
                "https://petstore.example.com:8080/v1",
                "http://petstore.example.com:8080/v1"
            ]
        );
    }

    #[test]
    fn test_servers_fall_back_to_base_url() {
        let value = json!({"swagger": "2.0", "info": {"title": "t", "version": "1"}, "paths": {}});
        let settings = ReaderSettings::default().with_base_url("https://api.example.com/docs/swagger.json");
        let (document, _) = load(&value, settings.clone());
        assert_eq!(urls(&document), vec!["https://api.example.com"]);

        let with_path = json!({
            "swagger": "2.0", "info": {"title": "t", "version": "1"},
            "basePath": "/v2", "paths": {}
        });
        let (document, _) = load(&with_path, settings);
        assert_eq!(urls(&document), vec!["https://api.example.com/v2"]);

        let (document, _) = load(&with_path, ReaderSettings::default());
        assert_eq!(urls(&document), vec!["/v2"]);
    }

    #[test]
    fn test_host_without_schemes_is_scheme_relative() {
        let value = json!({
            "swagger": "2.0", "info": {"title": "t", "version": "1"},
            "host": "example.com", "paths": {}
        });
        let (document, _) = load(&value, ReaderSettings::default());
        assert_eq!(urls(&document), vec!["//example.com"]);
    }

    #[test]
    fn test_invalid_host_is_reported() {
        for host in ["https://example.com", "example.com:99999", "example.com/api"] {
            let value = json!({
                "swagger": "2.0", "info": {"title": "t", "version": "1"},
                "host": host, "paths": {}
            });
            let (document, ctx) = load(&value, ReaderSettings::default());
            assert!(document.servers.is_empty(), "{host}");
            assert_eq!(ctx.diagnostic().errors[0].pointer, "#/host");
        }
    }

    #[test]
    fn test_globals_apply_regardless_of_field_order() {
        let value = json!({
            "swagger": "2.0",
            "info": {"title": "t", "version": "1"},
            "paths": {
                "/pets": {
                    "post": {
                        "parameters": [{"name": "pet", "in": "body", "schema": {"type": "object"}}],
                        "responses": {"200": {"description": "ok", "schema": {"type": "object"}}}
                    }
                }
            },
            "consumes": ["application/xml"],
            "produces": ["application/xml"]
        });
        let (document, _) = load(&value, ReaderSettings::default());
        let item = document.paths.items["/pets"].as_item().unwrap();
        let post = item.operation(OperationType::Post).unwrap();
        let body = post.request_body.as_ref().unwrap().as_item().unwrap();
        assert!(body.content.contains_key("application/xml"));
        let ok = post.responses.get("200").unwrap().as_item().unwrap();
        assert!(ok.content.contains_key("application/xml"));
    }

    #[test]
    fn test_shared_body_parameters_become_request_bodies() {
        let value = json!({
            "swagger": "2.0",
            "info": {"title": "t", "version": "1"},
            "parameters": {
                "PetBody": {"name": "pet", "in": "body", "schema": {"$ref": "#/definitions/Pet"}},
                "Limit": {"name": "limit", "in": "query", "type": "integer"}
            },
            "definitions": {"Pet": {"type": "object"}},
            "paths": {
                "/pets": {
                    "parameters": [{"$ref": "#/parameters/PetBody"}],
                    "get": {"parameters": [{"$ref": "#/parameters/Limit"}], "responses": {}},
                    "put": {"responses": {}},
                    "post": {"parameters": [{"$ref": "#/parameters/PetBody"}], "responses": {}}
                }
            }
        });
        let (document, ctx) = load(&value, ReaderSettings::default());
        assert!(ctx.diagnostic().is_clean(), "{:?}", ctx.diagnostic());
        let components = document.components.as_ref().unwrap();
        assert!(components.request_bodies.contains_key("PetBody"));
        assert!(components.parameters.contains_key("Limit"));
        assert!(!components.parameters.contains_key("PetBody"));

        let item = document.paths.items["/pets"].as_item().unwrap();
        assert!(item.parameters.is_empty());
        let get = item.operation(OperationType::Get).unwrap();
        assert_eq!(get.parameters.len(), 1);
        assert!(get.request_body.is_none());
        for method in [OperationType::Put, OperationType::Post] {
            let operation = item.operation(method).unwrap();
            let reference = operation.request_body.as_ref().unwrap().as_reference().unwrap();
            assert_eq!(reference.kind, ReferenceKind::RequestBody);
            assert_eq!(reference.id.as_deref(), Some("PetBody"));
            assert!(operation.parameters.is_empty());
        }
    }

    #[test]
    fn test_shared_responses_get_global_produces() {
        let value = json!({
            "swagger": "2.0",
            "info": {"title": "t", "version": "1"},
            "produces": ["application/json"],
            "responses": {
                "NotFound": {"description": "missing", "schema": {"type": "string"}}
            },
            "paths": {}
        });
        let (document, _) = load(&value, ReaderSettings::default());
        let components = document.components.unwrap();
        let not_found = components.responses["NotFound"].as_item().unwrap();
        assert!(not_found.content.contains_key("application/json"));
    }

    #[test]
    fn test_missing_required_fields() {
        let value = json!({"swagger": "2.0"});
        let (_, ctx) = load(&value, ReaderSettings::default());
        assert!(ctx.diagnostic().has_error_containing("info is a required property"));
        assert!(ctx.diagnostic().has_error_containing("paths is a required property"));
    }
}
