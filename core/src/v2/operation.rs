//! Swagger 2.0 Path Item and Operation loaders.
//!
//! Body and form parameters stashed by the parameter loader are turned into
//! a request body here, after every field of the operation has been seen,
//! so `consumes` may appear before or after `parameters`. Path-level body
//! parameters are moved out of temp storage as soon as they are loaded and
//! applied to the POST, PUT and PATCH operations that declare no body of
//! their own, using each operation's `consumes`.

use super::document::servers_for;
use super::parameter::load_parameters;
use super::response::attach_content;
use crate::context::ParsingContext;
use crate::dispatch::{is_extension, parse_map, set_extension, FixedFieldMap, PatternFieldMap};
use crate::error::ReaderResult;
use crate::models::{
    Extensible, Extensions, MediaType, Operation, OperationType, Parameter, PathItem, RefOr,
    ReferenceKind, RequestBody, Schema,
};
use crate::node::ParseNode;
use crate::resolve::pointer::escape_segment;
use crate::temp_storage::{keys, TempValue};
use crate::v3;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::trace;

const OPERATION_KEYS: [&str; 4] = [
    keys::BODY_PARAMETER,
    keys::FORM_PARAMETERS,
    keys::OPERATION_CONSUMES,
    keys::OPERATION_PRODUCES,
];

/// The first non-empty list among the operation and document declarations.
fn declared(ctx: &ParsingContext, operation_key: &str, global_key: &str) -> Option<Vec<String>> {
    [operation_key, global_key].into_iter().find_map(|key| {
        ctx.temp_ref()
            .texts(key)
            .filter(|types| !types.is_empty())
            .map(<[String]>::to_vec)
    })
}

/// Media types for a request body: the operation's `consumes`, else the
/// document's, else `fallback`.
fn request_media_types(
    ctx: &ParsingContext,
    operation: Option<&[String]>,
    fallback: &str,
    form: bool,
) -> Vec<String> {
    let declared = operation
        .filter(|types| !types.is_empty())
        .map(<[String]>::to_vec)
        .or_else(|| {
            ctx.temp_ref()
                .texts(keys::GLOBAL_CONSUMES)
                .filter(|types| !types.is_empty())
                .map(<[String]>::to_vec)
        })
        .unwrap_or_default()
        .into_iter()
        .filter(|media_type| !form || media_type.contains("form"))
        .collect::<Vec<_>>();
    if declared.is_empty() {
        vec![fallback.to_string()]
    } else {
        declared
    }
}

/// Media types for responses: `produces`, else the configured default, else `application/octet-stream`.
pub(crate) fn response_media_types(ctx: &ParsingContext) -> Vec<String> {
    declared(ctx, keys::OPERATION_PRODUCES, keys::GLOBAL_PRODUCES)
        .or_else(|| {
            let defaults = &ctx.settings().default_content_type;
            (!defaults.is_empty()).then(|| defaults.clone())
        })
        .unwrap_or_else(|| vec!["application/octet-stream".to_string()])
}

/// A request body standing in for an `in: body` parameter.
pub(crate) fn body_request_body(parameter: Parameter, media_types: &[String]) -> RequestBody {
    let Parameter {
        name,
        description,
        required,
        schema,
        example,
        examples,
        mut extensions,
        ..
    } = parameter;
    extensions.insert("x-bodyName".to_string(), Value::String(name));
    let content = media_types
        .iter()
        .map(|media_type| {
            let media = MediaType {
                schema: schema.clone(),
                example: example.clone(),
                examples: examples.clone(),
                ..Default::default()
            };
            (media_type.clone(), media)
        })
        .collect();
    RequestBody {
        description,
        content,
        required,
        extensions,
    }
}

/// A request body whose object schema has one property per form parameter.
pub(crate) fn form_request_body(parameters: Vec<Parameter>, media_types: &[String]) -> RequestBody {
    let mut schema = Schema::of_type("object");
    let required = parameters.iter().any(|parameter| parameter.required);
    for parameter in parameters {
        if parameter.required {
            schema.required.push(parameter.name.clone());
        }
        let mut property = parameter.schema.unwrap_or_default();
        if let (RefOr::Item(item), Some(description)) = (&mut property, parameter.description) {
            item.description = Some(description);
        }
        schema.properties.insert(parameter.name, property);
    }
    let content = media_types
        .iter()
        .map(|media_type| {
            let media = MediaType::with_schema(Some(RefOr::Item(schema.clone())));
            (media_type.clone(), media)
        })
        .collect();
    RequestBody {
        content,
        required,
        ..Default::default()
    }
}

/// Builds the request body for a body parameter or a set of form parameters,
/// using the `consumes` of the operation being loaded.
pub(crate) fn request_body_from(
    body: Option<Parameter>,
    form: Vec<Parameter>,
    ctx: &ParsingContext,
) -> Option<RequestBody> {
    let consumes = ctx.temp_ref().texts(keys::OPERATION_CONSUMES);
    request_body_for(body, form, consumes, ctx)
}

/// Builds a request body against an explicit operation `consumes`.
/// The body parameter wins when both are present.
fn request_body_for(
    body: Option<Parameter>,
    form: Vec<Parameter>,
    consumes: Option<&[String]>,
    ctx: &ParsingContext,
) -> Option<RequestBody> {
    if let Some(body) = body {
        let media_types = request_media_types(ctx, consumes, "application/json", false);
        return Some(body_request_body(body, &media_types));
    }
    if form.is_empty() {
        return None;
    }
    let media_types =
        request_media_types(ctx, consumes, "application/x-www-form-urlencoded", true);
    Some(form_request_body(form, &media_types))
}

#[derive(Debug, Default)]
struct PathItemBuilder {
    item: PathItem,
    body: Option<Parameter>,
    form: Vec<Parameter>,
    consumes: IndexMap<OperationType, Vec<String>>,
}

impl Extensible for PathItemBuilder {
    fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.item.extensions
    }
}

fn set_operation(
    o: &mut PathItemBuilder,
    method: OperationType,
    n: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<()> {
    o.item.operations.insert(method, ctx.load(n)?);
    let scope = ctx.location();
    if let Some(TempValue::Texts(types)) =
        ctx.temp().take_scoped(&scope, keys::OPERATION_CONSUMES)
    {
        o.consumes.insert(method, types);
    }
    Ok(())
}

static PATH_ITEM_FIXED: Lazy<FixedFieldMap<PathItemBuilder>> = Lazy::new(|| {
    FixedFieldMap::<PathItemBuilder>::new()
        .field("get", |o, n, ctx| set_operation(o, OperationType::Get, n, ctx))
        .field("put", |o, n, ctx| set_operation(o, OperationType::Put, n, ctx))
        .field("post", |o, n, ctx| set_operation(o, OperationType::Post, n, ctx))
        .field("delete", |o, n, ctx| set_operation(o, OperationType::Delete, n, ctx))
        .field("options", |o, n, ctx| set_operation(o, OperationType::Options, n, ctx))
        .field("head", |o, n, ctx| set_operation(o, OperationType::Head, n, ctx))
        .field("patch", |o, n, ctx| set_operation(o, OperationType::Patch, n, ctx))
        .field("parameters", |o, n, ctx| {
            ctx.temp()
                .clear(&[keys::BODY_PARAMETER, keys::FORM_PARAMETERS]);
            let loaded = load_parameters(n, ctx);
            o.body = ctx.temp().take_parameter(keys::BODY_PARAMETER);
            o.form = ctx.temp().take_parameters(keys::FORM_PARAMETERS);
            o.item.parameters = loaded?;
            Ok(())
        })
});

static PATH_ITEM_PATTERNS: Lazy<PatternFieldMap<PathItemBuilder>> = Lazy::new(|| {
    PatternFieldMap::<PathItemBuilder>::new().pattern(is_extension, set_extension::<PathItemBuilder>)
});

static OPERATION_FIXED: Lazy<FixedFieldMap<Operation>> = Lazy::new(|| {
    FixedFieldMap::<Operation>::new()
        .field("tags", |o, n, ctx| {
            o.tags = v3::operation::tag_references(n, ctx)?;
            Ok(())
        })
        .field("summary", |o, n, _| {
            o.summary = Some(n.scalar()?);
            Ok(())
        })
        .field("description", |o, n, _| {
            o.description = Some(n.scalar()?);
            Ok(())
        })
        .field("externalDocs", |o, n, ctx| {
            o.external_docs = Some(ctx.load(n)?);
            Ok(())
        })
        .field("operationId", |o, n, _| {
            o.operation_id = Some(n.scalar()?);
            Ok(())
        })
        .field("consumes", |_, n, ctx| {
            let types = n.create_simple_list(ctx, "consumes")?;
            ctx.temp().set(keys::OPERATION_CONSUMES, TempValue::Texts(types));
            Ok(())
        })
        .field("produces", |_, n, ctx| {
            let types = n.create_simple_list(ctx, "produces")?;
            ctx.temp().set(keys::OPERATION_PRODUCES, TempValue::Texts(types));
            Ok(())
        })
        .field("parameters", |o, n, ctx| {
            o.parameters = load_parameters(n, ctx)?;
            Ok(())
        })
        .field("responses", |o, n, ctx| {
            o.responses = ctx.load(n)?;
            Ok(())
        })
        .field("schemes", |o, n, ctx| {
            let schemes = n.create_simple_list(ctx, "schemes")?;
            o.servers = servers_for(ctx, &schemes);
            Ok(())
        })
        .field("deprecated", |o, n, _| {
            o.deprecated = n.as_bool()?;
            Ok(())
        })
        .field("security", |o, n, ctx| {
            o.security = Some(ctx.load_list(n, "security")?);
            Ok(())
        })
});

static OPERATION_PATTERNS: Lazy<PatternFieldMap<Operation>> = Lazy::new(|| {
    PatternFieldMap::<Operation>::new().pattern(is_extension, set_extension::<Operation>)
});

pub(crate) fn load_path_item(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<RefOr<PathItem>> {
    let map = node.check_map("PathItem")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::PathItem)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut builder = PathItemBuilder::default();
    parse_map(map, &mut builder, &PATH_ITEM_FIXED, &PATH_ITEM_PATTERNS, ctx);

    let PathItemBuilder {
        mut item,
        body,
        form,
        consumes,
    } = builder;
    if body.is_none() && form.is_empty() {
        return Ok(RefOr::Item(item));
    }
    for (method, operation) in item.operations.iter_mut() {
        if !method.accepts_body() || operation.request_body.is_some() {
            continue;
        }
        let declared = consumes.get(method).map(Vec::as_slice);
        if let Some(shared) = request_body_for(body.clone(), form.clone(), declared, ctx) {
            trace!(%method, "applying path-level request body");
            operation.request_body = Some(RefOr::Item(shared));
        }
    }
    Ok(RefOr::Item(item))
}

pub(crate) fn load_operation(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<Operation> {
    let map = node.check_map("Operation")?;
    let scope = ctx.location();
    ctx.temp().clear(&OPERATION_KEYS);

    let mut operation = Operation::default();
    parse_map(map, &mut operation, &OPERATION_FIXED, &OPERATION_PATTERNS, ctx);

    let body = ctx.temp().take_parameter(keys::BODY_PARAMETER);
    let form = ctx.temp().take_parameters(keys::FORM_PARAMETERS);
    if let Some(request_body) = request_body_from(body, form, ctx) {
        operation.request_body = Some(RefOr::Item(request_body));
    }
    let produces = response_media_types(ctx);
    for (code, response) in operation.responses.codes.iter_mut() {
        if let RefOr::Item(response) = response {
            let response_scope = format!("{scope}/responses/{}", escape_segment(code));
            attach_content(response, &response_scope, &produces, ctx);
        }
    }

    // Kept for the enclosing path item, whose shared body parameter needs it.
    if let Some(consumes) = ctx.temp().take(keys::OPERATION_CONSUMES) {
        ctx.temp().set_scoped(&scope, keys::OPERATION_CONSUMES, consumes);
    }
    ctx.temp().clear(&OPERATION_KEYS);
    Ok(operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::SpecVersion;
    use crate::settings::ReaderSettings;
    use serde_json::json;

    fn ctx() -> ParsingContext {
        ParsingContext::new(SpecVersion::V2, ReaderSettings::default())
    }

    #[test]
    fn test_body_parameter_becomes_request_body() {
        let value = json!({
            "parameters": [
                {"name": "body", "in": "body", "required": true, "description": "Pet",
                 "schema": {"type": "object"}},
                {"name": "trace", "in": "header", "type": "string"}
            ],
            "responses": {"200": {"description": "ok"}}
        });
        let mut ctx = ctx();
        let operation = load_operation(ParseNode::new(&value), &mut ctx).unwrap();
        assert_eq!(operation.parameters.len(), 1);
        assert_eq!(operation.parameters[0].as_item().unwrap().name, "trace");
        let body = operation.request_body.unwrap();
        let body = body.as_item().unwrap();
        assert!(body.required);
        assert_eq!(body.description.as_deref(), Some("Pet"));
        assert_eq!(body.extensions["x-bodyName"], json!("body"));
        let schema = body.content["application/json"].schema.as_ref().unwrap();
        assert!(schema.as_item().unwrap().has_type("object"));
    }

    #[test]
    fn test_consumes_after_parameters_still_applies() {
        let value = json!({
            "parameters": [{"name": "body", "in": "body", "schema": {"type": "string"}}],
            "consumes": ["application/xml", "text/plain"],
            "responses": {}
        });
        let mut ctx = ctx();
        let operation = load_operation(ParseNode::new(&value), &mut ctx).unwrap();
        let body = operation.request_body.unwrap();
        let types: Vec<_> = body.as_item().unwrap().content.keys().cloned().collect();
        assert_eq!(types, vec!["application/xml", "text/plain"]);
        assert!(!ctx.temp_ref().contains(keys::OPERATION_CONSUMES));
    }

    #[test]
    fn test_form_parameters_are_aggregated() {
        let value = json!({
            "parameters": [
                {"name": "a", "in": "formData", "type": "string", "required": true,
                 "description": "first"},
                {"name": "b", "in": "formData", "type": "integer"}
            ],
            "responses": {}
        });
        let mut ctx = ctx();
        let operation = load_operation(ParseNode::new(&value), &mut ctx).unwrap();
        assert!(operation.parameters.is_empty());
        let body = operation.request_body.unwrap();
        let body = body.as_item().unwrap();
        assert_eq!(body.content.len(), 1);
        let schema = body.content["application/x-www-form-urlencoded"]
            .schema
            .as_ref()
            .unwrap()
            .as_item()
            .unwrap();
        let names: Vec<_> = schema.properties.keys().cloned().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(schema.required, vec!["a"]);
        let a = schema.properties["a"].as_item().unwrap();
        assert_eq!(a.description.as_deref(), Some("first"));
        assert!(body.required);
    }

    #[test]
    fn test_responses_get_produces() {
        let value = json!({
            "produces": ["application/xml"],
            "responses": {
                "200": {"description": "ok", "schema": {"type": "string"}},
                "404": {"description": "missing"}
            }
        });
        let mut ctx = ctx();
        let operation = load_operation(ParseNode::new(&value), &mut ctx).unwrap();
        let ok = operation.responses.get("200").unwrap().as_item().unwrap();
        assert!(ok.content.contains_key("application/xml"));
        let missing = operation.responses.get("404").unwrap().as_item().unwrap();
        assert!(missing.content.is_empty());
    }

    #[test]
    fn test_sibling_operations_do_not_share_stash() {
        let value = json!({
            "post": {
                "consumes": ["application/xml"],
                "parameters": [{"name": "body", "in": "body", "schema": {"type": "string"}}],
                "responses": {}
            },
            "put": {
                "parameters": [{"name": "body", "in": "body", "schema": {"type": "string"}}],
                "responses": {}
            }
        });
        let mut ctx = ctx();
        let item = load_path_item(ParseNode::new(&value), &mut ctx).unwrap();
        let item = item.as_item().unwrap();
        let content_types = |method| {
            let operation = item.operation(method).unwrap();
            let body = operation.request_body.as_ref().unwrap().as_item().unwrap();
            body.content.keys().cloned().collect::<Vec<_>>()
        };
        assert_eq!(content_types(OperationType::Post), vec!["application/xml"]);
        assert_eq!(content_types(OperationType::Put), vec!["application/json"]);
    }

    #[test]
    fn test_path_level_body_applies_to_operations_without_one() {
        let value = json!({
            "parameters": [
                {"name": "pet", "in": "body", "schema": {"type": "object"}},
                {"name": "id", "in": "path", "required": true, "type": "string"}
            ],
            "get": {"responses": {}},
            "post": {"responses": {}},
            "patch": {
                "parameters": [{"name": "patch", "in": "body", "schema": {"type": "array"}}],
                "responses": {}
            }
        });
        let mut ctx = ctx();
        let item = load_path_item(ParseNode::new(&value), &mut ctx).unwrap();
        let item = item.as_item().unwrap();
        assert_eq!(item.parameters.len(), 1);
        assert!(item.operation(OperationType::Get).unwrap().request_body.is_none());
        let post = item.operation(OperationType::Post).unwrap();
        let post_body = post.request_body.as_ref().unwrap().as_item().unwrap();
        assert_eq!(post_body.extensions["x-bodyName"], json!("pet"));
        let patch = item.operation(OperationType::Patch).unwrap();
        let patch_body = patch.request_body.as_ref().unwrap().as_item().unwrap();
        assert_eq!(patch_body.extensions["x-bodyName"], json!("patch"));
    }

    #[test]
    fn test_path_level_body_uses_each_operation_consumes() {
        let value = json!({
            "parameters": [{"name": "pet", "in": "body", "schema": {"type": "object"}}],
            "post": {"consumes": ["application/xml"], "responses": {}},
            "put": {"responses": {}}
        });
        let mut ctx = ctx();
        ctx.temp()
            .set(keys::GLOBAL_CONSUMES, TempValue::Texts(vec!["text/plain".into()]));
        let item = load_path_item(ParseNode::new(&value), &mut ctx).unwrap();
        let item = item.as_item().unwrap();
        let content_types = |method| {
            let operation = item.operation(method).unwrap();
            let body = operation.request_body.as_ref().unwrap().as_item().unwrap();
            body.content.keys().cloned().collect::<Vec<_>>()
        };
        assert_eq!(content_types(OperationType::Post), vec!["application/xml"]);
        assert_eq!(content_types(OperationType::Put), vec!["text/plain"]);
    }
}
