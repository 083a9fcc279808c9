//! Paths, Path Item, Operation, Callback, Request Body, Media Type and Encoding loaders.

use crate::context::ParsingContext;
use crate::dispatch::{
    is_extension, is_path, not_extension, parse_map, set_extension, FixedFieldMap,
    PatternFieldMap,
};
use crate::error::ReaderResult;
use crate::models::{
    Callback, Encoding, MediaType, Operation, OperationType, ParameterStyle, PathItem, Paths,
    RefOr, Reference, ReferenceKind, RequestBody, RuntimeExpression, Tag,
};
use crate::node::ParseNode;
use once_cell::sync::Lazy;

static PATHS_FIXED: Lazy<FixedFieldMap<Paths>> = Lazy::new(FixedFieldMap::new);

static PATHS_PATTERNS: Lazy<PatternFieldMap<Paths>> = Lazy::new(|| {
    PatternFieldMap::<Paths>::new()
        .pattern(is_path, |o, name, n, ctx| {
            o.items.insert(name.to_string(), ctx.load(n)?);
            Ok(())
        })
        .pattern(is_extension, set_extension::<Paths>)
});

fn set_operation(
    o: &mut PathItem,
    method: OperationType,
    n: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<()> {
    o.operations.insert(method, ctx.load(n)?);
    Ok(())
}

static PATH_ITEM_FIXED: Lazy<FixedFieldMap<PathItem>> = Lazy::new(|| {
    FixedFieldMap::<PathItem>::new()
        .field("summary", |o, n, _| {
            o.summary = Some(n.scalar()?);
            Ok(())
        })
        .field("description", |o, n, _| {
            o.description = Some(n.scalar()?);
            Ok(())
        })
        .field("get", |o, n, ctx| set_operation(o, OperationType::Get, n, ctx))
        .field("put", |o, n, ctx| set_operation(o, OperationType::Put, n, ctx))
        .field("post", |o, n, ctx| set_operation(o, OperationType::Post, n, ctx))
        .field("delete", |o, n, ctx| set_operation(o, OperationType::Delete, n, ctx))
        .field("options", |o, n, ctx| set_operation(o, OperationType::Options, n, ctx))
        .field("head", |o, n, ctx| set_operation(o, OperationType::Head, n, ctx))
        .field("patch", |o, n, ctx| set_operation(o, OperationType::Patch, n, ctx))
        .field("trace", |o, n, ctx| set_operation(o, OperationType::Trace, n, ctx))
        .field("servers", |o, n, ctx| {
            o.servers = ctx.load_list(n, "servers")?;
            Ok(())
        })
        .field("parameters", |o, n, ctx| {
            o.parameters = ctx.load_list(n, "parameters")?;
            Ok(())
        })
});

static PATH_ITEM_PATTERNS: Lazy<PatternFieldMap<PathItem>> = Lazy::new(|| {
    PatternFieldMap::<PathItem>::new().pattern(is_extension, set_extension::<PathItem>)
});

static OPERATION_FIXED: Lazy<FixedFieldMap<Operation>> = Lazy::new(|| {
    FixedFieldMap::<Operation>::new()
        .field("tags", |o, n, ctx| {
            o.tags = tag_references(n, ctx)?;
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
        .field("parameters", |o, n, ctx| {
            o.parameters = ctx.load_list(n, "parameters")?;
            Ok(())
        })
        .field("requestBody", |o, n, ctx| {
            o.request_body = Some(ctx.load(n)?);
            Ok(())
        })
        .field("responses", |o, n, ctx| {
            o.responses = ctx.load(n)?;
            Ok(())
        })
        .field("callbacks", |o, n, ctx| {
            o.callbacks = ctx.load_map(n, "callbacks")?;
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
        .field("servers", |o, n, ctx| {
            o.servers = ctx.load_list(n, "servers")?;
            Ok(())
        })
});

static OPERATION_PATTERNS: Lazy<PatternFieldMap<Operation>> = Lazy::new(|| {
    PatternFieldMap::<Operation>::new().pattern(is_extension, set_extension::<Operation>)
});

static CALLBACK_FIXED: Lazy<FixedFieldMap<Callback>> = Lazy::new(FixedFieldMap::new);

static CALLBACK_PATTERNS: Lazy<PatternFieldMap<Callback>> = Lazy::new(|| {
    PatternFieldMap::<Callback>::new()
        .pattern(is_extension, set_extension::<Callback>)
        .pattern(not_extension, |o, name, n, ctx| {
            let expression = RuntimeExpression::parse(name)?;
            o.path_items.insert(expression, ctx.load(n)?);
            Ok(())
        })
});

static REQUEST_BODY_FIXED: Lazy<FixedFieldMap<RequestBody>> = Lazy::new(|| {
    FixedFieldMap::<RequestBody>::new()
        .field("description", |o, n, _| {
            o.description = Some(n.scalar()?);
            Ok(())
        })
        .field("content", |o, n, ctx| {
            o.content = ctx.load_map(n, "content")?;
            Ok(())
        })
        .field("required", |o, n, _| {
            o.required = n.as_bool()?;
            Ok(())
        })
});

static REQUEST_BODY_PATTERNS: Lazy<PatternFieldMap<RequestBody>> = Lazy::new(|| {
    PatternFieldMap::<RequestBody>::new().pattern(is_extension, set_extension::<RequestBody>)
});

static MEDIA_TYPE_FIXED: Lazy<FixedFieldMap<MediaType>> = Lazy::new(|| {
    FixedFieldMap::<MediaType>::new()
        .field("schema", |o, n, ctx| {
            o.schema = Some(ctx.load(n)?);
            Ok(())
        })
        .field("example", |o, n, _| {
            o.example = Some(n.create_any());
            Ok(())
        })
        .field("examples", |o, n, ctx| {
            o.examples = ctx.load_map(n, "examples")?;
            Ok(())
        })
        .field("encoding", |o, n, ctx| {
            o.encoding = ctx.load_map(n, "encoding")?;
            Ok(())
        })
});

static MEDIA_TYPE_PATTERNS: Lazy<PatternFieldMap<MediaType>> = Lazy::new(|| {
    PatternFieldMap::<MediaType>::new().pattern(is_extension, set_extension::<MediaType>)
});

static ENCODING_FIXED: Lazy<FixedFieldMap<Encoding>> = Lazy::new(|| {
    FixedFieldMap::<Encoding>::new()
        .field("contentType", |o, n, _| {
            o.content_type = Some(n.scalar()?);
            Ok(())
        })
        .field("headers", |o, n, ctx| {
            o.headers = ctx.load_map(n, "headers")?;
            Ok(())
        })
        .field("style", |o, n, _| {
            o.style = ParameterStyle::from_name(&n.scalar()?);
            Ok(())
        })
        .field("explode", |o, n, _| {
            o.explode = Some(n.as_bool()?);
            Ok(())
        })
        .field("allowReserved", |o, n, _| {
            o.allow_reserved = n.as_bool()?;
            Ok(())
        })
});

static ENCODING_PATTERNS: Lazy<PatternFieldMap<Encoding>> = Lazy::new(|| {
    PatternFieldMap::<Encoding>::new().pattern(is_extension, set_extension::<Encoding>)
});

/// Operation `tags` are names; each becomes a lazy tag reference.
pub(crate) fn tag_references(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<Vec<RefOr<Tag>>> {
    node.create_list(ctx, "tags", |item, ctx| {
        let reference = Reference::local(ReferenceKind::Tag, item.scalar()?)
            .with_host(ctx.document_location().map(str::to_string));
        Ok(RefOr::Reference(reference))
    })
}

pub(crate) fn load_paths(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<Paths> {
    let map = node.check_map("Paths")?;
    let mut paths = Paths::default();
    parse_map(map, &mut paths, &PATHS_FIXED, &PATHS_PATTERNS, ctx);
    Ok(paths)
}

pub(crate) fn load_path_item(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<RefOr<PathItem>> {
    let map = node.check_map("PathItem")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::PathItem)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut item = PathItem::default();
    parse_map(map, &mut item, &PATH_ITEM_FIXED, &PATH_ITEM_PATTERNS, ctx);
    Ok(RefOr::Item(item))
}

pub(crate) fn load_operation(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<Operation> {
    let map = node.check_map("Operation")?;
    let mut operation = Operation::default();
    parse_map(map, &mut operation, &OPERATION_FIXED, &OPERATION_PATTERNS, ctx);
    Ok(operation)
}

pub(crate) fn load_callback(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<RefOr<Callback>> {
    let map = node.check_map("callback")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::Callback)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut callback = Callback::default();
    parse_map(map, &mut callback, &CALLBACK_FIXED, &CALLBACK_PATTERNS, ctx);
    Ok(RefOr::Item(callback))
}

pub(crate) fn load_request_body(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<RefOr<RequestBody>> {
    let map = node.check_map("requestBody")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::RequestBody)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut body = RequestBody::default();
    parse_map(map, &mut body, &REQUEST_BODY_FIXED, &REQUEST_BODY_PATTERNS, ctx);
    Ok(RefOr::Item(body))
}

pub(crate) fn load_media_type(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<MediaType> {
    let map = node.check_map("content")?;
    let mut media_type = MediaType::default();
    parse_map(map, &mut media_type, &MEDIA_TYPE_FIXED, &MEDIA_TYPE_PATTERNS, ctx);
    Ok(media_type)
}

pub(crate) fn load_encoding(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<Encoding> {
    let map = node.check_map("encoding")?;
    let mut encoding = Encoding::default();
    parse_map(map, &mut encoding, &ENCODING_FIXED, &ENCODING_PATTERNS, ctx);
    Ok(encoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::SpecVersion;
    use crate::settings::ReaderSettings;
    use serde_json::json;

    fn ctx() -> ParsingContext {
        ParsingContext::new(SpecVersion::V3_0, ReaderSettings::default())
    }

    #[test]
    fn test_paths_and_operations() {
        let value = json!({
            "/pets": {
                "parameters": [{"$ref": "#/components/parameters/Limit"}],
                "get": {
                    "operationId": "listPets",
                    "tags": ["pets"],
                    "responses": {"200": {"description": "ok"}}
                },
                "post": {
                    "requestBody": {
                        "required": true,
                        "content": {"multipart/form-data": {
                            "schema": {"type": "object"},
                            "encoding": {"file": {"contentType": "image/png", "style": "form"}}
                        }}
                    },
                    "responses": {"201": {"description": "created"}}
                }
            },
            "x-internal": false,
            "pets": {}
        });
        let mut ctx = ctx();
        let paths = load_paths(ParseNode::new(&value), &mut ctx).unwrap();
        assert_eq!(ctx.diagnostic().errors.len(), 1);
        assert!(ctx.diagnostic().has_error_containing("pets is not a valid property"));
        let item = paths.items["/pets"].as_item().unwrap();
        assert_eq!(item.parameters.len(), 1);
        let get = item.operation(OperationType::Get).unwrap();
        assert_eq!(get.operation_id.as_deref(), Some("listPets"));
        assert_eq!(get.tag_names(), vec!["pets"]);
        let post = item.operation(OperationType::Post).unwrap();
        let body = post.request_body.as_ref().unwrap().as_item().unwrap();
        assert!(body.required);
        let encoding = &body.content["multipart/form-data"].encoding["file"];
        assert_eq!(encoding.content_type.as_deref(), Some("image/png"));
        assert_eq!(encoding.style, Some(ParameterStyle::Form));
    }

    #[test]
    fn test_callback_expressions() {
        let value = json!({
            "{$request.body#/callbackUrl}": {"post": {"responses": {"200": {"description": "ok"}}}},
            "$bogus": {},
            "x-note": "n"
        });
        let mut ctx = ctx();
        let callback = load_callback(ParseNode::new(&value), &mut ctx).unwrap();
        let callback = callback.as_item().unwrap();
        assert_eq!(callback.path_items.len(), 1);
        assert!(callback
            .path_items
            .contains_key(&RuntimeExpression::new("{$request.body#/callbackUrl}")));
        assert_eq!(ctx.diagnostic().errors[0].pointer, "#/$bogus");
    }
}
