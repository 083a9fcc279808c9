//! Responses, Response, Example and Link loaders.

use crate::context::ParsingContext;
use crate::dispatch::{
    is_extension, not_extension, parse_map, set_extension, FixedFieldMap, PatternFieldMap,
};
use crate::error::ReaderResult;
use crate::models::{
    Example, Link, LinkParameter, RefOr, ReferenceKind, Response, Responses, RuntimeExpression,
};
use crate::node::ParseNode;
use once_cell::sync::Lazy;

static RESPONSES_FIXED: Lazy<FixedFieldMap<Responses>> = Lazy::new(FixedFieldMap::new);

static RESPONSES_PATTERNS: Lazy<PatternFieldMap<Responses>> = Lazy::new(|| {
    PatternFieldMap::<Responses>::new()
        .pattern(is_extension, set_extension::<Responses>)
        .pattern(not_extension, |o, name, n, ctx| {
            o.codes.insert(name.to_string(), ctx.load(n)?);
            Ok(())
        })
});

static RESPONSE_FIXED: Lazy<FixedFieldMap<Response>> = Lazy::new(|| {
    FixedFieldMap::<Response>::new()
        .field("description", |o, n, _| {
            o.description = n.scalar()?;
            Ok(())
        })
        .field("headers", |o, n, ctx| {
            o.headers = ctx.load_map(n, "headers")?;
            Ok(())
        })
        .field("content", |o, n, ctx| {
            o.content = ctx.load_map(n, "content")?;
            Ok(())
        })
        .field("links", |o, n, ctx| {
            o.links = ctx.load_map(n, "links")?;
            Ok(())
        })
});

static RESPONSE_PATTERNS: Lazy<PatternFieldMap<Response>> = Lazy::new(|| {
    PatternFieldMap::<Response>::new().pattern(is_extension, set_extension::<Response>)
});

static EXAMPLE_FIXED: Lazy<FixedFieldMap<Example>> = Lazy::new(|| {
    FixedFieldMap::<Example>::new()
        .field("summary", |o, n, _| {
            o.summary = Some(n.scalar()?);
            Ok(())
        })
        .field("description", |o, n, _| {
            o.description = Some(n.scalar()?);
            Ok(())
        })
        .field("value", |o, n, _| {
            o.value = Some(n.create_any());
            Ok(())
        })
        .field("externalValue", |o, n, _| {
            o.external_value = Some(n.as_uri()?);
            Ok(())
        })
});

static EXAMPLE_PATTERNS: Lazy<PatternFieldMap<Example>> = Lazy::new(|| {
    PatternFieldMap::<Example>::new().pattern(is_extension, set_extension::<Example>)
});

static LINK_FIXED: Lazy<FixedFieldMap<Link>> = Lazy::new(|| {
    FixedFieldMap::<Link>::new()
        .field("operationRef", |o, n, _| {
            o.operation_ref = Some(n.scalar()?);
            Ok(())
        })
        .field("operationId", |o, n, _| {
            o.operation_id = Some(n.scalar()?);
            Ok(())
        })
        .field("parameters", |o, n, ctx| {
            o.parameters = n.create_map(ctx, "parameters", |_, value, _| link_parameter(value))?;
            Ok(())
        })
        .field("requestBody", |o, n, _| {
            o.request_body = Some(link_parameter(n)?);
            Ok(())
        })
        .field("description", |o, n, _| {
            o.description = Some(n.scalar()?);
            Ok(())
        })
        .field("server", |o, n, ctx| {
            o.server = Some(ctx.load(n)?);
            Ok(())
        })
});

static LINK_PATTERNS: Lazy<PatternFieldMap<Link>> =
    Lazy::new(|| PatternFieldMap::<Link>::new().pattern(is_extension, set_extension::<Link>));

fn link_parameter(node: ParseNode<'_>) -> ReaderResult<LinkParameter> {
    match node.as_str() {
        Some(text) if text.starts_with('$') => {
            Ok(LinkParameter::Expression(RuntimeExpression::parse(text)?))
        }
        _ => Ok(LinkParameter::Value(node.create_any())),
    }
}

pub(crate) fn load_responses(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<Responses> {
    let map = node.check_map("Responses")?;
    let mut responses = Responses::default();
    parse_map(map, &mut responses, &RESPONSES_FIXED, &RESPONSES_PATTERNS, ctx);
    Ok(responses)
}

pub(crate) fn load_response(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<RefOr<Response>> {
    let map = node.check_map("response")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::Response)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut response = Response::default();
    parse_map(map, &mut response, &RESPONSE_FIXED, &RESPONSE_PATTERNS, ctx);
    Ok(RefOr::Item(response))
}

pub(crate) fn load_example(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<RefOr<Example>> {
    let map = node.check_map("example")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::Example)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut example = Example::default();
    parse_map(map, &mut example, &EXAMPLE_FIXED, &EXAMPLE_PATTERNS, ctx);
    Ok(RefOr::Item(example))
}

pub(crate) fn load_link(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<RefOr<Link>> {
    let map = node.check_map("link")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::Link)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut link = Link::default();
    parse_map(map, &mut link, &LINK_FIXED, &LINK_PATTERNS, ctx);
    Ok(RefOr::Item(link))
}
