//! Document root and Components loaders.

use crate::context::ParsingContext;
use crate::dispatch::{is_extension, parse_map, set_extension, FixedFieldMap, PatternFieldMap};
use crate::error::{ReaderError, ReaderResult};
use crate::models::{Components, OpenApiDocument};
use crate::node::{MapNode, ParseNode};
use once_cell::sync::Lazy;
use tracing::debug;

pub(crate) static DOCUMENT_FIXED: Lazy<FixedFieldMap<OpenApiDocument>> = Lazy::new(|| {
    FixedFieldMap::<OpenApiDocument>::new()
        .field("openapi", |_, n, _| {
            // Sniffed before the service was chosen; only the shape is checked here.
            n.scalar().map(drop)
        })
        .field("info", |o, n, ctx| {
            o.info = ctx.load(n)?;
            Ok(())
        })
        .field("servers", |o, n, ctx| {
            o.servers = ctx.load_list(n, "servers")?;
            Ok(())
        })
        .field("paths", |o, n, ctx| {
            o.paths = ctx.load(n)?;
            Ok(())
        })
        .field("components", |o, n, ctx| {
            o.components = Some(ctx.load(n)?);
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

pub(crate) static DOCUMENT_PATTERNS: Lazy<PatternFieldMap<OpenApiDocument>> = Lazy::new(|| {
    PatternFieldMap::<OpenApiDocument>::new().pattern(is_extension, set_extension::<OpenApiDocument>)
});

pub(crate) static COMPONENTS_FIXED: Lazy<FixedFieldMap<Components>> = Lazy::new(|| {
    FixedFieldMap::<Components>::new()
        .field("schemas", |o, n, ctx| {
            o.schemas = ctx.load_map(n, "schemas")?;
            Ok(())
        })
        .field("responses", |o, n, ctx| {
            o.responses = ctx.load_map(n, "responses")?;
            Ok(())
        })
        .field("parameters", |o, n, ctx| {
            o.parameters = ctx.load_map(n, "parameters")?;
            Ok(())
        })
        .field("examples", |o, n, ctx| {
            o.examples = ctx.load_map(n, "examples")?;
            Ok(())
        })
        .field("requestBodies", |o, n, ctx| {
            o.request_bodies = ctx.load_map(n, "requestBodies")?;
            Ok(())
        })
        .field("headers", |o, n, ctx| {
            o.headers = ctx.load_map(n, "headers")?;
            Ok(())
        })
        .field("securitySchemes", |o, n, ctx| {
            o.security_schemes = ctx.load_map(n, "securitySchemes")?;
            Ok(())
        })
        .field("links", |o, n, ctx| {
            o.links = ctx.load_map(n, "links")?;
            Ok(())
        })
        .field("callbacks", |o, n, ctx| {
            o.callbacks = ctx.load_map(n, "callbacks")?;
            Ok(())
        })
});

pub(crate) static COMPONENTS_PATTERNS: Lazy<PatternFieldMap<Components>> = Lazy::new(|| {
    PatternFieldMap::<Components>::new().pattern(is_extension, set_extension::<Components>)
});

pub(crate) fn load_components(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<Components> {
    load_components_with(node, ctx, &COMPONENTS_FIXED)
}

pub(crate) fn load_components_with(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
    fixed: &FixedFieldMap<Components>,
) -> ReaderResult<Components> {
    let map = node.check_map("components")?;
    let mut components = Components::default();
    parse_map(map, &mut components, fixed, &COMPONENTS_PATTERNS, ctx);
    Ok(components)
}

/// Walks the root map with the given tables.
///
/// A root that is not a map yields an empty document and one diagnostic.
pub(crate) fn assemble_document<'a>(
    root: ParseNode<'a>,
    ctx: &mut ParsingContext,
    fixed: &FixedFieldMap<OpenApiDocument>,
    patterns: &PatternFieldMap<OpenApiDocument>,
) -> Option<(OpenApiDocument, MapNode<'a>)> {
    let mut document = OpenApiDocument {
        location: ctx.document_location().map(str::to_string),
        ..Default::default()
    };
    let map = match root.check_map("document") {
        Ok(map) => map,
        Err(err) => {
            ctx.report(err);
            return None;
        }
    };
    debug!(version = %ctx.version(), fields = map.len(), "assembling document");
    parse_map(map, &mut document, fixed, patterns, ctx);
    Some((document, map))
}

/// Records a diagnostic for each `fields` entry the root map lacks.
pub(crate) fn require_fields(map: MapNode<'_>, fields: &[&str], ctx: &mut ParsingContext) {
    for field in fields {
        if map.get(field).is_none() {
            ctx.report(ReaderError::Structure(format!(
                "{field} is a required property"
            )));
        }
    }
}

pub(crate) fn load_document(root: ParseNode<'_>, ctx: &mut ParsingContext) -> OpenApiDocument {
    match assemble_document(root, ctx, &DOCUMENT_FIXED, &DOCUMENT_PATTERNS) {
        Some((document, map)) => {
            require_fields(map, &["info", "paths"], ctx);
            document
        }
        None => OpenApiDocument {
            location: ctx.document_location().map(str::to_string),
            ..Default::default()
        },
    }
}
