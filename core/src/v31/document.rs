//! Document root, Components, Info and License loaders for OpenAPI 3.1.

use crate::context::ParsingContext;
use crate::dispatch::{parse_map, FixedFieldMap};
use crate::error::{ReaderError, ReaderResult};
use crate::models::{Components, Info, License, OpenApiDocument};
use crate::node::ParseNode;
use crate::v3;
use crate::v3::document::{assemble_document, require_fields, DOCUMENT_PATTERNS};
use once_cell::sync::Lazy;

static DOCUMENT_FIXED: Lazy<FixedFieldMap<OpenApiDocument>> = Lazy::new(|| {
    FixedFieldMap::<OpenApiDocument>::new()
        .field("webhooks", |o, n, ctx| {
            o.webhooks = ctx.load_map(n, "webhooks")?;
            Ok(())
        })
        .field("jsonSchemaDialect", |o, n, _| {
            o.json_schema_dialect = Some(n.as_uri()?);
            Ok(())
        })
        .extend_from(&v3::document::DOCUMENT_FIXED)
});

static COMPONENTS_FIXED: Lazy<FixedFieldMap<Components>> = Lazy::new(|| {
    FixedFieldMap::<Components>::new()
        .field("pathItems", |o, n, ctx| {
            o.path_items = ctx.load_map(n, "pathItems")?;
            Ok(())
        })
        .extend_from(&v3::document::COMPONENTS_FIXED)
});

static INFO_FIXED: Lazy<FixedFieldMap<Info>> = Lazy::new(|| {
    FixedFieldMap::<Info>::new()
        .field("summary", |o, n, _| {
            o.summary = Some(n.scalar()?);
            Ok(())
        })
        .extend_from(&v3::info::INFO_FIXED)
});

static LICENSE_FIXED: Lazy<FixedFieldMap<License>> = Lazy::new(|| {
    FixedFieldMap::<License>::new()
        .field("identifier", |o, n, _| {
            o.identifier = Some(n.scalar()?);
            Ok(())
        })
        .extend_from(&v3::info::LICENSE_FIXED)
});

pub(crate) fn load_components(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<Components> {
    v3::document::load_components_with(node, ctx, &COMPONENTS_FIXED)
}

pub(crate) fn load_info(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<Info> {
    let map = node.check_map("Info")?;
    let mut info = Info::default();
    parse_map(map, &mut info, &INFO_FIXED, &v3::info::INFO_PATTERNS, ctx);
    Ok(info)
}

pub(crate) fn load_license(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<License> {
    let map = node.check_map("License")?;
    let mut license = License::default();
    parse_map(map, &mut license, &LICENSE_FIXED, &v3::info::LICENSE_PATTERNS, ctx);
    if license.identifier.is_some() && license.url.is_some() {
        ctx.report(ReaderError::Structure(
            "identifier and url are mutually exclusive".into(),
        ));
    }
    Ok(license)
}

/// 3.1 needs `info` and at least one of `paths`, `components` or `webhooks`.
pub(crate) fn load_document(root: ParseNode<'_>, ctx: &mut ParsingContext) -> OpenApiDocument {
    let Some((document, map)) = assemble_document(root, ctx, &DOCUMENT_FIXED, &DOCUMENT_PATTERNS)
    else {
        return OpenApiDocument {
            location: ctx.document_location().map(str::to_string),
            ..Default::default()
        };
    };
    require_fields(map, &["info"], ctx);
    if ["paths", "components", "webhooks"]
        .iter()
        .all(|field| map.get(field).is_none())
    {
        ctx.report(ReaderError::Structure(
            "one of paths, components or webhooks is required".into(),
        ));
    }
    document
}
