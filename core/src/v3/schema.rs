//! Schema, Discriminator and XML loaders (OpenAPI 3.0 dialect).

use crate::context::ParsingContext;
use crate::dispatch::{is_extension, parse_map, set_extension, FixedFieldMap, PatternFieldMap};
use crate::error::ReaderResult;
use crate::models::{
    AdditionalProperties, Discriminator, ExclusiveBound, RefOr, ReferenceKind, Schema, SchemaType,
    Xml,
};
use crate::node::ParseNode;
use once_cell::sync::Lazy;

pub(crate) static SCHEMA_FIXED: Lazy<FixedFieldMap<Schema>> = Lazy::new(|| {
    FixedFieldMap::<Schema>::new()
        .field("title", |o, n, _| {
            o.title = Some(n.scalar()?);
            Ok(())
        })
        .field("multipleOf", |o, n, _| {
            o.multiple_of = Some(n.as_f64()?);
            Ok(())
        })
        .field("maximum", |o, n, _| {
            o.maximum = Some(n.as_f64()?);
            Ok(())
        })
        .field("exclusiveMaximum", |o, n, _| {
            o.exclusive_maximum = Some(ExclusiveBound::Flag(n.as_bool()?));
            Ok(())
        })
        .field("minimum", |o, n, _| {
            o.minimum = Some(n.as_f64()?);
            Ok(())
        })
        .field("exclusiveMinimum", |o, n, _| {
            o.exclusive_minimum = Some(ExclusiveBound::Flag(n.as_bool()?));
            Ok(())
        })
        .field("maxLength", |o, n, _| {
            o.max_length = Some(n.as_u64()?);
            Ok(())
        })
        .field("minLength", |o, n, _| {
            o.min_length = Some(n.as_u64()?);
            Ok(())
        })
        .field("pattern", |o, n, _| {
            o.pattern = Some(n.scalar()?);
            Ok(())
        })
        .field("maxItems", |o, n, _| {
            o.max_items = Some(n.as_u64()?);
            Ok(())
        })
        .field("minItems", |o, n, _| {
            o.min_items = Some(n.as_u64()?);
            Ok(())
        })
        .field("uniqueItems", |o, n, _| {
            o.unique_items = Some(n.as_bool()?);
            Ok(())
        })
        .field("maxProperties", |o, n, _| {
            o.max_properties = Some(n.as_u64()?);
            Ok(())
        })
        .field("minProperties", |o, n, _| {
            o.min_properties = Some(n.as_u64()?);
            Ok(())
        })
        .field("required", |o, n, ctx| {
            o.required = n.create_simple_list(ctx, "required")?;
            Ok(())
        })
        .field("enum", |o, n, ctx| {
            o.enum_values = n.create_list(ctx, "enum", |item, _| Ok(item.create_any()))?;
            Ok(())
        })
        .field("type", |o, n, _| {
            o.schema_type = Some(SchemaType::Single(n.scalar()?));
            Ok(())
        })
        .field("allOf", |o, n, ctx| {
            o.all_of = ctx.load_list(n, "allOf")?;
            Ok(())
        })
        .field("oneOf", |o, n, ctx| {
            o.one_of = ctx.load_list(n, "oneOf")?;
            Ok(())
        })
        .field("anyOf", |o, n, ctx| {
            o.any_of = ctx.load_list(n, "anyOf")?;
            Ok(())
        })
        .field("not", |o, n, ctx| {
            o.not = Some(Box::new(ctx.load(n)?));
            Ok(())
        })
        .field("items", |o, n, ctx| {
            o.items = Some(Box::new(ctx.load(n)?));
            Ok(())
        })
        .field("properties", |o, n, ctx| {
            o.properties = ctx.load_map(n, "properties")?;
            Ok(())
        })
        .field("additionalProperties", |o, n, ctx| {
            o.additional_properties = Some(match n {
                ParseNode::Value(_) => AdditionalProperties::Allowed(n.as_bool()?),
                _ => AdditionalProperties::Schema(Box::new(ctx.load(n)?)),
            });
            Ok(())
        })
        .field("description", |o, n, _| {
            o.description = Some(n.scalar()?);
            Ok(())
        })
        .field("format", |o, n, _| {
            o.format = Some(n.scalar()?);
            Ok(())
        })
        .field("default", |o, n, _| {
            o.default = Some(n.create_any());
            Ok(())
        })
        .field("nullable", |o, n, _| {
            o.nullable = n.as_bool()?;
            Ok(())
        })
        .field("discriminator", |o, n, ctx| {
            o.discriminator = Some(ctx.load(n)?);
            Ok(())
        })
        .field("readOnly", |o, n, _| {
            o.read_only = n.as_bool()?;
            Ok(())
        })
        .field("writeOnly", |o, n, _| {
            o.write_only = n.as_bool()?;
            Ok(())
        })
        .field("xml", |o, n, ctx| {
            o.xml = Some(ctx.load(n)?);
            Ok(())
        })
        .field("externalDocs", |o, n, ctx| {
            o.external_docs = Some(ctx.load(n)?);
            Ok(())
        })
        .field("example", |o, n, _| {
            o.example = Some(n.create_any());
            Ok(())
        })
        .field("deprecated", |o, n, _| {
            o.deprecated = n.as_bool()?;
            Ok(())
        })
});

static SCHEMA_PATTERNS: Lazy<PatternFieldMap<Schema>> =
    Lazy::new(|| PatternFieldMap::<Schema>::new().pattern(is_extension, set_extension::<Schema>));

static DISCRIMINATOR_FIXED: Lazy<FixedFieldMap<Discriminator>> = Lazy::new(|| {
    FixedFieldMap::<Discriminator>::new()
        .field("propertyName", |o, n, _| {
            o.property_name = n.scalar()?;
            Ok(())
        })
        .field("mapping", |o, n, ctx| {
            o.mapping = n.create_simple_map(ctx, "mapping")?;
            Ok(())
        })
});

static DISCRIMINATOR_PATTERNS: Lazy<PatternFieldMap<Discriminator>> = Lazy::new(|| {
    PatternFieldMap::<Discriminator>::new().pattern(is_extension, set_extension::<Discriminator>)
});

static XML_FIXED: Lazy<FixedFieldMap<Xml>> = Lazy::new(|| {
    FixedFieldMap::<Xml>::new()
        .field("name", |o, n, _| {
            o.name = Some(n.scalar()?);
            Ok(())
        })
        .field("namespace", |o, n, _| {
            o.namespace = Some(n.as_uri()?);
            Ok(())
        })
        .field("prefix", |o, n, _| {
            o.prefix = Some(n.scalar()?);
            Ok(())
        })
        .field("attribute", |o, n, _| {
            o.attribute = n.as_bool()?;
            Ok(())
        })
        .field("wrapped", |o, n, _| {
            o.wrapped = n.as_bool()?;
            Ok(())
        })
});

static XML_PATTERNS: Lazy<PatternFieldMap<Xml>> =
    Lazy::new(|| PatternFieldMap::<Xml>::new().pattern(is_extension, set_extension::<Xml>));

/// Loads a schema with the given tables. Shared by the 3.0 and 3.1 loaders.
pub(crate) fn load_schema_with(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
    fixed: &FixedFieldMap<Schema>,
    patterns: &PatternFieldMap<Schema>,
) -> ReaderResult<RefOr<Schema>> {
    let map = node.check_map("schema")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::Schema)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut schema = Schema::default();
    parse_map(map, &mut schema, fixed, patterns, ctx);
    Ok(RefOr::Item(schema))
}

pub(crate) fn load_schema(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<RefOr<Schema>> {
    load_schema_with(node, ctx, &SCHEMA_FIXED, &SCHEMA_PATTERNS)
}

pub(crate) fn load_discriminator(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<Discriminator> {
    let map = node.check_map("discriminator")?;
    let mut discriminator = Discriminator::default();
    parse_map(map, &mut discriminator, &DISCRIMINATOR_FIXED, &DISCRIMINATOR_PATTERNS, ctx);
    Ok(discriminator)
}

pub(crate) fn load_xml(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<Xml> {
    let map = node.check_map("xml")?;
    let mut xml = Xml::default();
    parse_map(map, &mut xml, &XML_FIXED, &XML_PATTERNS, ctx);
    Ok(xml)
}
