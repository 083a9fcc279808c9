//! Schema loader for the OpenAPI 3.1 dialect (JSON Schema 2020-12 subset).

use crate::context::ParsingContext;
use crate::dispatch::{is_extension, not_extension, set_extension, FixedFieldMap, PatternFieldMap};
use crate::error::ReaderResult;
use crate::models::{ExclusiveBound, RefOr, Schema, SchemaType};
use crate::node::ParseNode;
use crate::v3;
use once_cell::sync::Lazy;

fn exclusive_bound(node: ParseNode<'_>) -> ReaderResult<ExclusiveBound> {
    match node {
        ParseNode::Value(value) if value.value().is_boolean() => {
            Ok(ExclusiveBound::Flag(node.as_bool()?))
        }
        _ => Ok(ExclusiveBound::Value(node.as_f64()?)),
    }
}

static SCHEMA_FIXED: Lazy<FixedFieldMap<Schema>> = Lazy::new(|| {
    FixedFieldMap::<Schema>::new()
        .field("type", |o, n, ctx| {
            o.schema_type = Some(match n {
                ParseNode::List(_) => SchemaType::Multiple(n.create_simple_list(ctx, "type")?),
                _ => SchemaType::Single(n.scalar()?),
            });
            Ok(())
        })
        .field("exclusiveMaximum", |o, n, _| {
            o.exclusive_maximum = Some(exclusive_bound(n)?);
            Ok(())
        })
        .field("exclusiveMinimum", |o, n, _| {
            o.exclusive_minimum = Some(exclusive_bound(n)?);
            Ok(())
        })
        .field("const", |o, n, _| {
            o.const_value = Some(n.create_any());
            Ok(())
        })
        .field("examples", |o, n, ctx| {
            o.examples = n.create_list(ctx, "examples", |item, _| Ok(item.create_any()))?;
            Ok(())
        })
        .field("$id", |o, n, _| {
            o.id = Some(n.scalar()?);
            Ok(())
        })
        .field("$schema", |o, n, _| {
            o.dialect = Some(n.as_uri()?);
            Ok(())
        })
        .field("$comment", |o, n, _| {
            o.comment = Some(n.scalar()?);
            Ok(())
        })
        .field("$anchor", |o, n, _| {
            o.anchor = Some(n.scalar()?);
            Ok(())
        })
        .field("$defs", |o, n, ctx| {
            o.defs = ctx.load_map(n, "$defs")?;
            Ok(())
        })
        .field("prefixItems", |o, n, ctx| {
            o.prefix_items = ctx.load_list(n, "prefixItems")?;
            Ok(())
        })
        .field("if", |o, n, ctx| {
            o.if_schema = Some(Box::new(ctx.load(n)?));
            Ok(())
        })
        .field("then", |o, n, ctx| {
            o.then_schema = Some(Box::new(ctx.load(n)?));
            Ok(())
        })
        .field("else", |o, n, ctx| {
            o.else_schema = Some(Box::new(ctx.load(n)?));
            Ok(())
        })
        .field("patternProperties", |o, n, ctx| {
            o.pattern_properties = ctx.load_map(n, "patternProperties")?;
            Ok(())
        })
        .field("dependentSchemas", |o, n, ctx| {
            o.dependent_schemas = ctx.load_map(n, "dependentSchemas")?;
            Ok(())
        })
        .field("contentMediaType", |o, n, _| {
            o.content_media_type = Some(n.scalar()?);
            Ok(())
        })
        .field("contentEncoding", |o, n, _| {
            o.content_encoding = Some(n.scalar()?);
            Ok(())
        })
        .extend_from(&v3::schema::SCHEMA_FIXED)
        .without("nullable")
});

static SCHEMA_PATTERNS: Lazy<PatternFieldMap<Schema>> = Lazy::new(|| {
    PatternFieldMap::<Schema>::new()
        .pattern(is_extension, set_extension::<Schema>)
        .pattern(not_extension, |o, name, n, _| {
            o.unrecognized_keywords
                .insert(name.to_string(), n.create_any());
            Ok(())
        })
});

pub(crate) fn load_schema(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<RefOr<Schema>> {
    v3::schema::load_schema_with(node, ctx, &SCHEMA_FIXED, &SCHEMA_PATTERNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReferenceKind;
    use crate::service::SpecVersion;
    use crate::settings::ReaderSettings;
    use serde_json::json;

    fn ctx() -> ParsingContext {
        ParsingContext::new(SpecVersion::V3_1, ReaderSettings::default())
    }

    #[test]
    fn test_json_schema_keywords() {
        let value = json!({
            "$id": "https://example.com/pet",
            "$comment": "pets",
            "type": ["object", "null"],
            "exclusiveMinimum": 0,
            "const": {"kind": "pet"},
            "examples": [{"name": "Rex"}],
            "prefixItems": [{"type": "string"}],
            "if": {"required": ["name"]},
            "then": {"properties": {"name": {"type": "string"}}},
            "$defs": {"id": {"type": "integer"}},
            "patternProperties": {"^x_": {"type": "string"}},
            "nullable": true,
            "unevaluatedProperties": false,
            "x-origin": "test"
        });
        let mut ctx = ctx();
        let schema = load_schema(ParseNode::new(&value), &mut ctx).unwrap();
        assert!(ctx.diagnostic().is_clean(), "{:?}", ctx.diagnostic());
        let schema = schema.as_item().unwrap();
        assert!(schema.has_type("null"));
        assert_eq!(schema.exclusive_minimum, Some(ExclusiveBound::Value(0.0)));
        assert_eq!(schema.const_value, Some(json!({"kind": "pet"})));
        assert_eq!(schema.examples.len(), 1);
        assert_eq!(schema.prefix_items.len(), 1);
        assert!(schema.if_schema.is_some() && schema.then_schema.is_some());
        assert!(schema.defs.contains_key("id"));
        assert!(schema.pattern_properties.contains_key("^x_"));
        assert!(!schema.nullable);
        assert_eq!(schema.unrecognized_keywords.get("nullable"), Some(&json!(true)));
        assert_eq!(schema.unrecognized_keywords.get("unevaluatedProperties"), Some(&json!(false)));
        assert_eq!(schema.extensions["x-origin"], json!("test"));
    }

    #[test]
    fn test_nested_schemas_use_the_same_dialect() {
        let value = json!({
            "type": "object",
            "properties": {"tags": {"type": ["array", "null"], "items": {"$ref": "#/$defs/tag"}}}
        });
        let mut ctx = ctx();
        let schema = load_schema(ParseNode::new(&value), &mut ctx).unwrap();
        let tags = schema.as_item().unwrap().properties["tags"].as_item().unwrap();
        assert!(tags.has_type("array"));
        let items = tags.items.as_deref().unwrap().as_reference().unwrap();
        assert_eq!(items.kind, ReferenceKind::Schema);
        assert!(items.raw_fragment);
        assert_eq!(items.id.as_deref(), Some("/$defs/tag"));
    }
}
