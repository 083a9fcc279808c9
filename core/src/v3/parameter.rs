//! Parameter and Header loaders.

use crate::context::ParsingContext;
use crate::dispatch::{is_extension, parse_map, set_extension, FixedFieldMap, PatternFieldMap};
use crate::error::ReaderResult;
use crate::models::{Header, Parameter, ParameterLocation, ParameterStyle, RefOr, ReferenceKind};
use crate::node::ParseNode;
use once_cell::sync::Lazy;

static PARAMETER_FIXED: Lazy<FixedFieldMap<Parameter>> = Lazy::new(|| {
    FixedFieldMap::<Parameter>::new()
        .field("name", |o, n, _| {
            o.name = n.scalar()?;
            Ok(())
        })
        .field("in", |o, n, _| {
            o.location = ParameterLocation::from_name(&n.scalar()?);
            Ok(())
        })
        .field("description", |o, n, _| {
            o.description = Some(n.scalar()?);
            Ok(())
        })
        .field("required", |o, n, _| {
            o.required = n.as_bool()?;
            Ok(())
        })
        .field("deprecated", |o, n, _| {
            o.deprecated = n.as_bool()?;
            Ok(())
        })
        .field("allowEmptyValue", |o, n, _| {
            o.allow_empty_value = n.as_bool()?;
            Ok(())
        })
        .field("allowReserved", |o, n, _| {
            o.allow_reserved = n.as_bool()?;
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
        .field("schema", |o, n, ctx| {
            o.schema = Some(ctx.load(n)?);
            Ok(())
        })
        .field("content", |o, n, ctx| {
            o.content = ctx.load_map(n, "content")?;
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
});

static PARAMETER_PATTERNS: Lazy<PatternFieldMap<Parameter>> = Lazy::new(|| {
    PatternFieldMap::<Parameter>::new().pattern(is_extension, set_extension::<Parameter>)
});

static HEADER_FIXED: Lazy<FixedFieldMap<Header>> = Lazy::new(|| {
    FixedFieldMap::<Header>::new()
        .field("description", |o, n, _| {
            o.description = Some(n.scalar()?);
            Ok(())
        })
        .field("required", |o, n, _| {
            o.required = n.as_bool()?;
            Ok(())
        })
        .field("deprecated", |o, n, _| {
            o.deprecated = n.as_bool()?;
            Ok(())
        })
        .field("allowEmptyValue", |o, n, _| {
            o.allow_empty_value = n.as_bool()?;
            Ok(())
        })
        .field("allowReserved", |o, n, _| {
            o.allow_reserved = n.as_bool()?;
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
        .field("schema", |o, n, ctx| {
            o.schema = Some(ctx.load(n)?);
            Ok(())
        })
        .field("content", |o, n, ctx| {
            o.content = ctx.load_map(n, "content")?;
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
});

static HEADER_PATTERNS: Lazy<PatternFieldMap<Header>> =
    Lazy::new(|| PatternFieldMap::<Header>::new().pattern(is_extension, set_extension::<Header>));

pub(crate) fn load_parameter(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<RefOr<Parameter>> {
    let map = node.check_map("parameter")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::Parameter)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut parameter = Parameter::default();
    parse_map(map, &mut parameter, &PARAMETER_FIXED, &PARAMETER_PATTERNS, ctx);
    Ok(RefOr::Item(parameter))
}

pub(crate) fn load_header(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<RefOr<Header>> {
    let map = node.check_map("header")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::Header)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut header = Header::default();
    parse_map(map, &mut header, &HEADER_FIXED, &HEADER_PATTERNS, ctx);
    Ok(RefOr::Item(header))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::SpecVersion;
    use crate::settings::ReaderSettings;
    use serde_json::json;

    #[test]
    fn test_unknown_location_fails_soft() {
        let value = json!({"name": "id", "in": "body", "style": "weird", "required": true});
        let mut ctx = ParsingContext::new(SpecVersion::V3_0, ReaderSettings::default());
        let parameter = load_parameter(ParseNode::new(&value), &mut ctx).unwrap();
        let parameter = parameter.as_item().unwrap();
        assert_eq!(parameter.location, None);
        assert_eq!(parameter.style, None);
        assert!(parameter.required);
        assert!(ctx.diagnostic().is_clean());
    }

    #[test]
    fn test_parameter_with_schema_and_examples() {
        let value = json!({
            "name": "limit",
            "in": "query",
            "style": "form",
            "explode": false,
            "schema": {"type": "integer", "maximum": 100},
            "examples": {"small": {"value": 5}, "shared": {"$ref": "#/components/examples/Big"}}
        });
        let mut ctx = ParsingContext::new(SpecVersion::V3_0, ReaderSettings::default());
        let parameter = load_parameter(ParseNode::new(&value), &mut ctx).unwrap();
        let parameter = parameter.as_item().unwrap();
        assert_eq!(parameter.location, Some(ParameterLocation::Query));
        assert_eq!(parameter.style, Some(ParameterStyle::Form));
        assert_eq!(parameter.explode, Some(false));
        assert!(parameter.schema.as_ref().unwrap().as_item().unwrap().has_type("integer"));
        assert_eq!(
            parameter.examples["small"].as_item().unwrap().value,
            Some(json!(5))
        );
        assert!(parameter.examples["shared"].is_reference());
    }

    #[test]
    fn test_header_reference() {
        let value = json!({"$ref": "#/components/headers/RateLimit"});
        let mut ctx = ParsingContext::new(SpecVersion::V3_0, ReaderSettings::default());
        let header = load_header(ParseNode::new(&value), &mut ctx).unwrap();
        assert_eq!(
            header.as_reference().unwrap().kind,
            ReferenceKind::Header
        );
    }
}
