//! Swagger 2.0 Response loader.
//!
//! A 2.0 response carries a bare `schema` and an `examples` map keyed by
//! media type. Which media types apply is only known to the enclosing
//! operation (`produces`), so both are parked in temp storage scoped to the
//! response's location and turned into `content` by [`attach_content`].

use crate::context::ParsingContext;
use crate::dispatch::{is_extension, parse_map, set_extension, FixedFieldMap, PatternFieldMap};
use crate::error::ReaderResult;
use crate::models::{
    Extensible, Extensions, MediaType, RefOr, ReferenceKind, Response, Schema,
};
use crate::node::ParseNode;
use crate::temp_storage::{keys, TempValue};
use once_cell::sync::Lazy;
use serde_json::Value;

#[derive(Debug, Default)]
struct ResponseBuilder {
    response: Response,
    schema: Option<RefOr<Schema>>,
    examples: Option<Value>,
}

impl Extensible for ResponseBuilder {
    fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.response.extensions
    }
}

static RESPONSE_FIXED: Lazy<FixedFieldMap<ResponseBuilder>> = Lazy::new(|| {
    FixedFieldMap::<ResponseBuilder>::new()
        .field("description", |o, n, _| {
            o.response.description = n.scalar()?;
            Ok(())
        })
        .field("schema", |o, n, ctx| {
            o.schema = Some(ctx.load(n)?);
            Ok(())
        })
        .field("headers", |o, n, ctx| {
            o.response.headers = ctx.load_map(n, "headers")?;
            Ok(())
        })
        .field("examples", |o, n, _| {
            n.check_map("examples")?;
            o.examples = Some(n.create_any());
            Ok(())
        })
});

static RESPONSE_PATTERNS: Lazy<PatternFieldMap<ResponseBuilder>> = Lazy::new(|| {
    PatternFieldMap::<ResponseBuilder>::new().pattern(is_extension, set_extension::<ResponseBuilder>)
});

pub(crate) fn load_response(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<RefOr<Response>> {
    let map = node.check_map("response")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::Response)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut builder = ResponseBuilder::default();
    parse_map(map, &mut builder, &RESPONSE_FIXED, &RESPONSE_PATTERNS, ctx);

    let scope = ctx.location();
    if let Some(schema) = builder.schema {
        ctx.temp()
            .set_scoped(&scope, keys::RESPONSE_SCHEMA, TempValue::Schema(Box::new(schema)));
    }
    if let Some(examples) = builder.examples {
        ctx.temp()
            .set_scoped(&scope, keys::RESPONSE_EXAMPLES, TempValue::Any(examples));
    }
    Ok(RefOr::Item(builder.response))
}

/// Builds `response.content` from what [`load_response`] parked under `scope`.
///
/// Each media type in `produces` gets the schema; each example's media type
/// gets its example, added as a content entry when `produces` lacks it.
pub(crate) fn attach_content(
    response: &mut Response,
    scope: &str,
    produces: &[String],
    ctx: &mut ParsingContext,
) {
    let schema = match ctx.temp().take_scoped(scope, keys::RESPONSE_SCHEMA) {
        Some(TempValue::Schema(schema)) => Some(*schema),
        _ => None,
    };
    let examples = match ctx.temp().take_scoped(scope, keys::RESPONSE_EXAMPLES) {
        Some(TempValue::Any(Value::Object(examples))) => examples,
        _ => Default::default(),
    };
    if schema.is_none() && examples.is_empty() {
        return;
    }
    if schema.is_some() {
        for media_type in produces {
            response
                .content
                .entry(media_type.clone())
                .or_insert_with(|| MediaType::with_schema(schema.clone()));
        }
    }
    for (media_type, example) in examples {
        response
            .content
            .entry(media_type)
            .or_insert_with(|| MediaType::with_schema(schema.clone()))
            .example = Some(example);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::SpecVersion;
    use crate::settings::ReaderSettings;
    use serde_json::json;

    #[test]
    fn test_schema_and_examples_become_content() {
        let value = json!({
            "description": "A pet",
            "schema": {"$ref": "#/definitions/Pet"},
            "headers": {"X-Rate-Limit": {"type": "integer"}},
            "examples": {"application/xml": "<pet/>"},
            "x-cache": "1h"
        });
        let mut ctx = ParsingContext::new(SpecVersion::V2, ReaderSettings::default());
        let mut response = load_response(ParseNode::new(&value), &mut ctx)
            .unwrap()
            .as_item()
            .cloned()
            .unwrap();
        assert!(response.content.is_empty());
        assert!(response.headers.contains_key("X-Rate-Limit"));
        assert_eq!(response.extensions["x-cache"], json!("1h"));

        let produces = vec!["application/json".to_string()];
        attach_content(&mut response, "#", &produces, &mut ctx);
        let keys: Vec<_> = response.content.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["application/json", "application/xml"]);
        let json = &response.content["application/json"];
        assert_eq!(
            json.schema.as_ref().unwrap().as_reference().unwrap().id.as_deref(),
            Some("Pet")
        );
        assert_eq!(response.content["application/xml"].example, Some(json!("<pet/>")));

        let mut other = Response::default();
        attach_content(&mut other, "#", &produces, &mut ctx);
        assert!(other.content.is_empty());
    }
}
