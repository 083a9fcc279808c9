//! Schema loader for the Swagger 2.0 dialect.
//!
//! 2.0 schemas are a subset of the 3.0 ones, except for `discriminator`,
//! which is a plain property name.

use crate::context::ParsingContext;
use crate::dispatch::{is_extension, set_extension, FixedFieldMap, PatternFieldMap};
use crate::error::ReaderResult;
use crate::models::{Discriminator, RefOr, Schema};
use crate::node::ParseNode;
use crate::v3;
use once_cell::sync::Lazy;

static SCHEMA_FIXED: Lazy<FixedFieldMap<Schema>> = Lazy::new(|| {
    FixedFieldMap::<Schema>::new()
        .field("discriminator", |o, n, _| {
            o.discriminator = Some(Discriminator {
                property_name: n.scalar()?,
                ..Default::default()
            });
            Ok(())
        })
        .extend_from(&v3::schema::SCHEMA_FIXED)
        .without("nullable")
        .without("oneOf")
        .without("anyOf")
        .without("not")
        .without("writeOnly")
        .without("deprecated")
});

static SCHEMA_PATTERNS: Lazy<PatternFieldMap<Schema>> =
    Lazy::new(|| PatternFieldMap::<Schema>::new().pattern(is_extension, set_extension::<Schema>));

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

    #[test]
    fn test_swagger_schema() {
        let value = json!({
            "type": "object",
            "discriminator": "petType",
            "required": ["petType"],
            "properties": {
                "petType": {"type": "string"},
                "owner": {"$ref": "#/definitions/Person"}
            },
            "nullable": true
        });
        let mut ctx = ParsingContext::new(SpecVersion::V2, ReaderSettings::default());
        let schema = load_schema(ParseNode::new(&value), &mut ctx).unwrap();
        let schema = schema.as_item().unwrap();
        assert_eq!(
            schema.discriminator.as_ref().map(|d| d.property_name.as_str()),
            Some("petType")
        );
        let owner = schema.properties["owner"].as_reference().unwrap();
        assert_eq!(owner.kind, ReferenceKind::Schema);
        assert_eq!(owner.id.as_deref(), Some("Person"));
        assert!(ctx.diagnostic().has_error_containing("nullable is not a valid property"));
    }
}
