//! Swagger 2.0 Parameter, Header and Items loaders.
//!
//! 2.0 describes simple values with primitive keywords (`type`, `format`,
//! `items`, `collectionFormat`, bounds) written directly on the parameter or
//! header. They are gathered into the value's schema.
//!
//! `in: body` and `in: formData` parameters have no 3.x counterpart. The
//! loader stashes them in temp storage and raises
//! [`keys::PARAMETER_IS_BODY_OR_FORM`] so the enclosing list leaves them out;
//! the operation or path item turns the stash into a request body.

use crate::context::ParsingContext;
use crate::dispatch::{is_extension, parse_map, set_extension, FixedFieldMap, PatternFieldMap};
use crate::error::{ReaderError, ReaderResult};
use crate::models::{
    Extensible, Extensions, ExclusiveBound, Header, Parameter, ParameterLocation, ParameterStyle,
    RefOr, ReferenceKind, Schema, SchemaType,
};
use crate::node::ParseNode;
use crate::temp_storage::{keys, TempValue};
use crate::v3;
use once_cell::sync::Lazy;

/// A loader target whose primitive keywords build a schema.
trait PrimitiveTarget {
    fn schema_mut(&mut self) -> &mut Schema;

    fn set_collection_format(&mut self, _format: String) {}
}

impl PrimitiveTarget for Schema {
    fn schema_mut(&mut self) -> &mut Schema {
        self
    }
}

/// Adds the primitive keywords shared by parameters, headers and items.
fn with_primitive_fields<T: PrimitiveTarget>(table: FixedFieldMap<T>) -> FixedFieldMap<T> {
    table
        .field("type", |o, n, _| {
            o.schema_mut().schema_type = Some(SchemaType::Single(n.scalar()?));
            Ok(())
        })
        .field("format", |o, n, _| {
            o.schema_mut().format = Some(n.scalar()?);
            Ok(())
        })
        .field("items", |o, n, ctx| {
            o.schema_mut().items = Some(Box::new(load_items(n, ctx)?));
            Ok(())
        })
        .field("collectionFormat", |o, n, _| {
            o.set_collection_format(n.scalar()?);
            Ok(())
        })
        .field("default", |o, n, _| {
            o.schema_mut().default = Some(n.create_any());
            Ok(())
        })
        .field("maximum", |o, n, _| {
            o.schema_mut().maximum = Some(n.as_f64()?);
            Ok(())
        })
        .field("exclusiveMaximum", |o, n, _| {
            o.schema_mut().exclusive_maximum = Some(ExclusiveBound::Flag(n.as_bool()?));
            Ok(())
        })
        .field("minimum", |o, n, _| {
            o.schema_mut().minimum = Some(n.as_f64()?);
            Ok(())
        })
        .field("exclusiveMinimum", |o, n, _| {
            o.schema_mut().exclusive_minimum = Some(ExclusiveBound::Flag(n.as_bool()?));
            Ok(())
        })
        .field("maxLength", |o, n, _| {
            o.schema_mut().max_length = Some(n.as_u64()?);
            Ok(())
        })
        .field("minLength", |o, n, _| {
            o.schema_mut().min_length = Some(n.as_u64()?);
            Ok(())
        })
        .field("pattern", |o, n, _| {
            o.schema_mut().pattern = Some(n.scalar()?);
            Ok(())
        })
        .field("maxItems", |o, n, _| {
            o.schema_mut().max_items = Some(n.as_u64()?);
            Ok(())
        })
        .field("minItems", |o, n, _| {
            o.schema_mut().min_items = Some(n.as_u64()?);
            Ok(())
        })
        .field("uniqueItems", |o, n, _| {
            o.schema_mut().unique_items = Some(n.as_bool()?);
            Ok(())
        })
        .field("enum", |o, n, ctx| {
            o.schema_mut().enum_values = n.create_list(ctx, "enum", |item, _| Ok(item.create_any()))?;
            Ok(())
        })
        .field("multipleOf", |o, n, _| {
            o.schema_mut().multiple_of = Some(n.as_f64()?);
            Ok(())
        })
}

/// Maps a 2.0 `collectionFormat` onto a 3.x style and explode flag.
fn collection_style(format: &str, in_query: bool) -> ReaderResult<(ParameterStyle, bool)> {
    match format {
        "csv" if in_query => Ok((ParameterStyle::Form, false)),
        "csv" => Ok((ParameterStyle::Simple, false)),
        "ssv" => Ok((ParameterStyle::SpaceDelimited, false)),
        "pipes" => Ok((ParameterStyle::PipeDelimited, false)),
        "multi" => Ok((ParameterStyle::Form, true)),
        "tsv" => Err(ReaderError::Structure(
            "collectionFormat 'tsv' has no OpenAPI 3 equivalent".into(),
        )),
        other => Err(ReaderError::InvalidValue {
            value: other.to_string(),
            expected: "collectionFormat",
        }),
    }
}

/// `type: file` only exists in 2.0 form data.
fn file_as_binary(mut schema: Schema) -> Schema {
    if schema.has_type("file") {
        schema.schema_type = Some(SchemaType::Single("string".into()));
        schema.format = Some("binary".into());
    }
    schema
}

#[derive(Debug, Default)]
struct ParameterBuilder {
    parameter: Parameter,
    location: Option<String>,
    primitive: Option<Schema>,
    body_schema: Option<RefOr<Schema>>,
    collection_format: Option<String>,
}

impl PrimitiveTarget for ParameterBuilder {
    fn schema_mut(&mut self) -> &mut Schema {
        self.primitive.get_or_insert_with(Schema::default)
    }

    fn set_collection_format(&mut self, format: String) {
        self.collection_format = Some(format);
    }
}

impl Extensible for ParameterBuilder {
    fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.parameter.extensions
    }
}

impl ParameterBuilder {
    fn finish(self, ctx: &mut ParsingContext) -> RefOr<Parameter> {
        let Self {
            mut parameter,
            location,
            primitive,
            body_schema,
            collection_format,
        } = self;
        match location.as_deref() {
            Some("body") => {
                parameter.schema = body_schema;
                if ctx.temp_ref().contains(keys::BODY_PARAMETER)
                    && ctx.settings().report_multiple_body_parameters
                {
                    ctx.warn(format!(
                        "Multiple body parameters; '{}' replaces the earlier one",
                        parameter.name
                    ));
                }
                ctx.temp().set(
                    keys::BODY_PARAMETER,
                    TempValue::Parameter(Box::new(parameter.clone())),
                );
                ctx.temp().set(keys::PARAMETER_IS_BODY_OR_FORM, TempValue::Flag);
            }
            Some("formData") => {
                parameter.schema = primitive.map(file_as_binary).map(RefOr::Item);
                ctx.temp().push_parameter(keys::FORM_PARAMETERS, parameter.clone());
                ctx.temp().set(keys::PARAMETER_IS_BODY_OR_FORM, TempValue::Flag);
            }
            name => {
                parameter.location = name.and_then(ParameterLocation::from_name);
                parameter.schema = primitive.map(RefOr::Item);
                if let Some(format) = collection_format {
                    let in_query = parameter.location == Some(ParameterLocation::Query);
                    match collection_style(&format, in_query) {
                        Ok((style, explode)) => {
                            parameter.style = Some(style);
                            parameter.explode = Some(explode);
                        }
                        Err(err) => ctx.report(err),
                    }
                }
            }
        }
        RefOr::Item(parameter)
    }
}

fn is_parameter_extension(name: &str) -> bool {
    is_extension(name) && name != "x-examples"
}

static PARAMETER_FIXED: Lazy<FixedFieldMap<ParameterBuilder>> = Lazy::new(|| {
    let table = FixedFieldMap::<ParameterBuilder>::new()
        .field("name", |o, n, _| {
            o.parameter.name = n.scalar()?;
            Ok(())
        })
        .field("in", |o, n, _| {
            o.location = Some(n.scalar()?);
            Ok(())
        })
        .field("description", |o, n, _| {
            o.parameter.description = Some(n.scalar()?);
            Ok(())
        })
        .field("required", |o, n, _| {
            o.parameter.required = n.as_bool()?;
            Ok(())
        })
        .field("allowEmptyValue", |o, n, _| {
            o.parameter.allow_empty_value = n.as_bool()?;
            Ok(())
        })
        .field("schema", |o, n, ctx| {
            o.body_schema = Some(ctx.load(n)?);
            Ok(())
        })
        .field("x-examples", |o, n, ctx| {
            o.parameter.examples = n.create_map(ctx, "x-examples", |_, value, ctx| {
                v3::response::load_example(value, ctx)
            })?;
            Ok(())
        });
    with_primitive_fields(table)
});

static PARAMETER_PATTERNS: Lazy<PatternFieldMap<ParameterBuilder>> = Lazy::new(|| {
    PatternFieldMap::<ParameterBuilder>::new()
        .pattern(is_parameter_extension, set_extension::<ParameterBuilder>)
});

#[derive(Debug, Default)]
struct HeaderBuilder {
    header: Header,
    primitive: Option<Schema>,
    collection_format: Option<String>,
}

impl PrimitiveTarget for HeaderBuilder {
    fn schema_mut(&mut self) -> &mut Schema {
        self.primitive.get_or_insert_with(Schema::default)
    }

    fn set_collection_format(&mut self, format: String) {
        self.collection_format = Some(format);
    }
}

impl Extensible for HeaderBuilder {
    fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.header.extensions
    }
}

static HEADER_FIXED: Lazy<FixedFieldMap<HeaderBuilder>> = Lazy::new(|| {
    let table = FixedFieldMap::<HeaderBuilder>::new().field("description", |o, n, _| {
        o.header.description = Some(n.scalar()?);
        Ok(())
    });
    with_primitive_fields(table)
});

static HEADER_PATTERNS: Lazy<PatternFieldMap<HeaderBuilder>> = Lazy::new(|| {
    PatternFieldMap::<HeaderBuilder>::new().pattern(is_extension, set_extension::<HeaderBuilder>)
});

static ITEMS_FIXED: Lazy<FixedFieldMap<Schema>> =
    Lazy::new(|| with_primitive_fields(FixedFieldMap::<Schema>::new()));

static ITEMS_PATTERNS: Lazy<PatternFieldMap<Schema>> =
    Lazy::new(|| PatternFieldMap::<Schema>::new().pattern(is_extension, set_extension::<Schema>));

/// Items Object: the element type of a primitive array.
fn load_items(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<RefOr<Schema>> {
    let map = node.check_map("items")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::Schema)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut schema = Schema::default();
    parse_map(map, &mut schema, &ITEMS_FIXED, &ITEMS_PATTERNS, ctx);
    Ok(RefOr::Item(schema))
}

pub(crate) fn load_parameter(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<RefOr<Parameter>> {
    let map = node.check_map("parameter")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::Parameter)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut builder = ParameterBuilder::default();
    parse_map(map, &mut builder, &PARAMETER_FIXED, &PARAMETER_PATTERNS, ctx);
    Ok(builder.finish(ctx))
}

/// Loads a parameter list, leaving out the body and form parameters the loader stashed.
pub(crate) fn load_parameters(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<Vec<RefOr<Parameter>>> {
    let loaded = node.create_list(ctx, "parameters", |item, ctx| {
        let parameter = ctx.load::<RefOr<Parameter>>(item)?;
        let promoted = ctx.temp().take(keys::PARAMETER_IS_BODY_OR_FORM).is_some();
        Ok((!promoted).then_some(parameter))
    })?;
    Ok(loaded.into_iter().flatten().collect())
}

pub(crate) fn load_header(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<RefOr<Header>> {
    let map = node.check_map("header")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::Header)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut builder = HeaderBuilder::default();
    parse_map(map, &mut builder, &HEADER_FIXED, &HEADER_PATTERNS, ctx);
    let HeaderBuilder {
        mut header,
        primitive,
        collection_format,
    } = builder;
    header.schema = primitive.map(RefOr::Item);
    if let Some(format) = collection_format {
        match collection_style(&format, false) {
            Ok((style, explode)) => {
                header.style = Some(style);
                header.explode = Some(explode);
            }
            Err(err) => ctx.report(err),
        }
    }
    Ok(RefOr::Item(header))
}
