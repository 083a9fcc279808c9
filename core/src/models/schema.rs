#![deny(missing_docs)]

//! # Schema Object
//!
//! The JSON Schema subset used by OpenAPI 2.0, 3.0 and 3.1. The structure is
//! kept as written; no composition or validation semantics are applied.

use super::{Extensions, ExternalDocs, RefOr};
use indexmap::IndexMap;
use serde_json::Value;

/// `type`: a single type name, or a list of them (3.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    /// One type name.
    Single(String),
    /// Several type names.
    Multiple(Vec<String>),
}

impl SchemaType {
    /// True when `name` is one of the declared types.
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Self::Single(single) => single == name,
            Self::Multiple(list) => list.iter().any(|t| t == name),
        }
    }

    /// The type name when exactly one is declared.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(single) => Some(single),
            Self::Multiple(list) if list.len() == 1 => Some(&list[0]),
            Self::Multiple(_) => None,
        }
    }
}

/// `exclusiveMinimum` / `exclusiveMaximum`: a modifier flag (2.0, 3.0) or a bound (3.1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExclusiveBound {
    /// Makes `minimum`/`maximum` exclusive.
    Flag(bool),
    /// Exclusive bound value.
    Value(f64),
}

/// `additionalProperties`.
#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalProperties {
    /// `true` or `false`.
    Allowed(bool),
    /// Schema for additional property values.
    Schema(Box<RefOr<Schema>>),
}

/// Schema Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// `title`.
    pub title: Option<String>,
    /// `description`.
    pub description: Option<String>,
    /// `type`.
    pub schema_type: Option<SchemaType>,
    /// `format`.
    pub format: Option<String>,
    /// `default`.
    pub default: Option<Value>,
    /// `multipleOf`.
    pub multiple_of: Option<f64>,
    /// `maximum`.
    pub maximum: Option<f64>,
    /// `exclusiveMaximum`.
    pub exclusive_maximum: Option<ExclusiveBound>,
    /// `minimum`.
    pub minimum: Option<f64>,
    /// `exclusiveMinimum`.
    pub exclusive_minimum: Option<ExclusiveBound>,
    /// `maxLength`.
    pub max_length: Option<u64>,
    /// `minLength`.
    pub min_length: Option<u64>,
    /// `pattern`.
    pub pattern: Option<String>,
    /// `maxItems`.
    pub max_items: Option<u64>,
    /// `minItems`.
    pub min_items: Option<u64>,
    /// `uniqueItems`.
    pub unique_items: Option<bool>,
    /// `maxProperties`.
    pub max_properties: Option<u64>,
    /// `minProperties`.
    pub min_properties: Option<u64>,
    /// `required` property names.
    pub required: Vec<String>,
    /// `enum`.
    pub enum_values: Vec<Value>,
    /// `const` (3.1).
    pub const_value: Option<Value>,
    /// `allOf`.
    pub all_of: Vec<RefOr<Schema>>,
    /// `oneOf`.
    pub one_of: Vec<RefOr<Schema>>,
    /// `anyOf`.
    pub any_of: Vec<RefOr<Schema>>,
    /// `not`.
    pub not: Option<Box<RefOr<Schema>>>,
    /// `items`.
    pub items: Option<Box<RefOr<Schema>>>,
    /// `prefixItems` (3.1).
    pub prefix_items: Vec<RefOr<Schema>>,
    /// `properties`.
    pub properties: IndexMap<String, RefOr<Schema>>,
    /// `additionalProperties`.
    pub additional_properties: Option<AdditionalProperties>,
    /// `patternProperties` (3.1).
    pub pattern_properties: IndexMap<String, RefOr<Schema>>,
    /// `dependentSchemas` (3.1).
    pub dependent_schemas: IndexMap<String, RefOr<Schema>>,
    /// `if` (3.1).
    pub if_schema: Option<Box<RefOr<Schema>>>,
    /// `then` (3.1).
    pub then_schema: Option<Box<RefOr<Schema>>>,
    /// `else` (3.1).
    pub else_schema: Option<Box<RefOr<Schema>>>,
    /// `$defs` (3.1).
    pub defs: IndexMap<String, RefOr<Schema>>,
    /// `$id` (3.1).
    pub id: Option<String>,
    /// `$schema` (3.1).
    pub dialect: Option<String>,
    /// `$comment` (3.1).
    pub comment: Option<String>,
    /// `$anchor` (3.1).
    pub anchor: Option<String>,
    /// `contentMediaType` (3.1).
    pub content_media_type: Option<String>,
    /// `contentEncoding` (3.1).
    pub content_encoding: Option<String>,
    /// `nullable` (3.0).
    pub nullable: bool,
    /// `discriminator`.
    pub discriminator: Option<Discriminator>,
    /// `readOnly`.
    pub read_only: bool,
    /// `writeOnly`.
    pub write_only: bool,
    /// `deprecated`.
    pub deprecated: bool,
    /// `xml`.
    pub xml: Option<Xml>,
    /// `externalDocs`.
    pub external_docs: Option<ExternalDocs>,
    /// `example`.
    pub example: Option<Value>,
    /// `examples` (3.1).
    pub examples: Vec<Value>,
    /// Keywords this model has no field for (3.1), kept as written.
    pub unrecognized_keywords: IndexMap<String, Value>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl Schema {
    /// A schema with a single `type`.
    pub fn of_type(name: impl Into<String>) -> Self {
        Self {
            schema_type: Some(SchemaType::Single(name.into())),
            ..Default::default()
        }
    }

    /// True when `name` is among the declared types.
    pub fn has_type(&self, name: &str) -> bool {
        self.schema_type
            .as_ref()
            .is_some_and(|schema_type| schema_type.contains(name))
    }
}

/// Discriminator Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Discriminator {
    /// Property holding the discriminating value.
    pub property_name: String,
    /// Values to schema names or references.
    pub mapping: IndexMap<String, String>,
    /// Vendor extensions (3.1).
    pub extensions: Extensions,
}

/// XML Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Xml {
    /// Element or attribute name.
    pub name: Option<String>,
    /// Namespace URI.
    pub namespace: Option<String>,
    /// Name prefix.
    pub prefix: Option<String>,
    /// Serialize as attribute.
    pub attribute: bool,
    /// Wrap array items.
    pub wrapped: bool,
    /// Vendor extensions.
    pub extensions: Extensions,
}
