#![deny(missing_docs)]

//! # Parameters

use super::{Example, Extensions, MediaType, RefOr, Schema};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// Where a parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

impl ParameterLocation {
    /// Display-name lookup. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "path" => Some(Self::Path),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }

    /// Display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Header => "header",
            Self::Path => "path",
            Self::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter serialization style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ParameterStyle {
    Matrix,
    Label,
    Form,
    Simple,
    SpaceDelimited,
    PipeDelimited,
    DeepObject,
}

impl ParameterStyle {
    /// Display-name lookup. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "matrix" => Some(Self::Matrix),
            "label" => Some(Self::Label),
            "form" => Some(Self::Form),
            "simple" => Some(Self::Simple),
            "spaceDelimited" => Some(Self::SpaceDelimited),
            "pipeDelimited" => Some(Self::PipeDelimited),
            "deepObject" => Some(Self::DeepObject),
            _ => None,
        }
    }

    /// Display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Matrix => "matrix",
            Self::Label => "label",
            Self::Form => "form",
            Self::Simple => "simple",
            Self::SpaceDelimited => "spaceDelimited",
            Self::PipeDelimited => "pipeDelimited",
            Self::DeepObject => "deepObject",
        }
    }
}

/// Parameter Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location. `None` when the source named a location this model has no value for.
    pub location: Option<ParameterLocation>,
    /// Description.
    pub description: Option<String>,
    /// Required flag.
    pub required: bool,
    /// Deprecation flag.
    pub deprecated: bool,
    /// Allow empty value flag.
    pub allow_empty_value: bool,
    /// Serialization style.
    pub style: Option<ParameterStyle>,
    /// Explode modifier.
    pub explode: Option<bool>,
    /// Allow reserved characters.
    pub allow_reserved: bool,
    /// Value schema.
    pub schema: Option<RefOr<Schema>>,
    /// Single example.
    pub example: Option<Value>,
    /// Named examples.
    pub examples: IndexMap<String, RefOr<Example>>,
    /// Media-type keyed alternative to `schema`.
    pub content: IndexMap<String, MediaType>,
    /// Vendor extensions.
    pub extensions: Extensions,
}
