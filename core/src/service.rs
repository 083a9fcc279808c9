#![deny(missing_docs)]

//! # Version Services
//!
//! One service per specification version. A service owns the loader registry
//! for its version, the `$ref` pointer grammar, and the document assembler
//! with its version-specific post-processing.
//!
//! Services are stateless unit structs; all per-parse state lives in the
//! [`ParsingContext`], so the same service instance is shared by every parse.

use crate::context::ParsingContext;
use crate::element::{Element, ElementKind};
use crate::error::ReaderResult;
use crate::models::{OpenApiDocument, Reference, ReferenceKind};
use crate::node::ParseNode;
use crate::{v2, v3, v31};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The OpenAPI specification versions understood by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecVersion {
    /// Swagger / OpenAPI 2.0.
    #[serde(rename = "2.0")]
    V2,
    /// OpenAPI 3.0.x.
    #[serde(rename = "3.0")]
    V3_0,
    /// OpenAPI 3.1.x.
    #[serde(rename = "3.1")]
    V3_1,
}

impl SpecVersion {
    /// Maps a `swagger` / `openapi` version string onto a supported version.
    ///
    /// Patch levels are ignored; `3.0.3` and `3.0` both map to [`SpecVersion::V3_0`].
    pub fn from_version_string(version: &str) -> Option<Self> {
        let version = version.trim();
        if version == "2.0" || version == "2" {
            return Some(Self::V2);
        }
        let mut parts = version.split('.');
        match (parts.next(), parts.next()) {
            (Some("3"), Some("0")) => Some(Self::V3_0),
            (Some("3"), Some("1")) => Some(Self::V3_1),
            _ => None,
        }
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::V2 => "2.0",
            Self::V3_0 => "3.0",
            Self::V3_1 => "3.1",
        };
        f.write_str(text)
    }
}

/// Behaviour that differs between specification versions.
pub trait VersionService: Sync {
    /// The version served.
    fn version(&self) -> SpecVersion;

    /// Parses a `$ref` string into a reference descriptor using this version's grammar.
    ///
    /// `expected` is the kind demanded by the field holding the reference; it is
    /// used for pointers that do not name their kind (whole-document references,
    /// bare tag or security scheme names).
    fn parse_reference(
        &self,
        pointer: &str,
        expected: Option<ReferenceKind>,
    ) -> ReaderResult<Reference>;

    /// Loads one element of the given kind from `node`.
    ///
    /// Returns [`crate::ReaderError::UnsupportedElement`] when the kind has no
    /// loader for this version.
    fn load_element(
        &self,
        kind: ElementKind,
        node: ParseNode<'_>,
        ctx: &mut ParsingContext,
    ) -> ReaderResult<Element>;

    /// Assembles a whole document from the root node, including post-processing.
    fn load_document(&self, root: ParseNode<'_>, ctx: &mut ParsingContext) -> OpenApiDocument;
}

static V2_SERVICE: v2::OpenApiV2Service = v2::OpenApiV2Service;
static V3_SERVICE: v3::OpenApiV3Service = v3::OpenApiV3Service;
static V31_SERVICE: v31::OpenApiV31Service = v31::OpenApiV31Service;

/// Returns the shared service for a version.
pub fn service_for(version: SpecVersion) -> &'static dyn VersionService {
    match version {
        SpecVersion::V2 => &V2_SERVICE,
        SpecVersion::V3_0 => &V3_SERVICE,
        SpecVersion::V3_1 => &V31_SERVICE,
    }
}
