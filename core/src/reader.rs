#![deny(missing_docs)]

//! # Reader
//!
//! Entry points of the crate. Text (YAML or JSON) or an untyped tree goes in;
//! a document and the diagnostics collected while reading it come out.
//!
//! The version is sniffed here from `swagger` / `openapi` and the matching
//! version service does the rest. Bad input ends up in the diagnostic; only
//! unparsable text and unsupported versions are returned as errors.

use crate::context::ParsingContext;
use crate::diagnostics::Diagnostic;
use crate::element::Loadable;
use crate::error::{ReaderError, ReaderResult};
use crate::models::OpenApiDocument;
use crate::node::ParseNode;
use crate::resolve::{check_references, Workspace};
use crate::service::SpecVersion;
use crate::settings::{ReaderSettings, ReferenceResolution};
use serde_json::Value;
use tracing::debug;

/// A document together with everything reported while reading it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadResult {
    /// The assembled document. Always present, possibly partial.
    pub document: OpenApiDocument,
    /// Errors and warnings.
    pub diagnostic: Diagnostic,
}

/// A single element read on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentResult<T> {
    /// The element, unless its node could not be loaded at all.
    pub element: Option<T>,
    /// Errors and warnings.
    pub diagnostic: Diagnostic,
}

/// Reads OpenAPI 2.0, 3.0 and 3.1 documents.
#[derive(Debug, Clone, Default)]
pub struct OpenApiReader {
    settings: ReaderSettings,
}

impl OpenApiReader {
    /// Creates a reader with the given settings.
    pub fn new(settings: ReaderSettings) -> Self {
        Self { settings }
    }

    /// Settings in use.
    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    /// Reads a document from YAML or JSON text. The base URL, if any, is its location.
    pub fn read_str(&self, text: &str) -> ReaderResult<ReadResult> {
        let value = parse_text(text)?;
        self.read_value(&value, self.settings.base_url.as_deref())
    }

    /// Reads a document from an untyped tree.
    ///
    /// External references cannot be checked without a workspace, so
    /// [`ReferenceResolution::ResolveAll`] checks local references only here.
    pub fn read_value(&self, value: &Value, location: Option<&str>) -> ReaderResult<ReadResult> {
        let (document, mut diagnostic) = self.assemble(value, location)?;
        let mode = match self.settings.reference_resolution {
            ReferenceResolution::ResolveAll => ReferenceResolution::ResolveLocal,
            mode => mode,
        };
        diagnostic
            .errors
            .extend(check_references(&document, &document, mode));
        Ok(ReadResult {
            document,
            diagnostic,
        })
    }

    /// Reads a document from text and registers it in `workspace` under `location`.
    ///
    /// References are checked against the whole workspace, so documents
    /// registered earlier can satisfy external references.
    pub fn read_into(
        &self,
        workspace: &mut Workspace,
        text: &str,
        location: &str,
    ) -> ReaderResult<Diagnostic> {
        let value = parse_text(text)?;
        let (document, mut diagnostic) = self.assemble(&value, Some(location))?;
        workspace.add_document(location, document);
        if let Some(document) = workspace.get_document(location) {
            diagnostic.errors.extend(check_references(
                document,
                &*workspace,
                self.settings.reference_resolution,
            ));
        }
        Ok(diagnostic)
    }

    /// Reads one element of type `T` under `version`.
    ///
    /// Fails only for unparsable text and for element kinds `version` does not support.
    pub fn read_fragment<T: Loadable>(
        &self,
        text: &str,
        version: SpecVersion,
    ) -> ReaderResult<FragmentResult<T>> {
        let value = parse_text(text)?;
        let mut ctx = ParsingContext::new(version, self.settings.clone());
        debug!(%version, kind = %T::KIND, "reading fragment");
        let element = match ctx.load::<T>(ParseNode::new(&value)) {
            Ok(element) => Some(element),
            Err(err @ ReaderError::UnsupportedElement { .. }) => return Err(err),
            Err(err) => {
                ctx.report(err);
                None
            }
        };
        Ok(FragmentResult {
            element,
            diagnostic: ctx.into_diagnostic(),
        })
    }

    fn assemble(
        &self,
        value: &Value,
        location: Option<&str>,
    ) -> ReaderResult<(OpenApiDocument, Diagnostic)> {
        let version = sniff_version(value)?;
        debug!(%version, ?location, "reading document");
        let mut ctx = ParsingContext::new(version, self.settings.clone())
            .with_document_location(location.map(str::to_string));
        let document = ctx.service().load_document(ParseNode::new(value), &mut ctx);
        let diagnostic = ctx.into_diagnostic();
        debug!(
            errors = diagnostic.errors.len(),
            warnings = diagnostic.warnings.len(),
            "document assembled"
        );
        Ok((document, diagnostic))
    }
}

fn parse_text(text: &str) -> ReaderResult<Value> {
    Ok(serde_yaml::from_str(text)?)
}

/// Picks the version from `swagger` (2.0 only) or `openapi` (3.0.x, 3.1.x).
pub fn sniff_version(value: &Value) -> ReaderResult<SpecVersion> {
    let field = |name: &str| {
        value
            .get(name)
            .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
    };
    if let Some(swagger) = field("swagger") {
        return match swagger.trim() {
            "2.0" => Ok(SpecVersion::V2),
            _ => Err(ReaderError::UnsupportedVersion(swagger)),
        };
    }
    let Some(openapi) = field("openapi") else {
        return Err(ReaderError::UnsupportedVersion(String::new()));
    };
    match SpecVersion::from_version_string(&openapi) {
        Some(version) if version != SpecVersion::V2 => Ok(version),
        _ => Err(ReaderError::UnsupportedVersion(openapi)),
    }
}
