#![deny(missing_docs)]

//! # Parsing Context
//!
//! Mutable state for exactly one read: the diagnostic sink, temporary storage,
//! the location stack used to anchor diagnostics, and the version whose
//! service drives nested loads. A context is never shared between reads.

use crate::diagnostics::{Diagnostic, OpenApiError};
use crate::element::Loadable;
use crate::error::{ReaderError, ReaderResult};
use crate::models::{Reference, ReferenceKind};
use crate::node::{MapNode, ParseNode};
use crate::resolve::pointer::escape_segment;
use crate::service::{service_for, SpecVersion, VersionService};
use crate::settings::ReaderSettings;
use crate::temp_storage::TempStorage;
use indexmap::IndexMap;

/// Per-read state threaded through every loader.
#[derive(Debug)]
pub struct ParsingContext {
    diagnostic: Diagnostic,
    temp: TempStorage,
    location: Vec<String>,
    version: SpecVersion,
    settings: ReaderSettings,
    document_location: Option<String>,
}

impl ParsingContext {
    /// Creates a context for one read under `version`.
    pub fn new(version: SpecVersion, settings: ReaderSettings) -> Self {
        let document_location = settings.base_url.clone();
        Self {
            diagnostic: Diagnostic {
                spec_version: Some(version),
                ..Default::default()
            },
            temp: TempStorage::default(),
            location: Vec::new(),
            version,
            settings,
            document_location,
        }
    }

    /// Overrides the location of the document being read (defaults to the base URL).
    pub fn with_document_location(mut self, location: Option<String>) -> Self {
        if location.is_some() {
            self.document_location = location;
        }
        self
    }

    /// Version being read.
    pub fn version(&self) -> SpecVersion {
        self.version
    }

    /// Service for the version being read.
    pub fn service(&self) -> &'static dyn VersionService {
        service_for(self.version)
    }

    /// Reader settings.
    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    /// Location of the document being read, if known.
    pub fn document_location(&self) -> Option<&str> {
        self.document_location.as_deref()
    }

    /// Temporary storage.
    pub fn temp(&mut self) -> &mut TempStorage {
        &mut self.temp
    }

    /// Read-only view of temporary storage.
    pub fn temp_ref(&self) -> &TempStorage {
        &self.temp
    }

    /// Diagnostics collected so far.
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// Consumes the context and hands back its diagnostics.
    pub fn into_diagnostic(self) -> Diagnostic {
        self.diagnostic
    }

    /// Current location as a JSON pointer (`#/paths/~1pets/get`).
    pub fn location(&self) -> String {
        let mut pointer = String::from("#");
        for segment in &self.location {
            pointer.push('/');
            pointer.push_str(&escape_segment(segment));
        }
        pointer
    }

    /// Runs `f` with `segment` pushed on the location stack.
    ///
    /// An error returned by `f` is recorded at the pushed location and `None`
    /// comes back; the caller carries on with its siblings.
    pub fn within<T>(
        &mut self,
        segment: &str,
        f: impl FnOnce(&mut Self) -> ReaderResult<T>,
    ) -> Option<T> {
        self.location.push(segment.to_string());
        let result = if self.location.len() > self.settings.max_nesting_depth {
            Err(ReaderError::NestingTooDeep(self.settings.max_nesting_depth))
        } else {
            f(self)
        };
        let value = match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.report(err);
                None
            }
        };
        self.location.pop();
        value
    }

    /// Records an error at the current location.
    pub fn report(&mut self, err: ReaderError) {
        let pointer = self.location();
        self.report_at(pointer, err.to_string());
    }

    /// Records an error at an explicit location.
    pub fn report_at(&mut self, pointer: impl Into<String>, message: impl Into<String>) {
        self.diagnostic
            .errors
            .push(OpenApiError::new(pointer, message));
    }

    /// Records a warning at the current location.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(location = %self.location(), "{message}");
        let pointer = self.location();
        self.diagnostic
            .warnings
            .push(OpenApiError::new(pointer, message));
    }

    /// Parses a `$ref` string with the version's grammar and stamps the host document.
    pub fn reference(&self, pointer: &str, expected: ReferenceKind) -> ReaderResult<Reference> {
        let reference = self.service().parse_reference(pointer, Some(expected))?;
        let interchangeable = self.version == SpecVersion::V2
            && matches!(
                (expected, reference.kind),
                (ReferenceKind::Parameter, ReferenceKind::RequestBody)
                    | (ReferenceKind::RequestBody, ReferenceKind::Parameter)
            );
        if reference.kind != expected && !interchangeable {
            return Err(ReaderError::ReferenceKindMismatch {
                expected,
                found: reference.kind,
            });
        }
        Ok(reference.with_host(self.document_location.clone()))
    }

    /// Returns the reference held by `map`, if it is a Reference Object.
    ///
    /// OpenAPI 3.1 keeps the `summary` and `description` siblings.
    pub fn reference_in(
        &self,
        map: MapNode<'_>,
        expected: ReferenceKind,
    ) -> ReaderResult<Option<Reference>> {
        let Some(pointer) = map.reference_pointer() else {
            return Ok(None);
        };
        let mut reference = self.reference(pointer, expected)?;
        if self.version == SpecVersion::V3_1 {
            reference.summary = map.scalar_property("summary");
            reference.description = map.scalar_property("description");
        }
        Ok(Some(reference))
    }

    /// Loads a `T` through the version service.
    pub fn load<T: Loadable>(&mut self, node: ParseNode<'_>) -> ReaderResult<T> {
        let element = self.service().load_element(T::KIND, node, self)?;
        T::from_element(element)
    }

    /// Loads every item of a list node as a `T`. Failing items are reported and skipped.
    pub fn load_list<T: Loadable>(&mut self, node: ParseNode<'_>, label: &str) -> ReaderResult<Vec<T>> {
        node.create_list(self, label, |item, ctx| ctx.load::<T>(item))
    }

    /// Loads every value of a map node as a `T`. Failing values are reported and skipped.
    pub fn load_map<T: Loadable>(
        &mut self,
        node: ParseNode<'_>,
        label: &str,
    ) -> ReaderResult<IndexMap<String, T>> {
        node.create_map(self, label, |_, value, ctx| ctx.load::<T>(value))
    }
}
