#![deny(missing_docs)]

//! # Workspace
//!
//! Registry of documents and standalone fragments for multi-document
//! reference resolution. Documents are keyed by the location they were read
//! from; fragments by `location` or `location#/json/pointer`.
//! No network or file access is performed.

use super::DocumentSource;
use crate::element::{Element, Loadable};
use crate::models::OpenApiDocument;
use indexmap::IndexMap;
use tracing::debug;

/// Documents and fragments available to reference resolution.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    documents: IndexMap<String, OpenApiDocument>,
    fragments: IndexMap<String, Element>,
}

impl Workspace {
    /// Creates an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a document under `location`, replacing any previous one.
    pub fn add_document(&mut self, location: impl Into<String>, mut document: OpenApiDocument) {
        let location = location.into();
        debug!(%location, "registering document");
        document.location = Some(location.clone());
        self.documents.insert(location, document);
    }

    /// Registers a standalone fragment under `key` (`location` or `location#/pointer`).
    pub fn add_fragment<T: Loadable>(&mut self, key: impl Into<String>, fragment: T) {
        let key = key.into();
        debug!(%key, kind = %T::KIND, "registering fragment");
        self.fragments.insert(key, fragment.into_element());
    }

    /// The document registered under `location`.
    pub fn get_document(&self, location: &str) -> Option<&OpenApiDocument> {
        self.documents.get(strip_fragment(location))
    }

    /// True when a document or fragment is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.documents.contains_key(key) || self.fragments.contains_key(key)
    }

    /// Registered document locations, in registration order.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }
}

impl DocumentSource for Workspace {
    fn document(&self, location: Option<&str>) -> Option<&OpenApiDocument> {
        match location {
            Some(location) => self.get_document(location),
            None if self.documents.len() == 1 => self.documents.values().next(),
            None => None,
        }
    }

    fn fragment(&self, key: &str) -> Option<&Element> {
        self.fragments.get(key)
    }
}

fn strip_fragment(location: &str) -> &str {
    location.split_once('#').map_or(location, |(doc, _)| doc)
}
