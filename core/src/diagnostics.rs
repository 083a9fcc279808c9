#![deny(missing_docs)]

//! # Diagnostics
//!
//! Structured error records collected while reading a document. Bad input
//! never aborts a read; it ends up here with the pointer of the offending node.

use crate::service::SpecVersion;
use std::fmt;

/// A single problem found while reading, anchored at a JSON-pointer-like location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenApiError {
    /// Location of the node, e.g. `#/paths/~1pets/get/parameters/0/in`.
    pub pointer: String,
    /// Human readable message.
    pub message: String,
}

impl OpenApiError {
    /// Creates a new record.
    pub fn new(pointer: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for OpenApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.pointer)
    }
}

/// Everything reported during one read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostic {
    /// Problems that lost information or broke a reference.
    pub errors: Vec<OpenApiError>,
    /// Soft conflicts the reader resolved on its own (e.g. duplicate body parameters).
    pub warnings: Vec<OpenApiError>,
    /// Version the document was read as, once known.
    pub spec_version: Option<SpecVersion>,
}

impl Diagnostic {
    /// Returns true when no errors were recorded. Warnings do not count.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if any error message contains `needle`.
    pub fn has_error_containing(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.message.contains(needle))
    }

    /// Moves all records of `other` into `self`.
    pub fn append(&mut self, other: Diagnostic) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        if self.spec_version.is_none() {
            self.spec_version = other.spec_version;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_pointer() {
        let err = OpenApiError::new("#/info", "title is required");
        assert_eq!(err.to_string(), "title is required [#/info]");
    }

    #[test]
    fn test_append_keeps_order_and_version() {
        let mut first = Diagnostic {
            errors: vec![OpenApiError::new("#/a", "one")],
            ..Default::default()
        };
        let second = Diagnostic {
            errors: vec![OpenApiError::new("#/b", "two")],
            warnings: vec![OpenApiError::new("#/c", "three")],
            spec_version: Some(SpecVersion::V2),
        };
        first.append(second);
        assert_eq!(first.errors.len(), 2);
        assert_eq!(first.errors[1].pointer, "#/b");
        assert_eq!(first.warnings.len(), 1);
        assert_eq!(first.spec_version, Some(SpecVersion::V2));
        assert!(!first.is_clean());
        assert!(first.has_error_containing("two"));
    }
}
