//! # Error Handling
//!
//! Provides the unified `ReaderError` enum used across the reader.
//!
//! Most variants describe bad input. The field parser turns those into
//! diagnostic records, so they only escape a `read_*` call when the document
//! cannot be walked at all (unparsable text, unknown version) or when the
//! caller asks for something the version service never registered.

use crate::element::ElementKind;
use crate::models::ReferenceKind;
use crate::service::SpecVersion;
use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: only the YAML tokenizer error converts implicitly.
#[derive(Debug, Display, From)]
pub enum ReaderError {
    /// The source text could not be turned into a generic tree.
    #[display("Syntax Error: {_0}")]
    Syntax(serde_yaml::Error),

    /// The version field names a specification this reader does not handle.
    #[from(ignore)]
    #[display("Version '{_0}' is not supported")]
    UnsupportedVersion(String),

    /// A node had the wrong shape (e.g. a scalar where a map was required).
    #[from(ignore)]
    #[display("{_0}")]
    Structure(String),

    /// A scalar could not be parsed into the expected type.
    #[from(ignore)]
    #[display("'{value}' is not a valid {expected}")]
    InvalidValue {
        /// The offending scalar.
        value: String,
        /// What the field expected (`boolean`, `number`, `URI`, ...).
        expected: &'static str,
    },

    /// A `$ref` string does not follow the version's pointer grammar.
    #[from(ignore)]
    #[display("The reference string '{_0}' has invalid format")]
    InvalidReference(String),

    /// A `$ref` names a container this version does not know.
    #[from(ignore)]
    #[display("Unknown reference type '{_0}'")]
    UnknownReferenceKind(String),

    /// A `$ref` points at a different kind of component than the field allows.
    #[from(ignore)]
    #[display("Referenced type mismatch: expected {expected}, found {found}")]
    ReferenceKindMismatch {
        /// Kind demanded by the field holding the reference.
        expected: ReferenceKind,
        /// Kind named by the pointer.
        found: ReferenceKind,
    },

    /// A reference could not be located in the document or workspace.
    #[from(ignore)]
    #[display("Invalid Reference identifier '{_0}'")]
    UnresolvedReference(String),

    /// A chain of references loops back onto itself.
    #[from(ignore)]
    #[display("Circular reference detected while resolving '{_0}'")]
    CircularReference(String),

    /// A loader was requested for an element the version never registered.
    /// This is a programming error rather than bad input.
    #[from(ignore)]
    #[display("{kind} elements are not supported by the OpenAPI {version} reader")]
    UnsupportedElement {
        /// Element that was requested.
        kind: ElementKind,
        /// Version service that was asked.
        version: SpecVersion,
    },

    /// The tree nests deeper than the configured limit.
    #[from(ignore)]
    #[display("Maximum nesting depth of {_0} exceeded")]
    NestingTooDeep(usize),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for ReaderError {}

/// Helper type alias for Result using ReaderError.
pub type ReaderResult<T> = Result<T, ReaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_conversion() {
        let yaml_err = serde_yaml::from_str::<serde_json::Value>("a: [1, 2").unwrap_err();
        let err: ReaderError = yaml_err.into();
        assert!(matches!(err, ReaderError::Syntax(_)));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ReaderError::InvalidValue {
            value: "maybe".into(),
            expected: "boolean",
        };
        assert_eq!(err.to_string(), "'maybe' is not a valid boolean");
    }

    #[test]
    fn test_unsupported_element_display() {
        let err = ReaderError::UnsupportedElement {
            kind: ElementKind::Link,
            version: SpecVersion::V2,
        };
        assert_eq!(
            err.to_string(),
            "link elements are not supported by the OpenAPI 2.0 reader"
        );
    }
}
