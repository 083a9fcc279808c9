#![deny(missing_docs)]

//! # Temporary Storage
//!
//! Parse-scoped scratch space. Sibling loaders use it to pass order-dependent
//! information (Swagger 2.0 `consumes`/`produces`, stashed body and form
//! parameters) without putting it in the document model.
//!
//! Entries are either global to the parse or scoped to a node location, so
//! two responses never see each other's stashed schema.

use crate::models::{Parameter, RefOr, Schema};
use serde_json::Value;
use std::collections::HashMap;

/// Well-known keys.
pub mod keys {
    /// The `in: body` parameter of the operation or path item being loaded.
    pub const BODY_PARAMETER: &str = "bodyParameter";
    /// The `in: formData` parameters of the operation or path item being loaded.
    pub const FORM_PARAMETERS: &str = "formParameters";
    /// Set by the 2.0 parameter loader when the parameter it just loaded was body or form data.
    pub const PARAMETER_IS_BODY_OR_FORM: &str = "parameterIsBodyOrFormData";
    /// Operation-level `consumes`.
    pub const OPERATION_CONSUMES: &str = "operationconsumes";
    /// Document-level `consumes`.
    pub const GLOBAL_CONSUMES: &str = "globalconsumes";
    /// Operation-level `produces`.
    pub const OPERATION_PRODUCES: &str = "operationproduces";
    /// Document-level `produces`.
    pub const GLOBAL_PRODUCES: &str = "globalproduces";
    /// Document-level `host`.
    pub const HOST: &str = "host";
    /// Document-level `basePath`.
    pub const BASE_PATH: &str = "basePath";
    /// Document-level `schemes`.
    pub const SCHEMES: &str = "schemes";
    /// Scoped: the `schema` of a 2.0 response.
    pub const RESPONSE_SCHEMA: &str = "responseSchema";
    /// Scoped: the `examples` map of a 2.0 response.
    pub const RESPONSE_EXAMPLES: &str = "responseExamples";
}

/// A stored value.
#[derive(Debug, Clone, PartialEq)]
pub enum TempValue {
    /// A single string.
    Text(String),
    /// A list of strings.
    Texts(Vec<String>),
    /// One parameter.
    Parameter(Box<Parameter>),
    /// Several parameters, in declaration order.
    Parameters(Vec<Parameter>),
    /// A schema or schema reference.
    Schema(Box<RefOr<Schema>>),
    /// An untyped value.
    Any(Value),
    /// Presence marker.
    Flag,
}

/// Key/value scratch space owned by one [`crate::ParsingContext`].
#[derive(Debug, Default)]
pub struct TempStorage {
    global: HashMap<String, TempValue>,
    scoped: HashMap<(String, String), TempValue>,
}

impl TempStorage {
    /// Stores a global value, replacing any previous one.
    pub fn set(&mut self, key: &str, value: TempValue) {
        self.global.insert(key.to_string(), value);
    }

    /// Reads a global value.
    pub fn get(&self, key: &str) -> Option<&TempValue> {
        self.global.get(key)
    }

    /// Removes and returns a global value.
    pub fn take(&mut self, key: &str) -> Option<TempValue> {
        self.global.remove(key)
    }

    /// Removes several global keys.
    pub fn clear(&mut self, keys: &[&str]) {
        for key in keys {
            self.global.remove(*key);
        }
    }

    /// True when a global key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.global.contains_key(key)
    }

    /// Stores a value scoped to `scope` (a node location).
    pub fn set_scoped(&mut self, scope: &str, key: &str, value: TempValue) {
        self.scoped
            .insert((scope.to_string(), key.to_string()), value);
    }

    /// Removes and returns a scoped value.
    pub fn take_scoped(&mut self, scope: &str, key: &str) -> Option<TempValue> {
        self.scoped.remove(&(scope.to_string(), key.to_string()))
    }

    /// Reads a global string.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.global.get(key) {
            Some(TempValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Reads a global string list.
    pub fn texts(&self, key: &str) -> Option<&[String]> {
        match self.global.get(key) {
            Some(TempValue::Texts(texts)) => Some(texts),
            _ => None,
        }
    }

    /// Appends a parameter to a parameter list, creating it if needed.
    pub fn push_parameter(&mut self, key: &str, parameter: Parameter) {
        match self.global.get_mut(key) {
            Some(TempValue::Parameters(list)) => list.push(parameter),
            _ => self.set(key, TempValue::Parameters(vec![parameter])),
        }
    }

    /// Removes and returns a stashed parameter.
    pub fn take_parameter(&mut self, key: &str) -> Option<Parameter> {
        match self.take(key) {
            Some(TempValue::Parameter(parameter)) => Some(*parameter),
            _ => None,
        }
    }

    /// Removes and returns a stashed parameter list. Missing lists are empty.
    pub fn take_parameters(&mut self, key: &str) -> Vec<Parameter> {
        match self.take(key) {
            Some(TempValue::Parameters(list)) => list,
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameter(name: &str) -> Parameter {
        Parameter {
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parameter_accumulation() {
        let mut storage = TempStorage::default();
        storage.push_parameter(keys::FORM_PARAMETERS, parameter("a"));
        storage.push_parameter(keys::FORM_PARAMETERS, parameter("b"));
        let names: Vec<_> = storage
            .take_parameters(keys::FORM_PARAMETERS)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(storage.take_parameters(keys::FORM_PARAMETERS).is_empty());
    }

    #[test]
    fn test_scoped_values_are_isolated() {
        let mut storage = TempStorage::default();
        storage.set_scoped("#/a", keys::RESPONSE_SCHEMA, TempValue::Flag);
        assert!(storage.take_scoped("#/b", keys::RESPONSE_SCHEMA).is_none());
        assert_eq!(
            storage.take_scoped("#/a", keys::RESPONSE_SCHEMA),
            Some(TempValue::Flag)
        );
        assert!(!storage.contains(keys::RESPONSE_SCHEMA));
    }

    #[test]
    fn test_clear_and_typed_reads() {
        let mut storage = TempStorage::default();
        storage.set(keys::HOST, TempValue::Text("example.com".into()));
        storage.set(
            keys::OPERATION_CONSUMES,
            TempValue::Texts(vec!["application/xml".into()]),
        );
        assert_eq!(storage.text(keys::HOST), Some("example.com"));
        assert_eq!(storage.texts(keys::HOST), None);
        storage.clear(&[keys::OPERATION_CONSUMES, keys::BODY_PARAMETER]);
        assert!(storage.texts(keys::OPERATION_CONSUMES).is_none());
        assert!(storage.contains(keys::HOST));
    }
}
