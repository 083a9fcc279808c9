#![deny(missing_docs)]

//! # Reader Settings
//!
//! Host-supplied configuration for a read. Settings derive `serde` so a host
//! can keep them next to its own configuration in YAML or JSON.

use crate::error::{ReaderError, ReaderResult};
use serde::{Deserialize, Serialize};
use url::Url;

/// How references are checked once a document has been assembled.
///
/// References are always kept lazy in the model; this only controls which
/// of them are resolved once after loading so broken ones show up as diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceResolution {
    /// Leave every reference unchecked.
    DoNotResolve,
    /// Check references into the document itself.
    #[default]
    ResolveLocal,
    /// Also check external references against the workspace the document is read into.
    ResolveAll,
}

/// Options for [`crate::OpenApiReader`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReaderSettings {
    /// Location the document was retrieved from. Used to fill in missing Swagger 2.0
    /// `host` / `basePath` / `schemes`, and as the base for relative external references.
    pub base_url: Option<String>,
    /// Post-load reference checking.
    pub reference_resolution: ReferenceResolution,
    /// Swagger 2.0 response media types used when no `produces` is declared.
    pub default_content_type: Vec<String>,
    /// Maximum depth of the tree walk before a subtree is rejected.
    pub max_nesting_depth: usize,
    /// Record a warning when a Swagger 2.0 operation declares several body parameters.
    pub report_multiple_body_parameters: bool,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            reference_resolution: ReferenceResolution::default(),
            default_content_type: Vec::new(),
            max_nesting_depth: 256,
            report_multiple_body_parameters: true,
        }
    }
}

impl ReaderSettings {
    /// Loads settings from a YAML (or JSON) string. Missing keys keep their defaults.
    pub fn from_yaml(text: &str) -> ReaderResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the reference resolution mode.
    pub fn with_reference_resolution(mut self, mode: ReferenceResolution) -> Self {
        self.reference_resolution = mode;
        self
    }

    /// Parses [`ReaderSettings::base_url`] as an absolute URL.
    pub fn parsed_base_url(&self) -> ReaderResult<Option<Url>> {
        match &self.base_url {
            None => Ok(None),
            Some(raw) => Url::parse(raw)
                .map(Some)
                .map_err(|_| ReaderError::InvalidValue {
                    value: raw.clone(),
                    expected: "absolute base URL",
                }),
        }
    }
}
