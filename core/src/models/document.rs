#![deny(missing_docs)]

//! # Document Root

use super::{
    Components, Extensions, ExternalDocs, Info, PathItem, Paths, RefOr, SecurityRequirement,
    Server, Tag,
};
use indexmap::IndexMap;

/// The assembled document, whatever version it was read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenApiDocument {
    /// Info Object.
    pub info: Info,
    /// Servers. For 2.0 sources these are synthesized from `host`, `basePath` and `schemes`.
    pub servers: Vec<Server>,
    /// Paths.
    pub paths: Paths,
    /// Webhooks (3.1).
    pub webhooks: IndexMap<String, RefOr<PathItem>>,
    /// Components, when any were declared.
    pub components: Option<Components>,
    /// Document-wide security requirements.
    pub security: Vec<SecurityRequirement>,
    /// Tags.
    pub tags: Vec<Tag>,
    /// Additional documentation.
    pub external_docs: Option<ExternalDocs>,
    /// `jsonSchemaDialect` (3.1).
    pub json_schema_dialect: Option<String>,
    /// Vendor extensions.
    pub extensions: Extensions,
    /// Location the document was read from.
    pub location: Option<String>,
}

impl OpenApiDocument {
    /// Components, created empty on first use.
    pub fn components_mut(&mut self) -> &mut Components {
        self.components.get_or_insert_with(Components::default)
    }

    /// Looks up a declared tag by name.
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.name == name)
    }
}
