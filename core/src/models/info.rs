#![deny(missing_docs)]

//! # Metadata Objects
//!
//! Info, Contact, License, Server, Tag and External Documentation.

use super::Extensions;
use indexmap::IndexMap;

/// Info Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    /// API title.
    pub title: String,
    /// Short summary (3.1).
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Terms of service URL.
    pub terms_of_service: Option<String>,
    /// Contact information.
    pub contact: Option<Contact>,
    /// License information.
    pub license: Option<License>,
    /// API version string.
    pub version: String,
    /// Vendor extensions.
    pub extensions: Extensions,
}

/// Contact Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contact {
    /// Contact name.
    pub name: Option<String>,
    /// Contact URL.
    pub url: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

/// License Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct License {
    /// License name.
    pub name: String,
    /// SPDX identifier (3.1).
    pub identifier: Option<String>,
    /// License URL.
    pub url: Option<String>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

/// External Documentation Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalDocs {
    /// Description.
    pub description: Option<String>,
    /// Target URL.
    pub url: String,
    /// Vendor extensions.
    pub extensions: Extensions,
}

/// Tag Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Additional documentation.
    pub external_docs: Option<ExternalDocs>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl Tag {
    /// A tag carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Server Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Server {
    /// URL template, possibly relative.
    pub url: String,
    /// Description.
    pub description: Option<String>,
    /// Template variables.
    pub variables: IndexMap<String, ServerVariable>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl Server {
    /// A server with only a URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// The URL with every `{variable}` replaced by its default.
    pub fn resolved_url(&self) -> String {
        self.variables
            .iter()
            .fold(self.url.clone(), |url, (name, variable)| {
                url.replace(&format!("{{{name}}}"), &variable.default)
            })
    }
}

/// Server Variable Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerVariable {
    /// Allowed values.
    pub enum_values: Vec<String>,
    /// Default value.
    pub default: String,
    /// Description.
    pub description: Option<String>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_url() {
        let mut server = Server::with_url("https://{env}.example.com:{port}/v1");
        server.variables.insert(
            "env".into(),
            ServerVariable {
                default: "staging".into(),
                ..Default::default()
            },
        );
        server.variables.insert(
            "port".into(),
            ServerVariable {
                default: "8443".into(),
                ..Default::default()
            },
        );
        assert_eq!(server.resolved_url(), "https://staging.example.com:8443/v1");
    }
}
