#![deny(missing_docs)]

//! # Security Schemes and Requirements

use super::{Extensions, ParameterLocation, Reference, ReferenceKind};
use indexmap::IndexMap;

/// Security scheme types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum SecuritySchemeType {
    ApiKey,
    Http,
    OAuth2,
    OpenIdConnect,
    MutualTls,
}

impl SecuritySchemeType {
    /// Display-name lookup. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "apiKey" => Some(Self::ApiKey),
            "http" => Some(Self::Http),
            "oauth2" => Some(Self::OAuth2),
            "openIdConnect" => Some(Self::OpenIdConnect),
            "mutualTLS" => Some(Self::MutualTls),
            _ => None,
        }
    }
}

/// Security Scheme Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityScheme {
    /// Scheme type.
    pub scheme_type: Option<SecuritySchemeType>,
    /// Description.
    pub description: Option<String>,
    /// API key parameter name.
    pub name: Option<String>,
    /// API key location.
    pub location: Option<ParameterLocation>,
    /// HTTP authorization scheme (`basic`, `bearer`, ...).
    pub scheme: Option<String>,
    /// Bearer token format hint.
    pub bearer_format: Option<String>,
    /// OAuth2 flows.
    pub flows: Option<OAuthFlows>,
    /// OpenID Connect discovery URL.
    pub open_id_connect_url: Option<String>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

/// OAuth Flows Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OAuthFlows {
    /// Implicit flow.
    pub implicit: Option<OAuthFlow>,
    /// Resource owner password flow.
    pub password: Option<OAuthFlow>,
    /// Client credentials flow.
    pub client_credentials: Option<OAuthFlow>,
    /// Authorization code flow.
    pub authorization_code: Option<OAuthFlow>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

/// OAuth Flow Object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OAuthFlow {
    /// Authorization URL.
    pub authorization_url: Option<String>,
    /// Token URL.
    pub token_url: Option<String>,
    /// Refresh URL.
    pub refresh_url: Option<String>,
    /// Scope names to descriptions.
    pub scopes: IndexMap<String, String>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

/// Security Requirement Object: scheme names to required scopes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityRequirement {
    /// Required scopes keyed by scheme name.
    pub schemes: IndexMap<String, Vec<String>>,
}

impl SecurityRequirement {
    /// References to the schemes this requirement names, hosted in `host`.
    pub fn references(&self, host: Option<&str>) -> Vec<Reference> {
        self.schemes
            .keys()
            .map(|name| {
                Reference::local(ReferenceKind::SecurityScheme, name.clone())
                    .with_host(host.map(str::to_string))
            })
            .collect()
    }
}
