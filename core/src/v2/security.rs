//! Swagger 2.0 Security Scheme loader.
//!
//! 2.0 describes a single OAuth2 flow with flat `flow`, `authorizationUrl`,
//! `tokenUrl` and `scopes` fields. They are collected on a per-call builder
//! and folded into the matching 3.x flow once every field has been seen.

use crate::context::ParsingContext;
use crate::dispatch::{is_extension, parse_map, set_extension, FixedFieldMap, PatternFieldMap};
use crate::error::{ReaderError, ReaderResult};
use crate::models::{
    Extensible, Extensions, OAuthFlow, OAuthFlows, ParameterLocation, RefOr, ReferenceKind,
    SecurityScheme, SecuritySchemeType,
};
use crate::node::ParseNode;
use once_cell::sync::Lazy;

#[derive(Debug, Default)]
struct SecuritySchemeBuilder {
    scheme: SecurityScheme,
    flow: Option<String>,
    flow_value: OAuthFlow,
}

impl Extensible for SecuritySchemeBuilder {
    fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.scheme.extensions
    }
}

impl SecuritySchemeBuilder {
    fn finish(mut self) -> ReaderResult<SecurityScheme> {
        if self.scheme.scheme_type != Some(SecuritySchemeType::OAuth2) {
            return Ok(self.scheme);
        }
        let mut flows = OAuthFlows::default();
        let flow = Some(self.flow_value);
        match self.flow.as_deref() {
            Some("implicit") => flows.implicit = flow,
            Some("password") => flows.password = flow,
            Some("application") => flows.client_credentials = flow,
            Some("accessCode") => flows.authorization_code = flow,
            Some(other) => {
                return Err(ReaderError::InvalidValue {
                    value: other.to_string(),
                    expected: "OAuth2 flow",
                })
            }
            None => {}
        }
        self.scheme.flows = Some(flows);
        Ok(self.scheme)
    }
}

static SECURITY_SCHEME_FIXED: Lazy<FixedFieldMap<SecuritySchemeBuilder>> = Lazy::new(|| {
    FixedFieldMap::<SecuritySchemeBuilder>::new()
        .field("type", |o, n, _| {
            match n.scalar()?.as_str() {
                "basic" => {
                    o.scheme.scheme_type = Some(SecuritySchemeType::Http);
                    o.scheme.scheme = Some("basic".into());
                }
                "apiKey" => o.scheme.scheme_type = Some(SecuritySchemeType::ApiKey),
                "oauth2" => o.scheme.scheme_type = Some(SecuritySchemeType::OAuth2),
                _ => {}
            }
            Ok(())
        })
        .field("description", |o, n, _| {
            o.scheme.description = Some(n.scalar()?);
            Ok(())
        })
        .field("name", |o, n, _| {
            o.scheme.name = Some(n.scalar()?);
            Ok(())
        })
        .field("in", |o, n, _| {
            o.scheme.location = ParameterLocation::from_name(&n.scalar()?);
            Ok(())
        })
        .field("flow", |o, n, _| {
            o.flow = Some(n.scalar()?);
            Ok(())
        })
        .field("authorizationUrl", |o, n, _| {
            o.flow_value.authorization_url = Some(n.as_uri()?);
            Ok(())
        })
        .field("tokenUrl", |o, n, _| {
            o.flow_value.token_url = Some(n.as_uri()?);
            Ok(())
        })
        .field("scopes", |o, n, ctx| {
            o.flow_value.scopes = n.create_simple_map(ctx, "scopes")?;
            Ok(())
        })
});

static SECURITY_SCHEME_PATTERNS: Lazy<PatternFieldMap<SecuritySchemeBuilder>> = Lazy::new(|| {
    PatternFieldMap::<SecuritySchemeBuilder>::new()
        .pattern(is_extension, set_extension::<SecuritySchemeBuilder>)
});

pub(crate) fn load_security_scheme(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<RefOr<SecurityScheme>> {
    let map = node.check_map("securityScheme")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::SecurityScheme)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut builder = SecuritySchemeBuilder::default();
    parse_map(map, &mut builder, &SECURITY_SCHEME_FIXED, &SECURITY_SCHEME_PATTERNS, ctx);
    builder.finish().map(RefOr::Item)
}
