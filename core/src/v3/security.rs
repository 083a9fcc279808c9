//! Security Scheme, OAuth Flows and Security Requirement loaders.

use crate::context::ParsingContext;
use crate::dispatch::{is_extension, parse_map, set_extension, FixedFieldMap, PatternFieldMap};
use crate::error::ReaderResult;
use crate::models::{
    OAuthFlow, OAuthFlows, ParameterLocation, RefOr, ReferenceKind, SecurityRequirement,
    SecurityScheme, SecuritySchemeType,
};
use crate::node::ParseNode;
use once_cell::sync::Lazy;

static SECURITY_SCHEME_FIXED: Lazy<FixedFieldMap<SecurityScheme>> = Lazy::new(|| {
    FixedFieldMap::<SecurityScheme>::new()
        .field("type", |o, n, _| {
            o.scheme_type = SecuritySchemeType::from_name(&n.scalar()?);
            Ok(())
        })
        .field("description", |o, n, _| {
            o.description = Some(n.scalar()?);
            Ok(())
        })
        .field("name", |o, n, _| {
            o.name = Some(n.scalar()?);
            Ok(())
        })
        .field("in", |o, n, _| {
            o.location = ParameterLocation::from_name(&n.scalar()?);
            Ok(())
        })
        .field("scheme", |o, n, _| {
            o.scheme = Some(n.scalar()?);
            Ok(())
        })
        .field("bearerFormat", |o, n, _| {
            o.bearer_format = Some(n.scalar()?);
            Ok(())
        })
        .field("flows", |o, n, ctx| {
            o.flows = Some(ctx.load(n)?);
            Ok(())
        })
        .field("openIdConnectUrl", |o, n, _| {
            o.open_id_connect_url = Some(n.as_uri()?);
            Ok(())
        })
});

static SECURITY_SCHEME_PATTERNS: Lazy<PatternFieldMap<SecurityScheme>> = Lazy::new(|| {
    PatternFieldMap::<SecurityScheme>::new().pattern(is_extension, set_extension::<SecurityScheme>)
});

static OAUTH_FLOWS_FIXED: Lazy<FixedFieldMap<OAuthFlows>> = Lazy::new(|| {
    FixedFieldMap::<OAuthFlows>::new()
        .field("implicit", |o, n, ctx| {
            o.implicit = Some(ctx.load(n)?);
            Ok(())
        })
        .field("password", |o, n, ctx| {
            o.password = Some(ctx.load(n)?);
            Ok(())
        })
        .field("clientCredentials", |o, n, ctx| {
            o.client_credentials = Some(ctx.load(n)?);
            Ok(())
        })
        .field("authorizationCode", |o, n, ctx| {
            o.authorization_code = Some(ctx.load(n)?);
            Ok(())
        })
});

static OAUTH_FLOWS_PATTERNS: Lazy<PatternFieldMap<OAuthFlows>> = Lazy::new(|| {
    PatternFieldMap::<OAuthFlows>::new().pattern(is_extension, set_extension::<OAuthFlows>)
});

static OAUTH_FLOW_FIXED: Lazy<FixedFieldMap<OAuthFlow>> = Lazy::new(|| {
    FixedFieldMap::<OAuthFlow>::new()
        .field("authorizationUrl", |o, n, _| {
            o.authorization_url = Some(n.as_uri()?);
            Ok(())
        })
        .field("tokenUrl", |o, n, _| {
            o.token_url = Some(n.as_uri()?);
            Ok(())
        })
        .field("refreshUrl", |o, n, _| {
            o.refresh_url = Some(n.as_uri()?);
            Ok(())
        })
        .field("scopes", |o, n, ctx| {
            o.scopes = n.create_simple_map(ctx, "scopes")?;
            Ok(())
        })
});

static OAUTH_FLOW_PATTERNS: Lazy<PatternFieldMap<OAuthFlow>> = Lazy::new(|| {
    PatternFieldMap::<OAuthFlow>::new().pattern(is_extension, set_extension::<OAuthFlow>)
});

pub(crate) fn load_security_scheme(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<RefOr<SecurityScheme>> {
    let map = node.check_map("securityScheme")?;
    if let Some(reference) = ctx.reference_in(map, ReferenceKind::SecurityScheme)? {
        return Ok(RefOr::Reference(reference));
    }
    let mut scheme = SecurityScheme::default();
    parse_map(map, &mut scheme, &SECURITY_SCHEME_FIXED, &SECURITY_SCHEME_PATTERNS, ctx);
    Ok(RefOr::Item(scheme))
}

pub(crate) fn load_oauth_flows(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<OAuthFlows> {
    let map = node.check_map("OAuthFlows")?;
    let mut flows = OAuthFlows::default();
    parse_map(map, &mut flows, &OAUTH_FLOWS_FIXED, &OAUTH_FLOWS_PATTERNS, ctx);
    Ok(flows)
}

pub(crate) fn load_oauth_flow(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<OAuthFlow> {
    let map = node.check_map("OAuthFlow")?;
    let mut flow = OAuthFlow::default();
    parse_map(map, &mut flow, &OAUTH_FLOW_FIXED, &OAUTH_FLOW_PATTERNS, ctx);
    Ok(flow)
}

/// Scheme names map to scope lists. The names stay lazy references into the security schemes.
pub(crate) fn load_security_requirement(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<SecurityRequirement> {
    let schemes = node.create_map(ctx, "security", |_, scopes, ctx| {
        scopes.create_simple_list(ctx, "scopes")
    })?;
    Ok(SecurityRequirement { schemes })
}
