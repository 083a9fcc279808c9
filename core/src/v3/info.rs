//! Info, Contact, License, Server, Tag and External Documentation loaders.

use crate::context::ParsingContext;
use crate::dispatch::{
    is_extension, parse_map, set_extension, FixedFieldMap, PatternFieldMap,
};
use crate::error::ReaderResult;
use crate::models::{Contact, ExternalDocs, Info, License, Server, ServerVariable, Tag};
use crate::node::ParseNode;
use once_cell::sync::Lazy;

pub(crate) static INFO_FIXED: Lazy<FixedFieldMap<Info>> = Lazy::new(|| {
    FixedFieldMap::<Info>::new()
        .field("title", |o, n, _| {
            o.title = n.scalar()?;
            Ok(())
        })
        .field("version", |o, n, _| {
            o.version = n.scalar()?;
            Ok(())
        })
        .field("description", |o, n, _| {
            o.description = Some(n.scalar()?);
            Ok(())
        })
        .field("termsOfService", |o, n, _| {
            o.terms_of_service = Some(n.as_uri()?);
            Ok(())
        })
        .field("contact", |o, n, ctx| {
            o.contact = Some(ctx.load(n)?);
            Ok(())
        })
        .field("license", |o, n, ctx| {
            o.license = Some(ctx.load(n)?);
            Ok(())
        })
});

pub(crate) static INFO_PATTERNS: Lazy<PatternFieldMap<Info>> =
    Lazy::new(|| PatternFieldMap::<Info>::new().pattern(is_extension, set_extension::<Info>));

static CONTACT_FIXED: Lazy<FixedFieldMap<Contact>> = Lazy::new(|| {
    FixedFieldMap::<Contact>::new()
        .field("name", |o, n, _| {
            o.name = Some(n.scalar()?);
            Ok(())
        })
        .field("url", |o, n, _| {
            o.url = Some(n.as_uri()?);
            Ok(())
        })
        .field("email", |o, n, _| {
            o.email = Some(n.scalar()?);
            Ok(())
        })
});

static CONTACT_PATTERNS: Lazy<PatternFieldMap<Contact>> = Lazy::new(|| {
    PatternFieldMap::<Contact>::new().pattern(is_extension, set_extension::<Contact>)
});

pub(crate) static LICENSE_FIXED: Lazy<FixedFieldMap<License>> = Lazy::new(|| {
    FixedFieldMap::<License>::new()
        .field("name", |o, n, _| {
            o.name = n.scalar()?;
            Ok(())
        })
        .field("url", |o, n, _| {
            o.url = Some(n.as_uri()?);
            Ok(())
        })
});

pub(crate) static LICENSE_PATTERNS: Lazy<PatternFieldMap<License>> = Lazy::new(|| {
    PatternFieldMap::<License>::new().pattern(is_extension, set_extension::<License>)
});

static SERVER_FIXED: Lazy<FixedFieldMap<Server>> = Lazy::new(|| {
    FixedFieldMap::<Server>::new()
        .field("url", |o, n, _| {
            o.url = n.scalar()?;
            Ok(())
        })
        .field("description", |o, n, _| {
            o.description = Some(n.scalar()?);
            Ok(())
        })
        .field("variables", |o, n, ctx| {
            o.variables = ctx.load_map(n, "variables")?;
            Ok(())
        })
});

static SERVER_PATTERNS: Lazy<PatternFieldMap<Server>> =
    Lazy::new(|| PatternFieldMap::<Server>::new().pattern(is_extension, set_extension::<Server>));

static SERVER_VARIABLE_FIXED: Lazy<FixedFieldMap<ServerVariable>> = Lazy::new(|| {
    FixedFieldMap::<ServerVariable>::new()
        .field("enum", |o, n, ctx| {
            o.enum_values = n.create_simple_list(ctx, "enum")?;
            Ok(())
        })
        .field("default", |o, n, _| {
            o.default = n.scalar()?;
            Ok(())
        })
        .field("description", |o, n, _| {
            o.description = Some(n.scalar()?);
            Ok(())
        })
});

static SERVER_VARIABLE_PATTERNS: Lazy<PatternFieldMap<ServerVariable>> = Lazy::new(|| {
    PatternFieldMap::<ServerVariable>::new().pattern(is_extension, set_extension::<ServerVariable>)
});

static EXTERNAL_DOCS_FIXED: Lazy<FixedFieldMap<ExternalDocs>> = Lazy::new(|| {
    FixedFieldMap::<ExternalDocs>::new()
        .field("description", |o, n, _| {
            o.description = Some(n.scalar()?);
            Ok(())
        })
        .field("url", |o, n, _| {
            o.url = n.as_uri()?;
            Ok(())
        })
});

static EXTERNAL_DOCS_PATTERNS: Lazy<PatternFieldMap<ExternalDocs>> = Lazy::new(|| {
    PatternFieldMap::<ExternalDocs>::new().pattern(is_extension, set_extension::<ExternalDocs>)
});

static TAG_FIXED: Lazy<FixedFieldMap<Tag>> = Lazy::new(|| {
    FixedFieldMap::<Tag>::new()
        .field("name", |o, n, _| {
            o.name = n.scalar()?;
            Ok(())
        })
        .field("description", |o, n, _| {
            o.description = Some(n.scalar()?);
            Ok(())
        })
        .field("externalDocs", |o, n, ctx| {
            o.external_docs = Some(ctx.load(n)?);
            Ok(())
        })
});

static TAG_PATTERNS: Lazy<PatternFieldMap<Tag>> =
    Lazy::new(|| PatternFieldMap::<Tag>::new().pattern(is_extension, set_extension::<Tag>));

pub(crate) fn load_info(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<Info> {
    let map = node.check_map("Info")?;
    let mut info = Info::default();
    parse_map(map, &mut info, &INFO_FIXED, &INFO_PATTERNS, ctx);
    Ok(info)
}

pub(crate) fn load_contact(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<Contact> {
    let map = node.check_map("Contact")?;
    let mut contact = Contact::default();
    parse_map(map, &mut contact, &CONTACT_FIXED, &CONTACT_PATTERNS, ctx);
    Ok(contact)
}

pub(crate) fn load_license(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<License> {
    let map = node.check_map("License")?;
    let mut license = License::default();
    parse_map(map, &mut license, &LICENSE_FIXED, &LICENSE_PATTERNS, ctx);
    Ok(license)
}

pub(crate) fn load_server(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<Server> {
    let map = node.check_map("server")?;
    let mut server = Server::default();
    parse_map(map, &mut server, &SERVER_FIXED, &SERVER_PATTERNS, ctx);
    Ok(server)
}

pub(crate) fn load_server_variable(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<ServerVariable> {
    let map = node.check_map("serverVariable")?;
    let mut variable = ServerVariable::default();
    parse_map(map, &mut variable, &SERVER_VARIABLE_FIXED, &SERVER_VARIABLE_PATTERNS, ctx);
    Ok(variable)
}

pub(crate) fn load_external_docs(
    node: ParseNode<'_>,
    ctx: &mut ParsingContext,
) -> ReaderResult<ExternalDocs> {
    let map = node.check_map("externalDocs")?;
    let mut docs = ExternalDocs::default();
    parse_map(map, &mut docs, &EXTERNAL_DOCS_FIXED, &EXTERNAL_DOCS_PATTERNS, ctx);
    Ok(docs)
}

pub(crate) fn load_tag(node: ParseNode<'_>, ctx: &mut ParsingContext) -> ReaderResult<Tag> {
    let map = node.check_map("tag")?;
    let mut tag = Tag::default();
    parse_map(map, &mut tag, &TAG_FIXED, &TAG_PATTERNS, ctx);
    Ok(tag)
}
