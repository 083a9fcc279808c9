#![deny(missing_docs)]

//! # Reference Resolution
//!
//! References are kept lazy in the model. A consumer resolves one on access
//! through a [`DocumentSource`]: a single document for local references, or a
//! [`Workspace`] holding every document and fragment a read has seen.
//!
//! Resolution follows chains (a component that is itself a reference) and
//! stops with [`ReaderError::CircularReference`] when a chain revisits a
//! target. Recursive schemas stay legal because nothing is expanded eagerly.

pub mod pointer;
pub mod walk;
pub mod workspace;

pub use walk::{check_references, collect_references};
pub use workspace::Workspace;

use crate::element::Element;
use crate::error::{ReaderError, ReaderResult};
use crate::models::{
    Callback, Example, Header, Link, OpenApiDocument, Parameter, PathItem, RefOr, Reference,
    ReferenceKind, RequestBody, Response, Schema, SecurityScheme, Tag,
};
use std::borrow::Cow;
use std::collections::HashSet;
use tracing::{trace, warn};

/// What a lookup found: the value, or another reference to follow.
#[derive(Debug)]
pub enum Target<'a, T> {
    /// The value itself.
    Item(&'a T),
    /// Another hop.
    Reference(&'a Reference),
}

impl<T> RefOr<T> {
    /// Borrowed view used while following chains.
    pub fn as_target(&self) -> Target<'_, T> {
        match self {
            Self::Item(item) => Target::Item(item),
            Self::Reference(reference) => Target::Reference(reference),
        }
    }
}

/// Where references are resolved.
pub trait DocumentSource {
    /// The document at `location`; `None` asks for the document without a known location.
    fn document(&self, location: Option<&str>) -> Option<&OpenApiDocument>;

    /// A standalone fragment keyed by `location` or `location#fragment`.
    fn fragment(&self, key: &str) -> Option<&Element>;
}

impl DocumentSource for OpenApiDocument {
    fn document(&self, location: Option<&str>) -> Option<&OpenApiDocument> {
        match location {
            None => Some(self),
            Some(location) if self.location.as_deref() == Some(location) => Some(self),
            Some(_) => None,
        }
    }

    fn fragment(&self, _key: &str) -> Option<&Element> {
        None
    }
}

/// A model type a reference can point at.
pub trait Resolvable: Clone {
    /// Kind of references that target this type.
    const KIND: ReferenceKind;

    /// Finds the component named `id` in `document`.
    fn lookup<'a>(document: &'a OpenApiDocument, id: &str) -> Option<Target<'a, Self>>;

    /// Extracts this type from a standalone fragment.
    fn from_fragment(element: &Element) -> Option<Target<'_, Self>>;

    /// Value to use when the target cannot be found. Most kinds have none.
    fn stand_in(_reference: &Reference) -> Option<Self> {
        None
    }
}

macro_rules! resolvable_component {
    ($($ty:ty => $kind:ident, $field:ident);* $(;)?) => {
        $(
            impl Resolvable for $ty {
                const KIND: ReferenceKind = ReferenceKind::$kind;

                fn lookup<'a>(document: &'a OpenApiDocument, id: &str) -> Option<Target<'a, Self>> {
                    document
                        .components
                        .as_ref()?
                        .$field
                        .get(id)
                        .map(RefOr::as_target)
                }

                fn from_fragment(element: &Element) -> Option<Target<'_, Self>> {
                    match element {
                        Element::$kind(value) => Some(value.as_target()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

resolvable_component! {
    Schema => Schema, schemas;
    Response => Response, responses;
    Parameter => Parameter, parameters;
    Example => Example, examples;
    RequestBody => RequestBody, request_bodies;
    Header => Header, headers;
    SecurityScheme => SecurityScheme, security_schemes;
    Link => Link, links;
    Callback => Callback, callbacks;
    PathItem => PathItem, path_items;
}

impl Resolvable for Tag {
    const KIND: ReferenceKind = ReferenceKind::Tag;

    fn lookup<'a>(document: &'a OpenApiDocument, id: &str) -> Option<Target<'a, Self>> {
        document.tag(id).map(Target::Item)
    }

    fn from_fragment(element: &Element) -> Option<Target<'_, Self>> {
        match element {
            Element::Tag(tag) => Some(Target::Item(tag)),
            _ => None,
        }
    }

    fn stand_in(reference: &Reference) -> Option<Self> {
        reference.id.as_deref().map(Tag::named)
    }
}

/// Resolves `reference` to a `T`, following chains.
pub fn resolve_reference<'a, T, S>(
    reference: &'a Reference,
    source: &'a S,
) -> ReaderResult<Cow<'a, T>>
where
    T: Resolvable,
    S: DocumentSource + ?Sized,
{
    let mut visited = HashSet::new();
    let mut current = reference;
    loop {
        if current.kind != T::KIND {
            return Err(ReaderError::ReferenceKindMismatch {
                expected: T::KIND,
                found: current.kind,
            });
        }
        let location = current.target_location();
        if !visited.insert((location.clone(), current.id.clone())) {
            warn!(reference = %reference, "circular reference chain");
            return Err(ReaderError::CircularReference(reference.to_string()));
        }
        trace!(reference = %current, location = ?location, "resolving reference");
        match locate::<T, S>(current, location.as_deref(), source) {
            Some(Target::Item(item)) => return Ok(Cow::Borrowed(item)),
            Some(Target::Reference(next)) => current = next,
            None => {
                return T::stand_in(current)
                    .map(Cow::Owned)
                    .ok_or_else(|| ReaderError::UnresolvedReference(current.to_string()));
            }
        }
    }
}

fn locate<'a, T, S>(
    reference: &Reference,
    location: Option<&str>,
    source: &'a S,
) -> Option<Target<'a, T>>
where
    T: Resolvable,
    S: DocumentSource + ?Sized,
{
    match (&reference.id, reference.raw_fragment) {
        (Some(id), false) => T::lookup(source.document(location)?, id),
        (Some(fragment), true) => {
            let key = format!("{}#{}", location.unwrap_or_default(), fragment);
            T::from_fragment(source.fragment(&key)?)
        }
        (None, _) => T::from_fragment(source.fragment(location?)?),
    }
}

impl Reference {
    /// Resolves this reference as a `T`.
    pub fn resolve<'a, T, S>(&'a self, source: &'a S) -> ReaderResult<Cow<'a, T>>
    where
        T: Resolvable,
        S: DocumentSource + ?Sized,
    {
        resolve_reference(self, source)
    }
}

impl<T: Resolvable> RefOr<T> {
    /// The inline value, or the value the reference points at.
    pub fn resolve<'a, S>(&'a self, source: &'a S) -> ReaderResult<Cow<'a, T>>
    where
        S: DocumentSource + ?Sized,
    {
        match self {
            Self::Item(item) => Ok(Cow::Borrowed(item)),
            Self::Reference(reference) => resolve_reference(reference, source),
        }
    }
}
