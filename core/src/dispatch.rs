#![deny(missing_docs)]

//! # Dispatch Tables
//!
//! Every loader describes its object with two tables: exact field names
//! mapped to setters, and an ordered list of name predicates mapped to
//! setters. [`parse_map`] walks a map node through both tables.
//!
//! Tables are built once into `static`s and shared by every read. Setters are
//! plain function pointers, so they cannot capture state; everything a setter
//! needs travels through the target or the [`ParsingContext`].

use crate::context::ParsingContext;
use crate::error::ReaderResult;
use crate::models::Extensible;
use crate::node::{MapNode, ParseNode};
use indexmap::IndexMap;

/// Setter for an exactly named field.
pub type FixedFieldSetter<T> = fn(&mut T, ParseNode<'_>, &mut ParsingContext) -> ReaderResult<()>;

/// Setter for a field matched by predicate. Receives the field name.
pub type PatternFieldSetter<T> =
    fn(&mut T, &str, ParseNode<'_>, &mut ParsingContext) -> ReaderResult<()>;

/// Predicate over a field name.
pub type FieldPredicate = fn(&str) -> bool;

/// Exact field name to setter.
pub struct FixedFieldMap<T> {
    fields: IndexMap<&'static str, FixedFieldSetter<T>>,
}

impl<T> FixedFieldMap<T> {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Adds a field.
    ///
    /// # Panics
    ///
    /// Panics when `name` is already present. Tables are static, so this only
    /// fires on a broken build.
    pub fn field(mut self, name: &'static str, setter: FixedFieldSetter<T>) -> Self {
        if self.fields.insert(name, setter).is_some() {
            panic!("duplicate fixed field '{name}'");
        }
        self
    }

    /// Copies every field of `other` that this table does not define yet.
    pub fn extend_from(mut self, other: &FixedFieldMap<T>) -> Self {
        for (name, setter) in &other.fields {
            self.fields.entry(*name).or_insert(*setter);
        }
        self
    }

    /// Removes a field inherited through [`FixedFieldMap::extend_from`].
    pub fn without(mut self, name: &str) -> Self {
        self.fields.shift_remove(name);
        self
    }

    /// Looks up a setter.
    pub fn get(&self, name: &str) -> Option<FixedFieldSetter<T>> {
        self.fields.get(name).copied()
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }
}

impl<T> Default for FixedFieldMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered predicate/setter pairs. The first matching predicate wins.
pub struct PatternFieldMap<T> {
    patterns: Vec<(FieldPredicate, PatternFieldSetter<T>)>,
}

impl<T> PatternFieldMap<T> {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Appends a pattern after all existing ones.
    pub fn pattern(mut self, predicate: FieldPredicate, setter: PatternFieldSetter<T>) -> Self {
        self.patterns.push((predicate, setter));
        self
    }

    /// The setter of the first pattern accepting `name`.
    pub fn find(&self, name: &str) -> Option<PatternFieldSetter<T>> {
        self.patterns
            .iter()
            .find(|(predicate, _)| predicate(name))
            .map(|(_, setter)| *setter)
    }
}

impl<T> Default for PatternFieldMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Vendor extension names (`x-...`).
pub fn is_extension(name: &str) -> bool {
    name.starts_with("x-")
}

/// Anything but a vendor extension.
pub fn not_extension(name: &str) -> bool {
    !is_extension(name)
}

/// Path templates (`/...`).
pub fn is_path(name: &str) -> bool {
    name.starts_with('/')
}

/// Accepts every name.
pub fn any_name(_name: &str) -> bool {
    true
}

/// Stores an `x-` field in the target's extension map.
pub fn set_extension<T: Extensible>(
    target: &mut T,
    name: &str,
    node: ParseNode<'_>,
    _ctx: &mut ParsingContext,
) -> ReaderResult<()> {
    target
        .extensions_mut()
        .insert(name.to_string(), node.create_any());
    Ok(())
}

/// Applies one field to `target`: fixed table first, then patterns, else a diagnostic.
pub fn parse_field<T>(
    name: &str,
    node: ParseNode<'_>,
    target: &mut T,
    fixed: &FixedFieldMap<T>,
    patterns: &PatternFieldMap<T>,
    ctx: &mut ParsingContext,
) {
    if let Some(setter) = fixed.get(name) {
        ctx.within(name, |ctx| setter(target, node, ctx));
    } else if let Some(setter) = patterns.find(name) {
        ctx.within(name, |ctx| setter(target, name, node, ctx));
    } else {
        let location = ctx.location();
        let message = format!("{name} is not a valid property at {location}");
        ctx.report_at(location, message);
    }
}

/// Applies every entry of `map` to `target`, in source order.
pub fn parse_map<T>(
    map: MapNode<'_>,
    target: &mut T,
    fixed: &FixedFieldMap<T>,
    patterns: &PatternFieldMap<T>,
    ctx: &mut ParsingContext,
) {
    for (name, node) in map.entries() {
        parse_field(name, node, target, fixed, patterns, ctx);
    }
}
