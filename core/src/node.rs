#![deny(missing_docs)]

//! # Parse Tree
//!
//! Borrowed views over the generic `serde_json::Value` tree produced from the
//! source text. Loaders never touch `Value` directly; they go through these
//! nodes so shape mismatches and malformed scalars become `ReaderError`s that
//! the field parser can turn into diagnostics.

use crate::context::ParsingContext;
use crate::error::{ReaderError, ReaderResult};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use url::Url;

const DUMMY_BASE: &str = "http://example.invalid/";

/// Any node of the tree.
#[derive(Debug, Clone, Copy)]
pub enum ParseNode<'a> {
    /// An ordered mapping.
    Map(MapNode<'a>),
    /// An ordered sequence.
    List(ListNode<'a>),
    /// A scalar (string, number, boolean or null).
    Value(ValueNode<'a>),
}

/// A mapping node. Entry order follows the source document.
#[derive(Debug, Clone, Copy)]
pub struct MapNode<'a> {
    map: &'a Map<String, Value>,
}

/// A sequence node.
#[derive(Debug, Clone, Copy)]
pub struct ListNode<'a> {
    items: &'a [Value],
}

/// A scalar node.
#[derive(Debug, Clone, Copy)]
pub struct ValueNode<'a> {
    value: &'a Value,
}

impl<'a> ParseNode<'a> {
    /// Wraps a value.
    pub fn new(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self::Map(MapNode { map }),
            Value::Array(items) => Self::List(ListNode { items }),
            other => Self::Value(ValueNode { value: other }),
        }
    }

    /// Returns the map view or a structural error naming `label`.
    pub fn check_map(self, label: &str) -> ReaderResult<MapNode<'a>> {
        match self {
            Self::Map(map) => Ok(map),
            _ => Err(ReaderError::Structure(format!("{label} must be a map/object"))),
        }
    }

    /// Returns the list view or a structural error naming `label`.
    pub fn check_list(self, label: &str) -> ReaderResult<ListNode<'a>> {
        match self {
            Self::List(list) => Ok(list),
            _ => Err(ReaderError::Structure(format!("{label} must be a list/array"))),
        }
    }

    /// Borrowed string content, for string scalars only.
    pub fn as_str(self) -> Option<&'a str> {
        match self {
            Self::Value(ValueNode {
                value: Value::String(s),
            }) => Some(s),
            _ => None,
        }
    }

    /// The scalar rendered as text. Numbers and booleans are stringified; `null` is empty.
    pub fn scalar(self) -> ReaderResult<String> {
        match self {
            Self::Value(node) => Ok(match node.value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            }),
            _ => Err(ReaderError::Structure("Expected a scalar value".into())),
        }
    }

    /// Parses a boolean. Accepts native booleans and `true`/`false` strings in any case.
    pub fn as_bool(self) -> ReaderResult<bool> {
        if let Self::Value(ValueNode {
            value: Value::Bool(b),
        }) = self
        {
            return Ok(*b);
        }
        let text = self.scalar()?;
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(invalid(text, "boolean"))
        }
    }

    /// Parses a non-negative integer.
    pub fn as_u64(self) -> ReaderResult<u64> {
        if let Self::Value(ValueNode {
            value: Value::Number(n),
        }) = self
        {
            if let Some(v) = n.as_u64() {
                return Ok(v);
            }
        }
        let text = self.scalar()?;
        text.trim()
            .parse::<u64>()
            .map_err(|_| invalid(text, "non-negative integer"))
    }

    /// Parses a number.
    pub fn as_f64(self) -> ReaderResult<f64> {
        if let Self::Value(ValueNode {
            value: Value::Number(n),
        }) = self
        {
            if let Some(v) = n.as_f64() {
                return Ok(v);
            }
        }
        let text = self.scalar()?;
        match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(invalid(text, "number")),
        }
    }

    /// Reads an absolute or relative URI reference. The text is kept as written.
    pub fn as_uri(self) -> ReaderResult<String> {
        let text = self.scalar()?;
        match Url::parse(&text) {
            Ok(_) => Ok(text),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = Url::parse(DUMMY_BASE).map_err(|_| invalid(text.clone(), "URI"))?;
                base.join(&text)
                    .map(|_| text.clone())
                    .map_err(|_| invalid(text, "URI"))
            }
            Err(_) => Err(invalid(text, "URI")),
        }
    }

    /// Clones the subtree as an untyped value (examples, defaults, extensions).
    pub fn create_any(self) -> Value {
        match self {
            Self::Map(map) => Value::Object(map.map.clone()),
            Self::List(list) => Value::Array(list.items.to_vec()),
            Self::Value(node) => node.value.clone(),
        }
    }

    /// Loads every item of a list. Items that fail are reported at their index and skipped.
    pub fn create_list<T>(
        self,
        ctx: &mut ParsingContext,
        label: &str,
        mut loader: impl FnMut(ParseNode<'a>, &mut ParsingContext) -> ReaderResult<T>,
    ) -> ReaderResult<Vec<T>> {
        let list = self.check_list(label)?;
        let mut out = Vec::with_capacity(list.len());
        for (index, item) in list.items().enumerate() {
            if let Some(value) = ctx.within(&index.to_string(), |ctx| loader(item, ctx)) {
                out.push(value);
            }
        }
        Ok(out)
    }

    /// Loads a list of scalars as strings.
    pub fn create_simple_list(self, ctx: &mut ParsingContext, label: &str) -> ReaderResult<Vec<String>> {
        self.create_list(ctx, label, |node, _| node.scalar())
    }

    /// Loads every value of a map keyed by entry name. Values that fail are reported and skipped.
    pub fn create_map<T>(
        self,
        ctx: &mut ParsingContext,
        label: &str,
        mut loader: impl FnMut(&'a str, ParseNode<'a>, &mut ParsingContext) -> ReaderResult<T>,
    ) -> ReaderResult<IndexMap<String, T>> {
        let map = self.check_map(label)?;
        let mut out = IndexMap::with_capacity(map.len());
        for (key, value) in map.entries() {
            if let Some(loaded) = ctx.within(key, |ctx| loader(key, value, ctx)) {
                out.insert(key.to_string(), loaded);
            }
        }
        Ok(out)
    }

    /// Loads a map whose values are scalars.
    pub fn create_simple_map(
        self,
        ctx: &mut ParsingContext,
        label: &str,
    ) -> ReaderResult<IndexMap<String, String>> {
        self.create_map(ctx, label, |_, node, _| node.scalar())
    }
}

impl<'a> MapNode<'a> {
    /// Entries in source order.
    pub fn entries(self) -> impl Iterator<Item = (&'a str, ParseNode<'a>)> {
        self.map
            .iter()
            .map(|(key, value)| (key.as_str(), ParseNode::new(value)))
    }

    /// Looks up a single entry.
    pub fn get(self, key: &str) -> Option<ParseNode<'a>> {
        self.map.get(key).map(ParseNode::new)
    }

    /// Number of entries.
    pub fn len(self) -> usize {
        self.map.len()
    }

    /// True when the map has no entries.
    pub fn is_empty(self) -> bool {
        self.map.is_empty()
    }

    /// The `$ref` pointer string, when the map is a reference.
    pub fn reference_pointer(self) -> Option<&'a str> {
        self.map.get("$ref").and_then(Value::as_str)
    }

    /// Reads a sibling scalar string property without dispatching it.
    pub fn scalar_property(self, name: &str) -> Option<String> {
        self.map.get(name).and_then(Value::as_str).map(str::to_string)
    }

    /// The map as an untyped value.
    pub fn to_value(self) -> Value {
        Value::Object(self.map.clone())
    }
}

impl<'a> ListNode<'a> {
    /// Items in source order.
    pub fn items(self) -> impl Iterator<Item = ParseNode<'a>> {
        self.items.iter().map(ParseNode::new)
    }

    /// Number of items.
    pub fn len(self) -> usize {
        self.items.len()
    }

    /// True when the list is empty.
    pub fn is_empty(self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> ValueNode<'a> {
    /// The scalar value.
    pub fn value(self) -> &'a Value {
        self.value
    }
}

fn invalid(value: String, expected: &'static str) -> ReaderError {
    ReaderError::InvalidValue { value, expected }
}
