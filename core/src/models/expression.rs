#![deny(missing_docs)]

//! # Runtime Expressions
//!
//! Expressions used by Callback keys and Link parameters, e.g.
//! `$request.body#/url` or the template `{$request.query.cb}/events`.

use crate::error::{ReaderError, ReaderResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static EXPRESSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\$(url|method|statusCode|(request|response)\.(header\.[!#$%&'*+\-.^_`|~0-9A-Za-z]+|query\.\S+|path\.\S+|body(#\S*)?))$",
    )
    .expect("Invalid regex")
});

static EMBEDDED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([^{}]*)\}").expect("Invalid regex")
});

/// A runtime expression, or a template string with embedded `{$...}` expressions.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuntimeExpression(String);

impl RuntimeExpression {
    /// Wraps a string without validating it.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Validates and wraps a string.
    ///
    /// A string starting with `$` must be a single expression. Anything else is a
    /// template whose `{$...}` parts must each be valid expressions.
    pub fn parse(s: &str) -> ReaderResult<Self> {
        if s.starts_with('$') {
            if !EXPRESSION.is_match(s) {
                return Err(invalid(s));
            }
        } else {
            for caps in EMBEDDED.captures_iter(s) {
                let inner = &caps[1];
                if inner.starts_with('$') && !EXPRESSION.is_match(inner) {
                    return Err(invalid(s));
                }
            }
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the raw expression string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for a bare expression (starts with `$`), false for templates.
    pub fn is_expression(&self) -> bool {
        self.0.starts_with('$')
    }

    /// The expressions embedded in a template, or the expression itself.
    pub fn parts(&self) -> Vec<&str> {
        if self.is_expression() {
            return vec![self.as_str()];
        }
        EMBEDDED
            .captures_iter(&self.0)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|inner| inner.starts_with('$'))
            .collect()
    }
}

fn invalid(s: &str) -> ReaderError {
    ReaderError::InvalidValue {
        value: s.to_string(),
        expected: "runtime expression",
    }
}

impl fmt::Debug for RuntimeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuntimeExpression({:?})", self.0)
    }
}

impl fmt::Display for RuntimeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_expressions() {
        for ok in [
            "$url",
            "$method",
            "$statusCode",
            "$request.header.X-Request-Id",
            "$request.query.limit",
            "$request.path.id",
            "$request.body",
            "$response.body#/data/0/id",
        ] {
            assert!(RuntimeExpression::parse(ok).is_ok(), "{ok}");
        }
        for bad in ["$", "$foo", "$request", "$request.cookie.a", "$response.header."] {
            assert!(RuntimeExpression::parse(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_templates() {
        let expr = RuntimeExpression::parse("{$request.body#/callbackUrl}/events/{$method}").unwrap();
        assert!(!expr.is_expression());
        assert_eq!(expr.parts(), vec!["$request.body#/callbackUrl", "$method"]);

        let plain = RuntimeExpression::parse("http://notify.example.com/hook").unwrap();
        assert!(plain.parts().is_empty());

        assert!(RuntimeExpression::parse("http://x/{$bogus}").is_err());
    }

    #[test]
    fn test_display_and_debug() {
        let expr = RuntimeExpression::new("$url");
        assert_eq!(expr.to_string(), "$url");
        assert_eq!(format!("{expr:?}"), "RuntimeExpression(\"$url\")");
    }
}
