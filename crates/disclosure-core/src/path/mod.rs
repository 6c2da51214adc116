//! Path expressions selecting nodes of a document.
//!
//! The supported language is a JSONPath subset: root `$`, member access
//! (`.name`, `['name']`), indices (negative from the end), wildcards,
//! recursive descent `..`, unions and filters (`[?(@.state == 'CA')]`).
//! Expressions are parsed once into a [`PathExpression`] and can then be
//! evaluated against any number of documents.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod tokens;

mod eval;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::config::LimitsConfig;
use crate::errors::{DisclosureError, DisclosureResult};
use crate::pointer::Pointer;

use self::ast::PathSegment;

/// A node selected by a path expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    pub pointer: Pointer,
    pub value: &'a Value,
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq)]
pub struct PathExpression {
    source: String,
    segments: Vec<PathSegment>,
}

impl PathExpression {
    pub fn parse(source: &str) -> DisclosureResult<Self> {
        Self::parse_with_limit(source, LimitsConfig::default().max_expression_len)
    }

    /// Parse, rejecting expressions longer than `max_len` bytes.
    pub fn parse_with_limit(source: &str, max_len: usize) -> DisclosureResult<Self> {
        if source.len() > max_len {
            return Err(DisclosureError::path_syntax(
                source,
                max_len,
                format!("expression exceeds {max_len} bytes"),
            ));
        }
        let segments = parser::parse(source)?;
        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// All nodes of `doc` selected by this expression. No match is not an error.
    pub fn select<'a>(&self, doc: &'a Value) -> Vec<Match<'a>> {
        eval::evaluate(&self.segments, doc)
            .into_iter()
            .map(|(pointer, value)| Match { pointer, value })
            .collect()
    }
}

impl FromStr for PathExpression {
    type Err = DisclosureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parse a batch of expressions, failing on the first syntax error.
pub fn parse_all<S: AsRef<str>>(sources: &[S], max_len: usize) -> DisclosureResult<Vec<PathExpression>> {
    sources
        .iter()
        .map(|s| PathExpression::parse_with_limit(s.as_ref(), max_len))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn select_returns_pointers_and_values() {
        let doc = json!({"phoneNumbers": [{"number": "1"}, {"number": "2"}]});
        let expr: PathExpression = "$.phoneNumbers[*].number".parse().unwrap();
        let got: Vec<(String, Value)> = expr
            .select(&doc)
            .into_iter()
            .map(|m| (m.pointer.to_string(), m.value.clone()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("/phoneNumbers/0/number".to_string(), json!("1")),
                ("/phoneNumbers/1/number".to_string(), json!("2")),
            ]
        );
    }

    #[test]
    fn root_selects_whole_document() {
        let doc = json!({"a": 1});
        let m = PathExpression::parse("$").unwrap().select(&doc);
        assert_eq!(m.len(), 1);
        assert!(m[0].pointer.is_root());
        assert_eq!(m[0].value, &doc);
    }

    #[test]
    fn length_limit() {
        assert!(PathExpression::parse_with_limit("$.abc", 5).is_ok());
        let err = PathExpression::parse_with_limit("$.abcd", 5).unwrap_err();
        assert!(err.to_string().contains("exceeds 5 bytes"));
    }

    #[test]
    fn parse_all_stops_on_first_error() {
        let err = parse_all(&["$.a", "$[", "$.b"], 64).unwrap_err();
        match err {
            DisclosureError::PathSyntax { expression, .. } => assert_eq!(expression, "$["),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn display_round_trips_source() {
        let src = "$..[?(@.a >= 1)]";
        assert_eq!(PathExpression::parse(src).unwrap().to_string(), src);
    }
}
