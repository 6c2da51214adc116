//! Path-expression syntax tree.

use serde_json::Value;

/// One step of a path expression after the root `$`.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Apply the selector to the current nodes (`.name`, `[...]`).
    Child(Selector),
    /// Apply the selector to the current nodes and all their descendants (`..`).
    Descendant(Selector),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Map member by name.
    Name(String),
    /// Sequence element; negative values count from the end.
    Index(i64),
    /// Every member value or element.
    Wildcard,
    /// Member values or elements for which the predicate holds.
    Filter(FilterExpr),
    /// Results of several selectors, in order (`[a,b]`).
    Union(Vec<Selector>),
}

/// Step of a relative path inside a filter (`@.a[0]`).
#[derive(Debug, Clone, PartialEq)]
pub enum RelativeStep {
    Name(String),
    Index(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Node reached from the filter candidate.
    Current(Vec<RelativeStep>),
    Literal(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    Comparison {
        left: Operand,
        op: ComparisonOp,
        right: Operand,
    },
    /// True when the relative path resolves to a node.
    Exists(Vec<RelativeStep>),
    And(Box<FilterExpr>, Box<FilterExpr>),
    Or(Box<FilterExpr>, Box<FilterExpr>),
    Not(Box<FilterExpr>),
}
