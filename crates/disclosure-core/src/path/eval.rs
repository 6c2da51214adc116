//! Evaluation of parsed path segments against a document.
//!
//! Each step maps the current node list to a new node list. Nodes carry the
//! pointer they were reached by, so every result can be placed back into a
//! projected document.

use std::cmp::Ordering;

use serde_json::Value;

use crate::path::ast::{ComparisonOp, FilterExpr, Operand, PathSegment, RelativeStep, Selector};
use crate::pointer::Pointer;

pub(crate) type Node<'a> = (Pointer, &'a Value);

pub(crate) fn evaluate<'a>(segments: &[PathSegment], doc: &'a Value) -> Vec<Node<'a>> {
    let mut nodes: Vec<Node<'a>> = vec![(Pointer::root(), doc)];

    for segment in segments {
        let mut next = Vec::new();
        match segment {
            PathSegment::Child(sel) => {
                for (ptr, value) in &nodes {
                    apply_selector(sel, ptr, *value, &mut next);
                }
            }
            PathSegment::Descendant(sel) => {
                for (ptr, value) in &nodes {
                    for (p, v) in self_and_descendants(ptr, *value) {
                        apply_selector(sel, &p, v, &mut next);
                    }
                }
            }
        }
        nodes = next;
        if nodes.is_empty() {
            break;
        }
    }

    nodes
}

/// Pre-order walk of a subtree, starting with its root.
fn self_and_descendants<'a>(ptr: &Pointer, value: &'a Value) -> Vec<Node<'a>> {
    let mut out = Vec::new();
    let mut stack: Vec<Node<'a>> = vec![(ptr.clone(), value)];
    while let Some((p, v)) = stack.pop() {
        match v {
            Value::Object(map) => {
                for (k, child) in map.iter().rev() {
                    stack.push((p.key(k), child));
                }
            }
            Value::Array(items) => {
                for (i, child) in items.iter().enumerate().rev() {
                    stack.push((p.index(i), child));
                }
            }
            _ => {}
        }
        out.push((p, v));
    }
    out
}

fn children<'a>(ptr: &Pointer, value: &'a Value) -> Vec<Node<'a>> {
    match value {
        Value::Object(map) => map.iter().map(|(k, v)| (ptr.key(k), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (ptr.index(i), v))
            .collect(),
        _ => Vec::new(),
    }
}

fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let i = if index < 0 { len + index } else { index };
    if (0..len).contains(&i) {
        usize::try_from(i).ok()
    } else {
        None
    }
}

fn apply_selector<'a>(sel: &Selector, ptr: &Pointer, value: &'a Value, out: &mut Vec<Node<'a>>) {
    match sel {
        Selector::Name(name) => {
            if let Some(v) = value.as_object().and_then(|m| m.get(name)) {
                out.push((ptr.key(name), v));
            }
        }
        Selector::Index(index) => {
            if let Value::Array(items) = value {
                if let Some(i) = resolve_index(*index, items.len()) {
                    out.push((ptr.index(i), &items[i]));
                }
            }
        }
        Selector::Wildcard => out.extend(children(ptr, value)),
        Selector::Filter(expr) => {
            out.extend(children(ptr, value).into_iter().filter(|(_, v)| matches_filter(expr, v)));
        }
        Selector::Union(selectors) => {
            for s in selectors {
                apply_selector(s, ptr, value, out);
            }
        }
    }
}

fn follow<'a>(steps: &[RelativeStep], current: &'a Value) -> Option<&'a Value> {
    let mut node = current;
    for step in steps {
        node = match step {
            RelativeStep::Name(name) => node.as_object()?.get(name)?,
            RelativeStep::Index(index) => {
                let items = node.as_array()?;
                &items[resolve_index(*index, items.len())?]
            }
        };
    }
    Some(node)
}

fn operand<'a>(op: &'a Operand, current: &'a Value) -> Option<&'a Value> {
    match op {
        Operand::Current(steps) => follow(steps, current),
        Operand::Literal(v) => Some(v),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

fn ordering(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn compare(left: Option<&Value>, op: ComparisonOp, right: Option<&Value>) -> bool {
    let equal = match (left, right) {
        (None, None) => true,
        (Some(a), Some(b)) => values_equal(a, b),
        _ => false,
    };
    match op {
        ComparisonOp::Equal => equal,
        ComparisonOp::NotEqual => !equal,
        ComparisonOp::Less | ComparisonOp::LessEq | ComparisonOp::Greater | ComparisonOp::GreaterEq => {
            let ord = match (left, right) {
                (Some(a), Some(b)) => ordering(a, b),
                _ => None,
            };
            match (op, ord) {
                (_, None) => false,
                (ComparisonOp::Less, Some(o)) => o == Ordering::Less,
                (ComparisonOp::LessEq, Some(o)) => o != Ordering::Greater,
                (ComparisonOp::Greater, Some(o)) => o == Ordering::Greater,
                (_, Some(o)) => o != Ordering::Less,
            }
        }
    }
}

/// Evaluate a filter predicate with `@` bound to `current`.
fn matches_filter(expr: &FilterExpr, current: &Value) -> bool {
    match expr {
        FilterExpr::Comparison { left, op, right } => {
            compare(operand(left, current), *op, operand(right, current))
        }
        FilterExpr::Exists(steps) => follow(steps, current).is_some(),
        FilterExpr::And(a, b) => matches_filter(a, current) && matches_filter(b, current),
        FilterExpr::Or(a, b) => matches_filter(a, current) || matches_filter(b, current),
        FilterExpr::Not(inner) => !matches_filter(inner, current),
    }
}
