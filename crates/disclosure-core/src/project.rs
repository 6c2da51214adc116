//! Path projection: build a reduced document from path-expression matches.
//!
//! Every match is expanded into placements. A scalar places itself, while a
//! container places an empty container of the same kind followed by its
//! children, so a matched container contributes its whole subtree. Each
//! placement walks its pointer from the output root and creates missing
//! intermediate containers: a sequence when the next segment is an index, a
//! map otherwise.
//!
//! Rules:
//! - no matches yields an empty map
//! - sequence gaps are padded with `null`; such slots carry no statement
//!   (see [`crate::canonical::canonicalize_projection`])
//! - a `null` slot is vacant and may receive any placement
//! - disagreeing container kinds fail with `ProjectionConflict`

use serde_json::{Map, Value};

use crate::config::LimitsConfig;
use crate::document::NodeKind;
use crate::errors::{DisclosureError, DisclosureResult};
use crate::path::{self, Match, PathExpression};
use crate::pointer::{Pointer, Segment};

/// Accumulates placements into one output document.
#[derive(Debug, Default)]
pub struct Projector {
    root: Option<Value>,
    placements: usize,
}

impl Projector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project a set of matches in one go.
    pub fn project_matches<'a, I>(matches: I) -> DisclosureResult<Value>
    where
        I: IntoIterator<Item = Match<'a>>,
    {
        let mut projector = Self::new();
        projector.add_matches(matches)?;
        Ok(projector.finish())
    }

    /// Place matches and their subtrees. Work proceeds over an explicit list
    /// in match order, parents before children.
    pub fn add_matches<'a, I>(&mut self, matches: I) -> DisclosureResult<()>
    where
        I: IntoIterator<Item = Match<'a>>,
    {
        let mut work: Vec<(Pointer, &'a Value)> =
            matches.into_iter().map(|m| (m.pointer, m.value)).collect();
        work.reverse();

        while let Some((pointer, value)) = work.pop() {
            match value {
                Value::Object(map) => {
                    self.place(&pointer, Value::Object(Map::new()))?;
                    for (k, child) in map.iter().rev() {
                        work.push((pointer.key(k), child));
                    }
                }
                Value::Array(items) => {
                    self.place(&pointer, Value::Array(Vec::new()))?;
                    for (i, child) in items.iter().enumerate().rev() {
                        work.push((pointer.index(i), child));
                    }
                }
                Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                    self.place(&pointer, value.clone())?;
                }
            }
        }
        Ok(())
    }

    /// Number of placements performed so far.
    pub fn placements(&self) -> usize {
        self.placements
    }

    /// The projected document; `{}` when nothing was placed.
    pub fn finish(self) -> Value {
        self.root.unwrap_or_else(|| Value::Object(Map::new()))
    }

    fn place(&mut self, pointer: &Pointer, shape: Value) -> DisclosureResult<()> {
        self.placements += 1;
        let segments = pointer.segments();

        let (last, parents) = match segments.split_last() {
            Some(split) => split,
            None => {
                return match self.root.as_mut() {
                    Some(root) => settle(root, shape, pointer, 0),
                    None => {
                        self.root = Some(shape);
                        Ok(())
                    }
                };
            }
        };

        let mut node = self.root.get_or_insert_with(|| empty_for(&segments[0]));
        for (depth, seg) in parents.iter().enumerate() {
            let slot = slot_mut(node, seg, pointer, depth)?;
            let next = &segments[depth + 1];
            if slot.is_null() {
                *slot = empty_for(next);
            }
            node = slot;
        }

        let depth = parents.len();
        let slot = slot_mut(node, last, pointer, depth)?;
        settle(slot, shape, pointer, depth + 1)
    }
}

fn empty_for(next: &Segment) -> Value {
    match next {
        Segment::Index(_) => Value::Array(Vec::new()),
        Segment::Key(_) => Value::Object(Map::new()),
    }
}

/// The child slot of `node` addressed by `seg`, created as `null` if absent.
fn slot_mut<'v>(
    node: &'v mut Value,
    seg: &Segment,
    pointer: &Pointer,
    depth: usize,
) -> DisclosureResult<&'v mut Value> {
    match (node, seg) {
        (Value::Object(map), Segment::Key(k)) => Ok(map.entry(k.clone()).or_insert(Value::Null)),
        (Value::Array(items), Segment::Index(i)) => {
            if items.len() <= *i {
                items.resize(*i + 1, Value::Null);
            }
            Ok(&mut items[*i])
        }
        (other, seg) => {
            let wanted = if seg.is_index() { "sequence" } else { "map" };
            Err(DisclosureError::projection_conflict(
                pointer.prefix_string(depth),
                format!(
                    "segment `{seg}` needs a {wanted} but a {} is already placed",
                    NodeKind::of(other).as_str()
                ),
            ))
        }
    }
}

fn settle(slot: &mut Value, shape: Value, pointer: &Pointer, depth: usize) -> DisclosureResult<()> {
    if slot.is_null() {
        *slot = shape;
        return Ok(());
    }
    match (NodeKind::of(slot), NodeKind::of(&shape)) {
        (NodeKind::Map, NodeKind::Map) | (NodeKind::Sequence, NodeKind::Sequence) => Ok(()),
        (NodeKind::Scalar, NodeKind::Scalar) => {
            *slot = shape;
            Ok(())
        }
        (have, want) => Err(DisclosureError::projection_conflict(
            pointer.prefix_string(depth),
            format!("cannot place a {} over a {}", want.as_str(), have.as_str()),
        )),
    }
}

/// Project `doc` onto the nodes selected by `paths`, with default limits.
///
/// All expressions are parsed before any matching, so a syntax error in any
/// of them fails the call without partial output.
pub fn project<S: AsRef<str>>(doc: &Value, paths: &[S]) -> DisclosureResult<Value> {
    project_with_limits(doc, paths, &LimitsConfig::default())
}

pub fn project_with_limits<S: AsRef<str>>(
    doc: &Value,
    paths: &[S],
    limits: &LimitsConfig,
) -> DisclosureResult<Value> {
    let expressions = path::parse_all(paths, limits.max_expression_len)?;
    project_expressions(doc, &expressions)
}

/// Project `doc` onto already-parsed expressions.
pub fn project_expressions(doc: &Value, expressions: &[PathExpression]) -> DisclosureResult<Value> {
    let mut projector = Projector::new();
    let mut matched = 0usize;
    for expr in expressions {
        let matches = expr.select(doc);
        matched += matches.len();
        projector.add_matches(matches)?;
    }
    tracing::debug!(
        expressions = expressions.len(),
        matches = matched,
        placements = projector.placements(),
        "document projected"
    );
    Ok(projector.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_matches_give_empty_map() {
        let doc = json!({"a": 1});
        assert_eq!(project(&doc, &["$.missing"]).unwrap(), json!({}));
        assert_eq!(project::<&str>(&doc, &[]).unwrap(), json!({}));
    }

    #[test]
    fn scalar_members_are_placed() {
        let doc = json!({"firstName": "Jane", "lastName": "Doe"});
        assert_eq!(
            project(&doc, &["$.firstName"]).unwrap(),
            json!({"firstName": "Jane"})
        );
    }

    #[test]
    fn matched_container_brings_subtree() {
        let doc = json!({"address": {"city": "X", "geo": {"lat": 1}}, "age": 3});
        assert_eq!(
            project(&doc, &["$.address"]).unwrap(),
            json!({"address": {"city": "X", "geo": {"lat": 1}}})
        );
    }

    #[test]
    fn empty_containers_survive_projection() {
        let doc = json!({"tags": [], "meta": {}});
        assert_eq!(project(&doc, &["$.*"]).unwrap(), doc);
    }

    #[test]
    fn overlapping_expressions_merge() {
        let doc = json!({"a": {"b": 1, "c": 2, "d": 3}});
        assert_eq!(
            project(&doc, &["$.a.b", "$.a", "$.a.c"]).unwrap(),
            json!({"a": {"b": 1, "c": 2, "d": 3}})
        );
    }

    #[test]
    fn sequence_gaps_are_padded() {
        let doc = json!({"xs": [1, 2, 3]});
        assert_eq!(project(&doc, &["$.xs[2]"]).unwrap(), json!({"xs": [null, null, 3]}));
        assert_eq!(project(&doc, &["$.xs[2]", "$.xs[0]"]).unwrap(), json!({"xs": [1, null, 3]}));
    }

    #[test]
    fn descendants_of_leaf_roots_are_empty() {
        assert_eq!(project(&json!("hello"), &["$..*"]).unwrap(), json!({}));
        assert_eq!(project(&json!([]), &["$..*"]).unwrap(), json!({}));
        assert_eq!(project(&json!("hello"), &["$"]).unwrap(), json!("hello"));
    }

    #[test]
    fn root_match_reproduces_document() {
        let doc = json!([{"a": 1}, "x"]);
        assert_eq!(project(&doc, &["$"]).unwrap(), doc);
    }

    #[test]
    fn syntax_error_fails_whole_call() {
        let err = project(&json!({"a": 1}), &["$.a", "$[?("]).unwrap_err();
        assert!(matches!(err, DisclosureError::PathSyntax { .. }));
    }

    #[test]
    fn inconsistent_matches_conflict() {
        let a = json!({"k": 1});
        let b = json!([1]);
        let matches = vec![
            Match {
                pointer: Pointer::root().key("x"),
                value: &a,
            },
            Match {
                pointer: Pointer::root().key("x"),
                value: &b,
            },
        ];
        let err = Projector::project_matches(matches).unwrap_err();
        match err {
            DisclosureError::ProjectionConflict { pointer, .. } => assert_eq!(pointer, "/x"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn index_under_map_conflicts() {
        let v = json!(1);
        let matches = vec![
            Match {
                pointer: Pointer::root().key("x").key("y"),
                value: &v,
            },
            Match {
                pointer: Pointer::root().key("x").index(0),
                value: &v,
            },
        ];
        let err = Projector::project_matches(matches).unwrap_err();
        assert!(matches!(err, DisclosureError::ProjectionConflict { .. }));
    }
}
