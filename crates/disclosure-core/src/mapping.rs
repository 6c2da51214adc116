//! Index mapping between a projected document and its source document.
//!
//! Both documents are canonicalized, the projected one without its vacant
//! sequence slots (see [`canonicalize_projection`]). Each projected statement
//! is looked up in the full canonical set by binary search; the resulting
//! positions are the revealed indices handed to a signature engine.

use serde_json::Value;

use crate::canonical::{
    canonicalize_projection, canonicalize_with, CanonicalSet, CanonicalizeOptions,
};
use crate::config::{DisclosureConfig, MatchStrategy};
use crate::errors::{DisclosureError, DisclosureResult};
use crate::project;

/// A projected document together with its revealed indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Disclosure {
    pub projected: Value,
    pub indices: Vec<usize>,
}

/// Map every statement of `projected` to its position in the canonical set of
/// `full`, using [`MatchStrategy::FirstMatch`].
pub fn map_indices(full: &Value, projected: &Value) -> DisclosureResult<Vec<usize>> {
    map_indices_with(full, projected, MatchStrategy::FirstMatch)
}

pub fn map_indices_with(
    full: &Value,
    projected: &Value,
    strategy: MatchStrategy,
) -> DisclosureResult<Vec<usize>> {
    let opts = CanonicalizeOptions::default();
    let f = canonicalize_with(full, &opts)?;
    let p = canonicalize_projection(projected, &opts)?;
    map_sets(&f, &p, strategy)
}

/// Map already-canonicalized sets. The result has `projected.len()` entries,
/// in the order of `projected`.
pub fn map_sets(
    full: &CanonicalSet,
    projected: &CanonicalSet,
    strategy: MatchStrategy,
) -> DisclosureResult<Vec<usize>> {
    match strategy {
        MatchStrategy::FirstMatch => first_match(full, projected),
        MatchStrategy::ConsumeOnce => consume_once(full, projected),
    }
}

fn first_match(full: &CanonicalSet, projected: &CanonicalSet) -> DisclosureResult<Vec<usize>> {
    let dups = full.duplicates();
    let mut out = Vec::with_capacity(projected.len());

    for stmt in projected.iter() {
        let text = stmt.text();
        let i = full
            .position_of(text)
            .ok_or_else(|| DisclosureError::index_mapping(text))?;
        if let Some((count, _)) = dups.iter().find(|(_, t)| *t == text) {
            tracing::warn!(
                statement = text,
                occurrences = *count,
                index = i,
                "duplicate statement in full document, mapping to first occurrence"
            );
        }
        out.push(i);
    }

    tracing::debug!(revealed = out.len(), total = full.len(), "indices mapped");
    Ok(out)
}

fn consume_once(full: &CanonicalSet, projected: &CanonicalSet) -> DisclosureResult<Vec<usize>> {
    let mut used = vec![false; full.len()];
    let mut out = Vec::with_capacity(projected.len());

    for stmt in projected.iter() {
        let text = stmt.text();
        let mut i = full.lower_bound(text);
        loop {
            match full.get(i) {
                Some(s) if s.text() == text && used[i] => i += 1,
                Some(s) if s.text() == text => break,
                _ => return Err(DisclosureError::index_mapping(text)),
            }
        }
        used[i] = true;
        out.push(i);
    }

    tracing::debug!(revealed = out.len(), total = full.len(), "indices mapped");
    Ok(out)
}

/// Project `doc` onto `paths` and compute the revealed indices in one call.
pub fn disclose<S: AsRef<str>>(
    doc: &Value,
    paths: &[S],
    strategy: MatchStrategy,
) -> DisclosureResult<Disclosure> {
    let cfg = DisclosureConfig {
        mapping: strategy,
        ..DisclosureConfig::default()
    };
    disclose_with(doc, paths, &cfg)
}

/// Like [`disclose`], with explicit limits.
pub fn disclose_with<S: AsRef<str>>(
    doc: &Value,
    paths: &[S],
    cfg: &DisclosureConfig,
) -> DisclosureResult<Disclosure> {
    let full = canonicalize_with(doc, &CanonicalizeOptions::from(&cfg.limits))?;
    disclose_over(doc, &full, paths, cfg)
}

/// Like [`disclose_with`], reusing an already canonicalized `full` set of `doc`.
pub fn disclose_over<S: AsRef<str>>(
    doc: &Value,
    full: &CanonicalSet,
    paths: &[S],
    cfg: &DisclosureConfig,
) -> DisclosureResult<Disclosure> {
    let projected = project::project_with_limits(doc, paths, &cfg.limits)?;
    let p = canonicalize_projection(&projected, &CanonicalizeOptions::from(&cfg.limits))?;
    let indices = map_sets(full, &p, cfg.mapping)?;
    Ok(Disclosure { projected, indices })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(texts: &[&str]) -> CanonicalSet {
        CanonicalSet::from_sorted_texts(texts.iter().map(|t| t.to_string()).collect()).unwrap()
    }

    #[test]
    fn identical_documents_map_to_identity() {
        let doc = json!({"b": [1, 2], "a": {"c": true}});
        assert_eq!(map_indices(&doc, &doc).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn subset_maps_in_projected_order() {
        let full = json!({"a": 1, "b": 2, "c": 3});
        let projected = json!({"c": 3, "a": 1});
        assert_eq!(map_indices(&full, &projected).unwrap(), vec![0, 2]);
    }

    #[test]
    fn missing_statement_fails_without_partial_result() {
        let full = json!({"a": 1});
        let projected = json!({"a": 2});
        let err = map_indices(&full, &projected).unwrap_err();
        match err {
            DisclosureError::IndexMapping { statement } => assert_eq!(statement, r#"{"/a":2}"#),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_projection_maps_to_nothing() {
        assert!(map_indices(&json!({"a": 1}), &json!({})).unwrap().is_empty());
    }

    #[test]
    fn strategies_differ_on_duplicates() {
        let full = set(&[r#"{"/a":1}"#, r#"{"/a":1}"#, r#"{"/b":2}"#]);
        let projected = set(&[r#"{"/a":1}"#, r#"{"/a":1}"#]);

        assert_eq!(
            map_sets(&full, &projected, MatchStrategy::FirstMatch).unwrap(),
            vec![0, 0]
        );
        assert_eq!(
            map_sets(&full, &projected, MatchStrategy::ConsumeOnce).unwrap(),
            vec![0, 1]
        );

        let too_many = set(&[r#"{"/a":1}"#, r#"{"/a":1}"#, r#"{"/a":1}"#]);
        assert!(map_sets(&full, &too_many, MatchStrategy::ConsumeOnce).is_err());
    }

    #[test]
    fn disclose_combines_projection_and_mapping() {
        let doc = json!({"name": "Jane", "age": 30, "city": "X"});
        let d = disclose(&doc, &["$.name", "$.city"], MatchStrategy::FirstMatch).unwrap();
        assert_eq!(d.projected, json!({"name": "Jane", "city": "X"}));
        assert_eq!(d.indices, vec![1, 2]);
    }

    #[test]
    fn later_sequence_element_maps_without_padding() {
        let doc = json!({"xs": ["a", "b"]});
        let d = disclose(&doc, &["$.xs[1]"], MatchStrategy::FirstMatch).unwrap();
        assert_eq!(d.projected, json!({"xs": [null, "b"]}));
        assert_eq!(d.indices, vec![1]);
    }

    #[test]
    fn filtered_sequence_element_maps_without_padding() {
        let doc = json!({
            "phoneNumbers": [
                {"type": "home", "n": "1"},
                {"type": "work", "n": "2"}
            ]
        });
        let d = disclose(
            &doc,
            &["$.phoneNumbers[?(@.type == 'work')]"],
            MatchStrategy::FirstMatch,
        )
        .unwrap();
        assert_eq!(
            d.projected,
            json!({"phoneNumbers": [null, {"type": "work", "n": "2"}]})
        );
        // full: /0/n, /0/type, /1/n, /1/type
        assert_eq!(d.indices, vec![2, 3]);

        let d = disclose(&doc, &["$.phoneNumbers[1].n"], MatchStrategy::FirstMatch).unwrap();
        assert_eq!(d.indices, vec![2]);
    }

    #[test]
    fn null_sequence_elements_are_never_revealed() {
        let doc = json!({"xs": [null, 1]});
        let d = disclose(&doc, &["$.xs[*]"], MatchStrategy::FirstMatch).unwrap();
        assert_eq!(d.projected, doc);
        assert_eq!(d.indices, vec![1]);
    }
}
