//! Statement canonicalization.
//!
//! A document is flattened into statements, one per scalar leaf. Each
//! statement is serialized as the compact JSON text of a single-entry object
//! `{"<json-pointer>": <scalar>}` and the texts are sorted byte-wise. The
//! resulting [`CanonicalSet`] is the exact message list handed to a signature
//! engine, so its bytes are a wire format:
//!
//! - pointers use RFC 6901 form (see [`crate::pointer`])
//! - strings, booleans and `null` use serde_json's compact formatting
//! - numbers use the shortest round-trip decimal form of ECMAScript
//!   `Number.prototype.toString` (`1.0` is `1`, `1e20` is
//!   `100000000000000000000`, `1e21` is `1e+21`)
//! - order depends only on the multiset of texts, never on map insertion order
//!
//! Duplicate texts are preserved.
//!
//! A projected document may hold `null` sequence elements that only pad the
//! gap before a selected element. [`canonicalize_projection`] treats every
//! `null` sequence element as such a vacant slot and emits no statement for it.

use itertools::Itertools;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::config::LimitsConfig;
use crate::determinism::{hashing, stable_sort};
use crate::document;
use crate::errors::{DisclosureError, DisclosureResult};
use crate::pointer::Pointer;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A (pointer, scalar) pair. Values are never maps or sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub pointer: Pointer,
    pub value: Value,
}

/// One serialized statement of a canonical set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalStatement {
    pointer: String,
    text: String,
}

impl CanonicalStatement {
    /// Pointer in its canonical string form.
    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

/// Limits applied while flattening.
#[derive(Debug, Clone, Copy)]
pub struct CanonicalizeOptions {
    pub max_depth: usize,
    pub max_statements: usize,
    /// Skip `null` sequence elements (vacant slots of a projection).
    pub skip_vacant: bool,
}

impl Default for CanonicalizeOptions {
    fn default() -> Self {
        Self::from(&LimitsConfig::default())
    }
}

impl From<&LimitsConfig> for CanonicalizeOptions {
    fn from(limits: &LimitsConfig) -> Self {
        Self {
            max_depth: limits.max_depth,
            max_statements: limits.max_statements,
            skip_vacant: false,
        }
    }
}

/// The sorted statements of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalSet {
    statements: Vec<CanonicalStatement>,
}

impl CanonicalSet {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CanonicalStatement> {
        self.statements.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalStatement> {
        self.statements.iter()
    }

    /// Statement texts in canonical order.
    pub fn texts(&self) -> Vec<&str> {
        self.statements.iter().map(|s| s.text()).collect()
    }

    /// UTF-8 message bytes in canonical order, as handed to a signature engine.
    pub fn messages(&self) -> Vec<&[u8]> {
        self.statements.iter().map(|s| s.as_bytes()).collect()
    }

    /// First position whose text is not less than `text` (byte-wise).
    pub fn lower_bound(&self, text: &str) -> usize {
        self.statements
            .partition_point(|s| s.text.as_bytes() < text.as_bytes())
    }

    /// First position holding exactly `text`.
    pub fn position_of(&self, text: &str) -> Option<usize> {
        let i = self.lower_bound(text);
        match self.statements.get(i) {
            Some(s) if s.text == text => Some(i),
            _ => None,
        }
    }

    /// Texts occurring more than once, with their multiplicity.
    pub fn duplicates(&self) -> Vec<(usize, &str)> {
        self.statements
            .iter()
            .map(|s| s.text())
            .dedup_with_count()
            .filter(|(n, _)| *n > 1)
            .collect()
    }

    /// Domain-separated SHA-256 fingerprint of the whole set (lowercase hex).
    pub fn digest_hex(&self) -> String {
        let count = (self.statements.len() as u64).to_be_bytes();
        let mut parts: Vec<Vec<u8>> = Vec::with_capacity(self.statements.len() + 1);
        parts.push(count.to_vec());
        for s in &self.statements {
            let mut p = (s.text.len() as u64).to_be_bytes().to_vec();
            p.extend_from_slice(s.as_bytes());
            parts.push(p);
        }
        let refs: Vec<&[u8]> = parts.iter().map(|p| p.as_slice()).collect();
        hex::encode(hashing::hash_with_domain(crate::domain::CANONICAL_SET, &refs))
    }

    /// Rebuild a canonical set from statement texts received elsewhere.
    ///
    /// Every text must be a single-entry JSON object with a scalar value, and
    /// the list must already be in canonical (byte-wise) order.
    pub fn from_sorted_texts(texts: Vec<String>) -> DisclosureResult<Self> {
        stable_sort::ensure_sorted(&texts, |t| t.as_str())?;

        let mut statements = Vec::with_capacity(texts.len());
        for text in texts {
            let parsed: Value = serde_json::from_str(&text).map_err(|e| {
                DisclosureError::malformed_document(format!("invalid statement text: {e}"))
            })?;
            let obj = parsed.as_object().ok_or_else(|| {
                DisclosureError::malformed_document("statement text is not a JSON object")
            })?;
            if obj.len() != 1 {
                return Err(DisclosureError::malformed_document(format!(
                    "statement must have exactly one entry, got {}",
                    obj.len()
                )));
            }
            let (pointer, value) = obj.iter().next().ok_or_else(|| {
                DisclosureError::malformed_document("statement text is empty")
            })?;
            if value.is_object() || value.is_array() {
                return Err(DisclosureError::malformed_document(format!(
                    "statement `{pointer}` carries a container value"
                )));
            }
            let expected = serialize_entry(pointer, value)?;
            if expected != text {
                return Err(DisclosureError::malformed_document(format!(
                    "statement `{pointer}` is not in canonical form"
                )));
            }
            statements.push(CanonicalStatement {
                pointer: pointer.clone(),
                text,
            });
        }

        Ok(Self { statements })
    }
}

/// Flatten a document into statements, in document order.
///
/// Traversal uses an explicit stack, so deeply nested input fails on the
/// configured depth limit rather than on the call stack.
pub fn flatten(doc: &Value, opts: &CanonicalizeOptions) -> DisclosureResult<Vec<Statement>> {
    let mut out = Vec::new();
    let mut stack: Vec<(Pointer, &Value)> = vec![(Pointer::root(), doc)];

    while let Some((pointer, node)) = stack.pop() {
        if pointer.len() > opts.max_depth {
            return Err(DisclosureError::malformed_document(format!(
                "document nesting exceeds max depth {} at `{pointer}`",
                opts.max_depth
            )));
        }
        match node {
            Value::Object(map) => {
                // reversed so that pops follow document order
                for (k, v) in map.iter().rev() {
                    stack.push((pointer.key(k), v));
                }
            }
            Value::Array(items) => {
                for (i, v) in items.iter().enumerate().rev() {
                    if opts.skip_vacant && v.is_null() {
                        continue;
                    }
                    stack.push((pointer.index(i), v));
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                if out.len() == opts.max_statements {
                    return Err(DisclosureError::malformed_document(format!(
                        "document exceeds max statements {}",
                        opts.max_statements
                    )));
                }
                out.push(Statement {
                    pointer,
                    value: node.clone(),
                });
            }
        }
    }

    Ok(out)
}

fn serialize_entry(pointer: &str, value: &Value) -> DisclosureResult<String> {
    let key = serde_json::to_string(pointer)
        .map_err(|e| DisclosureError::malformed_document(format!("pointer not serializable: {e}")))?;
    let val = match value {
        Value::Number(n) => number_text(n),
        other => serde_json::to_string(other).map_err(|e| {
            DisclosureError::malformed_document(format!("value not serializable: {e}"))
        })?,
    };
    Ok(format!("{{{key}:{val}}}"))
}

/// Integers keep their exact digits; floats follow ECMAScript number-to-string.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => ryu_js::Buffer::new().format(f).to_owned(),
        _ => n.to_string(),
    }
}

/// Serialize one statement as `{"<pointer>":<value>}`.
pub fn statement_text(statement: &Statement) -> DisclosureResult<String> {
    serialize_entry(&statement.pointer.to_string(), &statement.value)
}

fn to_canonical(statement: Statement) -> DisclosureResult<CanonicalStatement> {
    let text = statement_text(&statement)?;
    Ok(CanonicalStatement {
        pointer: statement.pointer.to_string(),
        text,
    })
}

/// Canonicalize a document with default limits.
pub fn canonicalize(doc: &Value) -> DisclosureResult<CanonicalSet> {
    canonicalize_with(doc, &CanonicalizeOptions::default())
}

/// Canonicalize a document with explicit limits.
pub fn canonicalize_with(doc: &Value, opts: &CanonicalizeOptions) -> DisclosureResult<CanonicalSet> {
    let statements = flatten(doc, opts)?;

    #[cfg(feature = "parallel")]
    let mut out: Vec<CanonicalStatement> = statements
        .into_par_iter()
        .map(to_canonical)
        .collect::<DisclosureResult<Vec<_>>>()?;

    #[cfg(not(feature = "parallel"))]
    let mut out: Vec<CanonicalStatement> = statements
        .into_iter()
        .map(to_canonical)
        .collect::<DisclosureResult<Vec<_>>>()?;

    stable_sort::sort_by_text_bytes(&mut out, |s| s.text());

    tracing::debug!(statements = out.len(), "document canonicalized");
    Ok(CanonicalSet { statements: out })
}

/// Canonicalize a projected document, leaving out its vacant slots.
///
/// Both the party computing revealed indices and the verifier of a proof use
/// this form, so padding never turns into a revealed statement.
pub fn canonicalize_projection(
    doc: &Value,
    opts: &CanonicalizeOptions,
) -> DisclosureResult<CanonicalSet> {
    canonicalize_with(
        doc,
        &CanonicalizeOptions {
            skip_vacant: true,
            ..*opts
        },
    )
}

/// Canonicalize any serializable value.
pub fn canonicalize_serializable<T: Serialize + ?Sized>(value: &T) -> DisclosureResult<CanonicalSet> {
    canonicalize(&document::to_document(value)?)
}
