//! Document model helpers.
//!
//! A document is a `serde_json::Value`: maps, sequences and scalars (string,
//! number, boolean, null). This module provides strict parsing with size limits
//! and conversion from arbitrary serde values. Parsing helpers operate on
//! in-memory bytes only; reading files is left to the caller.

use serde::Serialize;
use serde_json::Value;

use crate::errors::{DisclosureError, DisclosureResult};

/// Shape of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Map,
    Sequence,
    Scalar,
}

impl NodeKind {
    pub fn of(v: &Value) -> Self {
        match v {
            Value::Object(_) => NodeKind::Map,
            Value::Array(_) => NodeKind::Sequence,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => NodeKind::Scalar,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Map => "map",
            NodeKind::Sequence => "sequence",
            NodeKind::Scalar => "scalar",
        }
    }
}

/// Parse JSON bytes into a document with a hard size limit.
pub fn parse_document(bytes: &[u8], max_bytes: usize) -> DisclosureResult<Value> {
    if bytes.len() > max_bytes {
        return Err(DisclosureError::malformed_document(format!(
            "JSON payload too large ({} bytes > limit {})",
            bytes.len(),
            max_bytes
        )));
    }

    serde_json::from_slice(bytes)
        .map_err(|e| DisclosureError::malformed_document(format!("failed to parse JSON: {e}")))
}

/// Convert any serializable value into a document.
///
/// Fails for values with no JSON tree representation, such as maps whose keys
/// do not serialize to strings.
pub fn to_document<T: Serialize + ?Sized>(value: &T) -> DisclosureResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| DisclosureError::malformed_document(format!("value is not a JSON tree: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn parse_document_respects_limit() {
        let bytes = br#"{"firstName":"Jane"}"#;
        let v = parse_document(bytes, 1024).unwrap();
        assert_eq!(v["firstName"], "Jane");

        let err = parse_document(bytes, 4).err().unwrap();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn parse_document_rejects_invalid_json() {
        let err = parse_document(b"{\"a\":", 1024).unwrap_err();
        assert!(matches!(err, DisclosureError::MalformedDocument(_)));
    }

    #[test]
    fn non_string_map_keys_are_malformed() {
        let mut m: BTreeMap<Vec<u8>, u8> = BTreeMap::new();
        m.insert(vec![1, 2], 3);
        let err = to_document(&m).unwrap_err();
        assert!(matches!(err, DisclosureError::MalformedDocument(_)));
    }

    #[test]
    fn node_kinds() {
        assert_eq!(NodeKind::of(&serde_json::json!({})), NodeKind::Map);
        assert_eq!(NodeKind::of(&serde_json::json!([])), NodeKind::Sequence);
        assert_eq!(NodeKind::of(&serde_json::json!(null)), NodeKind::Scalar);
    }
}
