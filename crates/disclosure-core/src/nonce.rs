//! Proof nonces.
//!
//! A nonce is given either as text (encoded to UTF-8 bytes) or as raw bytes.
//! Signature engines only ever see the bytes.

use serde_json::Value;

use crate::errors::{DisclosureError, DisclosureResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nonce {
    Text(String),
    Bytes(Vec<u8>),
}

impl Nonce {
    /// Interpret a JSON value as a nonce: a string, or an array of integers
    /// in `0..=255`.
    pub fn from_value(value: &Value) -> DisclosureResult<Self> {
        match value {
            Value::String(s) => Ok(Nonce::Text(s.clone())),
            Value::Array(items) => {
                let mut bytes = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let b = item
                        .as_u64()
                        .and_then(|n| u8::try_from(n).ok())
                        .ok_or_else(|| {
                            DisclosureError::nonce_encoding(format!(
                                "element {i} is not a byte value: {item}"
                            ))
                        })?;
                    bytes.push(b);
                }
                Ok(Nonce::Bytes(bytes))
            }
            other => Err(DisclosureError::nonce_encoding(format!(
                "expected a string or a byte array, got {}",
                kind_name(other)
            ))),
        }
    }

    /// Decode a lowercase or uppercase hex string into a byte nonce.
    pub fn from_hex(s: &str) -> DisclosureResult<Self> {
        hex::decode(s)
            .map(Nonce::Bytes)
            .map_err(|e| DisclosureError::nonce_encoding(format!("invalid hex nonce: {e}")))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Nonce::Text(s) => s.as_bytes(),
            Nonce::Bytes(b) => b,
        }
    }
}

fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl From<&str> for Nonce {
    fn from(s: &str) -> Self {
        Nonce::Text(s.to_string())
    }
}

impl From<String> for Nonce {
    fn from(s: String) -> Self {
        Nonce::Text(s)
    }
}

impl From<Vec<u8>> for Nonce {
    fn from(b: Vec<u8>) -> Self {
        Nonce::Bytes(b)
    }
}

impl From<&[u8]> for Nonce {
    fn from(b: &[u8]) -> Self {
        Nonce::Bytes(b.to_vec())
    }
}
