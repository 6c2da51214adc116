use std::fs;
use std::io::Read;

use anyhow::{Context, Result};
use disclosure_core::config::LimitsConfig;
use disclosure_core::document::parse_document;
use serde_json::Value;

/// Read a JSON document from a file, or from stdin when `path` is `-`.
pub fn read_document(path: &str, limits: &LimitsConfig) -> Result<Value> {
    let raw = if path == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read document from stdin")?;
        buf
    } else {
        fs::read(path).with_context(|| format!("failed to read {path}"))?
    };
    let doc = parse_document(&raw, limits.max_json_bytes).with_context(|| format!("invalid document {path}"))?;
    Ok(doc)
}

pub fn decode_hex(field: &str, s: &str) -> Result<Vec<u8>> {
    hex::decode(s.trim()).with_context(|| format!("{field} must be hex"))
}
