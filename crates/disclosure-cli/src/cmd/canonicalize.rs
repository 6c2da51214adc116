use anyhow::Result;
use disclosure_core::canonical::{canonicalize_with, CanonicalizeOptions};
use disclosure_core::config::DisclosureConfig;
use serde::Serialize;

use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct CanonicalizeOut {
    pub digest: String,
    pub statements: Vec<String>,
}

pub fn run(cfg: &DisclosureConfig, doc_path: &str) -> Result<bool> {
    let doc = input::read_document(doc_path, &cfg.limits)?;
    let set = canonicalize_with(&doc, &CanonicalizeOptions::from(&cfg.limits))?;
    output::print(&CanonicalizeOut {
        digest: set.digest_hex(),
        statements: set.texts().into_iter().map(str::to_string).collect(),
    })?;
    Ok(true)
}
