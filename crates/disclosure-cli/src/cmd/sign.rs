use anyhow::{Context, Result};
use disclosure_core::config::DisclosureConfig;
use disclosure_core::disclosure::SelectiveDisclosure;
use disclosure_core::engine::reference::{signing_key_from_hex, Ed25519MessageEngine};
use serde::Serialize;

use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct SignOut {
    pub signature: String,
    pub public_key: String,
}

pub fn run(cfg: &DisclosureConfig, doc_path: &str, key_hex: &str) -> Result<bool> {
    let doc = input::read_document(doc_path, &cfg.limits)?;
    let sk = signing_key_from_hex(key_hex).context("invalid --key")?;

    let sd = SelectiveDisclosure::with_config(Ed25519MessageEngine::new(), cfg.clone())?;
    let signature = sd.sign(&doc, &sk)?;

    output::print(&SignOut {
        signature: hex::encode(signature),
        public_key: hex::encode(sk.verifying_key().to_bytes()),
    })?;
    Ok(true)
}
