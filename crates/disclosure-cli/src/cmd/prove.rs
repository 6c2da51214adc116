use anyhow::{Context, Result};
use disclosure_core::config::DisclosureConfig;
use disclosure_core::disclosure::SelectiveDisclosure;
use disclosure_core::engine::reference::{public_key_from_hex, Ed25519MessageEngine};
use disclosure_core::nonce::Nonce;
use serde::Serialize;

use crate::io::{export, input};
use crate::output;

#[derive(Debug, Serialize)]
pub struct ProveOut {
    pub projected_document: serde_json::Value,
    pub revealed_indices: Vec<usize>,
    pub proof: String,
}

pub fn run(
    cfg: &DisclosureConfig,
    doc_path: &str,
    public_key: &str,
    signature: &str,
    nonce: &Nonce,
    paths: &[String],
    out: Option<&str>,
) -> Result<bool> {
    let doc = input::read_document(doc_path, &cfg.limits)?;
    let pk = public_key_from_hex(public_key).context("invalid --public-key")?;
    let signature = input::decode_hex("--signature", signature)?;

    let sd = SelectiveDisclosure::with_config(Ed25519MessageEngine::new(), cfg.clone())?;
    let res = sd.create_proof(&doc, &pk, &signature, nonce, paths)?;

    let bundle = ProveOut {
        projected_document: res.projected_document,
        revealed_indices: res.revealed_indices,
        proof: hex::encode(res.proof),
    };
    if let Some(path) = out {
        export::write_json(path, &bundle)?;
        tracing::info!(path, "proof bundle written");
    }
    output::print(&bundle)?;
    Ok(true)
}
