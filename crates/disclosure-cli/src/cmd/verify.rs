use anyhow::{Context, Result};
use disclosure_core::config::DisclosureConfig;
use disclosure_core::disclosure::SelectiveDisclosure;
use disclosure_core::engine::reference::{public_key_from_hex, Ed25519MessageEngine};
use disclosure_core::nonce::Nonce;

use crate::io::input;
use crate::output;

pub fn run(cfg: &DisclosureConfig, doc_path: &str, public_key: &str, signature: &str) -> Result<bool> {
    let doc = input::read_document(doc_path, &cfg.limits)?;
    let pk = public_key_from_hex(public_key).context("invalid --public-key")?;
    let signature = input::decode_hex("--signature", signature)?;

    let sd = SelectiveDisclosure::with_config(Ed25519MessageEngine::new(), cfg.clone())?;
    let ok = sd.verify(&doc, &pk, &signature)?;

    output::status(
        ok,
        if ok {
            "signature is valid"
        } else {
            "signature does not match document"
        },
    )?;
    Ok(ok)
}

pub fn run_proof(
    cfg: &DisclosureConfig,
    projected_path: &str,
    public_key: &str,
    nonce: &Nonce,
    proof: &str,
) -> Result<bool> {
    let projected = input::read_document(projected_path, &cfg.limits)?;
    let pk = public_key_from_hex(public_key).context("invalid --public-key")?;
    let proof = input::decode_hex("--proof", proof)?;

    let sd = SelectiveDisclosure::with_config(Ed25519MessageEngine::new(), cfg.clone())?;
    let ok = sd.verify_proof(&projected, &pk, nonce, &proof)?;

    output::status(
        ok,
        if ok {
            "proof is valid"
        } else {
            "proof does not match projected document"
        },
    )?;
    Ok(ok)
}
