use anyhow::Result;
use disclosure_core::engine::reference::{generate_signing_key, public_key_to_hex, signing_key_to_hex};
use serde::Serialize;

use crate::output;

#[derive(Debug, Serialize)]
pub struct KeygenOut {
    pub signing_key: String,
    pub public_key: String,
}

pub fn run() -> Result<bool> {
    let sk = generate_signing_key();
    output::print(&KeygenOut {
        signing_key: signing_key_to_hex(&sk),
        public_key: public_key_to_hex(&sk.verifying_key()),
    })?;
    Ok(true)
}
