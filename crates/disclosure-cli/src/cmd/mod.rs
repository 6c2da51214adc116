use anyhow::Result;
use disclosure_core::config::{validate_config, DisclosureConfig, MatchStrategy};
use disclosure_core::nonce::Nonce;

use crate::args::{Cli, Command};

mod canonicalize;
mod keygen;
mod project;
mod prove;
mod sign;
mod verify;

/// Build the core configuration from global flags.
pub fn config_from(cli: &Cli) -> Result<DisclosureConfig> {
    let mut cfg = DisclosureConfig::default();
    if let Some(depth) = cli.max_depth {
        cfg.limits.max_depth = depth;
    }
    if cli.consume_once {
        cfg.mapping = MatchStrategy::ConsumeOnce;
    }
    validate_config(&cfg)?;
    Ok(cfg)
}

fn nonce_arg(nonce: &str, hex: bool) -> Result<Nonce> {
    if hex {
        Ok(Nonce::from_hex(nonce)?)
    } else {
        Ok(Nonce::from(nonce))
    }
}

/// Run a command. `Ok(false)` means a verification came back negative.
pub fn dispatch(cli: Cli) -> Result<bool> {
    let cfg = config_from(&cli)?;
    tracing::debug!(
        max_depth = cfg.limits.max_depth,
        strategy = cfg.mapping.as_str(),
        "configuration resolved"
    );

    match cli.command {
        Command::Keygen => keygen::run(),
        Command::Canonicalize { doc } => canonicalize::run(&cfg, &doc),
        Command::Project { doc, paths } => project::run(&cfg, &doc, &paths),
        Command::Indices { doc, paths } => project::run_indices(&cfg, &doc, &paths),
        Command::Sign { doc, key } => sign::run(&cfg, &doc, &key),
        Command::Verify {
            doc,
            public_key,
            signature,
        } => verify::run(&cfg, &doc, &public_key, &signature),
        Command::Prove {
            doc,
            public_key,
            signature,
            nonce,
            hex_nonce,
            paths,
            out,
        } => {
            let nonce = nonce_arg(&nonce, hex_nonce)?;
            prove::run(&cfg, &doc, &public_key, &signature, &nonce, &paths, out.as_deref())
        }
        Command::VerifyProof {
            projected,
            public_key,
            nonce,
            hex_nonce,
            proof,
        } => {
            let nonce = nonce_arg(&nonce, hex_nonce)?;
            verify::run_proof(&cfg, &projected, &public_key, &nonce, &proof)
        }
    }
}
