//! Deterministic hashing utilities.
//!
//! All hashes are domain-separated: the domain label is prepended to the
//! payload so that digests computed for different purposes never collide.
//! Labels live in [`crate::domain`] and must remain stable across versions.

use sha2::{Digest, Sha256};

/// SHA-256 output length in bytes.
pub const DIGEST_LEN: usize = 32;

/// Hash a sequence of byte parts under a domain label.
pub fn hash_with_domain(domain: &str, parts: &[&[u8]]) -> [u8; DIGEST_LEN] {
    let mut h = Sha256::new();
    h.update(domain.as_bytes());
    for p in parts {
        h.update(p);
    }
    h.finalize().into()
}
