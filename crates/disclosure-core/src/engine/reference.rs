//! Transparent reference engine: Ed25519 over a digest of the message list.
//!
//! This backend exists for development, tests and the CLI. It implements the
//! [`SignatureEngine`] contract with ordinary primitives:
//!
//! - each message is hashed as `H("disclosure.v1.message" || m_i)`
//! - the signed payload is `H("disclosure.v1.messages" || u64_be(n) || d_0 || ... || d_{n-1})`
//! - a proof reveals some messages and carries the digests of the others,
//!   the original signature and a hash binding the nonce to both
//!
//! Proofs are NOT zero-knowledge. Withheld digests of low-entropy values
//! (booleans, small numbers, short strings) can be recovered by guessing,
//! and the same signature appears in every proof. Use a BBS+ engine where
//! unlinkability or hiding matters.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::determinism::hashing::{hash_with_domain, DIGEST_LEN};
use crate::domain;
use crate::engine::SignatureEngine;
use crate::version::{ProofVersion, VersionError};

type Digest = [u8; DIGEST_LEN];

#[derive(Debug, Error)]
pub enum ReferenceEngineError {
    #[error("invalid {what}: {reason}")]
    InvalidEncoding { what: &'static str, reason: String },

    #[error("revealed index {index} out of range for {count} messages")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("signature does not verify over the message list")]
    SignatureMismatch,

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error("proof serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

fn invalid(what: &'static str, reason: impl ToString) -> ReferenceEngineError {
    ReferenceEngineError::InvalidEncoding {
        what,
        reason: reason.to_string(),
    }
}

/// Serialized proof of the reference engine. Byte fields are lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceProofV1 {
    pub version: String,
    pub message_count: u64,
    /// Revealed positions, in the order the revealed messages are supplied.
    pub revealed: Vec<u64>,
    /// Digests of withheld messages, by ascending position.
    pub hidden_digests: Vec<String>,
    pub signature: String,
    pub nonce_binding: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519MessageEngine;

impl Ed25519MessageEngine {
    pub fn new() -> Self {
        Self
    }
}

fn message_digest(message: &[u8]) -> Digest {
    hash_with_domain(domain::MESSAGE, &[message])
}

fn payload(digests: &[Digest]) -> Digest {
    let count = (digests.len() as u64).to_be_bytes();
    let mut parts: Vec<&[u8]> = Vec::with_capacity(digests.len() + 1);
    parts.push(&count);
    parts.extend(digests.iter().map(|d| d.as_slice()));
    hash_with_domain(domain::MESSAGES, &parts)
}

fn nonce_binding(nonce: &[u8], signature: &[u8; 64], revealed: &[u64]) -> Digest {
    let indices: Vec<u8> = revealed.iter().flat_map(|i| i.to_be_bytes()).collect();
    hash_with_domain(domain::NONCE, &[nonce, signature.as_slice(), indices.as_slice()])
}

fn parse_signature(bytes: &[u8]) -> Result<Signature, ReferenceEngineError> {
    let arr: [u8; 64] = bytes
        .try_into()
        .map_err(|_| invalid("signature", format!("expected 64 bytes, got {}", bytes.len())))?;
    Ok(Signature::from_bytes(&arr))
}

fn decode_fixed<const N: usize>(what: &'static str, s: &str) -> Result<[u8; N], ReferenceEngineError> {
    let bytes = hex::decode(s).map_err(|e| invalid(what, e))?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| invalid(what, format!("expected {N} bytes, got {}", bytes.len())))
}

impl SignatureEngine for Ed25519MessageEngine {
    type SigningKey = SigningKey;
    type PublicKey = VerifyingKey;
    type Error = ReferenceEngineError;

    fn sign(&self, messages: &[&[u8]], key: &SigningKey) -> Result<Vec<u8>, Self::Error> {
        let digests: Vec<Digest> = messages.iter().map(|m| message_digest(m)).collect();
        Ok(key.sign(&payload(&digests)).to_bytes().to_vec())
    }

    fn verify(&self, messages: &[&[u8]], key: &VerifyingKey, signature: &[u8]) -> Result<bool, Self::Error> {
        let sig = parse_signature(signature)?;
        let digests: Vec<Digest> = messages.iter().map(|m| message_digest(m)).collect();
        Ok(key.verify_strict(&payload(&digests), &sig).is_ok())
    }

    fn create_proof(
        &self,
        messages: &[&[u8]],
        key: &VerifyingKey,
        signature: &[u8],
        nonce: &[u8],
        revealed: &[usize],
    ) -> Result<Vec<u8>, Self::Error> {
        let sig = parse_signature(signature)?;
        let digests: Vec<Digest> = messages.iter().map(|m| message_digest(m)).collect();
        if key.verify_strict(&payload(&digests), &sig).is_err() {
            return Err(ReferenceEngineError::SignatureMismatch);
        }

        let mut is_revealed = vec![false; messages.len()];
        for &index in revealed {
            match is_revealed.get_mut(index) {
                Some(slot) => *slot = true,
                None => {
                    return Err(ReferenceEngineError::IndexOutOfRange {
                        index,
                        count: messages.len(),
                    })
                }
            }
        }

        let revealed: Vec<u64> = revealed.iter().map(|&i| i as u64).collect();
        let sig_bytes = sig.to_bytes();
        let proof = ReferenceProofV1 {
            version: ProofVersion::V1.as_str().to_string(),
            message_count: messages.len() as u64,
            hidden_digests: digests
                .iter()
                .zip(&is_revealed)
                .filter(|(_, shown)| !**shown)
                .map(|(d, _)| hex::encode(d))
                .collect(),
            nonce_binding: hex::encode(nonce_binding(nonce, &sig_bytes, &revealed)),
            signature: hex::encode(sig_bytes),
            revealed,
        };
        Ok(serde_json::to_vec(&proof)?)
    }

    fn verify_proof(
        &self,
        revealed_messages: &[&[u8]],
        key: &VerifyingKey,
        nonce: &[u8],
        proof: &[u8],
    ) -> Result<bool, Self::Error> {
        let proof: ReferenceProofV1 = serde_json::from_slice(proof)?;
        ProofVersion::parse(&proof.version)?;

        let count = usize::try_from(proof.message_count)
            .map_err(|_| invalid("proof", "message count does not fit in memory"))?;
        if count > proof.revealed.len() + proof.hidden_digests.len() {
            return Err(invalid(
                "proof",
                format!("message count {count} exceeds revealed plus withheld entries"),
            ));
        }
        let sig_bytes: [u8; 64] = decode_fixed("proof signature", &proof.signature)?;
        let binding: Digest = decode_fixed("proof nonce binding", &proof.nonce_binding)?;

        if revealed_messages.len() != proof.revealed.len() {
            return Ok(false);
        }

        let mut slots: Vec<Option<Digest>> = vec![None; count];
        for (&index, message) in proof.revealed.iter().zip(revealed_messages) {
            let index = usize::try_from(index).unwrap_or(usize::MAX);
            let slot = slots
                .get_mut(index)
                .ok_or(ReferenceEngineError::IndexOutOfRange { index, count })?;
            let d = message_digest(message);
            match *slot {
                Some(existing) if existing != d => return Ok(false),
                _ => *slot = Some(d),
            }
        }

        let withheld = slots.iter().filter(|s| s.is_none()).count();
        if withheld != proof.hidden_digests.len() {
            return Err(invalid(
                "proof",
                format!(
                    "expected {withheld} withheld digests, got {}",
                    proof.hidden_digests.len()
                ),
            ));
        }
        let mut hidden = proof.hidden_digests.iter();
        let mut digests = Vec::with_capacity(count);
        for slot in slots {
            match slot {
                Some(d) => digests.push(d),
                None => {
                    let h = hidden
                        .next()
                        .ok_or_else(|| invalid("proof", "withheld digest list exhausted"))?;
                    digests.push(decode_fixed::<DIGEST_LEN>("withheld digest", h)?);
                }
            }
        }

        if nonce_binding(nonce, &sig_bytes, &proof.revealed) != binding {
            return Ok(false);
        }
        let sig = Signature::from_bytes(&sig_bytes);
        Ok(key.verify_strict(&payload(&digests), &sig).is_ok())
    }
}

/// Generate a fresh signing key from the operating system RNG.
pub fn generate_signing_key() -> SigningKey {
    SigningKey::generate(&mut rand_core::OsRng)
}

/// Parse a 32-byte hex secret key.
pub fn signing_key_from_hex(s: &str) -> Result<SigningKey, ReferenceEngineError> {
    let bytes: [u8; 32] = decode_fixed("signing key", s.trim())?;
    Ok(SigningKey::from_bytes(&bytes))
}

/// Parse a 32-byte hex public key.
pub fn public_key_from_hex(s: &str) -> Result<VerifyingKey, ReferenceEngineError> {
    let bytes: [u8; 32] = decode_fixed("public key", s.trim())?;
    VerifyingKey::from_bytes(&bytes).map_err(|e| invalid("public key", e))
}

pub fn signing_key_to_hex(key: &SigningKey) -> String {
    hex::encode(key.to_bytes())
}

pub fn public_key_to_hex(key: &VerifyingKey) -> String {
    hex::encode(key.to_bytes())
}
