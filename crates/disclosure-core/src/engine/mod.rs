//! Signature engine boundary.
//!
//! The disclosure layer never signs or proves anything itself. It hands the
//! canonical message list (and, for proofs, the revealed indices) to a
//! [`SignatureEngine`], which is expected to implement a multi-message
//! signature scheme with selective-disclosure proofs, such as BBS+.
//!
//! Engines report malformed input (bad key, signature or proof encodings) as
//! `Err`, and a well-formed but non-matching signature or proof as `Ok(false)`.

#[cfg(feature = "reference-engine")]
pub mod reference;

/// Multi-message signature scheme with selective-disclosure proofs.
pub trait SignatureEngine {
    type SigningKey;
    type PublicKey;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sign the full ordered message list.
    fn sign(&self, messages: &[&[u8]], key: &Self::SigningKey) -> Result<Vec<u8>, Self::Error>;

    fn verify(
        &self,
        messages: &[&[u8]],
        key: &Self::PublicKey,
        signature: &[u8],
    ) -> Result<bool, Self::Error>;

    /// Derive a proof revealing only the messages at `revealed`.
    ///
    /// `revealed` lists positions into `messages`, in the order the verifier
    /// will receive the revealed messages.
    fn create_proof(
        &self,
        messages: &[&[u8]],
        key: &Self::PublicKey,
        signature: &[u8],
        nonce: &[u8],
        revealed: &[usize],
    ) -> Result<Vec<u8>, Self::Error>;

    /// Check a proof against the revealed messages, in revealed order.
    fn verify_proof(
        &self,
        revealed_messages: &[&[u8]],
        key: &Self::PublicKey,
        nonce: &[u8],
        proof: &[u8],
    ) -> Result<bool, Self::Error>;
}
