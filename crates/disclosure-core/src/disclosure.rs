//! Selective disclosure over documents, on top of a [`SignatureEngine`].
//!
//! The signature covers the canonical statements of the full document. A
//! proof reveals the statements of a projection of that document, located in
//! the full canonical set by [`crate::mapping`].

use serde_json::Value;

use crate::canonical::{canonicalize_projection, canonicalize_with, CanonicalizeOptions};
use crate::config::{validate_config, DisclosureConfig};
use crate::engine::SignatureEngine;
use crate::errors::{DisclosureError, DisclosureResult};
use crate::mapping;
use crate::nonce::Nonce;

/// Output of [`SelectiveDisclosure::create_proof`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProofResult {
    /// The document a verifier receives; its statements are the revealed ones.
    pub projected_document: Value,
    pub proof: Vec<u8>,
    pub revealed_indices: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct SelectiveDisclosure<E> {
    engine: E,
    config: DisclosureConfig,
}

impl<E: SignatureEngine> SelectiveDisclosure<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            config: DisclosureConfig::default(),
        }
    }

    pub fn with_config(engine: E, config: DisclosureConfig) -> DisclosureResult<Self> {
        validate_config(&config)?;
        Ok(Self { engine, config })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &DisclosureConfig {
        &self.config
    }

    fn options(&self) -> CanonicalizeOptions {
        CanonicalizeOptions::from(&self.config.limits)
    }

    /// Sign the canonical statements of `doc`.
    pub fn sign(&self, doc: &Value, key: &E::SigningKey) -> DisclosureResult<Vec<u8>> {
        let set = canonicalize_with(doc, &self.options())?;
        let signature = self
            .engine
            .sign(&set.messages(), key)
            .map_err(DisclosureError::engine)?;
        tracing::debug!(statements = set.len(), "document signed");
        Ok(signature)
    }

    pub fn verify(&self, doc: &Value, key: &E::PublicKey, signature: &[u8]) -> DisclosureResult<bool> {
        let set = canonicalize_with(doc, &self.options())?;
        self.engine
            .verify(&set.messages(), key, signature)
            .map_err(DisclosureError::engine)
    }

    /// Project `doc` onto `paths` and derive a proof for the projected
    /// statements.
    pub fn create_proof<S: AsRef<str>>(
        &self,
        doc: &Value,
        key: &E::PublicKey,
        signature: &[u8],
        nonce: &Nonce,
        paths: &[S],
    ) -> DisclosureResult<ProofResult> {
        let full = canonicalize_with(doc, &self.options())?;
        let disclosure = mapping::disclose_over(doc, &full, paths, &self.config)?;

        let proof = self
            .engine
            .create_proof(
                &full.messages(),
                key,
                signature,
                nonce.as_bytes(),
                &disclosure.indices,
            )
            .map_err(DisclosureError::engine)?;

        tracing::debug!(
            revealed = disclosure.indices.len(),
            total = full.len(),
            "proof created"
        );
        Ok(ProofResult {
            projected_document: disclosure.projected,
            proof,
            revealed_indices: disclosure.indices,
        })
    }

    /// Verify a proof against a projected document. Vacant sequence slots of
    /// the projection are not part of the revealed statements.
    pub fn verify_proof(
        &self,
        projected: &Value,
        key: &E::PublicKey,
        nonce: &Nonce,
        proof: &[u8],
    ) -> DisclosureResult<bool> {
        let set = canonicalize_projection(projected, &self.options())?;
        self.engine
            .verify_proof(&set.messages(), key, nonce.as_bytes(), proof)
            .map_err(DisclosureError::engine)
    }
}

#[cfg(all(test, feature = "reference-engine"))]
mod tests {
    use super::*;
    use crate::engine::reference::Ed25519MessageEngine;
    use assert_matches::assert_matches;
    use ed25519_dalek::SigningKey;
    use serde_json::json;

    fn doc() -> Value {
        json!({"name": "Jane", "age": 30, "tags": ["a", "b"]})
    }

    #[test]
    fn sign_then_verify() {
        let sd = SelectiveDisclosure::new(Ed25519MessageEngine::new());
        let sk = SigningKey::from_bytes(&[1u8; 32]);
        let sig = sd.sign(&doc(), &sk).unwrap();
        assert!(sd.verify(&doc(), &sk.verifying_key(), &sig).unwrap());
        assert!(!sd.verify(&json!({"name": "John"}), &sk.verifying_key(), &sig).unwrap());
    }

    #[test]
    fn proof_round_trip() {
        let sd = SelectiveDisclosure::new(Ed25519MessageEngine::new());
        let sk = SigningKey::from_bytes(&[1u8; 32]);
        let pk = sk.verifying_key();
        let sig = sd.sign(&doc(), &sk).unwrap();
        let nonce = Nonce::from("123");

        let res = sd.create_proof(&doc(), &pk, &sig, &nonce, &["$.tags"]).unwrap();
        assert_eq!(res.projected_document, json!({"tags": ["a", "b"]}));
        assert_eq!(res.revealed_indices, vec![2, 3]);
        assert!(sd.verify_proof(&res.projected_document, &pk, &nonce, &res.proof).unwrap());
        assert!(!sd
            .verify_proof(&res.projected_document, &pk, &Nonce::from("124"), &res.proof)
            .unwrap());
    }

    #[test]
    fn proof_over_later_sequence_element() {
        let sd = SelectiveDisclosure::new(Ed25519MessageEngine::new());
        let sk = SigningKey::from_bytes(&[1u8; 32]);
        let pk = sk.verifying_key();
        let sig = sd.sign(&doc(), &sk).unwrap();
        let nonce = Nonce::from("123");

        let res = sd.create_proof(&doc(), &pk, &sig, &nonce, &["$.tags[1]"]).unwrap();
        assert_eq!(res.projected_document, json!({"tags": [null, "b"]}));
        assert_eq!(res.revealed_indices, vec![3]);
        assert!(sd.verify_proof(&res.projected_document, &pk, &nonce, &res.proof).unwrap());
    }

    #[test]
    fn engine_errors_are_surfaced() {
        let sd = SelectiveDisclosure::new(Ed25519MessageEngine::new());
        let pk = SigningKey::from_bytes(&[1u8; 32]).verifying_key();
        let err = sd.verify(&doc(), &pk, b"short").unwrap_err();
        assert_matches!(err, DisclosureError::Engine(_));
        assert!(err.to_string().contains("signature"));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = DisclosureConfig::default();
        cfg.limits.max_statements = 0;
        let res = SelectiveDisclosure::with_config(Ed25519MessageEngine::new(), cfg);
        assert_matches!(res, Err(DisclosureError::InvalidConfig(_)));
    }
}
