//! disclosure-core
//!
//! Core primitives for selective disclosure of signed JSON documents:
//! - Canonicalization of a document into sorted scalar statements
//! - JSONPath-subset projection onto a reduced document
//! - Mapping of projected statements to revealed indices
//! - A signature engine boundary and a transparent Ed25519 reference engine

pub mod canonical;
pub mod config;
pub mod determinism;
pub mod disclosure;
pub mod document;
pub mod engine;
pub mod errors;
pub mod mapping;
pub mod nonce;
pub mod path;
pub mod pointer;
pub mod project;
pub mod version;

pub use crate::errors::{DisclosureError, DisclosureResult};

/// Domain separation labels.
/// These must remain stable across versions.
pub mod domain {
    pub const CANONICAL_SET: &str = "disclosure.v1.canonical-set";
    pub const MESSAGE: &str = "disclosure.v1.message";
    pub const MESSAGES: &str = "disclosure.v1.messages";
    pub const NONCE: &str = "disclosure.v1.nonce";
}

/// Convenience re-exports.
pub mod prelude {
    pub use crate::canonical::{
        canonicalize, canonicalize_projection, canonicalize_with, CanonicalSet, CanonicalizeOptions,
    };
    pub use crate::config::{DisclosureConfig, LimitsConfig, MatchStrategy};
    pub use crate::disclosure::{ProofResult, SelectiveDisclosure};
    pub use crate::document::parse_document;
    pub use crate::engine::SignatureEngine;
    pub use crate::mapping::{disclose, map_indices, map_indices_with, Disclosure};
    pub use crate::nonce::Nonce;
    pub use crate::path::{Match, PathExpression};
    pub use crate::pointer::{Pointer, Segment};
    pub use crate::project::{project, Projector};
    pub use crate::{DisclosureError, DisclosureResult};

    #[cfg(feature = "reference-engine")]
    pub use crate::engine::reference::Ed25519MessageEngine;
}
