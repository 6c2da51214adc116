//! Version helpers.
//!
//! Serialized artifacts (currently only reference-engine proofs) carry a
//! version string. Parsing is strict: unknown versions are rejected rather
//! than interpreted.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported {field} version: {found}")]
pub struct VersionError {
    pub field: &'static str,
    pub found: String,
}

/// Known proof versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofVersion {
    V1,
}

impl ProofVersion {
    /// Parse a proof version string (e.g. "v1").
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        match s {
            "v1" => Ok(Self::V1),
            _ => Err(VersionError {
                field: "proof",
                found: s.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_proof_v1() {
        assert_eq!(ProofVersion::parse("v1").unwrap(), ProofVersion::V1);
        assert_eq!(ProofVersion::V1.as_str(), "v1");
    }

    #[test]
    fn parse_proof_unknown() {
        let e = ProofVersion::parse("v9").unwrap_err();
        assert_eq!(e.to_string(), "unsupported proof version: v9");
    }
}
