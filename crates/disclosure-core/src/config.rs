//! Configuration structures for disclosure-core.
//!
//! Configuration objects are explicit and passed by the caller. The core crate
//! does not read environment variables: two calls with the same document and
//! the same configuration always produce the same canonical set.

use crate::errors::{DisclosureError, DisclosureResult};

/// Global configuration container.
#[derive(Debug, Clone, Default)]
pub struct DisclosureConfig {
    pub limits: LimitsConfig,
    pub mapping: MatchStrategy,
}

/// Resource and complexity limits.
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    /// Maximum size of a JSON document accepted by the parsing helpers.
    pub max_json_bytes: usize,
    /// Maximum container nesting depth of a document.
    pub max_depth: usize,
    /// Maximum number of statements a single document may flatten into.
    pub max_statements: usize,
    /// Maximum length of a single path expression, in bytes.
    pub max_expression_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_json_bytes: 2 * 1024 * 1024,
            max_depth: 128,
            max_statements: 100_000,
            max_expression_len: 4096,
        }
    }
}

/// How projected statements are located in the full canonical set when the
/// full set holds duplicate statement texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Every projected statement maps to the first equal full statement.
    #[default]
    FirstMatch,
    /// Each full-set position is used at most once; repeated projected
    /// statements map to successive duplicate positions.
    ConsumeOnce,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstMatch => "first-match",
            Self::ConsumeOnce => "consume-once",
        }
    }

    pub fn parse(s: &str) -> DisclosureResult<Self> {
        match s {
            "first-match" => Ok(Self::FirstMatch),
            "consume-once" => Ok(Self::ConsumeOnce),
            _ => Err(DisclosureError::invalid_config(format!(
                "unsupported match strategy: {s}"
            ))),
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &DisclosureConfig) -> DisclosureResult<()> {
    if cfg.limits.max_json_bytes == 0 {
        return Err(DisclosureError::invalid_config(
            "max_json_bytes must be greater than zero",
        ));
    }

    if cfg.limits.max_depth == 0 {
        return Err(DisclosureError::invalid_config(
            "max_depth must be greater than zero",
        ));
    }

    if cfg.limits.max_statements == 0 {
        return Err(DisclosureError::invalid_config(
            "max_statements must be greater than zero",
        ));
    }

    if cfg.limits.max_expression_len < 1 {
        return Err(DisclosureError::invalid_config(
            "max_expression_len must allow at least the root selector",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = DisclosureConfig::default();
        validate_config(&cfg).unwrap();
        assert_eq!(cfg.mapping, MatchStrategy::FirstMatch);
    }

    #[test]
    fn zero_depth_detected() {
        let mut cfg = DisclosureConfig::default();
        cfg.limits.max_depth = 0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn strategy_names_roundtrip() {
        for s in [MatchStrategy::FirstMatch, MatchStrategy::ConsumeOnce] {
            assert_eq!(MatchStrategy::parse(s.as_str()).unwrap(), s);
        }
        assert!(MatchStrategy::parse("best-effort").is_err());
    }
}
