//! Error types for disclosure-core.
//!
//! Every failure in this crate is a local input-validation failure detected at
//! the point of occurrence and returned to the immediate caller. Nothing is
//! swallowed and nothing is folded into a `false` verification result: `false`
//! is reserved for genuine mismatches reported by a signature engine.

use thiserror::Error;

/// Result alias used across the crate.
pub type DisclosureResult<T> = Result<T, DisclosureError>;

/// Opaque error raised by a [`crate::engine::SignatureEngine`] backend.
pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum DisclosureError {
    /// Input is not a valid map/sequence/scalar tree, could not be parsed,
    /// or exceeded a configured limit.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// A path expression could not be parsed.
    #[error("invalid path expression `{expression}` at position {position}: {message}")]
    PathSyntax {
        expression: String,
        position: usize,
        message: String,
    },

    /// Two matches require incompatible container kinds at the same segment.
    #[error("projection conflict at `{pointer}`: {message}")]
    ProjectionConflict { pointer: String, message: String },

    /// A projected statement has no counterpart in the full canonical set.
    #[error("statement not found in full document: {statement}")]
    IndexMapping { statement: String },

    /// A nonce was neither text nor a byte sequence.
    #[error("invalid nonce: {0}")]
    NonceEncoding(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Signature engine failure, surfaced unchanged.
    #[error(transparent)]
    Engine(EngineError),
}

impl DisclosureError {
    pub fn malformed_document(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }

    pub fn path_syntax(expression: &str, position: usize, msg: impl Into<String>) -> Self {
        Self::PathSyntax {
            expression: expression.to_string(),
            position,
            message: msg.into(),
        }
    }

    pub fn projection_conflict(pointer: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ProjectionConflict {
            pointer: pointer.into(),
            message: msg.into(),
        }
    }

    pub fn index_mapping(statement: impl Into<String>) -> Self {
        Self::IndexMapping {
            statement: statement.into(),
        }
    }

    pub fn nonce_encoding(msg: impl Into<String>) -> Self {
        Self::NonceEncoding(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn engine<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Engine(Box::new(err))
    }

    /// Stable machine-readable code, used by the CLI's JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedDocument(_) => "document.malformed",
            Self::PathSyntax { .. } => "path.syntax",
            Self::ProjectionConflict { .. } => "projection.conflict",
            Self::IndexMapping { .. } => "mapping.not_found",
            Self::NonceEncoding(_) => "nonce.encoding",
            Self::InvalidConfig(_) => "config.invalid",
            Self::Engine(_) => "engine.failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_syntax_display_carries_position() {
        let e = DisclosureError::path_syntax("$.[", 2, "expected selector");
        let s = e.to_string();
        assert!(s.contains("$.["));
        assert!(s.contains("position 2"));
        assert_eq!(e.code(), "path.syntax");
    }

    #[test]
    fn engine_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad key bytes");
        let e = DisclosureError::engine(io);
        assert_eq!(e.to_string(), "bad key bytes");
    }
}
