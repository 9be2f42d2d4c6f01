//! Error types for the suggestion engine.

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The item is not part of the embedding space.
    #[error("item not found in embedding space: {0}")]
    NotFound(String),

    /// An operation was called in a state that does not allow it.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Undo was requested but no selection has been made.
    #[error("nothing to undo: selection history is empty")]
    EmptyHistory,

    /// Fewer unexcluded items remain than a round needs. This is the normal
    /// end of a game, not a failure.
    #[error("only {remaining} unexcluded items remain, {required} are needed for a round")]
    InsufficientCandidates { remaining: usize, required: usize },

    /// The embedding space violates one of its structural invariants.
    #[error("invalid embedding space: {0}")]
    InvalidSpace(String),

    /// Malformed line in a word-vector file.
    #[error("failed to parse embedding file at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// True when the error only signals that the space is used up.
    pub const fn is_end_of_content(&self) -> bool {
        matches!(self, EngineError::InsufficientCandidates { .. })
    }

    /// Stable short code used in transport error bodies.
    pub const fn code(&self) -> &'static str {
        match self {
            EngineError::NotFound(_) => "not_found",
            EngineError::Precondition(_) => "precondition",
            EngineError::EmptyHistory => "empty_history",
            EngineError::InsufficientCandidates { .. } => "insufficient_candidates",
            EngineError::InvalidSpace(_) => "invalid_space",
            EngineError::Parse { .. } => "parse",
            EngineError::Io(_) => "io",
            EngineError::Config(_) => "config",
        }
    }

    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        EngineError::Precondition(message.into())
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        EngineError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_of_content_is_distinguishable() {
        let exhausted = EngineError::InsufficientCandidates {
            remaining: 3,
            required: 12,
        };
        assert!(exhausted.is_end_of_content());
        assert!(!EngineError::EmptyHistory.is_end_of_content());
        assert!(!EngineError::NotFound("x".into()).is_end_of_content());
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(EngineError::EmptyHistory.code(), "empty_history");
        assert_eq!(EngineError::NotFound("a".into()).code(), "not_found");
        assert_eq!(
            EngineError::Parse {
                line: 2,
                message: "bad".into()
            }
            .to_string(),
            "failed to parse embedding file at line 2: bad"
        );
    }
}
