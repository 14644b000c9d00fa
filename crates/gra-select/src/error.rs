//! Error types for the selection wrappers

use gra_core::MultiverseError;

/// Convenience alias for selection results
pub type Result<T> = std::result::Result<T, SelectError>;

/// Selection error
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    /// Candidate list unusable as given
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Candidate embedding length differs from the first one
    #[error("embedding {index} has length {actual}, expected {expected}")]
    InconsistentEmbedding {
        /// Position of the offending candidate
        index: usize,
        /// Length of the first embedding
        expected: usize,
        /// Length of the offending embedding
        actual: usize,
    },

    /// Failure inside the multiverse engine
    #[error(transparent)]
    Engine(#[from] MultiverseError),
}

impl SelectError {
    /// Create invalid input error
    #[inline]
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Check if the engine rejected its configuration
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Engine(e) if e.is_config_error())
    }
}
