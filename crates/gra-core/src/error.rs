//! Error types for the multiverse engine
//!
//! Every fallible operation in the crate reports one of these. None of them
//! are recovered from internally; they propagate unchanged to the caller.

use crate::index::MultiIndex;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, MultiverseError>;

/// Main multiverse error type
#[derive(Debug, thiserror::Error)]
pub enum MultiverseError {
    /// Read of a multi-index that is not present in the state
    #[error("key not found: {0}")]
    KeyNotFound(MultiIndex),

    /// Two vectors combined in one operation have different lengths
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Length of the left operand
        left: usize,
        /// Length of the right operand
        right: usize,
    },

    /// Empty input where at least one element is required
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration value outside its admissible range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration document could not be parsed
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl MultiverseError {
    /// Create dimension mismatch error
    #[inline]
    #[must_use]
    pub fn dimension_mismatch(left: usize, right: usize) -> Self {
        Self::DimensionMismatch { left, right }
    }

    /// Create invalid input error
    #[inline]
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create invalid configuration error
    #[inline]
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Check if error is a missing key
    #[inline]
    #[must_use]
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound(_))
    }

    /// Check if error is a length mismatch
    #[inline]
    #[must_use]
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. })
    }

    /// Check if error comes from configuration loading or validation
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig(_) | Self::ConfigParse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_not_found_display() {
        let err = MultiverseError::KeyNotFound(MultiIndex::from([3, 1]));
        assert_eq!(err.to_string(), "key not found: (3, 1)");
        assert!(err.is_key_not_found());
    }

    #[test]
    fn dimension_mismatch_display() {
        let err = MultiverseError::dimension_mismatch(2, 3);
        assert!(err.to_string().contains("2 vs 3"));
        assert!(err.is_dimension_mismatch());
        assert!(!err.is_config_error());
    }

    #[test]
    fn config_errors_classified() {
        assert!(MultiverseError::invalid_config("alpha").is_config_error());
        assert!(!MultiverseError::invalid_input("empty").is_config_error());
    }
}
