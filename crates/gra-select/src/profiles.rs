//! Network profile selection
//!
//! Profiles act as level-0 subsystems; the meta node stands for the
//! stability and stealth target.

use crate::consensus::ConsensusSelector;
use crate::embed::{Embedder, NetworkProfile, ProfileEmbedder};
use crate::error::Result;
use gra_core::{ComplexVector, OptimizerConfig};
use serde::Serialize;

/// Default meta goal for profile selection
pub const PROFILE_META_GOAL: &str = "max_stability_and_stealth";

/// Result of [`ProfileSelector::select`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSelection {
    /// Chosen profile
    pub profile: Option<NetworkProfile>,
    /// Position of the chosen profile
    pub index: Option<usize>,
    /// Cosine similarity of the chosen profile to the consensus
    pub best_similarity: Option<f64>,
    /// Short diagnostic line
    pub debug: String,
}

/// Picks the profile closest to the optimized meta node
#[derive(Debug, Clone)]
pub struct ProfileSelector<E = ProfileEmbedder> {
    consensus: ConsensusSelector,
    embedder: E,
}

impl ProfileSelector {
    /// Create selector with the eight-feature embedder and 50 steps
    #[must_use]
    pub fn new() -> Self {
        let config = OptimizerConfig::new().with_bounds(50, 1e-6);
        Self {
            consensus: ConsensusSelector::new(config, PROFILE_META_GOAL)
                .with_level_names("profiles", "profile_meta")
                .with_local_goal("local profile quality (stability, latency)"),
            embedder: ProfileEmbedder,
        }
    }
}

impl Default for ProfileSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Embedder<NetworkProfile>> ProfileSelector<E> {
    /// With custom embedder
    #[must_use]
    pub fn with_embedder<F: Embedder<NetworkProfile>>(self, embedder: F) -> ProfileSelector<F> {
        ProfileSelector {
            consensus: self.consensus,
            embedder,
        }
    }

    /// With optimizer config
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.consensus = self.consensus.with_config(config);
        self
    }

    /// With meta-goal text
    #[inline]
    #[must_use]
    pub fn with_meta_goal(mut self, meta_goal: impl Into<String>) -> Self {
        self.consensus = self.consensus.with_meta_goal(meta_goal);
        self
    }

    /// Select the best profile
    ///
    /// An empty slice yields an empty selection rather than an error.
    ///
    /// # Errors
    /// Propagates embedding, configuration and engine failures
    pub fn select(&self, profiles: &[NetworkProfile]) -> Result<ProfileSelection> {
        if profiles.is_empty() {
            return Ok(ProfileSelection {
                profile: None,
                index: None,
                best_similarity: None,
                debug: "no profiles provided".to_string(),
            });
        }

        let embeddings: Vec<ComplexVector> =
            profiles.iter().map(|p| self.embedder.embed(p)).collect();
        let consensus = self.consensus.select(&embeddings)?;

        tracing::debug!(index = consensus.index, profiles = profiles.len(), "profile chosen");

        Ok(ProfileSelection {
            profile: Some(profiles[consensus.index].clone()),
            index: Some(consensus.index),
            best_similarity: Some(consensus.similarity),
            debug: format!(
                "best_cosine_similarity={:.4}, n_profiles={}",
                consensus.similarity,
                profiles.len()
            ),
        })
    }
}
