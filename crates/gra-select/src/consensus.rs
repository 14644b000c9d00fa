//! Two-level consensus over candidate embeddings
//!
//! Candidates become level-0 components `(i, 0)`; a single meta node
//! `(0, 1)` starts at their mean. After optimization the candidate whose
//! embedding is most cosine-similar to the meta node wins.

use crate::error::{Result, SelectError};
use gra_core::linalg::{cosine_similarity, mean};
use gra_core::{
    ComplexVector, Goal, Level, MultiIndex, MultiverseFunctional, MultiverseOptimizer,
    MultiverseState, OptimizerConfig,
};

/// Key of the meta node
const META_NODE: [u32; 2] = [0, 1];

/// Outcome of a consensus run
#[derive(Debug, Clone)]
pub struct Consensus {
    /// Position of the winning candidate
    pub index: usize,
    /// Its cosine similarity to the optimized meta node
    pub similarity: f64,
    /// Optimized state
    pub state: MultiverseState,
}

/// Runs the multiverse optimizer over a candidate set
#[derive(Debug, Clone)]
pub struct ConsensusSelector {
    config: OptimizerConfig,
    meta_goal: String,
    local_level: String,
    meta_level: String,
    local_goal: String,
}

impl ConsensusSelector {
    /// Create selector from optimizer config and meta-goal text
    #[must_use]
    pub fn new(config: OptimizerConfig, meta_goal: impl Into<String>) -> Self {
        Self {
            config,
            meta_goal: meta_goal.into(),
            local_level: "local".to_string(),
            meta_level: "meta".to_string(),
            local_goal: "local plausibility".to_string(),
        }
    }

    /// With level names
    #[inline]
    #[must_use]
    pub fn with_level_names(mut self, local: impl Into<String>, meta: impl Into<String>) -> Self {
        self.local_level = local.into();
        self.meta_level = meta.into();
        self
    }

    /// With description of the local goal
    #[inline]
    #[must_use]
    pub fn with_local_goal(mut self, description: impl Into<String>) -> Self {
        self.local_goal = description.into();
        self
    }

    /// With meta-goal text
    #[inline]
    #[must_use]
    pub fn with_meta_goal(mut self, meta_goal: impl Into<String>) -> Self {
        self.meta_goal = meta_goal.into();
        self
    }

    /// With optimizer config
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Optimizer config
    #[inline]
    #[must_use]
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Meta-goal text
    #[inline]
    #[must_use]
    pub fn meta_goal(&self) -> &str {
        &self.meta_goal
    }

    /// Levels and goals of the two-tier functional
    fn levels_and_goals(&self) -> (Vec<Level>, Vec<Goal>) {
        let local = Level::new(0, self.local_level.clone());
        let meta = Level::new(1, self.meta_level.clone());
        let goals = vec![
            Goal::new(local.clone(), self.local_goal.clone()),
            Goal::new(meta.clone(), format!("meta goal: {}", self.meta_goal)),
        ];
        (vec![local, meta], goals)
    }

    /// Initial state: candidates at `(i, 0)`, their mean at `(0, 1)`
    fn initial_state(embeddings: &[ComplexVector]) -> Result<MultiverseState> {
        let expected = embeddings.first().map_or(0, Vec::len);
        let mut state = MultiverseState::new();

        for (index, embedding) in embeddings.iter().enumerate() {
            if embedding.len() != expected {
                return Err(SelectError::InconsistentEmbedding {
                    index,
                    expected,
                    actual: embedding.len(),
                });
            }
            let slot = u32::try_from(index)
                .map_err(|_| SelectError::invalid_input("too many candidates"))?;
            state.set([slot, 0], embedding.clone());
        }

        state.set(META_NODE, mean(embeddings)?);
        Ok(state)
    }

    /// Optimize and pick the candidate closest to the meta node
    ///
    /// Ties keep the earliest candidate; a NaN similarity never wins.
    ///
    /// # Errors
    /// - [`SelectError::InvalidInput`] if `embeddings` is empty
    /// - [`SelectError::InconsistentEmbedding`] if lengths differ
    /// - [`SelectError::Engine`] for invalid config or engine failure
    pub fn select(&self, embeddings: &[ComplexVector]) -> Result<Consensus> {
        if embeddings.is_empty() {
            return Err(SelectError::invalid_input("no embeddings provided"));
        }

        let state = Self::initial_state(embeddings)?;
        let (levels, goals) = self.levels_and_goals();
        let functional = MultiverseFunctional::from_config(levels, goals, &self.config)?;
        let optimizer = MultiverseOptimizer::from_config(functional, &self.config)?;

        let report =
            optimizer.run_with_report(&state, self.config.max_steps, self.config.tol, None)?;
        let meta = report.state.get(&MultiIndex::from(META_NODE))?;

        let mut index = 0;
        let mut similarity = -1.0;
        for (i, embedding) in embeddings.iter().enumerate() {
            let sim = cosine_similarity(embedding, meta)?;
            if sim > similarity {
                similarity = sim;
                index = i;
            }
        }

        tracing::debug!(
            index,
            similarity,
            candidates = embeddings.len(),
            steps = report.steps,
            converged = report.converged,
            goal = %self.meta_goal,
            "consensus selected"
        );

        Ok(Consensus {
            index,
            similarity,
            state: report.state,
        })
    }
}
