//! Consensus answer among several text responses

use crate::consensus::ConsensusSelector;
use crate::embed::{CharHistogramEmbedder, Embedder};
use crate::error::Result;
use gra_core::{ComplexVector, OptimizerConfig};
use serde::Serialize;

/// Default meta goal for answer selection
pub const ANSWER_META_GOAL: &str = "max_consistency";

/// Result of [`AnswerSelector::select`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerSelection {
    /// Chosen answer, verbatim; empty when there were no answers
    pub chosen: String,
    /// Position of the chosen answer
    pub index: Option<usize>,
    /// Cosine similarity of the chosen answer to the consensus
    pub best_similarity: Option<f64>,
    /// Short diagnostic line
    pub debug: String,
}

impl AnswerSelection {
    fn empty() -> Self {
        Self {
            chosen: String::new(),
            index: None,
            best_similarity: None,
            debug: "no answers provided".to_string(),
        }
    }
}

/// Picks the answer most consistent with all the others
#[derive(Debug, Clone)]
pub struct AnswerSelector<E = CharHistogramEmbedder> {
    consensus: ConsensusSelector,
    embedder: E,
}

impl AnswerSelector {
    /// Create selector with the character-histogram embedder and 50 steps
    #[must_use]
    pub fn new() -> Self {
        let config = OptimizerConfig::new().with_bounds(50, 1e-6);
        Self {
            consensus: ConsensusSelector::new(config, ANSWER_META_GOAL)
                .with_level_names("local_answers", "meta_consistency"),
            embedder: CharHistogramEmbedder,
        }
    }
}

impl Default for AnswerSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Embedder<str>> AnswerSelector<E> {
    /// With custom embedder
    #[must_use]
    pub fn with_embedder<F: Embedder<str>>(self, embedder: F) -> AnswerSelector<F> {
        AnswerSelector {
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

    /// Select the consensus answer
    ///
    /// An empty slice yields an empty selection rather than an error.
    ///
    /// # Errors
    /// Propagates embedding, configuration and engine failures
    pub fn select<S: AsRef<str>>(&self, answers: &[S]) -> Result<AnswerSelection> {
        if answers.is_empty() {
            return Ok(AnswerSelection::empty());
        }

        let embeddings: Vec<ComplexVector> = answers
            .iter()
            .map(|a| self.embedder.embed(a.as_ref()))
            .collect();
        let consensus = self.consensus.select(&embeddings)?;

        tracing::debug!(index = consensus.index, answers = answers.len(), "answer chosen");

        Ok(AnswerSelection {
            chosen: answers[consensus.index].as_ref().to_string(),
            index: Some(consensus.index),
            best_similarity: Some(consensus.similarity),
            debug: format!(
                "best_cosine_similarity={:.4}, n_answers={}",
                consensus.similarity,
                answers.len()
            ),
        })
    }
}
