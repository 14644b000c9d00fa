//! Multiverse functional
//!
//! `J_multiverse(Ψ) = Σ_l Λ_l · J^(l)` with `Λ_l = lambda0 · alpha^l`, where
//! - level 0 contributes `Σ_{dim(a)=0} J_loc(ψ_a)`, `J_loc(ψ) = ½ Re⟨ψ, ψ⟩`
//! - every other level contributes its foam term `Φ^(l)` alone
//!
//! Keys whose derived level matches none of the configured levels are
//! ignored. Callers rely on this to stage auxiliary keys in a state.

use crate::config::OptimizerConfig;
use crate::error::Result;
use crate::foam::FoamFunctional;
use crate::index::{LevelAssignment, TrailingComponent};
use crate::level::{Goal, Level};
use crate::linalg::norm_sqr;
use crate::state::MultiverseState;
use num_complex::Complex64;
use std::fmt;
use std::sync::Arc;

/// Contribution of one configured level to the functional
#[derive(Debug, Clone, PartialEq)]
pub struct LevelContribution {
    /// Level this entry belongs to
    pub level: Level,
    /// Weight `Λ_l`
    pub weight: f64,
    /// Unweighted term (local sum for level 0, foam otherwise)
    pub raw: f64,
    /// `weight * raw`
    pub weighted: f64,
}

/// Scalar objective over a [`MultiverseState`]
///
/// Owns no state of its own; evaluation is a pure function of the input
/// state plus the fixed configuration.
#[derive(Clone)]
pub struct MultiverseFunctional {
    levels: Vec<Level>,
    goals: Vec<Goal>,
    lambda0: f64,
    alpha: f64,
    assignment: Arc<dyn LevelAssignment>,
    foam: FoamFunctional,
}

impl MultiverseFunctional {
    /// Create functional with `lambda0 = 1.0`, `alpha = 0.8` and the
    /// trailing-component level assignment
    #[must_use]
    pub fn new(levels: Vec<Level>, goals: Vec<Goal>) -> Self {
        Self {
            levels,
            goals,
            lambda0: 1.0,
            alpha: 0.8,
            assignment: Arc::new(TrailingComponent),
            foam: FoamFunctional::new(),
        }
    }

    /// Create functional with weights taken from a validated config
    ///
    /// # Errors
    /// Returns [`InvalidConfig`](crate::MultiverseError::InvalidConfig) if the
    /// config fails validation
    pub fn from_config(levels: Vec<Level>, goals: Vec<Goal>, config: &OptimizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(levels, goals).with_weights(config.lambda0, config.alpha))
    }

    /// With level weights
    #[inline]
    #[must_use]
    pub fn with_weights(mut self, lambda0: f64, alpha: f64) -> Self {
        self.lambda0 = lambda0;
        self.alpha = alpha;
        self
    }

    /// With level assignment strategy
    #[inline]
    #[must_use]
    pub fn with_level_fn(mut self, assignment: impl LevelAssignment + 'static) -> Self {
        self.assignment = Arc::new(assignment);
        self
    }

    /// With foam functional (e.g. carrying a custom projector)
    #[inline]
    #[must_use]
    pub fn with_foam(mut self, foam: FoamFunctional) -> Self {
        self.foam = foam;
        self
    }

    /// Configured levels
    #[inline]
    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Configured goals
    #[inline]
    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Level assignment in use
    #[inline]
    #[must_use]
    pub fn level_fn(&self) -> &dyn LevelAssignment {
        self.assignment.as_ref()
    }

    /// Level weight `Λ_l = lambda0 · alpha^l`
    #[inline]
    #[must_use]
    pub fn lambda(&self, level: u32) -> f64 {
        self.lambda0 * self.alpha.powf(f64::from(level))
    }

    /// Local cost `J_loc(ψ) = ½ Re⟨ψ, ψ⟩`
    #[inline]
    #[must_use]
    pub fn local_cost(&self, psi: &[Complex64]) -> f64 {
        // Re⟨ψ, ψ⟩ = ‖ψ‖²
        0.5 * norm_sqr(psi)
    }

    /// Unweighted term of one level
    fn level_term(&self, state: &MultiverseState, level: &Level) -> Result<f64> {
        if level.is_local() {
            Ok(state
                .iter()
                .filter(|(k, _)| self.assignment.level_of(k) == 0)
                .map(|(_, psi)| self.local_cost(psi))
                .sum())
        } else {
            self.foam.phi_level(state, level, self.assignment.as_ref())
        }
    }

    /// Evaluate `J_multiverse(Ψ)`
    ///
    /// # Errors
    /// Returns [`DimensionMismatch`](crate::MultiverseError::DimensionMismatch)
    /// if two vectors of one foam group differ in length
    pub fn evaluate(&self, state: &MultiverseState) -> Result<f64> {
        let mut total = 0.0;
        for level in &self.levels {
            total += self.lambda(level.index) * self.level_term(state, level)?;
        }
        Ok(total)
    }

    /// Per-level contributions, in configured order
    ///
    /// The `weighted` entries sum to [`evaluate`](Self::evaluate).
    ///
    /// # Errors
    /// Same as [`evaluate`](Self::evaluate)
    pub fn breakdown(&self, state: &MultiverseState) -> Result<Vec<LevelContribution>> {
        self.levels
            .iter()
            .map(|level| {
                let weight = self.lambda(level.index);
                let raw = self.level_term(state, level)?;
                Ok(LevelContribution {
                    level: level.clone(),
                    weight,
                    raw,
                    weighted: weight * raw,
                })
            })
            .collect()
    }
}

impl fmt::Debug for MultiverseFunctional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiverseFunctional")
            .field("levels", &self.levels)
            .field("goals", &self.goals.len())
            .field("lambda0", &self.lambda0)
            .field("alpha", &self.alpha)
            .finish_non_exhaustive()
    }
}
