//! Foam (interference) term
//!
//! `Φ^(l)(Ψ) = Σ_{a≠b, dim(a)=dim(b)=l} |⟨ψ_a, P ψ_b⟩|²`
//!
//! The sum runs over ordered pairs, so each unordered pair contributes
//! twice. Expected values elsewhere in the workspace depend on that count.

use crate::error::Result;
use crate::index::LevelAssignment;
use crate::level::Level;
use crate::linalg::vdot;
use crate::state::MultiverseState;
use num_complex::Complex64;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Operator applied to the second vector of each foam pair
///
/// Closures `Fn(&[Complex64]) -> Vec<Complex64>` implement it directly.
pub trait Projector: Send + Sync {
    /// Apply the projector
    fn project<'a>(&self, vector: &'a [Complex64]) -> Cow<'a, [Complex64]>;
}

impl<F> Projector for F
where
    F: Fn(&[Complex64]) -> Vec<Complex64> + Send + Sync,
{
    #[inline]
    fn project<'a>(&self, vector: &'a [Complex64]) -> Cow<'a, [Complex64]> {
        Cow::Owned(self(vector))
    }
}

/// Identity projector (default); borrows its input
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProjector;

impl Projector for IdentityProjector {
    #[inline]
    fn project<'a>(&self, vector: &'a [Complex64]) -> Cow<'a, [Complex64]> {
        Cow::Borrowed(vector)
    }
}

/// Pairwise interference among components of one level
#[derive(Clone)]
pub struct FoamFunctional {
    projector: Arc<dyn Projector>,
}

impl FoamFunctional {
    /// Create foam functional with the identity projector
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            projector: Arc::new(IdentityProjector),
        }
    }

    /// With custom projector
    #[inline]
    #[must_use]
    pub fn with_projector(projector: impl Projector + 'static) -> Self {
        Self {
            projector: Arc::new(projector),
        }
    }

    /// Foam value `Φ^(l)` for one level
    ///
    /// Levels with fewer than two members contribute `0.0`.
    ///
    /// # Errors
    /// Returns [`DimensionMismatch`](crate::MultiverseError::DimensionMismatch)
    /// if any pair has incompatible lengths
    pub fn phi_level(
        &self,
        state: &MultiverseState,
        level: &Level,
        assignment: &dyn LevelAssignment,
    ) -> Result<f64> {
        let members: Vec<&[Complex64]> = state
            .iter()
            .filter(|(k, _)| assignment.level_of(k) == level.index)
            .map(|(_, v)| v)
            .collect();

        if members.len() < 2 {
            return Ok(0.0);
        }

        // P(ψ_b) only depends on b, project once per member
        let projected: Vec<Cow<'_, [Complex64]>> =
            members.iter().map(|&v| self.projector.project(v)).collect();

        let mut total = 0.0;
        for (i, psi_a) in members.iter().enumerate() {
            for (j, p_psi_b) in projected.iter().enumerate() {
                if i == j {
                    continue;
                }
                total += vdot(psi_a, p_psi_b)?.norm_sqr();
            }
        }
        Ok(total)
    }
}

impl Default for FoamFunctional {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FoamFunctional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoamFunctional").finish_non_exhaustive()
    }
}
