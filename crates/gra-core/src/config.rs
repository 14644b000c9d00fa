//! Optimizer configuration
//!
//! [`OptimizerConfig`] gathers every tunable of the functional and the
//! optimizer. It deserializes from TOML with per-field defaults, so a
//! document only needs the keys it overrides.

use crate::error::{MultiverseError, Result};
use serde::{Deserialize, Serialize};

/// Functional weights and optimizer bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Base weight for level 0
    pub lambda0: f64,
    /// Per-level damping, `Λ_l = lambda0 · alpha^l`; must lie in `(0, 1]`
    pub alpha: f64,
    /// Gradient-descent learning rate `η`
    pub step_size: f64,
    /// Finite-difference perturbation `ε`
    pub fd_eps: f64,
    /// Iteration budget of the convergence loop
    pub max_steps: usize,
    /// Stop once successive functional values differ by less than this
    pub tol: f64,
    /// Distribute finite-difference probes over the rayon pool
    pub parallel: bool,
}

impl OptimizerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML document and validate
    ///
    /// # Errors
    /// - [`MultiverseError::ConfigParse`] on malformed TOML
    /// - [`MultiverseError::InvalidConfig`] if a value is out of range
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// With level weights
    #[inline]
    #[must_use]
    pub fn with_weights(mut self, lambda0: f64, alpha: f64) -> Self {
        self.lambda0 = lambda0;
        self.alpha = alpha;
        self
    }

    /// With learning rate
    #[inline]
    #[must_use]
    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    /// With finite-difference epsilon
    #[inline]
    #[must_use]
    pub fn with_fd_eps(mut self, fd_eps: f64) -> Self {
        self.fd_eps = fd_eps;
        self
    }

    /// With convergence loop bounds
    #[inline]
    #[must_use]
    pub fn with_bounds(mut self, max_steps: usize, tol: f64) -> Self {
        self.max_steps = max_steps;
        self.tol = tol;
        self
    }

    /// With parallel probing
    #[inline]
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check every field is in range
    ///
    /// # Errors
    /// Returns [`MultiverseError::InvalidConfig`] naming the first bad field
    pub fn validate(&self) -> Result<()> {
        if !self.lambda0.is_finite() {
            return Err(MultiverseError::invalid_config(format!(
                "lambda0 must be finite, got {}",
                self.lambda0
            )));
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(MultiverseError::invalid_config(format!(
                "alpha must lie in (0, 1], got {}",
                self.alpha
            )));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(MultiverseError::invalid_config(format!(
                "step_size must be positive, got {}",
                self.step_size
            )));
        }
        if !(self.fd_eps.is_finite() && self.fd_eps > 0.0) {
            return Err(MultiverseError::invalid_config(format!(
                "fd_eps must be positive, got {}",
                self.fd_eps
            )));
        }
        if self.tol.is_nan() || self.tol < 0.0 {
            return Err(MultiverseError::invalid_config(format!(
                "tol must be non-negative, got {}",
                self.tol
            )));
        }
        Ok(())
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            lambda0: 1.0,
            alpha: 0.8,
            step_size: 1e-2,
            fd_eps: 1e-4,
            max_steps: 100,
            tol: 1e-6,
            parallel: false,
        }
    }
}
