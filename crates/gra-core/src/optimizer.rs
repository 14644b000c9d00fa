//! Finite-difference gradient descent over a [`MultiverseState`]
//!
//! Each step estimates every partial derivative with a central difference
//!
//! `∂J/∂ψ_k[i] ≈ (J(ψ + ε e_i) − J(ψ − ε e_i)) / 2ε`
//!
//! which costs two full functional evaluations per scalar component. The
//! perturbation moves the real part of the component only. Every probe
//! evaluates its own private copy of the state, so probes are independent
//! and may run on the rayon pool. The gradient is assembled only once all
//! probes of a step have returned.

use crate::config::OptimizerConfig;
use crate::error::Result;
use crate::functional::MultiverseFunctional;
use crate::linalg::sub_scaled;
use crate::state::MultiverseState;
use num_complex::Complex64;
use rayon::prelude::*;

/// Outcome of a convergence run
#[derive(Debug, Clone)]
pub struct OptimizationReport {
    /// Final state
    pub state: MultiverseState,
    /// Number of steps taken
    pub steps: usize,
    /// Functional value of the input state
    pub initial_value: f64,
    /// Functional value of `state`
    pub final_value: f64,
    /// Whether the tolerance test stopped the loop
    pub converged: bool,
}

/// Gradient-descent optimizer for `J_multiverse`
#[derive(Debug, Clone)]
pub struct MultiverseOptimizer {
    functional: MultiverseFunctional,
    step_size: f64,
    fd_eps: f64,
    parallel: bool,
}

impl MultiverseOptimizer {
    /// Create optimizer with `step_size = 1e-2` and `fd_eps = 1e-4`
    #[must_use]
    pub fn new(functional: MultiverseFunctional) -> Self {
        Self {
            functional,
            step_size: 1e-2,
            fd_eps: 1e-4,
            parallel: false,
        }
    }

    /// Create optimizer from a validated config
    ///
    /// Only the optimizer fields are read; the functional keeps its own
    /// weights.
    ///
    /// # Errors
    /// Returns [`InvalidConfig`](crate::MultiverseError::InvalidConfig) if the
    /// config fails validation
    pub fn from_config(functional: MultiverseFunctional, config: &OptimizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(functional)
            .with_step_size(config.step_size)
            .with_fd_eps(config.fd_eps)
            .with_parallel(config.parallel))
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

    /// With parallel probing
    #[inline]
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Functional being minimized
    #[inline]
    #[must_use]
    pub fn functional(&self) -> &MultiverseFunctional {
        &self.functional
    }

    /// Learning rate `η`
    #[inline]
    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Perturbation `ε`
    #[inline]
    #[must_use]
    pub fn fd_eps(&self) -> f64 {
        self.fd_eps
    }

    /// Functional value of `state` with component `(position, component)`
    /// shifted by `delta` along the real axis
    fn shifted_value(
        &self,
        state: &MultiverseState,
        position: usize,
        component: usize,
        delta: f64,
    ) -> Result<f64> {
        let mut probe = state.copy();
        if let Some(entry) = probe
            .vector_at_mut(position)
            .and_then(|v| v.get_mut(component))
        {
            *entry += Complex64::new(delta, 0.0);
        }
        self.functional.evaluate(&probe)
    }

    /// Central-difference partial derivative for one scalar component
    fn partial(&self, state: &MultiverseState, position: usize, component: usize) -> Result<f64> {
        let plus = self.shifted_value(state, position, component, self.fd_eps)?;
        let minus = self.shifted_value(state, position, component, -self.fd_eps)?;
        Ok((plus - minus) / (2.0 * self.fd_eps))
    }

    /// Finite-difference gradient, shaped like `state`
    ///
    /// # Errors
    /// Propagates any functional evaluation failure
    pub fn gradient(&self, state: &MultiverseState) -> Result<MultiverseState> {
        let probes: Vec<(usize, usize)> = state
            .iter()
            .enumerate()
            .flat_map(|(position, (_, psi))| (0..psi.len()).map(move |i| (position, i)))
            .collect();

        tracing::trace!(
            probes = probes.len(),
            parallel = self.parallel,
            "estimating gradient"
        );

        let partials: Vec<f64> = if self.parallel {
            probes
                .par_iter()
                .map(|&(position, i)| self.partial(state, position, i))
                .collect::<Result<_>>()?
        } else {
            probes
                .iter()
                .map(|&(position, i)| self.partial(state, position, i))
                .collect::<Result<_>>()?
        };

        let mut partials = partials.into_iter();
        Ok(state
            .iter()
            .map(|(key, psi)| {
                let grad: Vec<Complex64> = partials
                    .by_ref()
                    .take(psi.len())
                    .map(|d| Complex64::new(d, 0.0))
                    .collect();
                (key.clone(), grad)
            })
            .collect())
    }

    /// One gradient-descent step `Ψ ← Ψ − η ∇J`
    ///
    /// Returns a new state with the same keys and vector lengths; the input
    /// is left untouched.
    ///
    /// # Errors
    /// Propagates any functional evaluation failure
    pub fn step(&self, state: &MultiverseState) -> Result<MultiverseState> {
        let gradient = self.gradient(state)?;
        state
            .iter()
            .zip(gradient.iter())
            .map(|((key, psi), (_, grad))| {
                sub_scaled(psi, grad, self.step_size).map(|updated| (key.clone(), updated))
            })
            .collect()
    }

    /// Descend until successive values differ by less than `tol` or
    /// `max_steps` steps have been taken
    ///
    /// `callback(iteration, value)` observes each new value.
    ///
    /// # Errors
    /// Propagates any functional evaluation failure; no partial state is
    /// returned
    pub fn run_to_convergence(
        &self,
        state: &MultiverseState,
        max_steps: usize,
        tol: f64,
        callback: Option<&mut dyn FnMut(usize, f64)>,
    ) -> Result<MultiverseState> {
        self.run_with_report(state, max_steps, tol, callback)
            .map(|report| report.state)
    }

    /// Same loop as [`run_to_convergence`](Self::run_to_convergence), also
    /// reporting step count, values and whether it converged
    ///
    /// # Errors
    /// Propagates any functional evaluation failure
    pub fn run_with_report(
        &self,
        state: &MultiverseState,
        max_steps: usize,
        tol: f64,
        mut callback: Option<&mut dyn FnMut(usize, f64)>,
    ) -> Result<OptimizationReport> {
        let initial_value = self.functional.evaluate(state)?;
        let mut current = state.copy();
        let mut previous = initial_value;

        for iteration in 0..max_steps {
            let next = self.step(&current)?;
            let value = self.functional.evaluate(&next)?;

            if !value.is_finite() {
                tracing::warn!(iteration, value, "functional is not finite");
            }

            if let Some(cb) = callback.as_deref_mut() {
                cb(iteration, value);
            }

            let delta = (value - previous).abs();
            tracing::debug!(iteration, value, delta, "optimizer step");

            if delta < tol {
                tracing::info!(steps = iteration + 1, value, "optimizer converged");
                return Ok(OptimizationReport {
                    state: next,
                    steps: iteration + 1,
                    initial_value,
                    final_value: value,
                    converged: true,
                });
            }

            current = next;
            previous = value;
        }

        tracing::info!(steps = max_steps, value = previous, "optimizer step budget exhausted");
        Ok(OptimizationReport {
            state: current,
            steps: max_steps,
            initial_value,
            final_value: previous,
            converged: false,
        })
    }
}
