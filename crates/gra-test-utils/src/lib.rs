//! Testing utilities for the GRA workspace
//!
//! Shared fixtures, builders and approximate assertions.

#![allow(missing_docs)]

use gra_core::linalg::from_real;
use gra_core::{
    ConstantLevel, Goal, Level, MultiIndex, MultiverseFunctional, MultiverseOptimizer,
    MultiverseState,
};
use num_complex::Complex64;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber honoring `RUST_LOG`; safe to call repeatedly
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn local_level() -> Level {
    Level::new(0, "local")
}

pub fn meta_level() -> Level {
    Level::new(1, "meta")
}

/// State from `(key, real values)` pairs
pub fn real_state(entries: &[(&[u32], &[f64])]) -> MultiverseState {
    entries
        .iter()
        .map(|(key, values)| (MultiIndex::from(*key), from_real(values)))
        .collect()
}

/// Functional treating every key as level 0
pub fn level0_functional(lambda0: f64, alpha: f64) -> MultiverseFunctional {
    let level0 = local_level();
    let goal0 = Goal::new(level0.clone(), "test goal");
    MultiverseFunctional::new(vec![level0], vec![goal0])
        .with_weights(lambda0, alpha)
        .with_level_fn(ConstantLevel(0))
}

/// Functional with a local level and a meta level, trailing-component keys
pub fn two_level_functional(lambda0: f64, alpha: f64) -> MultiverseFunctional {
    let level0 = local_level();
    let level1 = meta_level();
    let goals = vec![
        Goal::new(level0.clone(), "local goal"),
        Goal::new(level1.clone(), "meta goal"),
    ];
    MultiverseFunctional::new(vec![level0, level1], goals).with_weights(lambda0, alpha)
}

pub fn level0_optimizer() -> MultiverseOptimizer {
    MultiverseOptimizer::new(level0_functional(1.0, 0.8))
        .with_step_size(1e-2)
        .with_fd_eps(1e-4)
}

pub fn complex_close(a: Complex64, b: Complex64, tol: f64) -> bool {
    (a - b).norm() <= tol
}

/// Panics unless both states have the same keys, lengths and values within `tol`
pub fn assert_states_close(left: &MultiverseState, right: &MultiverseState, tol: f64) {
    assert_eq!(left.len(), right.len(), "component count differs");
    for (key, psi) in left.iter() {
        let other = right
            .get(key)
            .unwrap_or_else(|_| panic!("key {key} missing on the right"));
        assert_eq!(psi.len(), other.len(), "length differs at {key}");
        for (i, (a, b)) in psi.iter().zip(other).enumerate() {
            assert!(
                complex_close(*a, *b, tol),
                "value differs at {key}[{i}]: {a} vs {b}"
            );
        }
    }
}
