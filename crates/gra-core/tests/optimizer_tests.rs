use gra_core::{MultiverseError, MultiverseOptimizer, MultiverseState, OptimizerConfig};
use gra_test_utils::{
    assert_states_close, init_test_tracing, level0_optimizer, real_state, two_level_functional,
};
use proptest::prelude::*;

#[test]
fn test_descent_is_monotonic() {
    init_test_tracing();
    let state = real_state(&[(&[0], &[1.0, 0.0]), (&[1], &[0.5, 0.5])]);
    let optimizer = level0_optimizer();
    let start = optimizer.functional().evaluate(&state).unwrap();

    let mut values = Vec::new();
    let mut record = |_: usize, v: f64| values.push(v);
    let report = optimizer
        .run_with_report(&state, 20, 1e-6, Some(&mut record))
        .unwrap();

    assert!(!values.is_empty());
    assert!(values[0] < start);
    for pair in values.windows(2) {
        assert!(pair[1] <= pair[0], "value increased: {} -> {}", pair[0], pair[1]);
    }
    assert!(report.final_value < report.initial_value);
    assert_eq!(report.initial_value, start);
}

#[test]
fn test_zero_steps_returns_equal_state() {
    let state = real_state(&[(&[0], &[1.0, 2.0]), (&[1], &[3.0])]);
    let out = level0_optimizer()
        .run_to_convergence(&state, 0, 1e-6, None)
        .unwrap();
    assert_eq!(out, state);
}

#[test]
fn test_input_state_survives_run() {
    let state = real_state(&[(&[0], &[1.0, -1.0])]);
    let before = state.copy();
    let _ = level0_optimizer()
        .run_to_convergence(&state, 10, 1e-9, None)
        .unwrap();
    assert_eq!(state, before);
}

#[test]
fn test_mismatch_aborts_run() {
    let state = real_state(&[(&[0, 1], &[1.0, 0.0]), (&[1, 1], &[1.0])]);
    let optimizer = MultiverseOptimizer::new(two_level_functional(1.0, 0.8));
    let err = optimizer
        .run_to_convergence(&state, 5, 1e-6, None)
        .unwrap_err();
    assert!(matches!(err, MultiverseError::DimensionMismatch { .. }));
}

#[test]
fn test_foam_pushes_meta_nodes_apart() {
    init_test_tracing();
    let state = real_state(&[(&[0, 1], &[1.0, 0.2]), (&[1, 1], &[0.9, 0.1])]);
    let optimizer = MultiverseOptimizer::new(two_level_functional(1.0, 0.8));

    let report = optimizer.run_with_report(&state, 30, 1e-12, None).unwrap();
    assert!(report.final_value < report.initial_value);
}

#[test]
fn test_parallel_run_matches_sequential() {
    let state = real_state(&[
        (&[0, 0], &[1.0, 0.5]),
        (&[1, 0], &[-0.5, 0.25]),
        (&[0, 1], &[0.3, 0.4]),
        (&[1, 1], &[0.6, -0.2]),
    ]);
    let sequential = MultiverseOptimizer::new(two_level_functional(1.0, 0.8));
    let parallel = sequential.clone().with_parallel(true);

    let a = sequential.run_to_convergence(&state, 5, 0.0, None).unwrap();
    let b = parallel.run_to_convergence(&state, 5, 0.0, None).unwrap();
    assert_states_close(&a, &b, 0.0);
}

#[test]
fn test_optimizer_from_toml_config() {
    let config = OptimizerConfig::from_toml_str(
        r#"
        step_size = 0.05
        fd_eps = 1e-5
        parallel = true
        "#,
    )
    .unwrap();
    let optimizer =
        MultiverseOptimizer::from_config(two_level_functional(1.0, 0.8), &config).unwrap();

    assert_eq!(optimizer.step_size(), 0.05);
    assert_eq!(optimizer.fd_eps(), 1e-5);
}

fn component_lengths() -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(-5.0f64..5.0, 0..4), 0..5)
}

proptest! {
    #[test]
    fn prop_step_preserves_shape(vectors in component_lengths()) {
        let state: MultiverseState = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let key = u32::try_from(i).unwrap();
                ([key], gra_core::linalg::from_real(v))
            })
            .collect();

        let next = level0_optimizer().step(&state).unwrap();

        prop_assert_eq!(next.len(), state.len());
        for ((k1, a), (k2, b)) in state.iter().zip(next.iter()) {
            prop_assert_eq!(k1, k2);
            prop_assert_eq!(a.len(), b.len());
        }
    }

    #[test]
    fn prop_quadratic_step_contracts(values in prop::collection::vec(-5.0f64..5.0, 1..6)) {
        let state = real_state(&[(&[0], values.as_slice())]);
        let optimizer = level0_optimizer();

        let before = optimizer.functional().evaluate(&state).unwrap();
        let after = optimizer.functional().evaluate(&optimizer.step(&state).unwrap()).unwrap();
        prop_assert!(after <= before);
    }
}
