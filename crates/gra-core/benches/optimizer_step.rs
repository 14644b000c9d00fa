use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gra_core::linalg::from_real;
use gra_core::{Goal, Level, MultiverseFunctional, MultiverseOptimizer, MultiverseState};

fn wave(len: usize, phase: f64) -> Vec<f64> {
    (0..len).map(|i| (i as f64 * 0.37 + phase).sin()).collect()
}

/// `nodes` local components plus `nodes` meta components, all of length `dim`
fn layered_state(nodes: u32, dim: usize) -> MultiverseState {
    (0..nodes)
        .flat_map(|i| {
            let phase = f64::from(i);
            [
                ([i, 0], from_real(&wave(dim, phase))),
                ([i, 1], from_real(&wave(dim, phase + 0.5))),
            ]
        })
        .collect()
}

fn two_level_functional() -> MultiverseFunctional {
    let local = Level::new(0, "local");
    let meta = Level::new(1, "meta");
    let goals = vec![Goal::new(meta.clone(), "meta goal: bench")];
    MultiverseFunctional::new(vec![local, meta], goals)
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let functional = two_level_functional();

    for nodes in [2, 8, 32] {
        let state = layered_state(nodes, 16);
        group.bench_with_input(BenchmarkId::new("nodes", nodes), &state, |b, state| {
            b.iter(|| functional.evaluate(black_box(state)).unwrap());
        });
    }

    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    group.sample_size(20);

    for (nodes, dim) in [(2, 8), (4, 16), (8, 16)] {
        let state = layered_state(nodes, dim);
        let label = format!("{nodes}x{dim}");

        let sequential = MultiverseOptimizer::new(two_level_functional());
        group.bench_with_input(BenchmarkId::new("sequential", &label), &state, |b, state| {
            b.iter(|| sequential.step(black_box(state)).unwrap());
        });

        let parallel = sequential.clone().with_parallel(true);
        group.bench_with_input(BenchmarkId::new("parallel", &label), &state, |b, state| {
            b.iter(|| parallel.step(black_box(state)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_step);
criterion_main!(benches);
