use criterion::{black_box, criterion_group, criterion_main, Criterion};
use portalwalk::{RoomGraph, TraversalEngine};

/// Self-loop chain: every room loops to itself once and retreats out.
/// Cheapest possible layout for both strategies.
fn self_loop_targets(n: usize) -> Vec<usize> {
    (1..=n).collect()
}

/// Doubling layout: every advance portal loops back to room 1, so the raw
/// walk needs 2^(n+1) - 2 crossings. Only the memoized strategy survives it.
fn doubling_targets(n: usize) -> Vec<usize> {
    vec![1; n]
}

fn bench_memoized_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("memoized_evaluation");

    for &n in &[1_000usize, 10_000] {
        let chain = self_loop_targets(n);
        group.bench_function(format!("self_loop_chain_{n}"), |b| {
            b.iter(|| {
                let graph = RoomGraph::build(n, black_box(&chain)).unwrap();
                let mut engine = TraversalEngine::new(graph);
                black_box(engine.evaluate().unwrap())
            })
        });
    }

    for &n in &[1_000usize, 4_000] {
        let doubling = doubling_targets(n);
        group.bench_function(format!("doubling_{n}"), |b| {
            b.iter(|| {
                let graph = RoomGraph::build(n, black_box(&doubling)).unwrap();
                let mut engine = TraversalEngine::new(graph);
                black_box(engine.evaluate().unwrap())
            })
        });
    }

    group.finish();
}

fn bench_simulation_oracle(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_oracle");

    // The oracle walks 2n raw steps here; anything adversarial is hopeless
    // for it, which is the whole point of the memoized strategy.
    for &n in &[1_000usize, 10_000] {
        let chain = self_loop_targets(n);
        group.bench_function(format!("self_loop_chain_{n}"), |b| {
            b.iter(|| {
                let graph = RoomGraph::build(n, black_box(&chain)).unwrap();
                let mut engine = TraversalEngine::new(graph);
                black_box(engine.simulate_within(4 * n as u64).unwrap())
            })
        });
    }

    // Doubling layout kept tiny so the raw walk stays feasible.
    let n = 20;
    let doubling = doubling_targets(n);
    group.bench_function("doubling_20", |b| {
        b.iter(|| {
            let graph = RoomGraph::build(n, black_box(&doubling)).unwrap();
            let mut engine = TraversalEngine::new(graph);
            black_box(engine.simulate_within(1 << 22).unwrap())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_memoized_evaluation, bench_simulation_oracle);
criterion_main!(benches);
