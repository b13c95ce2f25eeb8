//! Benchmark for the bridge against hand-nested bind chains.
//!
//! Measures the overhead of running step logic through a computation frame
//! compared to writing the same `bind` nesting with `bind!`.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use monad_bridge::bind;
use monad_bridge::bridge::run;
use monad_bridge::effect::State;
use std::hint::black_box;

// =============================================================================
// Option Benchmarks
// =============================================================================

fn benchmark_option_chain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("option_chain");

    group.bench_function("bind_macro_3", |bencher| {
        bencher.iter(|| {
            let result: Option<i32> = bind! {
                x <= Some(black_box(1));
                y <= Some(black_box(2));
                z <= Some(black_box(3));
                Some(x + y + z)
            };
            black_box(result)
        });
    });

    group.bench_function("bridge_3", |bencher| {
        bencher.iter(|| {
            let result: Option<i32> = run(|co| async move {
                let x = co.perform(Some(black_box(1))).await;
                let y = co.perform(Some(black_box(2))).await;
                let z = co.perform(Some(black_box(3))).await;
                x + y + z
            });
            black_box(result)
        });
    });

    group.bench_function("bridge_short_circuit", |bencher| {
        bencher.iter(|| {
            let result: Option<i32> = run(|co| async move {
                let x = co.perform(Some(black_box(1))).await;
                let y = co.perform(black_box(None::<i32>)).await;
                x + y
            });
            black_box(result)
        });
    });

    group.finish();
}

fn benchmark_bridge_depth(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("bridge_depth");

    for depth in [1_usize, 10, 100] {
        group.bench_with_input(BenchmarkId::new("result", depth), &depth, |bencher, &depth| {
            bencher.iter(|| {
                let result: Result<usize, String> = run(move |co| async move {
                    let mut total = 0;
                    for step in 0..depth {
                        total += co.perform(Ok::<usize, String>(black_box(step))).await;
                    }
                    total
                });
                black_box(result)
            });
        });
    }

    group.finish();
}

// =============================================================================
// State Benchmarks
// =============================================================================

fn benchmark_state_counter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("state_counter");

    group.bench_function("bind_macro", |bencher| {
        bencher.iter(|| {
            let counter: State<u64, u64> = bind! {
                current <= State::<u64, u64>::get();
                _ <= State::put(current + 1);
                next <= State::<u64, u64>::get();
                State::pure(current + next)
            };
            black_box(counter.run(black_box(10)))
        });
    });

    group.bench_function("bridge", |bencher| {
        bencher.iter(|| {
            let counter: State<u64, u64> = run(|co| async move {
                let current = co.perform(State::<u64, u64>::get()).await;
                co.perform(State::put(current + 1)).await;
                let next = co.perform(State::<u64, u64>::get()).await;
                current + next
            });
            black_box(counter.run(black_box(10)))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_option_chain,
    benchmark_bridge_depth,
    benchmark_state_counter,
);

criterion_main!(benches);
