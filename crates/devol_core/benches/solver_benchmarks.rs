//! Criterion benchmarks for devol_core root-finding solvers.
//!
//! Measures per-solve cost of bisection and Newton-Raphson on smooth
//! objectives to characterise the fixed overhead each implied volatility
//! inversion pays before any pricing work.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use devol_core::math::solvers::{BisectionSolver, NewtonRaphsonSolver, SolverConfig};

/// Benchmark bisection at different tolerances.
fn bench_bisection(c: &mut Criterion) {
    let mut group = c.benchmark_group("bisection");

    for tolerance in [1e-6, 1e-8, 1e-10] {
        let solver = BisectionSolver::new(SolverConfig::new(tolerance, 750));

        group.bench_with_input(
            BenchmarkId::new("quadratic", format!("{tolerance:e}")),
            &solver,
            |b, solver| {
                b.iter(|| {
                    solver
                        .find_root(|x: f64| x * x - black_box(2.0), 0.0, 2.0)
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

/// Benchmark Newton-Raphson at different tolerances.
fn bench_newton_raphson(c: &mut Criterion) {
    let mut group = c.benchmark_group("newton_raphson");

    for tolerance in [1e-6, 1e-8, 1e-10] {
        let solver = NewtonRaphsonSolver::new(SolverConfig::new(tolerance, 750));

        group.bench_with_input(
            BenchmarkId::new("quadratic", format!("{tolerance:e}")),
            &solver,
            |b, solver| {
                b.iter(|| {
                    solver
                        .find_root(|x: f64| x * x - black_box(2.0), |x| 2.0 * x, 1.0)
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

/// Benchmark an expensive objective to show evaluation-count dominance.
fn bench_expensive_objective(c: &mut Criterion) {
    let mut group = c.benchmark_group("expensive_objective");

    // Simulate an objective whose cost dwarfs solver bookkeeping
    let expensive = |x: f64| {
        let mut acc = 0.0;
        for i in 1..100 {
            acc += (x / i as f64).sin();
        }
        acc - 1.0
    };

    let bisection = BisectionSolver::new(SolverConfig::default());
    group.bench_function("bisection", |b| {
        b.iter(|| bisection.find_root(black_box(expensive), 0.01, 3.0).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_bisection,
    bench_newton_raphson,
    bench_expensive_objective
);
criterion_main!(benches);
