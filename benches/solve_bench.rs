//! End-to-end solving benchmarks over generated instances.
//!
//! Run with: cargo bench --bench solve_bench

use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use warrant::backend::Backend;
use warrant::backend::EnumerationBackend;
use warrant::backend::IncrementalBackend;
use warrant::generation::GeneratorConfig;
use warrant::model::Instance;
use warrant::termination::Indefinite;
use warrant::Solver;
use warrant::SolverOptions;

fn mixed_instance(step_count: usize, user_count: usize) -> Instance {
    GeneratorConfig::new(step_count, user_count)
        .with_seed(42)
        .with_authorisations(user_count / 2)
        .with_separation_of_duty(step_count / 2)
        .with_binding_of_duty(1)
        .with_at_most_k(1)
        .generate()
}

fn satisfy<B: Backend>(backend: B, instance: &Instance, solution_limit: u64) {
    let options = SolverOptions {
        solution_limit,
        ..SolverOptions::default()
    };
    let result = Solver::with_options(backend, options)
        .satisfy(instance, &mut Indefinite)
        .unwrap();
    let _ = black_box(result);
}

fn bench_first_solution(c: &mut Criterion) {
    let mut group = c.benchmark_group("first-solution");
    for &(step_count, user_count) in &[(4, 3), (6, 4), (8, 4)] {
        let instance = mixed_instance(step_count, user_count);
        let size = format!("{step_count}x{user_count}");
        let _ = group.bench_with_input(
            BenchmarkId::new("enumeration", &size),
            &instance,
            |bencher, instance| {
                bencher.iter(|| satisfy(EnumerationBackend::default(), instance, 1));
            },
        );
        let _ = group.bench_with_input(
            BenchmarkId::new("incremental", &size),
            &instance,
            |bencher, instance| {
                bencher.iter(|| satisfy(IncrementalBackend::default(), instance, 1));
            },
        );
    }
    group.finish();
}

fn bench_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate-100");
    let instance = mixed_instance(4, 3);
    let _ = group.bench_with_input(
        BenchmarkId::new("enumeration", "4x3"),
        &instance,
        |bencher, instance| {
            bencher.iter(|| satisfy(EnumerationBackend::default(), instance, 100));
        },
    );
    let _ = group.bench_with_input(
        BenchmarkId::new("incremental", "4x3"),
        &instance,
        |bencher, instance| {
            bencher.iter(|| satisfy(IncrementalBackend::default(), instance, 100));
        },
    );
    group.finish();
}

criterion_group!(benches, bench_first_solution, bench_enumeration);
criterion_main!(benches);
