//! Criterion benchmarks for stochastic_sampling.
//!
//! Benchmarks cover:
//! - Latin Hypercube vs Monte Carlo draws over several normals
//! - Exact enumeration of a discrete cross product
//! - Monte Carlo with a rejection-sampled binomial

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stochastic_core::cancel::NeverAbort;
use stochastic_distributions::{
    Binomial, DiscreteUniform, DistributedValue, Distribution, Normal,
};
use stochastic_sampling::{
    SamplingConfig, SamplingEngine, SamplingMethod, SamplingScheme, ScenarioGenerator,
    ScenarioPull,
};

fn normals(dimensions: usize) -> Vec<Distribution> {
    (0..dimensions)
        .map(|i| Normal::new(i as f64, 1.0 + i as f64).unwrap().into())
        .collect()
}

/// Benchmark a full pass of the sampling engine per scheme.
fn bench_engine_schemes(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_schemes");

    for dimensions in [1, 4, 16] {
        for (label, scheme) in [
            ("latin_hypercube", SamplingScheme::LatinHypercube),
            ("monte_carlo", SamplingScheme::MonteCarlo),
        ] {
            group.bench_with_input(
                BenchmarkId::new(label, dimensions),
                &dimensions,
                |b, &d| {
                    let dists = normals(d);
                    b.iter(|| {
                        let mut engine =
                            SamplingEngine::new(dists.clone(), 1_000, scheme, 42).unwrap();
                        let mut sum = 0.0;
                        while let Some(values) = engine.next_sample(&NeverAbort).unwrap() {
                            sum += values.iter().sum::<f64>();
                        }
                        black_box(sum)
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark exact enumeration through the scenario generator.
fn bench_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumeration");

    for width in [5, 10, 20] {
        group.bench_with_input(BenchmarkId::new("cross_product", width), &width, |b, &w| {
            let values: Vec<DistributedValue> = ["a", "b", "c"]
                .iter()
                .map(|id| DistributedValue::new(*id, DiscreteUniform::new(1, w).unwrap()))
                .collect();
            let config = SamplingConfig::default();
            b.iter(|| {
                let mut generator =
                    ScenarioGenerator::new(values.clone(), &config, i32::MAX).unwrap();
                let mut total = 0.0;
                while let ScenarioPull::Scenario(s) = generator.next_scenario(&NeverAbort).unwrap()
                {
                    total += s.probability;
                }
                black_box(total)
            });
        });
    }

    group.finish();
}

/// Benchmark Monte Carlo over a binomial in the rejection regime.
fn bench_binomial_rejection(c: &mut Criterion) {
    let mut group = c.benchmark_group("binomial_rejection");
    group.sample_size(50);

    let values = vec![DistributedValue::new(
        "k",
        Binomial::new(10_000, 0.3).unwrap(),
    )];
    let config = SamplingConfig::builder()
        .method(SamplingMethod::MonteCarlo)
        .sample_count(1_000)
        .build()
        .unwrap();

    group.bench_function("monte_carlo_1000", |b| {
        b.iter(|| {
            let mut generator = ScenarioGenerator::new(values.clone(), &config, 0).unwrap();
            let mut sum = 0.0;
            while let ScenarioPull::Scenario(s) = generator.next_scenario(&NeverAbort).unwrap() {
                sum += s.values.values().sum::<f64>();
            }
            black_box(sum)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_engine_schemes,
    bench_enumeration,
    bench_binomial_rejection
);
criterion_main!(benches);
