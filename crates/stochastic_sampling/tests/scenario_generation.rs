//! Integration tests for scenario generation.

use approx::assert_relative_eq;
use proptest::prelude::*;
use std::collections::HashSet;
use stochastic_core::cancel::{CancellationToken, NeverAbort};
use stochastic_distributions::{
    ContinuousUniform, DiscreteUniform, DistributedValue, Distribution, Normal,
    ScenariosDistribution,
};
use stochastic_sampling::{
    SamplingConfig, SamplingEngine, SamplingMethod, SamplingScheme, ScenarioGenerator,
    ScenarioPull, ScenarioSample,
};

fn drain(generator: &mut ScenarioGenerator) -> Vec<ScenarioSample> {
    let mut out = Vec::new();
    while let ScenarioPull::Scenario(s) = generator.next_scenario(&NeverAbort).unwrap() {
        out.push(s);
    }
    out
}

#[test]
fn test_enumerated_probabilities_sum_to_one() {
    let weather = ScenariosDistribution::from_pairs([(0.3, 10.0), (0.5, 20.0), (0.2, 30.0)]).unwrap();
    let values = vec![
        DistributedValue::new("weather", weather),
        DistributedValue::new("die", DiscreteUniform::new(1, 6).unwrap()),
    ];
    let mut generator = ScenarioGenerator::new(values, &SamplingConfig::default(), 500).unwrap();
    let samples = drain(&mut generator);

    assert_eq!(samples.len(), 18);
    let total: f64 = samples.iter().map(|s| s.probability).sum();
    assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    assert_relative_eq!(samples[0].probability, 0.05, epsilon = 1e-15);
}

#[test]
fn test_sampled_mean_is_close_to_distribution_mean() {
    let values = vec![DistributedValue::new("demand", Normal::new(100.0, 15.0).unwrap())];
    let config = SamplingConfig::builder()
        .method(SamplingMethod::LatinHypercube)
        .sample_count(2_000)
        .build()
        .unwrap();
    let mut generator = ScenarioGenerator::new(values, &config, 0).unwrap();
    let samples = drain(&mut generator);

    let mean: f64 = samples
        .iter()
        .map(|s| s.probability * s.values.values().sum::<f64>())
        .sum();
    assert_relative_eq!(mean, 100.0, epsilon = 0.5);
}

#[test]
fn test_cancellation_token_stops_generation() {
    let values = vec![DistributedValue::new("x", Normal::standard())];
    let config = SamplingConfig::builder().sample_count(10).build().unwrap();
    let mut generator = ScenarioGenerator::new(values, &config, 0).unwrap();
    let token = CancellationToken::new();

    assert!(matches!(
        generator.next_scenario(&token).unwrap(),
        ScenarioPull::Scenario(_)
    ));
    token.cancel();
    assert_eq!(generator.next_scenario(&token).unwrap(), ScenarioPull::Cancelled);
    assert_eq!(generator.produced(), 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property test: every Latin Hypercube stratum is hit exactly once per
    /// dimension.
    #[test]
    fn prop_latin_hypercube_covers_strata(
        n in 1usize..200,
        dimensions in 1usize..4,
        seed in 1u64..u64::MAX,
    ) {
        let dists: Vec<Distribution> = (0..dimensions)
            .map(|_| ContinuousUniform::new(0.0, 1.0).unwrap().into())
            .collect();
        let mut engine = SamplingEngine::new(dists, n, SamplingScheme::LatinHypercube, seed).unwrap();

        let mut seen: Vec<HashSet<usize>> = vec![HashSet::new(); dimensions];
        let mut index = 0;
        while let Some(values) = engine.next_sample(&NeverAbort).unwrap() {
            for (d, &u) in values.iter().enumerate() {
                let stratum = engine.stratum(d, index).unwrap();
                let lo = stratum as f64 / n as f64;
                let hi = (stratum + 1) as f64 / n as f64;
                prop_assert!(u >= lo && u <= hi);
                prop_assert!(u > 0.0 && u < 1.0);
                seen[d].insert(stratum);
            }
            index += 1;
        }
        prop_assert_eq!(index, n);
        for strata in seen {
            prop_assert_eq!(strata.len(), n);
        }
    }

    /// Property test: restart reproduces the identical scenario sequence.
    #[test]
    fn prop_restart_replays(
        seed in 1u64..u64::MAX,
        n in 1usize..60,
        monte_carlo in any::<bool>(),
    ) {
        let method = if monte_carlo {
            SamplingMethod::MonteCarlo
        } else {
            SamplingMethod::LatinHypercube
        };
        let values = vec![
            DistributedValue::new("a", Normal::new(5.0, 2.0).unwrap()),
            DistributedValue::new("b", DiscreteUniform::new(-3, 3).unwrap()),
        ];
        let config = SamplingConfig::builder()
            .method(method)
            .sample_count(n)
            .random_seed(seed)
            .build()
            .unwrap();
        let mut generator = ScenarioGenerator::new(values, &config, 0).unwrap();

        let first = drain(&mut generator);
        generator.restart();
        let second = drain(&mut generator);
        prop_assert_eq!(first.len(), n);
        prop_assert_eq!(first, second);
    }

    /// Property test: the joint scenario count saturates instead of
    /// overflowing.
    #[test]
    fn prop_scenario_count_saturates(
        widths in prop::collection::vec(1i32..100_000, 1..5),
    ) {
        let values: Vec<DistributedValue> = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| DistributedValue::new(format!("p{}", i), DiscreteUniform::new(0, w - 1).unwrap()))
            .collect();
        let generator = ScenarioGenerator::new(values, &SamplingConfig::default(), 500).unwrap();

        let exact = widths.iter().fold(1i64, |acc, &w| acc.saturating_mul(i64::from(w)));
        let expected = i32::try_from(exact).unwrap_or(i32::MAX);
        prop_assert_eq!(generator.scenario_count(), expected);
        prop_assert_eq!(generator.sampling_needed(), expected > 500);
    }
}
