//! End-to-end tests for deterministic-equivalent generation.

use approx::assert_relative_eq;
use proptest::prelude::*;
use stochastic_core::cancel::{CancellationToken, NeverAbort};
use stochastic_distributions::{
    DistributedValue, Geometric, Normal, ScenarioCollection, ScenariosDistribution,
};
use stochastic_model::{
    BuildOutcome, BuildPhase, Coefficient, Constraint, Decision, DecisionId, Goal, LinearStochasticModel,
    RowCollector, StochasticDirective, StochasticModelGenerator, Term,
};
use stochastic_sampling::{SamplingConfig, SamplingMethod};

fn thirds() -> ScenariosDistribution {
    let mut collection = ScenarioCollection::new();
    for value in [1.0, 2.0, 3.0] {
        collection.add(1.0 / 3.0, value).unwrap();
    }
    collection.finish().unwrap()
}

fn build(model: &mut LinearStochasticModel) -> stochastic_model::LinearStochasticTask {
    StochasticModelGenerator::new(StochasticDirective::default(), SamplingConfig::default())
        .build(model, &NeverAbort)
        .unwrap()
        .into_task()
        .unwrap()
}

#[test]
fn test_three_equiprobable_scenarios_fold_cost() {
    let c = 6.0;
    let mut model = LinearStochasticModel::new();
    model.add_parameter(DistributedValue::new("p", thirds())).unwrap();
    model.add_decision(Decision::recourse("y")).unwrap();
    model.add_constraint(
        Constraint::new("cover", vec![Term::new(1.0, "y")]).at_least(Coefficient::parameter("p")),
    );
    model.add_goal(Goal::minimize("cost", vec![Term::new(c, "y")]));

    let task = build(&mut model);

    let y = DecisionId::new("y");
    assert_eq!(model.clones(&y).len(), 3);
    assert_eq!(task.columns().len(), 3);
    for ordinal in 0..3 {
        let name = format!("y#{}", ordinal);
        assert_relative_eq!(task.goal_coefficient(&name).unwrap(), c / 3.0, epsilon = 1e-12);
    }

    let bounds: Vec<f64> = task.rows().iter().map(|r| r.lower).collect();
    assert_eq!(bounds, vec![1.0, 2.0, 3.0]);

    let probabilities = model.scenario_probabilities(&y).unwrap();
    assert_eq!(probabilities.len(), 3);
    let stats = model.recourse_statistics(&y, &[1.0, 2.0, 3.0]).unwrap();
    assert_relative_eq!(stats.expected, 2.0, epsilon = 1e-12);
    assert_eq!(stats.minimum, 1.0);
    assert_eq!(stats.maximum, 3.0);
}

#[test]
fn test_forward_matches_task() {
    let mut model = LinearStochasticModel::new();
    model.add_parameter(DistributedValue::new("p", thirds())).unwrap();
    model.add_decision(Decision::first_stage("x").with_bounds(0.0, 10.0)).unwrap();
    model.add_decision(Decision::recourse("y")).unwrap();
    model.add_constraint(
        Constraint::new("link", vec![Term::new(1.0, "x"), Term::new(1.0, "y")])
            .equal_to(Coefficient::parameter("p")),
    );
    model.add_goal(Goal::maximize("value", vec![Term::new(1.0, "x"), Term::new(0.5, "y")]));

    let task = build(&mut model);
    let mut sink = RowCollector::new();
    task.forward(&mut sink).unwrap();

    assert_eq!(sink.columns.len(), 4);
    assert_eq!(sink.columns[0].upper, 10.0);
    assert_eq!(sink.rows.len(), 3);
    assert!(sink.rows.iter().all(|r| r.lower == r.upper));
    assert_eq!(sink.goal.unwrap().coefficients.len(), 4);
}

#[test]
fn test_sampled_model_uses_equal_weights() {
    let mut model = LinearStochasticModel::new();
    model
        .add_parameter(DistributedValue::new("demand", Normal::new(100.0, 20.0).unwrap()))
        .unwrap();
    model.add_decision(Decision::recourse("y")).unwrap();
    model.add_constraint(
        Constraint::new("cover", vec![Term::new(1.0, "y")])
            .at_least(Coefficient::parameter("demand")),
    );
    model.add_goal(Goal::minimize("cost", vec![Term::new(1.0, "y")]));

    let sampling = SamplingConfig::builder()
        .method(SamplingMethod::MonteCarlo)
        .sample_count(40)
        .random_seed(11)
        .build()
        .unwrap();
    let task = StochasticModelGenerator::new(StochasticDirective::default(), sampling)
        .build(&mut model, &NeverAbort)
        .unwrap()
        .into_task()
        .unwrap();

    assert_eq!(task.scenario_count(), 40);
    assert!(task
        .scenario_probabilities()
        .iter()
        .all(|&p| (p - 0.025).abs() < 1e-15));
}

#[test]
fn test_cancelled_build_leaves_no_clones() {
    let mut model = LinearStochasticModel::new();
    model.add_parameter(DistributedValue::new("p", thirds())).unwrap();
    model.add_decision(Decision::recourse("y")).unwrap();
    model.add_goal(Goal::minimize("cost", vec![Term::new(1.0, "y")]));

    let token = CancellationToken::new();
    token.cancel();
    let outcome = StochasticModelGenerator::new(StochasticDirective::default(), SamplingConfig::default())
        .build(&mut model, &token)
        .unwrap();
    assert_eq!(outcome, BuildOutcome::Cancelled);
    assert!(model.clones(&DecisionId::new("y")).is_empty());
}

#[test]
fn test_failed_build_leaves_no_clones() {
    // Upper strata of this geometric overflow a 32-bit quantile mid-build
    let mut model = LinearStochasticModel::new();
    model
        .add_parameter(DistributedValue::new("p", Geometric::new(1e-9).unwrap()))
        .unwrap();
    model.add_decision(Decision::recourse("y")).unwrap();
    model.add_constraint(
        Constraint::new("cover", vec![Term::new(1.0, "y")]).at_least(Coefficient::parameter("p")),
    );
    model.add_goal(Goal::minimize("cost", vec![Term::new(1.0, "y")]));

    let sampling = SamplingConfig::builder()
        .method(SamplingMethod::LatinHypercube)
        .sample_count(100)
        .random_seed(7)
        .build()
        .unwrap();
    let mut generator = StochasticModelGenerator::new(StochasticDirective::default(), sampling);
    assert!(generator.build(&mut model, &NeverAbort).is_err());

    let y = DecisionId::new("y");
    assert!(model.clones(&y).is_empty());
    assert!(model.scenario_probabilities(&y).is_none());
    assert_eq!(generator.phase(), BuildPhase::Done);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property test: folded goal coefficients sum to the unit cost for any
    /// explicit distribution.
    #[test]
    fn prop_goal_weights_sum_to_cost(
        weights in prop::collection::vec(1u32..100, 1..8),
        cost in -50.0f64..50.0,
    ) {
        let total: u32 = weights.iter().sum();
        let pairs: Vec<(f64, f64)> = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| (f64::from(w) / f64::from(total), i as f64))
            .collect();
        let mut model = LinearStochasticModel::new();
        model
            .add_parameter(DistributedValue::new("p", ScenariosDistribution::from_pairs(pairs).unwrap()))
            .unwrap();
        model.add_decision(Decision::recourse("y")).unwrap();
        model.add_goal(Goal::minimize("cost", vec![Term::new(cost, "y")]));

        let task = build(&mut model);
        prop_assert_eq!(task.scenario_count(), weights.len());
        prop_assert_eq!(model.clones(&DecisionId::new("y")).len(), weights.len());
        let folded: f64 = task.goal().coefficients.values().sum();
        prop_assert!((folded - cost).abs() < 1e-9);
    }
}
