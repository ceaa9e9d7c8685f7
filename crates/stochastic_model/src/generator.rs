//! Deterministic-equivalent generation.
//!
//! [`StochasticModelGenerator`] runs one build as a sequence of phases:
//!
//! 1. **Initialize**: resolve the directive, reset clones from any earlier
//!    build, validate the goals and create the [`ScenarioGenerator`]
//! 2. **Partition**: split constraints into first stage (no recourse
//!    decision, no random parameter) and second stage
//! 3. **PerScenario**: for each pulled scenario, clone every recourse
//!    decision, instantiate the second-stage rows against the clones and
//!    fold the probability-weighted goal terms into the single goal row
//! 4. **Finalize**: record the probability vector against every recourse
//!    decision
//!
//! First-stage goal terms with constant coefficients enter the goal row
//! once. Every other goal term is folded per scenario with weight equal to
//! the scenario probability.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use stochastic_core::cancel::AbortCheck;
use stochastic_core::types::StochasticError;
use stochastic_distributions::ParameterId;
use stochastic_sampling::{SamplingConfig, ScenarioGenerator, ScenarioPull};
use tracing::{debug, info, warn};

use crate::directive::{DecompositionType, StochasticDirective};
use crate::ids::DecisionId;
use crate::model::{Constraint, Decision, DecisionKind, Goal, StochasticModel, Term};
use crate::task::{Column, LinearStochasticTask, Row};

/// Phase of a build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BuildPhase {
    /// Resolving options and validating the model.
    #[default]
    Initialize,
    /// Splitting constraints by stage.
    Partition,
    /// Folding scenarios into the task.
    PerScenario,
    /// Recording probability vectors.
    Finalize,
    /// Build finished or cancelled.
    Done,
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initialize => "initialize",
            Self::Partition => "partition",
            Self::PerScenario => "per_scenario",
            Self::Finalize => "finalize",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Result of a build that did not fail.
#[derive(Clone, Debug, PartialEq)]
pub enum BuildOutcome {
    /// The deterministic equivalent.
    Completed(LinearStochasticTask),
    /// The abort predicate fired; clones were discarded.
    Cancelled,
}

impl BuildOutcome {
    /// The task, if the build completed.
    pub fn into_task(self) -> Option<LinearStochasticTask> {
        match self {
            Self::Completed(task) => Some(task),
            Self::Cancelled => None,
        }
    }

    /// Whether the build was cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Builds deterministic equivalents of stochastic models.
///
/// # Examples
///
/// ```rust
/// use stochastic_core::cancel::NeverAbort;
/// use stochastic_distributions::{DistributedValue, ScenariosDistribution};
/// use stochastic_model::{
///     Coefficient, Constraint, Decision, Goal, LinearStochasticModel, StochasticDirective,
///     StochasticModelGenerator, Term,
/// };
/// use stochastic_sampling::SamplingConfig;
///
/// let demand = ScenariosDistribution::from_pairs([(0.5, 80.0), (0.5, 120.0)]).unwrap();
/// let mut model = LinearStochasticModel::new();
/// model.add_parameter(DistributedValue::new("demand", demand)).unwrap();
/// model.add_decision(Decision::first_stage("order")).unwrap();
/// model.add_decision(Decision::recourse("sell")).unwrap();
/// model.add_constraint(
///     Constraint::new("sell_le_demand", vec![Term::new(1.0, "sell")])
///         .at_most(Coefficient::parameter("demand")),
/// );
/// model.add_goal(Goal::minimize("cost", vec![Term::new(1.0, "order"), Term::new(-1.5, "sell")]));
///
/// let mut generator =
///     StochasticModelGenerator::new(StochasticDirective::default(), SamplingConfig::default());
/// let task = generator.build(&mut model, &NeverAbort).unwrap().into_task().unwrap();
///
/// assert_eq!(task.scenario_count(), 2);
/// assert_eq!(task.goal_coefficient("sell#0"), Some(-0.75));
/// ```
#[derive(Debug, Clone)]
pub struct StochasticModelGenerator {
    directive: StochasticDirective,
    sampling: SamplingConfig,
    phase: BuildPhase,
    scenarios: Option<ScenarioGenerator>,
}

impl StochasticModelGenerator {
    /// Creates a generator for the given directive and sampling options.
    pub fn new(directive: StochasticDirective, sampling: SamplingConfig) -> Self {
        Self {
            directive,
            sampling,
            phase: BuildPhase::Initialize,
            scenarios: None,
        }
    }

    /// Phase reached by the most recent build.
    #[inline]
    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    /// Directive in use.
    #[inline]
    pub fn directive(&self) -> &StochasticDirective {
        &self.directive
    }

    /// Sampling options in use.
    #[inline]
    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    /// Scenario generator of the most recent build.
    pub fn scenario_generator(&self) -> Option<&ScenarioGenerator> {
        self.scenarios.as_ref()
    }

    /// Builds the deterministic equivalent of `model`.
    ///
    /// `abort` is polled before every scenario and inside bounded sampling
    /// loops.
    ///
    /// # Errors
    ///
    /// - `ModelData` for a malformed directive, a model without exactly
    ///   one enabled goal, a goal multiplying a recourse decision by a
    ///   random parameter, or references to unknown decisions or parameters
    /// - `Algorithm` if a distribution fails to converge
    pub fn build<M: StochasticModel + ?Sized>(
        &mut self,
        model: &mut M,
        abort: &dyn AbortCheck,
    ) -> Result<BuildOutcome, StochasticError> {
        self.phase = BuildPhase::Initialize;
        let threshold = self.directive.scenario_threshold()?;
        if self.directive.decomposition_type == DecompositionType::Decomposition {
            warn!("decomposition is not supported; building the deterministic equivalent");
        }

        model.reset_recourse_clones();
        let goal = validate_model(model)?;
        let mut scenarios =
            ScenarioGenerator::new(model.distributed_values().to_vec(), &self.sampling, threshold)?;

        info!(
            goal = %goal.name,
            threshold,
            scenario_count = scenarios.scenario_count(),
            method = %scenarios.method(),
            "building deterministic equivalent"
        );

        let outcome = self.assemble(model, &mut scenarios, &goal, abort);
        self.scenarios = Some(scenarios);
        outcome
    }

    /// Rebuilds `model` replaying the scenarios of the previous build.
    ///
    /// The scenario generator is restarted rather than recreated, so the
    /// identical scenario sequence is folded again.
    ///
    /// # Errors
    ///
    /// `ModelData` if there was no previous build, plus the errors of
    /// [`build`](Self::build).
    pub fn rebuild<M: StochasticModel + ?Sized>(
        &mut self,
        model: &mut M,
        abort: &dyn AbortCheck,
    ) -> Result<BuildOutcome, StochasticError> {
        let mut scenarios = self
            .scenarios
            .take()
            .ok_or_else(|| StochasticError::model_data("no previous build to replay"))?;
        scenarios.restart();

        self.phase = BuildPhase::Initialize;
        model.reset_recourse_clones();
        let outcome = validate_model(model)
            .and_then(|goal| self.assemble(model, &mut scenarios, &goal, abort));
        self.scenarios = Some(scenarios);
        outcome
    }

    /// Runs the build phases; on failure the model's clones are discarded.
    fn assemble<M: StochasticModel + ?Sized>(
        &mut self,
        model: &mut M,
        scenarios: &mut ScenarioGenerator,
        goal: &Goal,
        abort: &dyn AbortCheck,
    ) -> Result<BuildOutcome, StochasticError> {
        let outcome = self.run_phases(model, scenarios, goal, abort);
        if let Err(error) = &outcome {
            warn!(phase = %self.phase, %error, "deterministic equivalent build failed");
            model.reset_recourse_clones();
            self.phase = BuildPhase::Done;
        }
        outcome
    }

    fn run_phases<M: StochasticModel + ?Sized>(
        &mut self,
        model: &mut M,
        scenarios: &mut ScenarioGenerator,
        goal: &Goal,
        abort: &dyn AbortCheck,
    ) -> Result<BuildOutcome, StochasticError> {
        self.phase = BuildPhase::Partition;
        let decisions: Vec<Decision> = model.decisions().to_vec();
        let recourse: Vec<DecisionId> = decisions
            .iter()
            .filter(|d| d.is_recourse())
            .map(|d| d.id.clone())
            .collect();
        let recourse_set: HashSet<&DecisionId> = recourse.iter().collect();
        let (first_stage, second_stage): (Vec<Constraint>, Vec<Constraint>) = model
            .constraints()
            .iter()
            .cloned()
            .partition(|c| c.is_first_stage(|id| recourse_set.contains(id)));
        debug!(
            first_stage = first_stage.len(),
            second_stage = second_stage.len(),
            recourse = recourse.len(),
            "constraints partitioned"
        );

        let mut task = LinearStochasticTask::new(goal.name.clone(), goal.sense);
        let mut shared = HashMap::new();
        for decision in decisions.iter().filter(|d| d.kind == DecisionKind::FirstStage) {
            let index = task.push_column(Column::first_stage(decision));
            shared.insert(decision.id.clone(), index);
        }

        let no_clones = HashMap::new();
        let no_values = BTreeMap::new();
        for constraint in &first_stage {
            task.push_row(instantiate(constraint, None, &no_values, &shared, &no_clones)?);
        }
        for term in goal.terms.iter().filter(|t| !is_folded(t, &recourse_set)) {
            let column = column_of(&term.decision, &shared, &no_clones)?;
            task.add_goal_coefficient(column, term.coefficient.evaluate(&no_values)?);
        }

        self.phase = BuildPhase::PerScenario;
        let mut probabilities = Vec::new();
        loop {
            let sample = match scenarios.next_scenario(abort)? {
                ScenarioPull::Scenario(sample) => sample,
                ScenarioPull::Done => break,
                ScenarioPull::Cancelled => {
                    model.reset_recourse_clones();
                    self.phase = BuildPhase::Done;
                    info!(
                        completed = probabilities.len(),
                        "deterministic equivalent build cancelled"
                    );
                    return Ok(BuildOutcome::Cancelled);
                }
            };

            let mut clones = HashMap::with_capacity(recourse.len());
            for id in &recourse {
                let column = model.clone_recourse_decision(id, sample.ordinal)?;
                clones.insert(id.clone(), task.push_column(column));
            }

            for term in goal.terms.iter().filter(|t| is_folded(t, &recourse_set)) {
                let column = column_of(&term.decision, &shared, &clones)?;
                let value = term.coefficient.evaluate(&sample.values)?;
                task.add_goal_coefficient(column, sample.probability * value);
            }

            for constraint in &second_stage {
                task.push_row(instantiate(
                    constraint,
                    Some(sample.ordinal),
                    &sample.values,
                    &shared,
                    &clones,
                )?);
            }

            probabilities.push(sample.probability);
            task.push_scenario(sample.probability);
        }

        self.phase = BuildPhase::Finalize;
        for id in &recourse {
            model.record_scenario_probabilities(id, probabilities.clone())?;
        }

        self.phase = BuildPhase::Done;
        info!(
            scenarios = task.scenario_count(),
            columns = task.columns().len(),
            rows = task.rows().len(),
            "deterministic equivalent built"
        );
        Ok(BuildOutcome::Completed(task))
    }
}

/// Checks the model and returns its single enabled goal.
fn validate_model<M: StochasticModel + ?Sized>(model: &M) -> Result<Goal, StochasticError> {
    let enabled: Vec<&Goal> = model.goals().iter().filter(|g| g.enabled).collect();
    let goal = match enabled.as_slice() {
        [goal] => (*goal).clone(),
        other => {
            return Err(StochasticError::model_data(format!(
                "a stochastic model needs exactly one enabled goal, found {}",
                other.len()
            )))
        }
    };

    let parameters: HashSet<&ParameterId> =
        model.distributed_values().iter().map(|v| v.id()).collect();
    let kinds: HashMap<&DecisionId, DecisionKind> =
        model.decisions().iter().map(|d| (&d.id, d.kind)).collect();

    let check_parameter = |parameter: &ParameterId, owner: &str| {
        if parameters.contains(parameter) {
            Ok(())
        } else {
            Err(StochasticError::model_data(format!(
                "{} references unknown random parameter '{}'",
                owner, parameter
            )))
        }
    };
    let check_term = |term: &Term, owner: &str| -> Result<DecisionKind, StochasticError> {
        if let Some(parameter) = term.coefficient.random_parameter() {
            check_parameter(parameter, owner)?;
        }
        kinds.get(&term.decision).copied().ok_or_else(|| {
            StochasticError::model_data(format!(
                "{} references unknown decision '{}'",
                owner, term.decision
            ))
        })
    };

    let owner = format!("goal '{}'", goal.name);
    for term in &goal.terms {
        let kind = check_term(term, &owner)?;
        if let (DecisionKind::Recourse, Some(parameter)) =
            (kind, term.coefficient.random_parameter())
        {
            return Err(StochasticError::model_data(format!(
                "goal '{}' multiplies recourse decision '{}' by random parameter '{}'",
                goal.name, term.decision, parameter
            )));
        }
    }

    for constraint in model.constraints() {
        let owner = format!("constraint '{}'", constraint.name);
        for term in &constraint.terms {
            check_term(term, &owner)?;
        }
        for bound in constraint.lower.iter().chain(constraint.upper.iter()) {
            if let Some(parameter) = bound.random_parameter() {
                check_parameter(parameter, &owner)?;
            }
        }
    }

    Ok(goal)
}

/// Goal terms folded per scenario: recourse terms and random coefficients.
fn is_folded(term: &Term, recourse: &HashSet<&DecisionId>) -> bool {
    term.coefficient.is_random() || recourse.contains(&term.decision)
}

fn column_of(
    decision: &DecisionId,
    shared: &HashMap<DecisionId, usize>,
    clones: &HashMap<DecisionId, usize>,
) -> Result<usize, StochasticError> {
    clones
        .get(decision)
        .or_else(|| shared.get(decision))
        .copied()
        .ok_or_else(|| StochasticError::model_data(format!("unknown decision '{}'", decision)))
}

fn instantiate(
    constraint: &Constraint,
    scenario: Option<usize>,
    values: &BTreeMap<ParameterId, f64>,
    shared: &HashMap<DecisionId, usize>,
    clones: &HashMap<DecisionId, usize>,
) -> Result<Row, StochasticError> {
    let mut coefficients = BTreeMap::new();
    for term in &constraint.terms {
        let column = column_of(&term.decision, shared, clones)?;
        *coefficients.entry(column).or_insert(0.0) += term.coefficient.evaluate(values)?;
    }
    let lower = match &constraint.lower {
        Some(bound) => bound.evaluate(values)?,
        None => f64::NEG_INFINITY,
    };
    let upper = match &constraint.upper {
        Some(bound) => bound.evaluate(values)?,
        None => f64::INFINITY,
    };
    let name = match scenario {
        Some(ordinal) => format!("{}#{}", constraint.name, ordinal),
        None => constraint.name.clone(),
    };
    Ok(Row {
        name,
        scenario,
        coefficients: coefficients.into_iter().collect(),
        lower,
        upper,
    })
}
