//! Model boundary and in-memory linear stochastic model.
//!
//! The generator needs only a narrow view of the surrounding model: the
//! distributed values, the decisions, goals and constraints, and three
//! mutations on recourse decisions (clone per scenario, record the
//! probability vector, reset). [`StochasticModel`] is that view;
//! [`LinearStochasticModel`] is a self-contained implementation used by the
//! CLI and the tests.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use stochastic_core::types::StochasticError;
use stochastic_distributions::{DistributedValue, ParameterId};

use crate::ids::DecisionId;
use crate::statistics::RecourseStatistics;
use crate::task::Column;

/// Stage of a decision variable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DecisionKind {
    /// Fixed before the randomness is revealed; one column overall.
    #[default]
    FirstStage,
    /// Resolved per scenario; one column per scenario.
    Recourse,
}

/// A decision variable with constant bounds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    /// Identifier.
    pub id: DecisionId,
    /// Stage.
    pub kind: DecisionKind,
    /// Lower bound.
    #[cfg_attr(
        feature = "serde",
        serde(
            default = "crate::bounds::unbounded_below",
            skip_serializing_if = "crate::bounds::is_unbounded_below"
        )
    )]
    pub lower: f64,
    /// Upper bound.
    #[cfg_attr(
        feature = "serde",
        serde(
            default = "crate::bounds::unbounded_above",
            skip_serializing_if = "crate::bounds::is_unbounded_above"
        )
    )]
    pub upper: f64,
}

impl Decision {
    /// Non-negative first-stage decision.
    pub fn first_stage(id: impl Into<DecisionId>) -> Self {
        Self {
            id: id.into(),
            kind: DecisionKind::FirstStage,
            lower: 0.0,
            upper: f64::INFINITY,
        }
    }

    /// Non-negative recourse decision.
    pub fn recourse(id: impl Into<DecisionId>) -> Self {
        Self {
            id: id.into(),
            kind: DecisionKind::Recourse,
            lower: 0.0,
            upper: f64::INFINITY,
        }
    }

    /// Replaces the bounds.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    /// Whether this is a recourse decision.
    #[inline]
    pub fn is_recourse(&self) -> bool {
        self.kind == DecisionKind::Recourse
    }
}

/// A coefficient that is either fixed or a multiple of a random parameter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Coefficient {
    /// Fixed value.
    Constant(f64),
    /// `scale` times the realised value of `parameter`.
    Random {
        /// Random parameter.
        parameter: ParameterId,
        /// Multiplier.
        scale: f64,
    },
}

impl Coefficient {
    /// Random coefficient with unit scale.
    pub fn parameter(parameter: impl Into<ParameterId>) -> Self {
        Self::Random {
            parameter: parameter.into(),
            scale: 1.0,
        }
    }

    /// Whether the coefficient depends on a random parameter.
    #[inline]
    pub fn is_random(&self) -> bool {
        matches!(self, Self::Random { .. })
    }

    /// Random parameter referenced, if any.
    pub fn random_parameter(&self) -> Option<&ParameterId> {
        match self {
            Self::Constant(_) => None,
            Self::Random { parameter, .. } => Some(parameter),
        }
    }

    /// Value of the coefficient under the realised parameter values.
    ///
    /// # Errors
    ///
    /// `ModelData` if the parameter has no realised value.
    pub fn evaluate(&self, values: &BTreeMap<ParameterId, f64>) -> Result<f64, StochasticError> {
        match self {
            Self::Constant(c) => Ok(*c),
            Self::Random { parameter, scale } => values
                .get(parameter)
                .map(|v| scale * v)
                .ok_or_else(|| {
                    StochasticError::model_data(format!(
                        "random parameter '{}' has no realised value",
                        parameter
                    ))
                }),
        }
    }
}

impl From<f64> for Coefficient {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

/// `coefficient · decision`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Term {
    /// Coefficient.
    pub coefficient: Coefficient,
    /// Decision multiplied.
    pub decision: DecisionId,
}

impl Term {
    /// Creates a term.
    pub fn new(coefficient: impl Into<Coefficient>, decision: impl Into<DecisionId>) -> Self {
        Self {
            coefficient: coefficient.into(),
            decision: decision.into(),
        }
    }
}

/// Linear constraint `lower ≤ Σ terms ≤ upper`; a missing bound is infinite.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    /// Row name.
    pub name: String,
    /// Left-hand side.
    pub terms: Vec<Term>,
    /// Lower bound.
    pub lower: Option<Coefficient>,
    /// Upper bound.
    pub upper: Option<Coefficient>,
}

impl Constraint {
    /// Creates an unbounded constraint.
    pub fn new(name: impl Into<String>, terms: Vec<Term>) -> Self {
        Self {
            name: name.into(),
            terms,
            lower: None,
            upper: None,
        }
    }

    /// Sets the lower bound.
    pub fn at_least(mut self, bound: impl Into<Coefficient>) -> Self {
        self.lower = Some(bound.into());
        self
    }

    /// Sets the upper bound.
    pub fn at_most(mut self, bound: impl Into<Coefficient>) -> Self {
        self.upper = Some(bound.into());
        self
    }

    /// Sets both bounds to the same value.
    pub fn equal_to(self, bound: impl Into<Coefficient>) -> Self {
        let bound = bound.into();
        self.at_least(bound.clone()).at_most(bound)
    }

    /// Random parameters referenced anywhere in the constraint, bounds
    /// included.
    pub fn random_parameters(&self) -> impl Iterator<Item = &ParameterId> {
        self.terms
            .iter()
            .map(|t| &t.coefficient)
            .chain(self.lower.iter())
            .chain(self.upper.iter())
            .filter_map(Coefficient::random_parameter)
    }

    /// First stage: no recourse decision and no random parameter anywhere.
    pub fn is_first_stage(&self, is_recourse: impl Fn(&DecisionId) -> bool) -> bool {
        self.random_parameters().next().is_none()
            && !self.terms.iter().any(|t| is_recourse(&t.decision))
    }
}

/// Optimisation direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GoalSense {
    /// Minimise.
    #[default]
    Minimize,
    /// Maximise.
    Maximize,
}

impl fmt::Display for GoalSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimize => f.write_str("minimize"),
            Self::Maximize => f.write_str("maximize"),
        }
    }
}

/// Linear objective.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Goal {
    /// Goal name.
    pub name: String,
    /// Direction.
    pub sense: GoalSense,
    /// Objective terms.
    pub terms: Vec<Term>,
    /// Disabled goals are ignored.
    pub enabled: bool,
}

impl Goal {
    /// Creates an enabled minimisation goal.
    pub fn minimize(name: impl Into<String>, terms: Vec<Term>) -> Self {
        Self {
            name: name.into(),
            sense: GoalSense::Minimize,
            terms,
            enabled: true,
        }
    }

    /// Creates an enabled maximisation goal.
    pub fn maximize(name: impl Into<String>, terms: Vec<Term>) -> Self {
        Self {
            sense: GoalSense::Maximize,
            ..Self::minimize(name, terms)
        }
    }

    /// Disables the goal.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// What the deterministic-equivalent generator needs from a model.
pub trait StochasticModel {
    /// Random parameters, in scenario-generation order.
    fn distributed_values(&self) -> &[DistributedValue];

    /// All decision variables.
    fn decisions(&self) -> &[Decision];

    /// All goals, enabled or not.
    fn goals(&self) -> &[Goal];

    /// All constraints.
    fn constraints(&self) -> &[Constraint];

    /// Creates the clone of recourse decision `decision` for scenario
    /// `ordinal` and returns its column.
    ///
    /// # Errors
    ///
    /// `ModelData` if `decision` is not a recourse decision of this model.
    fn clone_recourse_decision(
        &mut self,
        decision: &DecisionId,
        ordinal: usize,
    ) -> Result<Column, StochasticError>;

    /// Records the per-scenario probabilities against `decision`, aligned
    /// with its clones.
    ///
    /// # Errors
    ///
    /// `ModelData` if `decision` is unknown or the vector is misaligned.
    fn record_scenario_probabilities(
        &mut self,
        decision: &DecisionId,
        probabilities: Vec<f64>,
    ) -> Result<(), StochasticError>;

    /// Discards all clones and recorded probabilities.
    fn reset_recourse_clones(&mut self);

    /// Looks up a decision.
    fn decision(&self, id: &DecisionId) -> Option<&Decision> {
        self.decisions().iter().find(|d| &d.id == id)
    }

    /// Recourse decisions, in declaration order.
    fn recourse_decisions(&self) -> Vec<&Decision> {
        self.decisions().iter().filter(|d| d.is_recourse()).collect()
    }
}

/// In-memory linear two-stage model.
///
/// # Examples
///
/// ```rust
/// use stochastic_distributions::{DistributedValue, ScenariosDistribution};
/// use stochastic_model::{Constraint, Decision, Goal, LinearStochasticModel, StochasticModel, Term};
///
/// let demand = ScenariosDistribution::from_pairs([(0.5, 80.0), (0.5, 120.0)]).unwrap();
///
/// let mut model = LinearStochasticModel::new();
/// model.add_parameter(DistributedValue::new("demand", demand)).unwrap();
/// model.add_decision(Decision::first_stage("order")).unwrap();
/// model.add_decision(Decision::recourse("sell")).unwrap();
/// model.add_constraint(
///     Constraint::new("sell_le_order", vec![Term::new(1.0, "sell"), Term::new(-1.0, "order")])
///         .at_most(0.0),
/// );
/// model.add_goal(Goal::minimize("cost", vec![Term::new(1.0, "order"), Term::new(-1.5, "sell")]));
///
/// assert_eq!(model.recourse_decisions().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinearStochasticModel {
    values: Vec<DistributedValue>,
    decisions: Vec<Decision>,
    constraints: Vec<Constraint>,
    goals: Vec<Goal>,
    clones: BTreeMap<DecisionId, Vec<Column>>,
    probabilities: BTreeMap<DecisionId, Vec<f64>>,
}

impl LinearStochasticModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a random parameter.
    ///
    /// # Errors
    ///
    /// `ModelData` if a parameter with the same id exists.
    pub fn add_parameter(&mut self, value: DistributedValue) -> Result<(), StochasticError> {
        if self.values.iter().any(|v| v.id() == value.id()) {
            return Err(StochasticError::model_data(format!(
                "duplicate random parameter '{}'",
                value.id()
            )));
        }
        self.values.push(value);
        Ok(())
    }

    /// Adds a decision.
    ///
    /// # Errors
    ///
    /// `ModelData` for a duplicate id or inverted bounds.
    pub fn add_decision(&mut self, decision: Decision) -> Result<(), StochasticError> {
        if self.decisions.iter().any(|d| d.id == decision.id) {
            return Err(StochasticError::model_data(format!(
                "duplicate decision '{}'",
                decision.id
            )));
        }
        if decision.lower.is_nan() || decision.upper.is_nan() || decision.lower > decision.upper {
            return Err(StochasticError::model_data(format!(
                "decision '{}' has invalid bounds [{}, {}]",
                decision.id, decision.lower, decision.upper
            )));
        }
        self.decisions.push(decision);
        Ok(())
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Adds a goal.
    pub fn add_goal(&mut self, goal: Goal) {
        self.goals.push(goal);
    }

    /// Clones of `decision` created by the last build.
    pub fn clones(&self, decision: &DecisionId) -> &[Column] {
        self.clones.get(decision).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Probability vector recorded against `decision` by the last build.
    pub fn scenario_probabilities(&self, decision: &DecisionId) -> Option<&[f64]> {
        self.probabilities.get(decision).map(Vec::as_slice)
    }

    /// Weighted statistics of solved clone values for `decision`.
    ///
    /// # Errors
    ///
    /// `ModelData` if no probabilities are recorded or `values` is
    /// misaligned with them.
    pub fn recourse_statistics(
        &self,
        decision: &DecisionId,
        values: &[f64],
    ) -> Result<RecourseStatistics, StochasticError> {
        let probabilities = self.scenario_probabilities(decision).ok_or_else(|| {
            StochasticError::model_data(format!(
                "no scenario probabilities recorded for '{}'",
                decision
            ))
        })?;
        RecourseStatistics::compute(probabilities, values)
    }

    /// Ids of all random parameters referenced by goals or constraints.
    pub fn referenced_parameters(&self) -> HashSet<&ParameterId> {
        let goal_parameters = self
            .goals
            .iter()
            .flat_map(|g| g.terms.iter())
            .filter_map(|t| t.coefficient.random_parameter());
        self.constraints
            .iter()
            .flat_map(Constraint::random_parameters)
            .chain(goal_parameters)
            .collect()
    }

    fn recourse(&self, id: &DecisionId) -> Result<&Decision, StochasticError> {
        self.decisions
            .iter()
            .find(|d| &d.id == id && d.is_recourse())
            .ok_or_else(|| {
                StochasticError::model_data(format!("'{}' is not a recourse decision", id))
            })
    }
}

impl StochasticModel for LinearStochasticModel {
    fn distributed_values(&self) -> &[DistributedValue] {
        &self.values
    }

    fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    fn goals(&self) -> &[Goal] {
        &self.goals
    }

    fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    fn clone_recourse_decision(
        &mut self,
        decision: &DecisionId,
        ordinal: usize,
    ) -> Result<Column, StochasticError> {
        let column = Column::scenario_clone(self.recourse(decision)?, ordinal);
        let clones = self.clones.entry(decision.clone()).or_default();
        if clones.len() != ordinal {
            return Err(StochasticError::model_data(format!(
                "clone of '{}' for scenario {} requested out of order (expected {})",
                decision,
                ordinal,
                clones.len()
            )));
        }
        clones.push(column.clone());
        Ok(column)
    }

    fn record_scenario_probabilities(
        &mut self,
        decision: &DecisionId,
        probabilities: Vec<f64>,
    ) -> Result<(), StochasticError> {
        self.recourse(decision)?;
        let clones = self.clones(decision).len();
        if clones != probabilities.len() {
            return Err(StochasticError::model_data(format!(
                "'{}' has {} clones but {} probabilities",
                decision,
                clones,
                probabilities.len()
            )));
        }
        self.probabilities.insert(decision.clone(), probabilities);
        Ok(())
    }

    fn reset_recourse_clones(&mut self) {
        self.clones.clear();
        self.probabilities.clear();
    }
}
