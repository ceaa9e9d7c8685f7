//! Deterministic-equivalent task and the solver sink boundary.
//!
//! A [`LinearStochasticTask`] is the output of one build: the column list
//! (first-stage decisions once, recourse decisions once per scenario), the
//! single aggregated goal row and all constraint rows. It does not solve
//! anything; [`LinearStochasticTask::forward`] replays it into a
//! [`LinearSolverSink`].

use std::collections::BTreeMap;

use stochastic_core::types::StochasticError;

use crate::ids::DecisionId;
use crate::model::{Decision, GoalSense};

/// A column of the deterministic equivalent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// Column name; clones are suffixed with `#ordinal`.
    pub name: String,
    /// Decision the column stands for.
    pub decision: DecisionId,
    /// Scenario ordinal for recourse clones.
    pub scenario: Option<usize>,
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

impl Column {
    /// The single column of a first-stage decision.
    pub fn first_stage(decision: &Decision) -> Self {
        Self {
            name: decision.id.as_str().to_string(),
            decision: decision.id.clone(),
            scenario: None,
            lower: decision.lower,
            upper: decision.upper,
        }
    }

    /// The clone of a recourse decision for scenario `ordinal`.
    pub fn scenario_clone(decision: &Decision, ordinal: usize) -> Self {
        Self {
            name: decision.id.clone_name(ordinal),
            decision: decision.id.clone(),
            scenario: Some(ordinal),
            lower: decision.lower,
            upper: decision.upper,
        }
    }
}

/// A constraint row `lower ≤ Σ coefficient · column ≤ upper`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    /// Row name; second-stage rows are suffixed with `#ordinal`.
    pub name: String,
    /// Scenario ordinal for second-stage rows.
    pub scenario: Option<usize>,
    /// `(column index, coefficient)` pairs in column order.
    pub coefficients: Vec<(usize, f64)>,
    /// Lower bound (`-inf` when absent).
    #[cfg_attr(
        feature = "serde",
        serde(
            default = "crate::bounds::unbounded_below",
            skip_serializing_if = "crate::bounds::is_unbounded_below"
        )
    )]
    pub lower: f64,
    /// Upper bound (`+inf` when absent).
    #[cfg_attr(
        feature = "serde",
        serde(
            default = "crate::bounds::unbounded_above",
            skip_serializing_if = "crate::bounds::is_unbounded_above"
        )
    )]
    pub upper: f64,
}

impl Row {
    /// Whether the row belongs to a single scenario.
    #[inline]
    pub fn is_second_stage(&self) -> bool {
        self.scenario.is_some()
    }
}

/// The aggregated objective row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalRow {
    /// Goal name.
    pub name: String,
    /// Direction.
    pub sense: GoalSense,
    /// Coefficient per column index.
    pub coefficients: BTreeMap<usize, f64>,
}

/// Receiver of a deterministic equivalent, typically a linear solver.
pub trait LinearSolverSink {
    /// Adds the column at `index`. Columns arrive in index order.
    fn add_column(&mut self, index: usize, column: &Column) -> Result<(), StochasticError>;

    /// Sets the objective.
    fn set_goal(&mut self, goal: &GoalRow) -> Result<(), StochasticError>;

    /// Adds a constraint row.
    fn add_row(&mut self, row: &Row) -> Result<(), StochasticError>;
}

/// The deterministic equivalent produced by one build.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearStochasticTask {
    columns: Vec<Column>,
    goal: GoalRow,
    rows: Vec<Row>,
    scenario_probabilities: Vec<f64>,
}

impl LinearStochasticTask {
    pub(crate) fn new(goal_name: impl Into<String>, sense: GoalSense) -> Self {
        Self {
            columns: Vec::new(),
            goal: GoalRow {
                name: goal_name.into(),
                sense,
                coefficients: BTreeMap::new(),
            },
            rows: Vec::new(),
            scenario_probabilities: Vec::new(),
        }
    }

    pub(crate) fn push_column(&mut self, column: Column) -> usize {
        self.columns.push(column);
        self.columns.len() - 1
    }

    pub(crate) fn add_goal_coefficient(&mut self, column: usize, value: f64) {
        *self.goal.coefficients.entry(column).or_insert(0.0) += value;
    }

    pub(crate) fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub(crate) fn push_scenario(&mut self, probability: f64) {
        self.scenario_probabilities.push(probability);
    }

    /// All columns in index order.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The aggregated goal row.
    #[inline]
    pub fn goal(&self) -> &GoalRow {
        &self.goal
    }

    /// Goal direction.
    #[inline]
    pub fn sense(&self) -> GoalSense {
        self.goal.sense
    }

    /// All rows: first-stage rows first, then second-stage rows by scenario.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of scenarios folded into the task.
    #[inline]
    pub fn scenario_count(&self) -> usize {
        self.scenario_probabilities.len()
    }

    /// Probability of each scenario, by ordinal.
    #[inline]
    pub fn scenario_probabilities(&self) -> &[f64] {
        &self.scenario_probabilities
    }

    /// Number of rows shared by all scenarios.
    pub fn first_stage_rows(&self) -> usize {
        self.rows.iter().filter(|r| !r.is_second_stage()).count()
    }

    /// Index of the column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Goal coefficient of the column named `name` (0 when absent).
    pub fn goal_coefficient(&self, name: &str) -> Option<f64> {
        let index = self.column_index(name)?;
        Some(self.goal.coefficients.get(&index).copied().unwrap_or(0.0))
    }

    /// Replays the task into `sink`: columns, then the goal, then rows.
    ///
    /// # Errors
    ///
    /// The first error returned by the sink.
    pub fn forward(&self, sink: &mut dyn LinearSolverSink) -> Result<(), StochasticError> {
        for (index, column) in self.columns.iter().enumerate() {
            sink.add_column(index, column)?;
        }
        sink.set_goal(&self.goal)?;
        for row in &self.rows {
            sink.add_row(row)?;
        }
        Ok(())
    }
}

/// Sink that stores everything it receives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowCollector {
    /// Columns received.
    pub columns: Vec<Column>,
    /// Goal received.
    pub goal: Option<GoalRow>,
    /// Rows received.
    pub rows: Vec<Row>,
}

impl RowCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LinearSolverSink for RowCollector {
    fn add_column(&mut self, index: usize, column: &Column) -> Result<(), StochasticError> {
        if index != self.columns.len() {
            return Err(StochasticError::model_data(format!(
                "column {} received out of order",
                index
            )));
        }
        self.columns.push(column.clone());
        Ok(())
    }

    fn set_goal(&mut self, goal: &GoalRow) -> Result<(), StochasticError> {
        self.goal = Some(goal.clone());
        Ok(())
    }

    fn add_row(&mut self, row: &Row) -> Result<(), StochasticError> {
        self.rows.push(row.clone());
        Ok(())
    }
}
