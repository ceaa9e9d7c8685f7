//! Build command implementation
//!
//! Builds the deterministic equivalent of a model file and prints it.

use std::fmt::Write as _;
use std::path::Path;

use stochastic_core::cancel::NeverAbort;
use stochastic_model::{BuildOutcome, LinearStochasticTask, StochasticModelGenerator};
use tracing::{info, warn};

use super::OutputFormat;
use crate::config::ModelFile;
use crate::Result;

/// Run the build command
pub fn run(model: &Path, format: OutputFormat) -> Result<()> {
    let file = ModelFile::load(model)?;
    let mut stochastic_model = file.to_model()?;
    let mut generator = StochasticModelGenerator::new(file.directive()?, file.sampling_config()?);

    let task = match generator.build(&mut stochastic_model, &NeverAbort)? {
        BuildOutcome::Completed(task) => task,
        BuildOutcome::Cancelled => {
            warn!("build cancelled");
            return Ok(());
        }
    };
    info!(
        columns = task.columns().len(),
        rows = task.rows().len(),
        "deterministic equivalent ready"
    );

    let output = match format {
        OutputFormat::Table => render_table(&task),
        OutputFormat::Json => serde_json::to_string_pretty(&task)?,
    };
    println!("{}", output);
    Ok(())
}

/// Renders the task as readable rows.
pub fn render_table(task: &LinearStochasticTask) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "scenarios: {}  columns: {}  rows: {} ({} first stage)",
        task.scenario_count(),
        task.columns().len(),
        task.rows().len(),
        task.first_stage_rows()
    );

    let goal = task.goal();
    let terms: Vec<(usize, f64)> = goal.coefficients.iter().map(|(&c, &v)| (c, v)).collect();
    let _ = writeln!(out, "{} {}: {}", goal.sense, goal.name, linear_form(task, &terms));

    for row in task.rows() {
        let _ = writeln!(
            out,
            "  {}: {} <= {} <= {}",
            row.name,
            row.lower,
            linear_form(task, &row.coefficients),
            row.upper
        );
    }
    out
}

fn linear_form(task: &LinearStochasticTask, terms: &[(usize, f64)]) -> String {
    if terms.is_empty() {
        return "0".to_string();
    }
    terms
        .iter()
        .map(|&(column, value)| {
            let name = task
                .columns()
                .get(column)
                .map(|c| c.name.as_str())
                .unwrap_or("?");
            format!("{} {}", value, name)
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stochastic_distributions::{DistributedValue, ScenariosDistribution};
    use stochastic_model::{
        Coefficient, Constraint, Decision, Goal, LinearStochasticModel, StochasticDirective, Term,
    };
    use stochastic_sampling::SamplingConfig;

    fn covering_task() -> LinearStochasticTask {
        let demand = ScenariosDistribution::from_pairs([(0.5, 1.0), (0.5, 2.0)]).unwrap();
        let mut model = LinearStochasticModel::new();
        model.add_parameter(DistributedValue::new("d", demand)).unwrap();
        model.add_decision(Decision::recourse("y")).unwrap();
        model.add_constraint(
            Constraint::new("cover", vec![Term::new(1.0, "y")]).at_least(Coefficient::parameter("d")),
        );
        model.add_goal(Goal::minimize("cost", vec![Term::new(2.0, "y")]));

        StochasticModelGenerator::new(StochasticDirective::default(), SamplingConfig::default())
            .build(&mut model, &NeverAbort)
            .unwrap()
            .into_task()
            .unwrap()
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&covering_task());

        assert!(table.starts_with("scenarios: 2  columns: 2  rows: 2 (0 first stage)"));
        assert!(table.contains("minimize cost: 1 y#0 + 1 y#1"));
        assert!(table.contains("cover#1: 2 <= 1 y#1 <= inf"));
    }

    #[test]
    fn test_json_keeps_infinite_bounds() {
        let task = covering_task();
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("null"), "{}", json);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let row = &value["rows"][0];
        assert_eq!(row["lower"], 1.0);
        assert!(row.get("upper").is_none());

        let restored: LinearStochasticTask = serde_json::from_str(&json).unwrap();
        for (before, after) in task.rows().iter().zip(restored.rows()) {
            assert_eq!(after.lower, before.lower);
            assert_eq!(after.upper, f64::INFINITY);
        }
        for (before, after) in task.columns().iter().zip(restored.columns()) {
            assert_eq!(after.lower, before.lower);
            assert_eq!(after.upper, f64::INFINITY);
        }
    }
}
