//! Check command implementation
//!
//! Validates a model file without building it.

use std::fmt::Write as _;
use std::path::Path;

use stochastic_distributions::UnivariateDistribution;
use stochastic_model::StochasticModel;
use stochastic_sampling::ScenarioGenerator;

use crate::config::ModelFile;
use crate::Result;

/// Run the check command
pub fn run(model: &Path) -> Result<()> {
    let file = ModelFile::load(model)?;
    println!("{}", summarise(&file)?);
    Ok(())
}

/// Validates `file` and describes what a build would do.
pub fn summarise(file: &ModelFile) -> Result<String> {
    let directive = file.directive()?;
    let sampling = file.sampling_config()?;
    let model = file.to_model()?;
    let generator = ScenarioGenerator::new(
        model.distributed_values().to_vec(),
        &sampling,
        directive.scenario_threshold()?,
    )?;

    let mut out = String::new();
    for value in model.distributed_values() {
        let count = if value.is_bounded() {
            value.scenario_count().to_string()
        } else {
            "unbounded".to_string()
        };
        let _ = writeln!(
            out,
            "parameter {}: {} ({} scenarios)",
            value.id(),
            value.distribution().name(),
            count
        );
    }
    let _ = writeln!(
        out,
        "decisions: {} ({} recourse)",
        model.decisions().len(),
        model.recourse_decisions().len()
    );
    let _ = writeln!(out, "constraints: {}", model.constraints().len());
    let _ = writeln!(
        out,
        "goals: {} ({} enabled)",
        model.goals().len(),
        model.goals().iter().filter(|g| g.enabled).count()
    );
    let _ = writeln!(
        out,
        "joint scenarios: {} (threshold {}), method: {}, planned: {}",
        generator.scenario_count(),
        generator.threshold(),
        generator.method(),
        generator.planned_scenarios()
    );
    let _ = write!(out, "decomposition: {}", directive.decomposition_type);
    Ok(out)
}
