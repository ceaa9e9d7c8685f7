//! Scenarios command implementation
//!
//! Generates the scenarios of a model file and prints them.

use std::fmt::Write as _;
use std::path::Path;

use stochastic_core::cancel::NeverAbort;
use stochastic_sampling::{ScenarioGenerator, ScenarioPull, ScenarioSample};
use tracing::info;

use super::OutputFormat;
use crate::config::ModelFile;
use crate::Result;

/// Run the scenarios command
pub fn run(model: &Path, format: OutputFormat, limit: Option<usize>) -> Result<()> {
    let file = ModelFile::load(model)?;
    let threshold = file.directive()?.scenario_threshold()?;
    let mut generator =
        ScenarioGenerator::new(file.distributed_values()?, &file.sampling_config()?, threshold)?;

    info!(
        scenario_count = generator.scenario_count(),
        method = %generator.method(),
        planned = generator.planned_scenarios(),
        "generating scenarios"
    );

    let samples = collect(&mut generator, limit)?;
    let output = match format {
        OutputFormat::Table => render_table(&generator, &samples),
        OutputFormat::Json => serde_json::to_string_pretty(&samples)?,
    };
    println!("{}", output);
    Ok(())
}

/// Pulls up to `limit` scenarios.
pub fn collect(generator: &mut ScenarioGenerator, limit: Option<usize>) -> Result<Vec<ScenarioSample>> {
    let limit = limit.unwrap_or(usize::MAX);
    let mut samples = Vec::new();
    while samples.len() < limit {
        match generator.next_scenario(&NeverAbort)? {
            ScenarioPull::Scenario(sample) => samples.push(sample),
            ScenarioPull::Done | ScenarioPull::Cancelled => break,
        }
    }
    Ok(samples)
}

/// Renders scenarios as a fixed-width table.
pub fn render_table(generator: &ScenarioGenerator, samples: &[ScenarioSample]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "method: {}  scenarios: {}  seed: {}",
        generator.method(),
        generator.planned_scenarios(),
        generator.seed()
    );

    let _ = write!(out, "{:>8} {:>14}", "#", "probability");
    for value in generator.values() {
        let _ = write!(out, " {:>14}", value.id().as_str());
    }
    out.push('\n');

    for sample in samples {
        let _ = write!(out, "{:>8} {:>14.6}", sample.ordinal, sample.probability);
        for value in generator.values() {
            match sample.value(value.id()) {
                Some(v) => {
                    let _ = write!(out, " {:>14.6}", v);
                }
                None => {
                    let _ = write!(out, " {:>14}", "-");
                }
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stochastic_distributions::{DiscreteUniform, DistributedValue};
    use stochastic_sampling::SamplingConfig;

    fn generator() -> ScenarioGenerator {
        let values = vec![
            DistributedValue::new("a", DiscreteUniform::new(1, 2).unwrap()),
            DistributedValue::new("b", DiscreteUniform::new(5, 6).unwrap()),
        ];
        ScenarioGenerator::new(values, &SamplingConfig::default(), 500).unwrap()
    }

    #[test]
    fn test_collect_respects_limit() {
        let mut generator = generator();
        assert_eq!(collect(&mut generator, Some(3)).unwrap().len(), 3);
        generator.restart();
        assert_eq!(collect(&mut generator, None).unwrap().len(), 4);
    }

    #[test]
    fn test_render_table() {
        let mut generator = generator();
        let samples = collect(&mut generator, None).unwrap();
        let table = render_table(&generator, &samples);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2 + 4);
        assert!(lines[0].contains("no_sampling"));
        assert!(lines[1].contains("probability"));
        assert!(lines[2].contains("0.250000"));
    }
}
