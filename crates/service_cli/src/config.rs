//! Model file loading.
//!
//! Model files are TOML documents describing the sampling options, the
//! stochastic directive, the random parameters and the linear model:
//!
//! ```toml
//! [sampling]
//! method = "latin_hypercube"
//! sample_count = 200
//!
//! [directive]
//! maximum_scenario_count_before_sampling = -1
//!
//! [[parameters]]
//! id = "demand"
//! distribution = { type = "normal", mean = 100.0, std_dev = 20.0 }
//!
//! [[decisions]]
//! id = "order"
//!
//! [[decisions]]
//! id = "sell"
//! stage = "recourse"
//!
//! [[constraints]]
//! name = "sell_le_demand"
//! terms = [{ decision = "sell" }]
//! upper = { parameter = "demand" }
//!
//! [[goals]]
//! name = "cost"
//! terms = [{ decision = "order", coefficient = 1.0 }, { decision = "sell", coefficient = -1.5 }]
//! ```
//!
//! Sampling options can be overridden from the environment:
//! `STOCHASTIC_SAMPLING_METHOD`, `STOCHASTIC_SAMPLE_COUNT`,
//! `STOCHASTIC_RANDOM_SEED` and `STOCHASTIC_MAX_SCENARIOS`.

use std::path::Path;

use serde::Deserialize;
use stochastic_distributions::{
    Binomial, ContinuousUniform, DiscreteUniform, DistributedValue, Distribution, Exponential,
    Geometric, LogNormal, Normal, ScenariosDistribution,
};
use stochastic_model::{
    Coefficient, Constraint, Decision, DecisionKind, DecompositionType, Goal, GoalSense,
    LinearStochasticModel, StochasticDirective, Term,
};
use stochastic_sampling::config::AUTOMATIC_THRESHOLD;
use stochastic_sampling::{SamplingConfig, SamplingMethod};
use tracing::debug;

use crate::error::{CliError, Result};

/// Environment variable overriding the sampling method.
pub const ENV_SAMPLING_METHOD: &str = "STOCHASTIC_SAMPLING_METHOD";
/// Environment variable overriding the sample count.
pub const ENV_SAMPLE_COUNT: &str = "STOCHASTIC_SAMPLE_COUNT";
/// Environment variable overriding the seed.
pub const ENV_RANDOM_SEED: &str = "STOCHASTIC_RANDOM_SEED";
/// Environment variable overriding the sampling threshold.
pub const ENV_MAX_SCENARIOS: &str = "STOCHASTIC_MAX_SCENARIOS";

/// `[sampling]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingSection {
    /// Sampling method.
    pub method: SamplingMethod,
    /// Sample count (0 = automatic).
    pub sample_count: usize,
    /// Seed (0 = default seed).
    pub random_seed: u64,
}

impl SamplingSection {
    /// Builds the validated sampling configuration.
    pub fn to_config(&self) -> Result<SamplingConfig> {
        Ok(SamplingConfig::builder()
            .method(self.method)
            .sample_count(self.sample_count)
            .random_seed(self.random_seed)
            .build()?)
    }
}

/// `[directive]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectiveSection {
    /// Scenario count above which sampling is used (-1 = automatic).
    pub maximum_scenario_count_before_sampling: i64,
    /// Requested decomposition.
    pub decomposition_type: DecompositionType,
}

impl Default for DirectiveSection {
    fn default() -> Self {
        Self {
            maximum_scenario_count_before_sampling: AUTOMATIC_THRESHOLD,
            decomposition_type: DecompositionType::Automatic,
        }
    }
}

impl DirectiveSection {
    /// Builds the validated directive.
    pub fn to_directive(&self) -> Result<StochasticDirective> {
        let directive = StochasticDirective::new(
            self.maximum_scenario_count_before_sampling,
            self.decomposition_type,
        );
        directive.validate()?;
        Ok(directive)
    }
}

/// One `(probability, value)` entry of an explicit distribution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioSpec {
    /// Probability.
    pub probability: f64,
    /// Value.
    pub value: f64,
}

/// Tagged distribution description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DistributionSpec {
    /// Normal distribution.
    Normal {
        /// Mean.
        mean: f64,
        /// Standard deviation.
        std_dev: f64,
    },
    /// Log-normal distribution.
    LogNormal {
        /// Log-space mean.
        mu: f64,
        /// Log-space standard deviation.
        sigma: f64,
    },
    /// Exponential distribution.
    Exponential {
        /// Rate.
        rate: f64,
    },
    /// Binomial distribution.
    Binomial {
        /// Number of trials.
        trials: i32,
        /// Success probability.
        probability: f64,
    },
    /// Geometric distribution.
    Geometric {
        /// Success probability.
        probability: f64,
    },
    /// Uniform over an integer range.
    DiscreteUniform {
        /// Lower bound.
        lower: i32,
        /// Upper bound.
        upper: i32,
    },
    /// Uniform over a real interval.
    ContinuousUniform {
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
    /// Explicit scenarios.
    Scenarios {
        /// Scenario list.
        scenarios: Vec<ScenarioSpec>,
    },
}

impl DistributionSpec {
    /// Constructs the distribution, checking its parameters.
    pub fn to_distribution(&self) -> Result<Distribution> {
        let distribution: Distribution = match self {
            Self::Normal { mean, std_dev } => Normal::new(*mean, *std_dev)?.into(),
            Self::LogNormal { mu, sigma } => LogNormal::new(*mu, *sigma)?.into(),
            Self::Exponential { rate } => Exponential::new(*rate)?.into(),
            Self::Binomial {
                trials,
                probability,
            } => Binomial::new(*trials, *probability)?.into(),
            Self::Geometric { probability } => Geometric::new(*probability)?.into(),
            Self::DiscreteUniform { lower, upper } => DiscreteUniform::new(*lower, *upper)?.into(),
            Self::ContinuousUniform { lower, upper } => {
                ContinuousUniform::new(*lower, *upper)?.into()
            }
            Self::Scenarios { scenarios } => {
                ScenariosDistribution::from_pairs(scenarios.iter().map(|s| (s.probability, s.value)))?
                    .into()
            }
        };
        Ok(distribution)
    }
}

/// `[[parameters]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterSpec {
    /// Parameter id.
    pub id: String,
    /// Distribution.
    pub distribution: DistributionSpec,
}

/// `[[decisions]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecisionSpec {
    /// Decision id.
    pub id: String,
    /// Stage (`first_stage` or `recourse`).
    #[serde(default)]
    pub stage: DecisionKind,
    /// Lower bound.
    #[serde(default)]
    pub lower: f64,
    /// Upper bound.
    #[serde(default = "infinity")]
    pub upper: f64,
}

/// A coefficient or bound: a number or `{ parameter, scale }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CoefficientSpec {
    /// Fixed value.
    Constant(f64),
    /// Multiple of a random parameter.
    Random {
        /// Parameter id.
        parameter: String,
        /// Multiplier.
        #[serde(default = "one")]
        scale: f64,
    },
}

impl From<&CoefficientSpec> for Coefficient {
    fn from(spec: &CoefficientSpec) -> Self {
        match spec {
            CoefficientSpec::Constant(value) => Coefficient::Constant(*value),
            CoefficientSpec::Random { parameter, scale } => Coefficient::Random {
                parameter: parameter.as_str().into(),
                scale: *scale,
            },
        }
    }
}

/// One term of a constraint or goal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermSpec {
    /// Decision id.
    pub decision: String,
    /// Coefficient (defaults to 1).
    #[serde(default = "unit_coefficient")]
    pub coefficient: CoefficientSpec,
}

impl From<&TermSpec> for Term {
    fn from(spec: &TermSpec) -> Self {
        Term::new(Coefficient::from(&spec.coefficient), spec.decision.as_str())
    }
}

/// `[[constraints]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstraintSpec {
    /// Row name.
    pub name: String,
    /// Left-hand side.
    pub terms: Vec<TermSpec>,
    /// Lower bound.
    #[serde(default)]
    pub lower: Option<CoefficientSpec>,
    /// Upper bound.
    #[serde(default)]
    pub upper: Option<CoefficientSpec>,
}

/// `[[goals]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoalSpec {
    /// Goal name.
    pub name: String,
    /// Direction.
    #[serde(default)]
    pub sense: GoalSense,
    /// Objective terms.
    pub terms: Vec<TermSpec>,
    /// Whether the goal is active.
    #[serde(default = "enabled")]
    pub enabled: bool,
}

/// A complete model file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelFile {
    /// Sampling options.
    pub sampling: SamplingSection,
    /// Stochastic directive.
    pub directive: DirectiveSection,
    /// Random parameters.
    pub parameters: Vec<ParameterSpec>,
    /// Decision variables.
    pub decisions: Vec<DecisionSpec>,
    /// Constraints.
    pub constraints: Vec<ConstraintSpec>,
    /// Goals.
    pub goals: Vec<GoalSpec>,
}

impl ModelFile {
    /// Reads and parses a model file, then applies environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut file = Self::parse(&content)?;
        file.apply_overrides(|key| std::env::var(key).ok())?;
        debug!(
            path = %path.display(),
            parameters = file.parameters.len(),
            decisions = file.decisions.len(),
            "model file loaded"
        );
        Ok(file)
    }

    /// Parses TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Applies `STOCHASTIC_*` overrides obtained through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(method) = lookup(ENV_SAMPLING_METHOD) {
            self.sampling.method = method.parse()?;
        }
        if let Some(count) = lookup(ENV_SAMPLE_COUNT) {
            self.sampling.sample_count = parse_override(ENV_SAMPLE_COUNT, &count)?;
        }
        if let Some(seed) = lookup(ENV_RANDOM_SEED) {
            self.sampling.random_seed = parse_override(ENV_RANDOM_SEED, &seed)?;
        }
        if let Some(threshold) = lookup(ENV_MAX_SCENARIOS) {
            self.directive.maximum_scenario_count_before_sampling =
                parse_override(ENV_MAX_SCENARIOS, &threshold)?;
        }
        Ok(())
    }

    /// Validated sampling configuration.
    pub fn sampling_config(&self) -> Result<SamplingConfig> {
        self.sampling.to_config()
    }

    /// Validated directive.
    pub fn directive(&self) -> Result<StochasticDirective> {
        self.directive.to_directive()
    }

    /// Distributed values, in file order.
    pub fn distributed_values(&self) -> Result<Vec<DistributedValue>> {
        self.parameters
            .iter()
            .map(|p| {
                let distribution = p.distribution.to_distribution().map_err(|e| {
                    CliError::Config(format!("parameter '{}': {}", p.id, e))
                })?;
                Ok(DistributedValue::new(p.id.as_str(), distribution))
            })
            .collect()
    }

    /// Builds the in-memory model.
    pub fn to_model(&self) -> Result<LinearStochasticModel> {
        let mut model = LinearStochasticModel::new();
        for value in self.distributed_values()? {
            model.add_parameter(value)?;
        }
        for spec in &self.decisions {
            model.add_decision(Decision {
                id: spec.id.as_str().into(),
                kind: spec.stage,
                lower: spec.lower,
                upper: spec.upper,
            })?;
        }
        for spec in &self.constraints {
            let mut constraint =
                Constraint::new(spec.name.as_str(), spec.terms.iter().map(Term::from).collect());
            constraint.lower = spec.lower.as_ref().map(Coefficient::from);
            constraint.upper = spec.upper.as_ref().map(Coefficient::from);
            model.add_constraint(constraint);
        }
        for spec in &self.goals {
            model.add_goal(Goal {
                name: spec.name.clone(),
                sense: spec.sense,
                terms: spec.terms.iter().map(Term::from).collect(),
                enabled: spec.enabled,
            });
        }
        Ok(model)
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| CliError::Config(format!("{}: cannot parse '{}'", key, raw)))
}

fn infinity() -> f64 {
    f64::INFINITY
}

fn one() -> f64 {
    1.0
}

fn unit_coefficient() -> CoefficientSpec {
    CoefficientSpec::Constant(1.0)
}

fn enabled() -> bool {
    true
}
