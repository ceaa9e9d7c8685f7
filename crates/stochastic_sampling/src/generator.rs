//! Scenario generation.
//!
//! [`ScenarioGenerator`] owns the distributed values of one solve and
//! decides, once, whether to enumerate their joint support exactly or to
//! sample it:
//!
//! | Method | Count ≤ threshold | Count > threshold |
//! |---|---|---|
//! | `Automatic` | enumerate | Latin Hypercube, or Monte Carlo if a distribution needs a dynamic uniform count |
//! | `NoSampling` | enumerate | enumerate (unbounded supports are an error) |
//! | `MonteCarlo` | enumerate | Monte Carlo |
//! | `LatinHypercube` | enumerate | Latin Hypercube |
//!
//! Each pull hands out an owned [`ScenarioSample`]; nothing is written back
//! into the distributed values.

use std::collections::BTreeMap;

use stochastic_core::cancel::AbortCheck;
use stochastic_core::types::{DistributionError, StochasticError};
use stochastic_distributions::{DistributedValue, ParameterId, SCENARIO_COUNT_UNBOUNDED};
use tracing::{debug, info};

use crate::config::{SamplingConfig, SamplingMethod, MAX_ENUMERATED_SUPPORT};
use crate::engine::{SamplingEngine, SamplingScheme};
use crate::enumerate::CrossProduct;
use crate::error::ConfigError;

/// One realised scenario.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioSample {
    /// Zero-based position in the generated sequence.
    pub ordinal: usize,
    /// Probability weight of the scenario.
    pub probability: f64,
    /// Realised value of every distributed value.
    pub values: BTreeMap<ParameterId, f64>,
}

impl ScenarioSample {
    /// Realised value of `id`.
    pub fn value(&self, id: &ParameterId) -> Option<f64> {
        self.values.get(id).copied()
    }
}

/// Outcome of a single pull.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioPull {
    /// The next scenario.
    Scenario(ScenarioSample),
    /// The abort predicate fired; no scenario was produced.
    Cancelled,
    /// All scenarios have been handed out.
    Done,
}

#[derive(Debug, Clone)]
enum Mode {
    Enumeration(CrossProduct),
    Sampling(SamplingEngine),
}

/// Produces the scenarios of one solve.
///
/// # Examples
///
/// ```rust
/// use stochastic_core::cancel::NeverAbort;
/// use stochastic_distributions::{DistributedValue, Normal};
/// use stochastic_sampling::{SamplingConfig, SamplingMethod, ScenarioGenerator};
///
/// let values = vec![DistributedValue::new("demand", Normal::new(100.0, 10.0).unwrap())];
/// let config = SamplingConfig::builder().sample_count(20).build().unwrap();
/// let generator = ScenarioGenerator::new(values, &config, 500).unwrap();
///
/// assert!(generator.sampling_needed());
/// assert_eq!(generator.method(), SamplingMethod::LatinHypercube);
/// assert_eq!(generator.planned_scenarios(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioGenerator {
    ids: Vec<ParameterId>,
    values: Vec<DistributedValue>,
    scenario_count: i32,
    threshold: i32,
    sampling_needed: bool,
    method: SamplingMethod,
    sample_count: usize,
    seed: u64,
    mode: Mode,
    ordinal: usize,
}

impl ScenarioGenerator {
    /// Resolves the generation mode and prepares the first pull.
    ///
    /// `threshold` is the scenario count above which sampling replaces
    /// enumeration.
    ///
    /// # Errors
    ///
    /// - `ModelData` for a negative threshold or an invalid configuration
    /// - `ModelData` if enumeration is forced over an unbounded support
    /// - `ModelData` if a value to enumerate has more than
    ///   [`MAX_ENUMERATED_SUPPORT`] support points
    /// - `ModelData` if Latin Hypercube is forced on a distribution that
    ///   cannot be stratified
    pub fn new(
        values: Vec<DistributedValue>,
        config: &SamplingConfig,
        threshold: i32,
    ) -> Result<Self, StochasticError> {
        config.validate()?;
        if threshold < 0 {
            return Err(ConfigError::InvalidThreshold(i64::from(threshold)).into());
        }

        let scenario_count = joint_scenario_count(&values);
        let sampling_needed = scenario_count > threshold;
        let method = resolve_method(config.method(), sampling_needed, &values);
        let sample_count = match method {
            SamplingMethod::NoSampling => usize::try_from(scenario_count).unwrap_or(usize::MAX),
            m => config.resolved_sample_count(m),
        };
        let seed = config.resolved_seed();
        let ids = values.iter().map(|v| v.id().clone()).collect();
        let mode = build_mode(&values, method, sample_count, seed)?;

        info!(
            parameters = values.len(),
            scenario_count,
            threshold,
            %method,
            sample_count,
            "scenario generator ready"
        );

        Ok(Self {
            ids,
            values,
            scenario_count,
            threshold,
            sampling_needed,
            method,
            sample_count,
            seed,
            mode,
            ordinal: 0,
        })
    }

    /// Saturating product of the per-value scenario counts.
    #[inline]
    pub fn scenario_count(&self) -> i32 {
        self.scenario_count
    }

    /// Threshold the generator was created with.
    #[inline]
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Whether the scenario count exceeds the threshold.
    #[inline]
    pub fn sampling_needed(&self) -> bool {
        self.sampling_needed
    }

    /// Resolved method: `NoSampling` when enumerating, otherwise the
    /// sampling scheme in use.
    #[inline]
    pub fn method(&self) -> SamplingMethod {
        self.method
    }

    /// Number of scenarios a full pass produces.
    #[inline]
    pub fn planned_scenarios(&self) -> usize {
        self.sample_count
    }

    /// Seed used for sampling.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The distributed values, in generation order.
    #[inline]
    pub fn values(&self) -> &[DistributedValue] {
        &self.values
    }

    /// Scenarios handed out since creation or the last restart.
    #[inline]
    pub fn produced(&self) -> usize {
        self.ordinal
    }

    /// Pulls the next scenario.
    ///
    /// `abort` is polled before the scenario is produced and inside any
    /// bounded sampling loop; a positive poll yields
    /// [`ScenarioPull::Cancelled`].
    ///
    /// # Errors
    ///
    /// Algorithm failures (non-convergence, range overflow) and invalid
    /// arguments surfaced by a distribution.
    pub fn next_scenario(&mut self, abort: &dyn AbortCheck) -> Result<ScenarioPull, StochasticError> {
        if abort.should_abort() {
            debug!(ordinal = self.ordinal, "scenario generation cancelled");
            return Ok(ScenarioPull::Cancelled);
        }

        let drawn = match &mut self.mode {
            Mode::Enumeration(product) => product.next(),
            Mode::Sampling(engine) => {
                let probability = engine.probability();
                match engine.next_sample(abort) {
                    Ok(values) => values.map(|v| (probability, v)),
                    Err(DistributionError::Cancelled) => {
                        debug!(ordinal = self.ordinal, "sampling cancelled");
                        return Ok(ScenarioPull::Cancelled);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        };

        let Some((probability, realised)) = drawn else {
            return Ok(ScenarioPull::Done);
        };

        let sample = ScenarioSample {
            ordinal: self.ordinal,
            probability,
            values: self.ids.iter().cloned().zip(realised).collect(),
        };
        self.ordinal += 1;
        Ok(ScenarioPull::Scenario(sample))
    }

    /// Rewinds so that the identical sequence is produced again.
    ///
    /// Enumeration restarts from the first combination; sampling reseeds
    /// the engine with the same seed.
    pub fn restart(&mut self) {
        match &mut self.mode {
            Mode::Enumeration(product) => product.restart(),
            Mode::Sampling(engine) => engine.restart(),
        }
        debug!(produced = self.ordinal, "scenario generator restarted");
        self.ordinal = 0;
    }
}

/// Saturating product of scenario counts; any unbounded value makes the
/// product unbounded.
fn joint_scenario_count(values: &[DistributedValue]) -> i32 {
    values.iter().fold(1i32, |acc, v| {
        let count = v.scenario_count();
        if acc == SCENARIO_COUNT_UNBOUNDED || count == SCENARIO_COUNT_UNBOUNDED {
            SCENARIO_COUNT_UNBOUNDED
        } else {
            acc.saturating_mul(count)
        }
    })
}

fn resolve_method(
    requested: SamplingMethod,
    sampling_needed: bool,
    values: &[DistributedValue],
) -> SamplingMethod {
    match requested {
        SamplingMethod::NoSampling => SamplingMethod::NoSampling,
        _ if !sampling_needed => SamplingMethod::NoSampling,
        SamplingMethod::Automatic => {
            if values.iter().all(DistributedValue::supports_latin_hypercube) {
                SamplingMethod::LatinHypercube
            } else {
                SamplingMethod::MonteCarlo
            }
        }
        explicit => explicit,
    }
}

/// Refuses supports that are unbounded or too large to materialise.
fn check_enumerable(value: &DistributedValue) -> Result<(), StochasticError> {
    match value.scenario_count() {
        SCENARIO_COUNT_UNBOUNDED => Err(StochasticError::model_data(format!(
            "parameter '{}' has unbounded support and cannot be enumerated",
            value.id()
        ))),
        count if count > MAX_ENUMERATED_SUPPORT => Err(StochasticError::model_data(format!(
            "parameter '{}' has {} support points, more than the {} that can be enumerated",
            value.id(),
            count,
            MAX_ENUMERATED_SUPPORT
        ))),
        _ => Ok(()),
    }
}

fn build_mode(
    values: &[DistributedValue],
    method: SamplingMethod,
    sample_count: usize,
    seed: u64,
) -> Result<Mode, StochasticError> {
    let scheme = match method {
        SamplingMethod::MonteCarlo => SamplingScheme::MonteCarlo,
        SamplingMethod::LatinHypercube => SamplingScheme::LatinHypercube,
        SamplingMethod::NoSampling | SamplingMethod::Automatic => {
            for value in values {
                check_enumerable(value)?;
            }
            let axes = values
                .iter()
                .map(DistributedValue::scenarios)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Mode::Enumeration(CrossProduct::new(axes)));
        }
    };
    let distributions = values.iter().map(|v| v.distribution().clone()).collect();
    Ok(Mode::Sampling(SamplingEngine::new(
        distributions,
        sample_count,
        scheme,
        seed,
    )?))
}
