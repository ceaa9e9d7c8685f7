//! Sampling configuration.
//!
//! This module provides the options that control how a scenario generator
//! resolves a set of distributed values: whether to sample at all, which
//! scheme to use, how many samples to draw and from which seed.

use std::fmt;
use std::str::FromStr;

use stochastic_core::rng::DEFAULT_RANDOM_SEED;

use crate::error::ConfigError;

/// Maximum number of samples allowed.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Most support points a single distributed value may enumerate.
pub const MAX_ENUMERATED_SUPPORT: i32 = 1_000_000;

/// Sample count used by Latin Hypercube when none is configured.
pub const DEFAULT_LATIN_HYPERCUBE_SAMPLES: usize = 100;

/// Sample count used by Monte Carlo when none is configured.
pub const DEFAULT_MONTE_CARLO_SAMPLES: usize = 300;

/// Scenario count above which sampling replaces enumeration, when the
/// directive asks for the automatic threshold.
pub const DEFAULT_SCENARIO_THRESHOLD: i32 = 500;

/// Directive value selecting [`DEFAULT_SCENARIO_THRESHOLD`].
pub const AUTOMATIC_THRESHOLD: i64 = -1;

/// How scenarios are produced once the scenario count is known.
///
/// - `Automatic`: enumerate below the threshold, otherwise Latin Hypercube
///   (Monte Carlo when some distribution cannot be stratified)
/// - `NoSampling`: always enumerate; unbounded distributions are an error
/// - `MonteCarlo`: independent draws above the threshold
/// - `LatinHypercube`: stratified draws above the threshold
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SamplingMethod {
    /// Choose per model.
    #[default]
    Automatic,
    /// Exact enumeration only.
    NoSampling,
    /// Plain Monte Carlo.
    MonteCarlo,
    /// Latin Hypercube stratification.
    LatinHypercube,
}

impl fmt::Display for SamplingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Automatic => "automatic",
            Self::NoSampling => "no_sampling",
            Self::MonteCarlo => "monte_carlo",
            Self::LatinHypercube => "latin_hypercube",
        };
        f.write_str(name)
    }
}

impl FromStr for SamplingMethod {
    type Err = ConfigError;

    /// Parses the snake_case name or a common abbreviation (`mc`, `lhs`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "automatic" | "auto" => Ok(Self::Automatic),
            "no_sampling" | "none" => Ok(Self::NoSampling),
            "monte_carlo" | "mc" => Ok(Self::MonteCarlo),
            "latin_hypercube" | "lhs" => Ok(Self::LatinHypercube),
            other => Err(ConfigError::InvalidParameter {
                name: "sampling_method",
                value: format!("unknown method '{}'", other),
            }),
        }
    }
}

/// Sampling configuration.
///
/// Immutable once built. Zero values mean "choose automatically": a zero
/// sample count resolves per scheme and a zero seed resolves to
/// [`DEFAULT_RANDOM_SEED`].
///
/// # Examples
///
/// ```rust
/// use stochastic_sampling::{SamplingConfig, SamplingMethod};
///
/// let config = SamplingConfig::builder()
///     .sample_count(1_000)
///     .method(SamplingMethod::LatinHypercube)
///     .random_seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.sample_count(), 1_000);
/// assert_eq!(config.resolved_seed(), 42);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingConfig {
    /// Requested number of samples (0 = automatic).
    sample_count: usize,
    /// Requested method.
    method: SamplingMethod,
    /// Requested seed (0 = default seed).
    random_seed: u64,
}

impl SamplingConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SamplingConfigBuilder {
        SamplingConfigBuilder::default()
    }

    /// Returns the requested sample count (0 = automatic).
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Returns the requested method.
    #[inline]
    pub fn method(&self) -> SamplingMethod {
        self.method
    }

    /// Returns the requested seed (0 = default seed).
    #[inline]
    pub fn random_seed(&self) -> u64 {
        self.random_seed
    }

    /// Seed actually used for sampling.
    #[inline]
    pub fn resolved_seed(&self) -> u64 {
        if self.random_seed == 0 {
            DEFAULT_RANDOM_SEED
        } else {
            self.random_seed
        }
    }

    /// Sample count actually drawn for the given resolved method.
    pub fn resolved_sample_count(&self, method: SamplingMethod) -> usize {
        match (self.sample_count, method) {
            (0, SamplingMethod::MonteCarlo) => DEFAULT_MONTE_CARLO_SAMPLES,
            (0, _) => DEFAULT_LATIN_HYPERCUBE_SAMPLES,
            (n, _) => n,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `sample_count` exceeds [`MAX_SAMPLES`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_count > MAX_SAMPLES {
            return Err(ConfigError::InvalidSampleCount(self.sample_count));
        }
        Ok(())
    }
}

/// Builder for [`SamplingConfig`].
///
/// All options default to automatic selection.
#[derive(Clone, Debug, Default)]
pub struct SamplingConfigBuilder {
    sample_count: usize,
    method: SamplingMethod,
    random_seed: u64,
}

impl SamplingConfigBuilder {
    /// Sets the number of samples (0 = automatic).
    #[inline]
    pub fn sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Sets the sampling method.
    #[inline]
    pub fn method(mut self, method: SamplingMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the seed (0 = default seed).
    #[inline]
    pub fn random_seed(mut self, random_seed: u64) -> Self {
        self.random_seed = random_seed;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the sample count is out of range.
    pub fn build(self) -> Result<SamplingConfig, ConfigError> {
        let config = SamplingConfig {
            sample_count: self.sample_count,
            method: self.method,
            random_seed: self.random_seed,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Resolves a directive's scenario threshold.
///
/// `-1` selects [`DEFAULT_SCENARIO_THRESHOLD`]; values beyond `i32::MAX`
/// saturate.
///
/// # Errors
///
/// `InvalidThreshold` for values below `-1`.
///
/// # Examples
///
/// ```rust
/// use stochastic_sampling::config::resolve_scenario_threshold;
///
/// assert_eq!(resolve_scenario_threshold(-1).unwrap(), 500);
/// assert_eq!(resolve_scenario_threshold(0).unwrap(), 0);
/// assert!(resolve_scenario_threshold(-2).is_err());
/// ```
pub fn resolve_scenario_threshold(raw: i64) -> Result<i32, ConfigError> {
    match raw {
        AUTOMATIC_THRESHOLD => Ok(DEFAULT_SCENARIO_THRESHOLD),
        r if r < AUTOMATIC_THRESHOLD => Err(ConfigError::InvalidThreshold(r)),
        r => Ok(i32::try_from(r).unwrap_or(i32::MAX)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_automatic() {
        let config = SamplingConfig::builder().build().unwrap();
        assert_eq!(config, SamplingConfig::default());
        assert_eq!(config.method(), SamplingMethod::Automatic);
        assert_eq!(config.sample_count(), 0);
        assert_eq!(config.resolved_seed(), DEFAULT_RANDOM_SEED);
    }

    #[test]
    fn test_resolved_sample_count_per_method() {
        let config = SamplingConfig::default();
        assert_eq!(
            config.resolved_sample_count(SamplingMethod::LatinHypercube),
            DEFAULT_LATIN_HYPERCUBE_SAMPLES
        );
        assert_eq!(
            config.resolved_sample_count(SamplingMethod::MonteCarlo),
            DEFAULT_MONTE_CARLO_SAMPLES
        );

        let explicit = SamplingConfig::builder().sample_count(64).build().unwrap();
        assert_eq!(explicit.resolved_sample_count(SamplingMethod::MonteCarlo), 64);
    }

    #[test]
    fn test_config_invalid_too_many_samples() {
        let result = SamplingConfig::builder()
            .sample_count(MAX_SAMPLES + 1)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidSampleCount(_))));
    }

    #[test]
    fn test_explicit_seed_is_kept() {
        let config = SamplingConfig::builder().random_seed(7).build().unwrap();
        assert_eq!(config.random_seed(), 7);
        assert_eq!(config.resolved_seed(), 7);
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("lhs".parse::<SamplingMethod>().unwrap(), SamplingMethod::LatinHypercube);
        assert_eq!(
            "Monte-Carlo".parse::<SamplingMethod>().unwrap(),
            SamplingMethod::MonteCarlo
        );
        assert_eq!("none".parse::<SamplingMethod>().unwrap(), SamplingMethod::NoSampling);
        assert_eq!(" automatic ".parse::<SamplingMethod>().unwrap(), SamplingMethod::Automatic);
        assert!("sobol".parse::<SamplingMethod>().is_err());
    }

    #[test]
    fn test_method_display_round_trip() {
        for method in [
            SamplingMethod::Automatic,
            SamplingMethod::NoSampling,
            SamplingMethod::MonteCarlo,
            SamplingMethod::LatinHypercube,
        ] {
            assert_eq!(method.to_string().parse::<SamplingMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_threshold_resolution() {
        assert_eq!(resolve_scenario_threshold(-1).unwrap(), DEFAULT_SCENARIO_THRESHOLD);
        assert_eq!(resolve_scenario_threshold(1_000).unwrap(), 1_000);
        assert_eq!(resolve_scenario_threshold(i64::MAX).unwrap(), i32::MAX);
        assert!(matches!(
            resolve_scenario_threshold(-7),
            Err(ConfigError::InvalidThreshold(-7))
        ));
    }
}
