//! Statistical sampling of distributed values.
//!
//! [`SamplingEngine`] draws `N` equally weighted samples over an ordered set
//! of distributions.
//!
//! ## Monte Carlo
//!
//! Each sample draws every dimension independently: distributions with a
//! fixed uniform count receive that many open-interval uniforms, those with
//! a dynamic count read the generator as a stream.
//!
//! ## Latin Hypercube
//!
//! The unit interval is cut into `N` strata `[s/N, (s+1)/N)`. Each dimension
//! owns a random permutation mapping sample index to stratum, so every
//! stratum is used exactly once per dimension. The global edges 0 and 1 are
//! excluded because unbounded quantile functions diverge there.

use stochastic_core::cancel::AbortCheck;
use stochastic_core::rng::{Interval, PseudoRandom};
use stochastic_core::types::{DistributionError, StochasticError};
use stochastic_distributions::{Distribution, UnivariateDistribution};
use tracing::debug;

use crate::error::ConfigError;

/// Concrete sampling scheme run by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SamplingScheme {
    /// Independent draws.
    MonteCarlo,
    /// Stratified draws.
    LatinHypercube,
}

/// Draws equally weighted samples over an ordered set of distributions.
///
/// # Examples
///
/// ```rust
/// use stochastic_core::cancel::NeverAbort;
/// use stochastic_distributions::{Distribution, Normal};
/// use stochastic_sampling::{SamplingEngine, SamplingScheme};
///
/// let dists: Vec<Distribution> = vec![Normal::new(0.0, 1.0).unwrap().into()];
/// let mut engine = SamplingEngine::new(dists, 10, SamplingScheme::LatinHypercube, 42).unwrap();
///
/// let mut count = 0;
/// while let Some(values) = engine.next_sample(&NeverAbort).unwrap() {
///     assert_eq!(values.len(), 1);
///     count += 1;
/// }
/// assert_eq!(count, 10);
/// assert_eq!(engine.probability(), 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct SamplingEngine {
    distributions: Vec<Distribution>,
    sample_count: usize,
    scheme: SamplingScheme,
    seed: u64,
    rng: PseudoRandom,
    /// Per-dimension permutation from sample index to stratum (LHS only).
    strata: Vec<Vec<usize>>,
    next_index: usize,
}

impl SamplingEngine {
    /// Creates an engine and, for Latin Hypercube, draws the permutations.
    ///
    /// # Errors
    ///
    /// - `ModelData` if `sample_count` is zero
    /// - `ModelData` if Latin Hypercube is requested for a distribution that
    ///   needs more than one uniform per sample
    pub fn new(
        distributions: Vec<Distribution>,
        sample_count: usize,
        scheme: SamplingScheme,
        seed: u64,
    ) -> Result<Self, StochasticError> {
        if sample_count == 0 {
            return Err(ConfigError::InvalidSampleCount(sample_count).into());
        }
        if scheme == SamplingScheme::LatinHypercube {
            if let Some(d) = distributions.iter().find(|d| !d.supports_latin_hypercube()) {
                return Err(StochasticError::model_data(format!(
                    "Latin Hypercube sampling is not supported by the {} distribution",
                    d.name()
                )));
            }
        }

        let mut rng = PseudoRandom::from_seed(seed);
        let strata = draw_strata(&mut rng, scheme, distributions.len(), sample_count);

        debug!(
            ?scheme,
            sample_count,
            seed,
            dimensions = distributions.len(),
            "sampling engine initialised"
        );

        Ok(Self {
            distributions,
            sample_count,
            scheme,
            seed,
            rng,
            strata,
            next_index: 0,
        })
    }

    /// Number of samples the engine produces.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Samples not yet drawn.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.sample_count - self.next_index
    }

    /// Probability carried by each sample.
    #[inline]
    pub fn probability(&self) -> f64 {
        1.0 / self.sample_count as f64
    }

    /// Scheme in use.
    #[inline]
    pub fn scheme(&self) -> SamplingScheme {
        self.scheme
    }

    /// Seed the engine was created with.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Stratum assigned to `sample` in `dimension`, for Latin Hypercube.
    pub fn stratum(&self, dimension: usize, sample: usize) -> Option<usize> {
        self.strata.get(dimension)?.get(sample).copied()
    }

    /// Reseeds and redraws the permutations so the same samples recur.
    pub fn restart(&mut self) {
        self.rng = PseudoRandom::from_seed(self.seed);
        self.strata = draw_strata(
            &mut self.rng,
            self.scheme,
            self.distributions.len(),
            self.sample_count,
        );
        self.next_index = 0;
    }

    /// Draws the next sample, one value per distribution.
    ///
    /// Returns `Ok(None)` once all samples have been drawn.
    ///
    /// # Errors
    ///
    /// Propagates distribution failures, including
    /// [`DistributionError::Cancelled`] raised inside a rejection loop.
    pub fn next_sample(
        &mut self,
        abort: &dyn AbortCheck,
    ) -> Result<Option<Vec<f64>>, DistributionError> {
        if self.next_index >= self.sample_count {
            return Ok(None);
        }
        let index = self.next_index;
        let values = match self.scheme {
            SamplingScheme::MonteCarlo => self.draw_independent(abort)?,
            SamplingScheme::LatinHypercube => self.draw_stratified(index)?,
        };
        self.next_index += 1;
        Ok(Some(values))
    }

    fn draw_independent(&mut self, abort: &dyn AbortCheck) -> Result<Vec<f64>, DistributionError> {
        let mut values = Vec::with_capacity(self.distributions.len());
        for distribution in &self.distributions {
            values.push(distribution.sample_from(&mut self.rng, abort)?);
        }
        Ok(values)
    }

    fn draw_stratified(&mut self, index: usize) -> Result<Vec<f64>, DistributionError> {
        let n = self.sample_count as f64;
        let mut values = Vec::with_capacity(self.distributions.len());
        for (dimension, distribution) in self.distributions.iter().enumerate() {
            let stratum = self.strata[dimension][index];
            let interval = Interval::new(
                stratum as f64 / n,
                (stratum + 1) as f64 / n,
                stratum != 0,
                false,
            )?;
            let u = self.rng.next_f64_in(&interval);
            values.push(distribution.sample(&[u])?);
        }
        Ok(values)
    }
}

/// One Fisher–Yates permutation per dimension, dimension 0 first.
fn draw_strata(
    rng: &mut PseudoRandom,
    scheme: SamplingScheme,
    dimensions: usize,
    sample_count: usize,
) -> Vec<Vec<usize>> {
    match scheme {
        SamplingScheme::MonteCarlo => Vec::new(),
        SamplingScheme::LatinHypercube => (0..dimensions)
            .map(|_| {
                let mut permutation: Vec<usize> = (0..sample_count).collect();
                rng.shuffle(&mut permutation);
                permutation
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use stochastic_core::cancel::NeverAbort;
    use stochastic_distributions::{Binomial, ContinuousUniform, Exponential, Normal};

    fn uniform01() -> Distribution {
        ContinuousUniform::new(0.0, 1.0).unwrap().into()
    }

    fn drain(engine: &mut SamplingEngine) -> Vec<Vec<f64>> {
        let mut out = Vec::new();
        while let Some(values) = engine.next_sample(&NeverAbort).unwrap() {
            out.push(values);
        }
        out
    }

    #[test]
    fn test_latin_hypercube_hits_every_stratum() {
        let n = 50;
        let mut engine =
            SamplingEngine::new(vec![uniform01(), uniform01()], n, SamplingScheme::LatinHypercube, 9)
                .unwrap();
        let samples = drain(&mut engine);
        assert_eq!(samples.len(), n);
        for dimension in 0..2 {
            let strata: HashSet<usize> = samples
                .iter()
                .map(|s| ((s[dimension] * n as f64).floor() as usize).min(n - 1))
                .collect();
            assert_eq!(strata.len(), n);
        }
    }

    #[test]
    fn test_latin_hypercube_outer_edges_are_open() {
        let mut engine =
            SamplingEngine::new(vec![Normal::standard().into()], 2, SamplingScheme::LatinHypercube, 1)
                .unwrap();
        for values in drain(&mut engine) {
            assert!(values[0].is_finite());
        }
    }

    #[test]
    fn test_latin_hypercube_rejects_dynamic_distribution() {
        let large: Distribution = Binomial::new(1000, 0.5).unwrap().into();
        let err = SamplingEngine::new(vec![large], 10, SamplingScheme::LatinHypercube, 1).unwrap_err();
        assert!(matches!(err, StochasticError::ModelData(_)));
        assert!(err.to_string().contains("Binomial"));
    }

    #[test]
    fn test_monte_carlo_handles_dynamic_distribution() {
        let large: Distribution = Binomial::new(1000, 0.5).unwrap().into();
        let mut engine = SamplingEngine::new(vec![large], 200, SamplingScheme::MonteCarlo, 1).unwrap();
        let samples = drain(&mut engine);
        assert_eq!(samples.len(), 200);
        assert!(samples.iter().all(|s| (0.0..=1000.0).contains(&s[0])));
    }

    #[test]
    fn test_same_seed_same_samples() {
        let dists: Vec<Distribution> = vec![Exponential::new(1.0).unwrap().into(), uniform01()];
        for scheme in [SamplingScheme::MonteCarlo, SamplingScheme::LatinHypercube] {
            let mut a = SamplingEngine::new(dists.clone(), 30, scheme, 77).unwrap();
            let mut b = SamplingEngine::new(dists.clone(), 30, scheme, 77).unwrap();
            assert_eq!(drain(&mut a), drain(&mut b));
        }
    }

    #[test]
    fn test_restart_replays() {
        let dists: Vec<Distribution> = vec![Normal::standard().into(), uniform01()];
        let mut engine = SamplingEngine::new(dists, 12, SamplingScheme::LatinHypercube, 5).unwrap();
        let first = drain(&mut engine);
        engine.restart();
        assert_eq!(engine.remaining(), 12);
        assert_eq!(drain(&mut engine), first);
    }

    #[test]
    fn test_zero_samples_rejected() {
        assert!(SamplingEngine::new(vec![uniform01()], 0, SamplingScheme::MonteCarlo, 1).is_err());
    }

    #[test]
    fn test_cancellation_propagates_from_sampler() {
        let large: Distribution = Binomial::new(1000, 0.5).unwrap().into();
        let mut engine = SamplingEngine::new(vec![large], 5, SamplingScheme::MonteCarlo, 1).unwrap();
        let always = || true;
        assert_eq!(engine.next_sample(&always), Err(DistributionError::Cancelled));
    }

    #[test]
    fn test_probability_and_remaining() {
        let mut engine = SamplingEngine::new(vec![uniform01()], 4, SamplingScheme::MonteCarlo, 3).unwrap();
        assert_eq!(engine.probability(), 0.25);
        engine.next_sample(&NeverAbort).unwrap();
        assert_eq!(engine.remaining(), 3);
        assert!(engine.stratum(0, 0).is_none());
    }
}
