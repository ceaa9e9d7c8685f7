//! Static dispatch enum over every distribution family.
//!
//! [`Distribution`] is the closed set of families a model parameter can
//! follow. Dispatch is a `match`, so there is no vtable and values can be
//! cloned and compared freely.
//!
//! ## Example
//!
//! ```
//! use stochastic_distributions::{Binomial, Distribution, Exponential, UnivariateDistribution};
//!
//! let families: Vec<Distribution> = vec![
//!     Exponential::new(1.0).unwrap().into(),
//!     Binomial::new(4, 0.5).unwrap().into(),
//! ];
//! assert_eq!(families[0].name(), "Exponential");
//! assert_eq!(families[1].scenario_count(), 5);
//! ```

use stochastic_core::cancel::AbortCheck;
use stochastic_core::rng::UniformSource;
use stochastic_core::types::DistributionError;

use crate::binomial::Binomial;
use crate::distribution::{RandomNumberNeeded, UnivariateDistribution};
use crate::exponential::Exponential;
use crate::geometric::Geometric;
use crate::lognormal::LogNormal;
use crate::normal::Normal;
use crate::scenario::{Scenario, ScenariosDistribution};
use crate::uniform::{ContinuousUniform, DiscreteUniform};

/// Any supported univariate distribution.
#[derive(Debug, Clone, PartialEq)]
pub enum Distribution {
    /// Normal distribution
    Normal(Normal),
    /// Log-normal distribution
    LogNormal(LogNormal),
    /// Exponential distribution
    Exponential(Exponential),
    /// Binomial distribution
    Binomial(Binomial),
    /// Geometric distribution
    Geometric(Geometric),
    /// Discrete uniform distribution
    DiscreteUniform(DiscreteUniform),
    /// Continuous uniform distribution
    ContinuousUniform(ContinuousUniform),
    /// Explicit finite scenarios
    Scenarios(ScenariosDistribution),
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            Distribution::Normal($inner) => $body,
            Distribution::LogNormal($inner) => $body,
            Distribution::Exponential($inner) => $body,
            Distribution::Binomial($inner) => $body,
            Distribution::Geometric($inner) => $body,
            Distribution::DiscreteUniform($inner) => $body,
            Distribution::ContinuousUniform($inner) => $body,
            Distribution::Scenarios($inner) => $body,
        }
    };
}

impl UnivariateDistribution for Distribution {
    fn name(&self) -> &'static str {
        dispatch!(self, d => d.name())
    }

    fn mean(&self) -> f64 {
        dispatch!(self, d => d.mean())
    }

    fn variance(&self) -> f64 {
        dispatch!(self, d => d.variance())
    }

    fn standard_deviation(&self) -> f64 {
        dispatch!(self, d => d.standard_deviation())
    }

    fn skewness(&self) -> f64 {
        dispatch!(self, d => d.skewness())
    }

    fn kurtosis(&self) -> f64 {
        dispatch!(self, d => d.kurtosis())
    }

    fn density(&self, x: f64) -> Result<f64, DistributionError> {
        dispatch!(self, d => d.density(x))
    }

    fn cumulative_density(&self, x: f64) -> Result<f64, DistributionError> {
        dispatch!(self, d => d.cumulative_density(x))
    }

    fn quantile(&self, p: f64) -> Result<f64, DistributionError> {
        dispatch!(self, d => d.quantile(p))
    }

    fn is_discrete(&self) -> bool {
        dispatch!(self, d => d.is_discrete())
    }

    fn scenario_count(&self) -> i32 {
        dispatch!(self, d => d.scenario_count())
    }

    fn scenarios(&self) -> Option<Vec<Scenario>> {
        dispatch!(self, d => d.scenarios())
    }

    fn random_number_needed(&self) -> RandomNumberNeeded {
        dispatch!(self, d => d.random_number_needed())
    }

    fn supports_latin_hypercube(&self) -> bool {
        dispatch!(self, d => d.supports_latin_hypercube())
    }

    fn sample(&self, uniforms: &[f64]) -> Result<f64, DistributionError> {
        dispatch!(self, d => d.sample(uniforms))
    }

    fn sample_from(
        &self,
        source: &mut dyn UniformSource,
        abort: &dyn AbortCheck,
    ) -> Result<f64, DistributionError> {
        dispatch!(self, d => d.sample_from(source, abort))
    }
}

macro_rules! impl_from_family {
    ($($family:ident),* $(,)?) => {
        $(
            impl From<$family> for Distribution {
                fn from(d: $family) -> Self {
                    Distribution::$family(d)
                }
            }
        )*
    };
}

impl_from_family!(
    Normal,
    LogNormal,
    Exponential,
    Binomial,
    Geometric,
    DiscreteUniform,
    ContinuousUniform,
);

impl From<ScenariosDistribution> for Distribution {
    fn from(d: ScenariosDistribution) -> Self {
        Distribution::Scenarios(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stochastic_core::cancel::NeverAbort;
    use stochastic_core::rng::PseudoRandom;

    fn all_families() -> Vec<Distribution> {
        vec![
            Normal::new(0.0, 1.0).unwrap().into(),
            LogNormal::new(0.0, 0.5).unwrap().into(),
            Exponential::new(2.0).unwrap().into(),
            Binomial::new(10, 0.4).unwrap().into(),
            Binomial::new(500, 0.4).unwrap().into(),
            Geometric::new(0.3).unwrap().into(),
            DiscreteUniform::new(1, 6).unwrap().into(),
            ContinuousUniform::new(-1.0, 1.0).unwrap().into(),
            ScenariosDistribution::from_pairs([(0.4, 1.0), (0.6, 2.0)])
                .unwrap()
                .into(),
        ]
    }

    #[test]
    fn test_names_are_distinct_per_family() {
        let names: Vec<&str> = all_families().iter().map(|d| d.name()).collect();
        assert_eq!(
            names,
            vec![
                "Normal",
                "LogNormal",
                "Exponential",
                "Binomial",
                "Binomial",
                "Geometric",
                "DiscreteUniform",
                "ContinuousUniform",
                "Scenarios",
            ]
        );
    }

    #[test]
    fn test_latin_hypercube_iff_single_uniform() {
        for d in all_families() {
            assert_eq!(
                d.supports_latin_hypercube(),
                d.random_number_needed() == RandomNumberNeeded::Fixed(1),
                "{}",
                d.name()
            );
        }
    }

    #[test]
    fn test_sample_from_for_every_family() {
        let mut rng = PseudoRandom::from_seed(8);
        for d in all_families() {
            for _ in 0..100 {
                let x = d.sample_from(&mut rng, &NeverAbort).unwrap();
                assert!(x.is_finite(), "{} produced {}", d.name(), x);
            }
        }
    }

    #[test]
    fn test_finite_support_enumerates() {
        for d in all_families() {
            let bounded = d.scenario_count() != crate::SCENARIO_COUNT_UNBOUNDED;
            assert_eq!(d.scenarios().is_some(), bounded, "{}", d.name());
        }
    }
}
