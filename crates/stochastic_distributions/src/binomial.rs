//! Binomial distribution.
//!
//! Two sampling regimes are used, selected by `n·min(p, 1 − p)`:
//!
//! - **Inversion** (below [`REJECTION_THRESHOLD`]): the cumulative
//!   distribution is walked from `k = 0` using the PMF recurrence
//!   `f(k) = f(k − 1) · (n − k + 1)/k · p/q`, started from `qⁿ`. One uniform
//!   per sample, so Latin Hypercube stratification applies.
//! - **BTRD** (at or above the threshold): Hörmann's transformed rejection
//!   with decomposition. The number of uniforms per sample is open-ended
//!   and capped at [`BTRD_MAX_TRIALS`] candidates.
//!
//! Both regimes only ever work with `p <= 0.5`; larger probabilities are
//! folded through `X = n − Y` with `Y ~ Bin(n, 1 − p)`.
//!
//! # References
//! W. Hörmann, "The generation of binomial random variates",
//! Journal of Statistical Computation and Simulation 46 (1993).

use stochastic_core::cancel::{AbortCheck, NeverAbort};
use stochastic_core::math::{ln_gamma, stirling_correction};
use stochastic_core::rng::UniformSource;
use stochastic_core::types::DistributionError;

use crate::distribution::{
    check_argument, check_probability, RandomNumberNeeded, UnivariateDistribution,
    DISCRETE_QUANTILE_TOLERANCE,
};
use crate::scenario::Scenario;

const FAMILY: &str = "Binomial";

/// `n·min(p, 1 − p)` at which sampling switches from inversion to BTRD.
pub const REJECTION_THRESHOLD: f64 = 10.0;

/// Maximum number of BTRD candidates per sample.
pub const BTRD_MAX_TRIALS: usize = 1000;

/// Deviation from the mode up to which BTRD evaluates the exact PMF ratio
/// by recurrence.
const BTRD_RECURRENCE_SPAN: f64 = 15.0;

/// Binomial distribution Bin(n, p), counting successes in `n` trials.
///
/// # Examples
///
/// ```
/// use stochastic_distributions::{Binomial, RandomNumberNeeded, UnivariateDistribution};
///
/// let b = Binomial::new(10, 0.3).unwrap();
/// assert!((b.mean() - 3.0).abs() < 1e-12);
/// assert_eq!(b.random_number_needed(), RandomNumberNeeded::Fixed(1));
/// assert_eq!(b.scenario_count(), 11);
///
/// let large = Binomial::new(1000, 0.5).unwrap();
/// assert_eq!(large.random_number_needed(), RandomNumberNeeded::Dynamic);
/// assert!(!large.supports_latin_hypercube());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    trials: i32,
    probability: f64,
}

impl Binomial {
    /// Creates a binomial distribution.
    ///
    /// # Errors
    /// `InvalidParameter` unless `trials > 0` and `0 <= probability <= 1`.
    pub fn new(trials: i32, probability: f64) -> Result<Self, DistributionError> {
        if trials <= 0 {
            return Err(DistributionError::invalid_parameter(
                FAMILY,
                format!("number of trials must be positive, got {}", trials),
            ));
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(DistributionError::invalid_parameter(
                FAMILY,
                format!("probability must lie in [0, 1], got {}", probability),
            ));
        }
        Ok(Self {
            trials,
            probability,
        })
    }

    /// Number of trials `n`.
    pub fn trials(&self) -> i32 {
        self.trials
    }

    /// Success probability `p`.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Whether samples are drawn by BTRD rather than by inversion.
    pub fn uses_rejection(&self) -> bool {
        let p = self.probability;
        f64::from(self.trials) * p.min(1.0 - p) >= REJECTION_THRESHOLD
    }

    /// The probability actually walked, and whether results are folded.
    fn folded(&self) -> (f64, bool) {
        if self.probability > 0.5 {
            (1.0 - self.probability, true)
        } else {
            (self.probability, false)
        }
    }

    /// Integer-valued quantile.
    ///
    /// # Errors
    /// `InvalidArgument` for `p` outside `[0, 1]`; `NonConvergence` if the
    /// recurrence fails to accumulate the full support.
    pub fn quantile_index(&self, p: f64) -> Result<i32, DistributionError> {
        self.quantile_index_with(p, &NeverAbort)
    }

    /// Integer-valued quantile, polling `abort` at every recurrence step.
    ///
    /// # Errors
    /// As [`quantile_index`](Self::quantile_index), plus `Cancelled`.
    pub fn quantile_index_with(
        &self,
        p: f64,
        abort: &dyn AbortCheck,
    ) -> Result<i32, DistributionError> {
        check_probability(p)?;
        if self.probability == 0.0 {
            return Ok(0);
        }
        if self.probability == 1.0 {
            return Ok(self.trials);
        }

        let n = self.trials;
        let (walked, folded) = self.folded();
        let mut last = None;

        if !folded {
            // Smallest k with F(k) >= p
            let target = p - DISCRETE_QUANTILE_TOLERANCE;
            for step in PmfWalk::new(n, walked) {
                abort.check()?;
                if step.cumulative >= target {
                    return Ok(step.k);
                }
                last = Some(step.cumulative);
            }
            check_walk_complete(n, last)?;
            Ok(n)
        } else {
            // F_X(k) = 1 − F_Y(n − k − 1): the smallest k with F_X(k) >= p is
            // n − j for the smallest j with F_Y(j) > 1 − p.
            let threshold = 1.0 - p + DISCRETE_QUANTILE_TOLERANCE;
            for step in PmfWalk::new(n, walked) {
                abort.check()?;
                if step.cumulative > threshold {
                    return Ok(n - step.k);
                }
                last = Some(step.cumulative);
            }
            check_walk_complete(n, last)?;
            Ok(0)
        }
    }

    /// `P(X <= k)` for an integer `k` in `[0, n)`.
    fn cumulative_at(&self, k: i32) -> Result<f64, DistributionError> {
        let n = self.trials;
        let (walked, folded) = self.folded();
        // For the folded case evaluate 1 − F_Y(n − k − 1).
        let index = if folded { n - k - 1 } else { k };
        if index < 0 {
            return Ok(if folded { 1.0 } else { 0.0 });
        }
        let cumulative = PmfWalk::new(n, walked)
            .find(|step| step.k == index)
            .map(|step| step.cumulative)
            .ok_or_else(|| {
                DistributionError::non_convergence("binomial cumulative recurrence", n as usize)
            })?;
        Ok(if folded { 1.0 - cumulative } else { cumulative })
    }

    fn btrd(
        &self,
        source: &mut dyn UniformSource,
        abort: &dyn AbortCheck,
    ) -> Result<i32, DistributionError> {
        let (p, folded) = self.folded();
        let k = btrd_sample(self.trials, p, source, abort)?;
        Ok(if folded { self.trials - k } else { k })
    }
}

impl UnivariateDistribution for Binomial {
    fn name(&self) -> &'static str {
        FAMILY
    }

    fn mean(&self) -> f64 {
        f64::from(self.trials) * self.probability
    }

    fn variance(&self) -> f64 {
        f64::from(self.trials) * self.probability * (1.0 - self.probability)
    }

    fn skewness(&self) -> f64 {
        let npq = self.variance();
        if npq == 0.0 {
            return f64::NAN;
        }
        (1.0 - 2.0 * self.probability) / npq.sqrt()
    }

    fn kurtosis(&self) -> f64 {
        let npq = self.variance();
        if npq == 0.0 {
            return f64::NAN;
        }
        let pq = self.probability * (1.0 - self.probability);
        (1.0 - 6.0 * pq) / npq
    }

    fn density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        if x < 0.0 || x > f64::from(self.trials) || x.fract() != 0.0 {
            return Ok(0.0);
        }
        Ok(pmf(self.trials, self.probability, x as i32))
    }

    fn cumulative_density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        if x < 0.0 {
            return Ok(0.0);
        }
        if x >= f64::from(self.trials) {
            return Ok(1.0);
        }
        if self.probability == 0.0 {
            return Ok(1.0);
        }
        if self.probability == 1.0 {
            return Ok(0.0);
        }
        self.cumulative_at(x.floor() as i32)
    }

    fn quantile(&self, p: f64) -> Result<f64, DistributionError> {
        self.quantile_index(p).map(f64::from)
    }

    fn is_discrete(&self) -> bool {
        true
    }

    /// Number of support points with non-zero mass.
    fn scenario_count(&self) -> i32 {
        let (walked, _) = self.folded();
        let (first, last) = positive_range(self.trials, walked);
        (last - first).saturating_add(1)
    }

    /// Support points with non-zero mass, in ascending order.
    fn scenarios(&self) -> Option<Vec<Scenario>> {
        let n = self.trials;
        let (walked, folded) = self.folded();
        let (first, last) = positive_range(n, walked);
        let masses: Vec<(i32, f64)> = if PmfWalk::new(n, walked).log_domain {
            (first..=last).map(|k| (k, ln_pmf(n, walked, k).exp())).collect()
        } else {
            PmfWalk::new(n, walked)
                .take_while(|step| step.k <= last)
                .map(|step| (step.k, step.mass))
                .collect()
        };
        let mut scenarios = masses
            .into_iter()
            .filter(|&(_, mass)| mass > 0.0)
            .map(|(k, mass)| {
                let value = if folded { n - k } else { k };
                Scenario::new(mass.min(1.0), f64::from(value))
            })
            .collect::<Result<Vec<_>, _>>()
            .ok()?;
        if folded {
            scenarios.reverse();
        }
        Some(scenarios)
    }

    fn random_number_needed(&self) -> RandomNumberNeeded {
        if self.uses_rejection() {
            RandomNumberNeeded::Dynamic
        } else {
            RandomNumberNeeded::Fixed(1)
        }
    }

    fn sample_from(
        &self,
        source: &mut dyn UniformSource,
        abort: &dyn AbortCheck,
    ) -> Result<f64, DistributionError> {
        let k = if self.uses_rejection() {
            self.btrd(source, abort)?
        } else {
            self.quantile_index_with(source.next_uniform(), abort)?
        };
        Ok(f64::from(k))
    }
}

/// A full walk that ends materially short of one has gone numerically wrong.
fn check_walk_complete(n: i32, last: Option<f64>) -> Result<(), DistributionError> {
    match last {
        Some(total) if total.is_finite() && total > 1.0 - 1e-6 => Ok(()),
        _ => Err(DistributionError::non_convergence(
            "binomial quantile recurrence",
            n as usize + 1,
        )),
    }
}

/// ln of the binomial PMF.
fn ln_pmf(n: i32, p: f64, k: i32) -> f64 {
    let (nf, kf) = (f64::from(n), f64::from(k));
    ln_gamma(nf + 1.0) - ln_gamma(kf + 1.0) - ln_gamma(nf - kf + 1.0)
        + kf * p.ln()
        + (nf - kf) * (-p).ln_1p()
}

fn pmf(n: i32, p: f64, k: i32) -> f64 {
    if p == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if p == 1.0 {
        return if k == n { 1.0 } else { 0.0 };
    }
    ln_pmf(n, p, k).exp()
}

/// First and last `k` of Bin(n, p), `p <= 0.5`, whose walked mass is
/// non-zero.
///
/// With the recurrence the masses rise from a representable `qⁿ` to the
/// mode and only underflow on the way down. In the log domain the mass is
/// unimodal, so both edges are found by bisection around the mode.
fn positive_range(n: i32, p: f64) -> (i32, i32) {
    let walk = PmfWalk::new(n, p);
    if !walk.log_domain {
        let last = walk
            .take_while(|step| step.mass > 0.0)
            .last()
            .map_or(0, |step| step.k);
        return (0, last);
    }

    let positive = |k: i32| ln_pmf(n, p, k).exp() > 0.0;
    let mode = ((f64::from(n) + 1.0) * p).floor().min(f64::from(n)) as i32;
    if !positive(mode) {
        return (mode, mode);
    }
    let (mut low, mut high) = (0, mode);
    while low < high {
        let mid = low + (high - low) / 2;
        if positive(mid) {
            high = mid;
        } else {
            low = mid + 1;
        }
    }
    let first = high;
    let (mut low, mut high) = (mode, n);
    while low < high {
        let mid = low + (high - low) / 2 + (high - low) % 2;
        if positive(mid) {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    (first, low)
}

/// One step of a PMF walk.
#[derive(Debug, Clone, Copy)]
struct PmfStep {
    k: i32,
    mass: f64,
    cumulative: f64,
}

/// Walks `k = 0..=n` of Bin(n, p) for `p <= 0.5`, accumulating the CDF.
///
/// Uses the multiplicative recurrence while `qⁿ` is representable and
/// falls back to log-domain evaluation of each term otherwise.
struct PmfWalk {
    n: i32,
    p: f64,
    ratio: f64,
    log_domain: bool,
    k: i32,
    mass: f64,
    cumulative: f64,
}

impl PmfWalk {
    fn new(n: i32, p: f64) -> Self {
        let q = 1.0 - p;
        let first = (f64::from(n) * (-p).ln_1p()).exp();
        Self {
            n,
            p,
            ratio: p / q,
            log_domain: p > 0.0 && first < f64::MIN_POSITIVE,
            k: 0,
            mass: first,
            cumulative: 0.0,
        }
    }
}

impl Iterator for PmfWalk {
    type Item = PmfStep;

    fn next(&mut self) -> Option<PmfStep> {
        if self.k > self.n {
            return None;
        }
        let k = self.k;
        if self.log_domain {
            self.mass = ln_pmf(self.n, self.p, k).exp();
        } else if k > 0 {
            self.mass *= self.ratio * (f64::from(self.n - k + 1) / f64::from(k));
        }
        self.cumulative += self.mass;
        self.k += 1;
        Some(PmfStep {
            k,
            mass: self.mass,
            cumulative: self.cumulative.min(1.0),
        })
    }
}

#[inline]
fn fc(k: f64) -> f64 {
    stirling_correction(k as u64)
}

/// BTRD for `p <= 0.5` and `n·p >= 10`.
fn btrd_sample(
    n: i32,
    p: f64,
    source: &mut dyn UniformSource,
    abort: &dyn AbortCheck,
) -> Result<i32, DistributionError> {
    let nf = f64::from(n);
    let q = 1.0 - p;
    let m = ((nf + 1.0) * p).floor();
    let r = p / q;
    let nr = (nf + 1.0) * r;
    let npq = nf * p * q;
    let sqrt_npq = npq.sqrt();
    let b = 1.15 + 2.53 * sqrt_npq;
    let a = -0.0873 + 0.0248 * b + 0.01 * p;
    let c = nf * p + 0.5;
    let alpha = (2.83 + 5.1 / b) * sqrt_npq;
    let v_r = 0.92 - 4.2 / b;
    let u_r_v_r = 0.86 * v_r;

    for _ in 0..BTRD_MAX_TRIALS {
        abort.check()?;

        // Step 1: triangular centre, accepted without a test
        let mut v = source.next_uniform();
        if v <= u_r_v_r {
            let u = v / v_r - 0.43;
            let k = ((2.0 * a / (0.5 - u.abs()) + b) * u + c).floor();
            return Ok(k as i32);
        }

        // Step 2: candidate from the hat
        let u = if v >= v_r {
            source.next_uniform() - 0.5
        } else {
            let w = v / v_r - 0.93;
            v = source.next_uniform() * v_r;
            0.5f64.copysign(w) - w
        };

        // Step 3.0
        let us = 0.5 - u.abs();
        let k = ((2.0 * a / us + b) * u + c).floor();
        if k < 0.0 || k > nf {
            continue;
        }
        v *= alpha / (a / (us * us) + b);
        let km = (k - m).abs();

        // Step 3.1: exact ratio f(k)/f(m) by recurrence
        if km <= BTRD_RECURRENCE_SPAN {
            let mut f = 1.0;
            if m < k {
                let mut i = m;
                while i < k {
                    i += 1.0;
                    f *= nr / i - r;
                }
            } else if m > k {
                let mut i = k;
                while i < m {
                    i += 1.0;
                    v *= nr / i - r;
                }
            }
            if v <= f {
                return Ok(k as i32);
            }
            continue;
        }

        // Step 3.2: squeeze
        let v = v.ln();
        let rho = (km / npq) * (((km / 3.0 + 0.625) * km + 1.0 / 6.0) * km / npq + 0.5);
        let t = -km * km / (2.0 * npq);
        if v < t - rho {
            return Ok(k as i32);
        }
        if v > t + rho {
            continue;
        }

        // Step 3.3: final log-domain test with Stirling corrections
        let nm = nf - m + 1.0;
        let h = (m + 0.5) * ((m + 1.0) / (r * nm)).ln() + fc(m) + fc(nf - m);
        let nk = nf - k + 1.0;
        let bound = h + (nf + 1.0) * (nm / nk).ln() + (k + 0.5) * (nk * r / (k + 1.0)).ln()
            - fc(k)
            - fc(nf - k);
        if v <= bound {
            return Ok(k as i32);
        }
    }

    Err(DistributionError::non_convergence("BTRD", BTRD_MAX_TRIALS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use stochastic_core::rng::PseudoRandom;

    #[test]
    fn test_parameter_validation() {
        assert!(Binomial::new(0, 0.5).is_err());
        assert!(Binomial::new(-3, 0.5).is_err());
        assert!(Binomial::new(10, -0.1).is_err());
        assert!(Binomial::new(10, 1.1).is_err());
        assert!(Binomial::new(10, f64::NAN).is_err());
        assert!(Binomial::new(10, 0.0).is_ok());
        assert!(Binomial::new(10, 1.0).is_ok());
    }

    #[test]
    fn test_moments() {
        let b = Binomial::new(20, 0.25).unwrap();
        assert_relative_eq!(b.mean(), 5.0);
        assert_relative_eq!(b.variance(), 3.75);
        assert_relative_eq!(b.skewness(), 0.5 / 3.75f64.sqrt(), epsilon = 1e-15);
        assert_relative_eq!(b.kurtosis(), (1.0 - 6.0 * 0.1875) / 3.75, epsilon = 1e-15);
    }

    #[test]
    fn test_known_cdf() {
        let b = Binomial::new(10, 0.3).unwrap();
        assert_relative_eq!(b.cumulative_density(3.0).unwrap(), 0.649_610_718_4, epsilon = 1e-9);
        assert_relative_eq!(b.density(0.0).unwrap(), 0.7f64.powi(10), epsilon = 1e-14);
        assert_eq!(b.cumulative_density(-0.5).unwrap(), 0.0);
        assert_eq!(b.cumulative_density(10.0).unwrap(), 1.0);
        assert_eq!(b.density(2.5).unwrap(), 0.0);
    }

    #[test]
    fn test_folded_cdf_matches_direct_mass() {
        let b = Binomial::new(12, 0.8).unwrap();
        let mut cumulative = 0.0;
        for k in 0..12 {
            cumulative += b.density(f64::from(k)).unwrap();
            assert_relative_eq!(
                b.cumulative_density(f64::from(k)).unwrap(),
                cumulative,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_quantile_round_trip_both_sides() {
        for &p in &[0.3, 0.7] {
            let b = Binomial::new(20, p).unwrap();
            for k in 2..18 {
                let u = b.cumulative_density(f64::from(k)).unwrap();
                assert_eq!(b.quantile_index(u).unwrap(), k, "p = {}, k = {}", p, k);
            }
        }
    }

    #[test]
    fn test_quantile_extremes() {
        let b = Binomial::new(10, 0.3).unwrap();
        assert_eq!(b.quantile_index(0.0).unwrap(), 0);
        assert_eq!(b.quantile_index(1.0).unwrap(), 10);
        assert!(b.quantile_index(1.5).is_err());

        assert_eq!(Binomial::new(7, 0.0).unwrap().quantile_index(0.9).unwrap(), 0);
        assert_eq!(Binomial::new(7, 1.0).unwrap().quantile_index(0.1).unwrap(), 7);
    }

    #[test]
    fn test_scenarios_cover_support() {
        let b = Binomial::new(6, 0.75).unwrap();
        let scenarios = b.scenarios().unwrap();
        assert_eq!(scenarios.len(), 7);
        let values: Vec<f64> = scenarios.iter().map(|s| s.value()).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let total: f64 = scenarios.iter().map(|s| s.probability()).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        assert_relative_eq!(scenarios[6].probability(), 0.75f64.powi(6), epsilon = 1e-14);
    }

    #[test]
    fn test_degenerate_scenarios_drop_zero_mass() {
        let b = Binomial::new(5, 0.0).unwrap();
        let scenarios = b.scenarios().unwrap();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].value(), 0.0);
        assert_eq!(b.scenario_count(), 1);

        let certain = Binomial::new(5, 1.0).unwrap();
        assert_eq!(certain.scenario_count(), 1);
        assert_eq!(certain.scenarios().unwrap()[0].value(), 5.0);
    }

    #[test]
    fn test_scenario_count_matches_emitted_points() {
        // Both tails of these underflow to zero mass
        for (n, p) in [(2_000, 0.3), (5_000, 0.5), (4_000, 0.9), (100_000, 0.01)] {
            let b = Binomial::new(n, p).unwrap();
            let scenarios = b.scenarios().unwrap();
            assert!(scenarios.len() < n as usize + 1);
            assert_eq!(b.scenario_count() as usize, scenarios.len(), "Bin({}, {})", n, p);
            let total: f64 = scenarios.iter().map(|s| s.probability()).sum();
            assert_relative_eq!(total, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_scenario_count_of_huge_trial_count_is_cheap() {
        let b = Binomial::new(2_000_000_000, 0.5).unwrap();
        let count = b.scenario_count();
        assert!(count > 0 && count < 10_000_000, "count = {}", count);
    }

    #[test]
    fn test_regime_selection() {
        assert!(!Binomial::new(50, 0.1).unwrap().uses_rejection());
        assert!(Binomial::new(150, 0.1).unwrap().uses_rejection());
        assert!(Binomial::new(150, 0.9).unwrap().uses_rejection());
        assert!(Binomial::new(150, 0.1).unwrap().quantile_index(0.5).is_ok());
    }

    #[test]
    fn test_btrd_moments() {
        let b = Binomial::new(1000, 0.3).unwrap();
        let mut rng = PseudoRandom::from_seed(17);
        let n = 20_000;
        let samples: Vec<f64> = (0..n)
            .map(|_| b.sample_from(&mut rng, &NeverAbort).unwrap())
            .collect();
        assert!(samples.iter().all(|&x| (0.0..=1000.0).contains(&x)));
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        assert!((mean - 300.0).abs() < 1.0, "mean = {}", mean);
        assert!((var - 210.0).abs() < 21.0, "variance = {}", var);
    }

    #[test]
    fn test_btrd_folded_moments() {
        let b = Binomial::new(200, 0.8).unwrap();
        let mut rng = PseudoRandom::from_seed(3);
        let n = 20_000;
        let mean = (0..n)
            .map(|_| b.sample_from(&mut rng, &NeverAbort).unwrap())
            .sum::<f64>()
            / n as f64;
        assert!((mean - 160.0).abs() < 0.5, "mean = {}", mean);
    }

    #[test]
    fn test_inversion_sampling_mean() {
        let b = Binomial::new(30, 0.2).unwrap();
        let mut rng = PseudoRandom::from_seed(11);
        let n = 20_000;
        let mean = (0..n)
            .map(|_| b.sample_from(&mut rng, &NeverAbort).unwrap())
            .sum::<f64>()
            / n as f64;
        assert!((mean - 6.0).abs() < 0.1, "mean = {}", mean);
    }

    #[test]
    fn test_cancellation_inside_sampler() {
        let mut rng = PseudoRandom::from_seed(5);
        let always = || true;
        let large = Binomial::new(1000, 0.4).unwrap();
        assert_eq!(
            large.sample_from(&mut rng, &always),
            Err(DistributionError::Cancelled)
        );
        let small = Binomial::new(10, 0.4).unwrap();
        assert_eq!(
            small.sample_from(&mut rng, &always),
            Err(DistributionError::Cancelled)
        );
    }

    #[test]
    fn test_log_domain_walk() {
        // qⁿ underflows for n = 5000, p = 0.5
        let b = Binomial::new(5000, 0.5).unwrap();
        assert_eq!(b.quantile_index(0.5).unwrap(), 2500);
        assert_relative_eq!(
            b.cumulative_density(2500.0).unwrap(),
            0.5 + 0.5 * b.density(2500.0).unwrap(),
            epsilon = 1e-9
        );
    }
}
