//! Seeded pseudo-random generator.
//!
//! This module provides [`PseudoRandom`], a wrapper around `rand::StdRng`
//! that adds the draw variants the scenario engine needs: open and closed
//! unit intervals, arbitrary intervals with endpoint semantics, and an
//! unbiased shuffle.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

use super::interval::Interval;
use crate::types::DistributionError;
use super::source::UniformSource;

/// Seed used when a configuration asks for "no particular seed".
///
/// Keeping this fixed means an unseeded solve is still reproducible.
pub const DEFAULT_RANDOM_SEED: u64 = 123_456_789;

/// First seed handed out by [`PseudoRandom::create`].
const FIRST_COUNTER_SEED: u64 = 0x2545_F491;

/// Process-wide counter feeding unseeded generators.
static NEXT_COUNTER_SEED: AtomicU64 = AtomicU64::new(FIRST_COUNTER_SEED);

/// 2^53 − 1, the largest integer with an exact `f64` mantissa.
const MANTISSA_MAX: f64 = ((1u64 << 53) - 1) as f64;

/// Reproducible uniform random source.
///
/// # Examples
///
/// ```rust
/// use stochastic_core::rng::PseudoRandom;
///
/// let mut rng1 = PseudoRandom::from_seed(7);
/// let mut rng2 = PseudoRandom::from_seed(7);
/// assert_eq!(rng1.next_u32(), rng2.next_u32());
/// assert_eq!(rng1.next_double(), rng2.next_double());
/// ```
#[derive(Debug, Clone)]
pub struct PseudoRandom {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation.
    seed: u64,
}

impl PseudoRandom {
    /// Creates a generator seeded from the process-wide counter.
    ///
    /// Successive calls yield generators with distinct seeds.
    pub fn create() -> Self {
        let seed = NEXT_COUNTER_SEED.fetch_add(1, Ordering::Relaxed);
        Self::from_seed(seed)
    }

    /// Creates a generator initialised with the given seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next 32-bit word.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    /// Uniform draw in [0, 1).
    #[inline]
    pub fn next_double(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Uniform draw in (0, 1).
    #[inline]
    pub fn next_double_open(&mut self) -> f64 {
        loop {
            let u = self.next_double();
            if u > 0.0 {
                return u;
            }
        }
    }

    /// Uniform draw in (0, 1].
    #[inline]
    pub fn next_double_nonzero(&mut self) -> f64 {
        1.0 - self.next_double()
    }

    /// Uniform draw in [0, 1], both endpoints reachable.
    #[inline]
    pub fn next_double_closed(&mut self) -> f64 {
        (self.inner.next_u64() >> 11) as f64 / MANTISSA_MAX
    }

    /// Uniform draw inside `interval`.
    ///
    /// The draw is taken over the closed hull and clamped to the interval's
    /// extreme members, so open endpoints are never returned.
    pub fn next_f64_in(&mut self, interval: &Interval) -> f64 {
        let x = interval.lower() + interval.width() * self.next_double_closed();
        x.clamp(interval.first(), interval.last())
    }

    /// Single-precision draw inside `interval`.
    ///
    /// # Errors
    /// `InvalidArgument` if no `f32` lies inside `interval`.
    pub fn next_f32_in(&mut self, interval: &Interval) -> Result<f32, DistributionError> {
        let (first, last) = interval.f32_members().ok_or_else(|| {
            DistributionError::invalid_argument(format!(
                "no single-precision value lies in [{}, {}]",
                interval.lower(),
                interval.upper()
            ))
        })?;
        let x = (interval.lower() + interval.width() * self.next_double_closed()) as f32;
        Ok(x.clamp(first, last))
    }

    /// Uniform index in `0..bound`.
    ///
    /// # Panics
    /// Panics if `bound` is zero.
    #[inline]
    pub fn next_index(&mut self, bound: usize) -> usize {
        self.inner.gen_range(0..bound)
    }

    /// Shuffles `items` in place (Fisher–Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}

impl UniformSource for PseudoRandom {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.next_double_open()
    }
}
