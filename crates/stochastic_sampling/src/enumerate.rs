//! Exact enumeration of finite supports.
//!
//! [`CrossProduct`] walks the Cartesian product of per-dimension scenario
//! lists like an odometer: the last dimension varies fastest. Each step
//! yields an owned `(probability, values)` pair whose probability is the
//! product along the path.

use stochastic_distributions::Scenario;

/// Lazy cross product over per-dimension scenario lists.
///
/// # Examples
///
/// ```rust
/// use stochastic_distributions::Scenario;
/// use stochastic_sampling::CrossProduct;
///
/// let coin = vec![Scenario::new(0.5, 0.0).unwrap(), Scenario::new(0.5, 1.0).unwrap()];
/// let product = CrossProduct::new(vec![coin.clone(), coin]);
/// let outcomes: Vec<(f64, Vec<f64>)> = product.collect();
///
/// assert_eq!(outcomes.len(), 4);
/// assert_eq!(outcomes[1].1, vec![0.0, 1.0]);
/// assert_eq!(outcomes[1].0, 0.25);
/// ```
#[derive(Debug, Clone)]
pub struct CrossProduct {
    axes: Vec<Vec<Scenario>>,
    indices: Vec<usize>,
    exhausted: bool,
}

impl CrossProduct {
    /// Creates an enumerator positioned at the first combination.
    ///
    /// With no dimensions the product holds a single empty combination of
    /// probability one; an empty dimension makes the product empty.
    pub fn new(axes: Vec<Vec<Scenario>>) -> Self {
        let exhausted = axes.iter().any(Vec::is_empty);
        let indices = vec![0; axes.len()];
        Self {
            axes,
            indices,
            exhausted,
        }
    }

    /// Rewinds to the first combination.
    pub fn restart(&mut self) {
        self.indices.iter_mut().for_each(|i| *i = 0);
        self.exhausted = self.axes.iter().any(Vec::is_empty);
    }

    /// Total number of combinations, saturating at `usize::MAX`.
    pub fn combinations(&self) -> usize {
        self.axes
            .iter()
            .fold(1usize, |acc, axis| acc.saturating_mul(axis.len()))
    }

    fn advance(&mut self) {
        for dimension in (0..self.axes.len()).rev() {
            self.indices[dimension] += 1;
            if self.indices[dimension] < self.axes[dimension].len() {
                return;
            }
            self.indices[dimension] = 0;
        }
        // Carried out of the first dimension
        self.exhausted = true;
    }
}

impl Iterator for CrossProduct {
    type Item = (f64, Vec<f64>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let mut probability = 1.0;
        let mut values = Vec::with_capacity(self.axes.len());
        for (axis, &index) in self.axes.iter().zip(&self.indices) {
            let scenario = axis[index];
            probability *= scenario.probability();
            values.push(scenario.value());
        }
        self.advance();
        Some((probability, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn axis(pairs: &[(f64, f64)]) -> Vec<Scenario> {
        pairs
            .iter()
            .map(|&(p, v)| Scenario::new(p, v).unwrap())
            .collect()
    }

    #[test]
    fn test_last_dimension_varies_fastest() {
        let product = CrossProduct::new(vec![
            axis(&[(0.5, 1.0), (0.5, 2.0)]),
            axis(&[(0.2, 10.0), (0.3, 20.0), (0.5, 30.0)]),
        ]);
        let values: Vec<Vec<f64>> = product.map(|(_, v)| v).collect();
        assert_eq!(
            values,
            vec![
                vec![1.0, 10.0],
                vec![1.0, 20.0],
                vec![1.0, 30.0],
                vec![2.0, 10.0],
                vec![2.0, 20.0],
                vec![2.0, 30.0],
            ]
        );
    }

    #[test]
    fn test_probabilities_multiply_and_sum_to_one() {
        let product = CrossProduct::new(vec![
            axis(&[(0.25, 1.0), (0.75, 2.0)]),
            axis(&[(0.4, 0.0), (0.6, 1.0)]),
        ]);
        let outcomes: Vec<(f64, Vec<f64>)> = product.collect();
        assert_relative_eq!(outcomes[0].0, 0.1, epsilon = 1e-15);
        let total: f64 = outcomes.iter().map(|(p, _)| p).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_restart_replays_sequence() {
        let mut product = CrossProduct::new(vec![axis(&[(0.5, 1.0), (0.5, 2.0)])]);
        let first: Vec<_> = product.by_ref().collect();
        assert!(product.next().is_none());
        product.restart();
        let second: Vec<_> = product.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_dimensions_yields_single_empty_combination() {
        let outcomes: Vec<_> = CrossProduct::new(Vec::new()).collect();
        assert_eq!(outcomes, vec![(1.0, Vec::new())]);
    }

    #[test]
    fn test_empty_dimension_yields_nothing() {
        let product = CrossProduct::new(vec![axis(&[(1.0, 1.0)]), Vec::new()]);
        assert_eq!(product.combinations(), 0);
        assert_eq!(product.count(), 0);
    }
}
