//! Probability-weighted statistics over recourse clones.

use stochastic_core::types::StochasticError;

/// Weighted summary of one recourse decision across scenarios.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecourseStatistics {
    /// Probability-weighted mean.
    pub expected: f64,
    /// Smallest clone value.
    pub minimum: f64,
    /// Largest clone value.
    pub maximum: f64,
    /// Number of scenarios.
    pub scenarios: usize,
}

impl RecourseStatistics {
    /// Computes the statistics; probabilities are renormalised by their sum.
    ///
    /// # Errors
    ///
    /// `ModelData` if the slices are empty, of different lengths, or the
    /// probabilities do not have a positive finite sum.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stochastic_model::RecourseStatistics;
    ///
    /// let stats = RecourseStatistics::compute(&[0.25, 0.75], &[4.0, 8.0]).unwrap();
    /// assert_eq!(stats.expected, 7.0);
    /// assert_eq!(stats.minimum, 4.0);
    /// assert_eq!(stats.maximum, 8.0);
    /// ```
    pub fn compute(probabilities: &[f64], values: &[f64]) -> Result<Self, StochasticError> {
        if probabilities.is_empty() || probabilities.len() != values.len() {
            return Err(StochasticError::model_data(format!(
                "{} probabilities for {} values",
                probabilities.len(),
                values.len()
            )));
        }
        let total: f64 = probabilities.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(StochasticError::model_data(format!(
                "scenario probabilities sum to {}",
                total
            )));
        }

        let weighted: f64 = probabilities.iter().zip(values).map(|(p, v)| p * v).sum();
        let minimum = values.iter().copied().fold(f64::INFINITY, f64::min);
        let maximum = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            expected: weighted / total,
            minimum,
            maximum,
            scenarios: values.len(),
        })
    }
}
