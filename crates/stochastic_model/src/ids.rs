//! Identifier types for model entities.

use std::fmt;

/// Unique identifier for a decision variable.
///
/// # Examples
///
/// ```
/// use stochastic_model::DecisionId;
///
/// let id = DecisionId::new("order");
/// assert_eq!(id.as_str(), "order");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionId(String);

impl DecisionId {
    /// Creates a new decision ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the clone of this decision for scenario `ordinal`.
    pub fn clone_name(&self, ordinal: usize) -> String {
        format!("{}#{}", self.0, ordinal)
    }
}

impl fmt::Display for DecisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DecisionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DecisionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
