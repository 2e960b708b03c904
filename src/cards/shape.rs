use serde::Deserialize;
use serde::Serialize;

/// Dimensions of the card universe.
///
/// Every card carries `features` features, each taking one of `values`
/// values, so a complete deck holds `values ^ features` cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    features: usize,
    values: usize,
}

impl Shape {
    pub fn new(features: usize, values: usize) -> Self {
        Self { features, values }
    }
    /// Number of features per card.
    pub fn features(&self) -> usize {
        self.features
    }
    /// Cardinality of each feature.
    pub fn values(&self) -> usize {
        self.values
    }
    /// Size of the complete card universe.
    pub fn universe(&self) -> usize {
        (0..self.features).fold(1usize, |n, _| n.saturating_mul(self.values))
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::new(crate::FEATURE_COUNT, crate::FEATURE_SIZE)
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.features, self.values)
    }
}
