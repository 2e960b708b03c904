use super::shape::Shape;
use serde::Deserialize;
use serde::Serialize;

/// A card identified by its index in the full deck.
///
/// Features are never stored. They are the base-`values` digits of the
/// index, feature 0 being the least significant digit, so two cards with
/// the same index are the same card under any [`Shape`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card(u16);

impl Card {
    /// Value of feature `i` under the given shape.
    pub fn feature(&self, shape: Shape, i: usize) -> usize {
        (0..i).fold(self.0 as usize, |n, _| n / shape.values()) % shape.values()
    }
    /// The full feature vector under the given shape.
    pub fn features(&self, shape: Shape) -> Vec<usize> {
        (0..shape.features())
            .map(|i| self.feature(shape, i))
            .collect()
    }
    /// Inverse of [`Card::features`]. Values are taken modulo the shape's cardinality.
    pub fn from_features(shape: Shape, features: &[usize]) -> Self {
        let index = features
            .iter()
            .rev()
            .fold(0usize, |n, f| n * shape.values() + f % shape.values());
        Self(index as u16)
    }
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// u16 isomorphism
impl From<u16> for Card {
    fn from(n: u16) -> Self {
        Self(n)
    }
}
impl From<Card> for u16 {
    fn from(c: Card) -> u16 {
        c.0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{:02}", self.0)
    }
}
