use super::card::Card;
use super::combinations::Combinations;
use super::shape::Shape;
use std::collections::HashMap;
use std::collections::HashSet;

/// Pure predicate and search over card combinations.
///
/// Implementations carry no mutable state and are shared between the
/// coordinator and automated participants, so they must be safe to call
/// concurrently.
pub trait Validator: Send + Sync {
    /// Number of cards in a valid combination.
    fn size(&self) -> usize;
    /// Whether exactly these cards form a valid combination.
    fn is_set(&self, cards: &[Card]) -> bool;
    /// Up to `limit` valid combinations among `cards`, in a deterministic order.
    fn find_sets(&self, cards: &[Card], limit: usize) -> Vec<Vec<Card>> {
        Combinations::from((cards.len(), self.size()))
            .map(|ix| ix.into_iter().map(|i| cards[i]).collect::<Vec<_>>())
            .filter(|combo| self.is_set(combo))
            .take(limit)
            .collect()
    }
    /// Bounded search that stops at the first hit.
    fn any_set(&self, cards: &[Card]) -> bool {
        !self.find_sets(cards, 1).is_empty()
    }
}

/// The standard rule: in every feature, the cards are either all the same
/// or all different.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    shape: Shape,
    size: usize,
}

impl Rules {
    pub fn new(shape: Shape, size: usize) -> Self {
        Self { shape, size }
    }
    pub fn shape(&self) -> Shape {
        self.shape
    }
    /// The unique card completing `cards` into a valid combination, if any.
    ///
    /// Only defined when the combination size equals the feature
    /// cardinality: each feature is then either forced to repeat the shared
    /// value or forced to take the single value nobody holds.
    fn complete(&self, cards: &[Card]) -> Option<Card> {
        (0..self.shape.features())
            .map(|i| {
                let seen = cards
                    .iter()
                    .map(|c| c.feature(self.shape, i))
                    .collect::<HashSet<_>>();
                match seen.len() {
                    1 => seen.into_iter().next(),
                    n if n == cards.len() => (0..self.shape.values()).find(|v| !seen.contains(v)),
                    _ => None,
                }
            })
            .collect::<Option<Vec<usize>>>()
            .map(|features| Card::from_features(self.shape, &features))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new(Shape::default(), crate::SET_SIZE)
    }
}

impl Validator for Rules {
    fn size(&self) -> usize {
        self.size
    }
    fn is_set(&self, cards: &[Card]) -> bool {
        cards.len() == self.size
            && cards.iter().collect::<HashSet<_>>().len() == self.size
            && (0..self.shape.features()).all(|i| {
                match cards
                    .iter()
                    .map(|c| c.feature(self.shape, i))
                    .collect::<HashSet<_>>()
                    .len()
                {
                    1 => true,
                    n => n == self.size,
                }
            })
    }
    fn find_sets(&self, cards: &[Card], limit: usize) -> Vec<Vec<Card>> {
        if self.size < 3 || self.size != self.shape.values() {
            return Combinations::from((cards.len(), self.size))
                .map(|ix| ix.into_iter().map(|i| cards[i]).collect::<Vec<_>>())
                .filter(|combo| self.is_set(combo))
                .take(limit)
                .collect();
        }
        let index = cards
            .iter()
            .enumerate()
            .map(|(i, c)| (*c, i))
            .collect::<HashMap<_, _>>();
        Combinations::from((cards.len(), self.size - 1))
            .filter_map(|ix| {
                let partial = ix.iter().map(|&i| cards[i]).collect::<Vec<_>>();
                let last = *ix.last()?;
                self.complete(&partial)
                    .and_then(|c| index.get(&c).map(|&j| (c, j)))
                    .filter(|&(_, j)| j > last)
                    .map(|(c, _)| partial.into_iter().chain(std::iter::once(c)).collect())
            })
            .take(limit)
            .collect()
    }
}
