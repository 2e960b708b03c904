use crate::Position;
use crate::cards::Card;
use std::collections::BTreeSet;

/// One table position: an optional card and the participants marking it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spot {
    card: Option<Card>,
    markers: BTreeSet<Position>,
}

impl Spot {
    pub fn card(&self) -> Option<Card> {
        self.card
    }
    pub fn markers(&self) -> impl Iterator<Item = Position> + '_ {
        self.markers.iter().copied()
    }
    pub fn is_empty(&self) -> bool {
        self.card.is_none()
    }
    pub fn is_marked_by(&self, pos: Position) -> bool {
        self.markers.contains(&pos)
    }
    pub(super) fn bind(&mut self, card: Card) {
        debug_assert!(self.card.is_none());
        self.card = Some(card);
    }
    /// Unbinds the card and drops every marker in one step.
    pub(super) fn unbind(&mut self) -> Option<Card> {
        self.markers.clear();
        self.card.take()
    }
    pub(super) fn mark(&mut self, pos: Position) -> bool {
        self.markers.insert(pos)
    }
    pub(super) fn unmark(&mut self, pos: Position) -> bool {
        self.markers.remove(&pos)
    }
}
