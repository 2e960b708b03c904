use crate::Slot;
use crate::cards::Card;

/// Private snapshot of the table as seen by one participant.
///
/// Taken under the table lock and then owned outright, so reading it can
/// never write to, or block, shared state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    cards: Vec<(Slot, Card)>,
    mine: Vec<Slot>,
}

impl View {
    pub fn new(cards: Vec<(Slot, Card)>, mine: Vec<Slot>) -> Self {
        Self { cards, mine }
    }
    /// Occupied slots with their cards, in slot order.
    pub fn cards(&self) -> &[(Slot, Card)] {
        &self.cards
    }
    /// Slots this participant holds markers on.
    pub fn mine(&self) -> &[Slot] {
        &self.mine
    }
    pub fn slot_of(&self, card: Card) -> Option<Slot> {
        self.cards.iter().find(|(_, c)| *c == card).map(|(s, _)| *s)
    }
    pub fn hand(&self) -> Vec<Card> {
        self.cards.iter().map(|(_, c)| *c).collect()
    }
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
