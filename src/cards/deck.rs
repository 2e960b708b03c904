use super::card::Card;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

/// Ordered pool of undealt cards.
///
/// Cards are drawn from the top and returned to the bottom. Only the
/// coordinator touches the deck, so it carries no synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck(VecDeque<Card>);

impl Deck {
    /// Fresh deck holding cards `0..size` in order.
    pub fn new(size: usize) -> Self {
        Self((0..size as u16).map(Card::from).collect())
    }
    /// Draws the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.0.pop_front()
    }
    /// Returns a card to the bottom of the deck.
    pub fn push(&mut self, card: Card) {
        debug_assert!(!self.0.contains(&card));
        self.0.push_back(card)
    }
    pub fn shuffle<R>(&mut self, rng: &mut R)
    where
        R: rand::Rng,
    {
        self.0.make_contiguous().shuffle(rng);
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0.contains(card)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards.into())
    }
}

impl std::fmt::Display for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
