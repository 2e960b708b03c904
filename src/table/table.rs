use super::error::TableError;
use super::spot::Spot;
use crate::Position;
use crate::Slot;
use crate::cards::Card;
use std::collections::HashMap;

/// Marker placement or removal, as decided by [`Table::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Placed(Card),
    Removed(Card),
}

/// Arena of slot records plus the inverse card → slot index.
///
/// Both directions are updated together by every mutation, so a slot
/// either holds a card that maps back to it or holds nothing. Markers only
/// live on occupied slots; unbinding a card clears them in the same step.
#[derive(Debug, Clone)]
pub struct Table {
    spots: Vec<Spot>,
    homes: HashMap<Card, Slot>,
    retired: Vec<Card>,
    limit: usize,
}

impl Table {
    /// Empty table of `size` slots whose participants may each hold at
    /// most `limit` markers.
    pub fn new(size: usize, limit: usize) -> Self {
        Self {
            spots: vec![Spot::default(); size],
            homes: HashMap::new(),
            retired: Vec::new(),
            limit,
        }
    }
    pub fn size(&self) -> usize {
        self.spots.len()
    }
    pub fn limit(&self) -> usize {
        self.limit
    }
    pub fn spot(&self, slot: Slot) -> Option<&Spot> {
        self.spots.get(slot)
    }
    pub fn card(&self, slot: Slot) -> Option<Card> {
        self.spots.get(slot).and_then(Spot::card)
    }
    pub fn slot(&self, card: Card) -> Option<Slot> {
        self.homes.get(&card).copied()
    }
    /// Number of cards currently placed.
    pub fn count(&self) -> usize {
        self.homes.len()
    }
    pub fn is_full(&self) -> bool {
        self.count() == self.size()
    }
    /// Cards retired by successful claims, in retirement order.
    pub fn retired(&self) -> &[Card] {
        &self.retired
    }
    /// Lazily walks the placed cards in slot order.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.spots.iter().filter_map(Spot::card)
    }
    pub fn empty_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.spots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_empty())
            .map(|(i, _)| i)
    }
}

/// Card mutations. Coordinator only.
impl Table {
    pub fn place_card(&mut self, card: Card, slot: Slot) -> Result<(), TableError> {
        let spot = self.spots.get(slot).ok_or(TableError::OutOfRange(slot))?;
        if !spot.is_empty() {
            return Err(TableError::SlotOccupied(slot));
        }
        if self.homes.contains_key(&card) {
            return Err(TableError::CardInPlay(card));
        }
        self.spots[slot].bind(card);
        self.homes.insert(card, slot);
        Ok(())
    }
    /// Unbinds the card at `slot` and clears every marker on it.
    pub fn remove_card(&mut self, slot: Slot) -> Result<Card, TableError> {
        let spot = self.spots.get_mut(slot).ok_or(TableError::OutOfRange(slot))?;
        let card = spot.unbind().ok_or(TableError::SlotEmpty(slot))?;
        self.homes.remove(&card);
        Ok(card)
    }
    /// Removes the card at `slot` from play for good.
    pub fn retire(&mut self, slot: Slot) -> Result<Card, TableError> {
        let card = self.remove_card(slot)?;
        self.retired.push(card);
        Ok(card)
    }
}

/// Marker mutations. Participants, through the [`super::Board`].
impl Table {
    pub fn place_marker(&mut self, pos: Position, slot: Slot) -> Result<(), TableError> {
        let spot = self.spots.get(slot).ok_or(TableError::OutOfRange(slot))?;
        if spot.is_empty() {
            return Err(TableError::SlotEmpty(slot));
        }
        if spot.is_marked_by(pos) {
            return Err(TableError::MarkerAlreadyPresent(slot));
        }
        self.spots[slot].mark(pos);
        Ok(())
    }
    /// Idempotent: returns whether a marker was actually removed.
    pub fn remove_marker(&mut self, pos: Position, slot: Slot) -> bool {
        self.spots
            .get_mut(slot)
            .map(|spot| spot.unmark(pos))
            .unwrap_or(false)
    }
    /// Removes the participant's marker at `slot` if present, otherwise
    /// places one, refusing once the participant already holds `limit`.
    pub fn toggle(&mut self, pos: Position, slot: Slot) -> Result<Toggle, TableError> {
        let spot = self.spots.get(slot).ok_or(TableError::OutOfRange(slot))?;
        let card = spot.card().ok_or(TableError::SlotEmpty(slot))?;
        if self.remove_marker(pos, slot) {
            return Ok(Toggle::Removed(card));
        }
        if self.markers(pos).count() >= self.limit {
            return Err(TableError::CandidateSetFull);
        }
        self.place_marker(pos, slot)?;
        Ok(Toggle::Placed(card))
    }
    /// Slots the participant holds markers on, in slot order.
    pub fn markers(&self, pos: Position) -> impl Iterator<Item = Slot> + '_ {
        self.spots
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.is_marked_by(pos))
            .map(|(i, _)| i)
    }
    /// Cards under the participant's markers, in slot order.
    pub fn candidate(&self, pos: Position) -> Vec<Card> {
        self.markers(pos).filter_map(|s| self.card(s)).collect()
    }
    /// Drops all of the participant's markers, returning the slots cleared.
    pub fn clear_markers(&mut self, pos: Position) -> Vec<Slot> {
        let slots = self.markers(pos).collect::<Vec<_>>();
        slots.iter().for_each(|&s| {
            self.spots[s].unmark(pos);
        });
        slots
    }
}

impl Table {
    /// Checks every structural invariant of the arena.
    pub fn is_consistent(&self) -> bool {
        let forward = self
            .spots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.card().map(|c| (i, c)))
            .all(|(i, c)| self.homes.get(&c) == Some(&i));
        let backward = self
            .homes
            .iter()
            .all(|(c, &i)| self.card(i) == Some(*c));
        let markers = self
            .spots
            .iter()
            .all(|s| !s.is_empty() || s.markers().count() == 0);
        let bounded = self
            .spots
            .iter()
            .flat_map(|s| s.markers())
            .all(|p| self.markers(p).count() <= self.limit);
        let retired = self.retired.iter().all(|c| !self.homes.contains_key(c));
        forward && backward && markers && bounded && retired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(n: u16) -> Card {
        Card::from(n)
    }

    #[test]
    fn place_then_remove_round_trip() {
        let mut table = Table::new(4, 3);
        table.place_card(card(7), 2).unwrap();
        table.place_marker(0, 2).unwrap();
        table.place_marker(1, 2).unwrap();
        assert_eq!(table.remove_card(2), Ok(card(7)));
        assert!(table.spot(2).unwrap().is_empty());
        assert_eq!(table.spot(2).unwrap().markers().count(), 0);
        assert_eq!(table.slot(card(7)), None);
        assert!(table.is_consistent());
    }
    #[test]
    fn place_on_occupied_slot() {
        let mut table = Table::new(2, 3);
        table.place_card(card(1), 0).unwrap();
        assert_eq!(table.place_card(card(2), 0), Err(TableError::SlotOccupied(0)));
    }
    #[test]
    fn same_card_twice() {
        let mut table = Table::new(2, 3);
        table.place_card(card(1), 0).unwrap();
        assert_eq!(table.place_card(card(1), 1), Err(TableError::CardInPlay(card(1))));
    }
    #[test]
    fn remove_from_empty_slot() {
        let mut table = Table::new(2, 3);
        assert_eq!(table.remove_card(1), Err(TableError::SlotEmpty(1)));
        assert_eq!(table.remove_card(9), Err(TableError::OutOfRange(9)));
    }
    #[test]
    fn marker_needs_card() {
        let mut table = Table::new(2, 3);
        assert_eq!(table.place_marker(0, 0), Err(TableError::SlotEmpty(0)));
    }
    #[test]
    fn marker_twice() {
        let mut table = Table::new(2, 3);
        table.place_card(card(1), 0).unwrap();
        table.place_marker(0, 0).unwrap();
        assert_eq!(table.place_marker(0, 0), Err(TableError::MarkerAlreadyPresent(0)));
    }
    #[test]
    fn remove_marker_is_idempotent() {
        let mut table = Table::new(2, 3);
        table.place_card(card(1), 0).unwrap();
        table.place_marker(0, 0).unwrap();
        assert!(table.remove_marker(0, 0));
        assert!(!table.remove_marker(0, 0));
        assert!(!table.remove_marker(0, 5));
    }
    #[test]
    fn toggle_flips_and_bounds() {
        let mut table = Table::new(4, 2);
        (0..4).for_each(|s| table.place_card(card(s as u16), s).unwrap());
        assert_eq!(table.toggle(0, 0), Ok(Toggle::Placed(card(0))));
        assert_eq!(table.toggle(0, 1), Ok(Toggle::Placed(card(1))));
        assert_eq!(table.toggle(0, 2), Err(TableError::CandidateSetFull));
        assert_eq!(table.toggle(0, 1), Ok(Toggle::Removed(card(1))));
        assert_eq!(table.candidate(0), vec![card(0)]);
        assert!(table.is_consistent());
    }
    #[test]
    fn retire_clears_every_participant() {
        let mut table = Table::new(3, 3);
        table.place_card(card(4), 1).unwrap();
        table.place_marker(0, 1).unwrap();
        table.place_marker(2, 1).unwrap();
        assert_eq!(table.retire(1), Ok(card(4)));
        assert!(table.candidate(0).is_empty());
        assert!(table.candidate(2).is_empty());
        assert_eq!(table.retired(), &[card(4)]);
        assert!(table.is_consistent());
    }
    #[test]
    fn clear_markers_only_touches_owner() {
        let mut table = Table::new(3, 3);
        (0..3).for_each(|s| table.place_card(card(s as u16), s).unwrap());
        table.place_marker(0, 0).unwrap();
        table.place_marker(0, 2).unwrap();
        table.place_marker(1, 2).unwrap();
        assert_eq!(table.clear_markers(0), vec![0, 2]);
        assert_eq!(table.markers(1).collect::<Vec<_>>(), vec![2]);
    }
    #[test]
    fn cards_walk_in_slot_order() {
        let mut table = Table::new(4, 3);
        table.place_card(card(9), 3).unwrap();
        table.place_card(card(5), 1).unwrap();
        assert_eq!(table.cards().collect::<Vec<_>>(), vec![card(5), card(9)]);
        assert_eq!(table.empty_slots().collect::<Vec<_>>(), vec![0, 2]);
    }
}
