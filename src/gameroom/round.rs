use super::claim::Reason;
use super::claim::Verdict;
use super::event::Event;
use super::sink::Sink;
use crate::Config;
use crate::Position;
use crate::Score;
use crate::cards::Card;
use crate::cards::Deck;
use crate::cards::Validator;
use crate::table::Board;
use rand::rngs::SmallRng;
use std::sync::Arc;

/// Whether play can continue on the current table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    /// A valid combination is on the table.
    Playable,
    /// None on the table, but one exists among table and deck together.
    Stuck,
    /// No valid combination remains anywhere.
    Exhausted,
}

/// Synchronous game core: deck, scores, and every card mutation.
///
/// Owned by the coordinator task, which makes it the only writer of cards.
/// Each operation takes the table lock once, applies its whole effect, and
/// releases the lock before any display event is emitted.
pub struct Round {
    board: Board,
    deck: Deck,
    validator: Arc<dyn Validator>,
    sink: Arc<dyn Sink>,
    scores: Vec<Score>,
    rng: SmallRng,
    shuffle: bool,
    hints: bool,
}

impl Round {
    pub fn new(
        config: &Config,
        board: Board,
        deck: Deck,
        validator: Arc<dyn Validator>,
        sink: Arc<dyn Sink>,
    ) -> Self {
        Self {
            board,
            deck,
            validator,
            sink,
            scores: vec![0; config.participants()],
            rng: config.rng(),
            shuffle: config.shuffle,
            hints: config.hints,
        }
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn deck(&self) -> &Deck {
        &self.deck
    }
    pub fn scores(&self) -> &[Score] {
        &self.scores
    }
}

/// Dealing.
impl Round {
    /// Shuffles the deck and fills the table.
    pub fn open(&mut self) -> usize {
        if self.shuffle {
            self.deck.shuffle(&mut self.rng);
        }
        self.deal()
    }
    /// Fills empty slots in slot order from the top of the deck.
    pub fn deal(&mut self) -> usize {
        let events = {
            let mut table = self.board.lock();
            let slots = table.empty_slots().collect::<Vec<_>>();
            let mut events = Vec::new();
            for slot in slots {
                let Some(card) = self.deck.draw() else { break };
                match table.place_card(card, slot) {
                    Ok(()) => events.push(Event::Deal { slot, card }),
                    Err(e) => {
                        log::warn!("[round] dealing {} failed: {}", card, e);
                        self.deck.push(card);
                    }
                }
            }
            events
        };
        let dealt = events.len();
        self.publish(events);
        self.hint();
        dealt
    }
    /// Returns every table card to the bottom of the deck.
    pub fn collect(&mut self) -> usize {
        let events = {
            let mut table = self.board.lock();
            (0..table.size())
                .filter_map(|slot| table.remove_card(slot).ok().map(|card| (slot, card)))
                .inspect(|(_, card)| self.deck.push(*card))
                .map(|(slot, card)| Event::Clear { slot, card })
                .collect::<Vec<_>>()
        };
        let collected = events.len();
        self.publish(events);
        collected
    }
    /// Collects, shuffles, and redeals.
    pub fn reshuffle(&mut self) {
        self.collect();
        if self.shuffle {
            self.deck.shuffle(&mut self.rng);
        }
        self.deal();
        log::debug!("[round] reshuffled, {} left in deck", self.deck.len());
        self.sink.emit(Event::Reshuffle {
            deck: self.deck.len(),
        });
    }
}

/// Arbitration.
impl Round {
    /// Decides a claim against the live table.
    ///
    /// The claim is stale unless every card is still placed and still
    /// carries the claimant's marker. A valid claim retires its cards and
    /// scores in the same critical section that checked them; any other
    /// outcome clears the claimant's markers.
    pub fn arbitrate(&mut self, seat: Position, cards: &[Card]) -> Verdict {
        let mut events = Vec::new();
        let verdict = {
            let mut table = self.board.lock();
            let slots = cards
                .iter()
                .map(|card| {
                    table.slot(*card).filter(|slot| {
                        table
                            .spot(*slot)
                            .is_some_and(|spot| spot.is_marked_by(seat))
                    })
                })
                .collect::<Option<Vec<_>>>();
            let verdict = match slots {
                None => Verdict::Penalty(Reason::StaleClaim),
                Some(_) if !self.validator.is_set(cards) => Verdict::Penalty(Reason::InvalidSet),
                Some(slots) => {
                    slots
                        .into_iter()
                        .filter_map(|slot| table.retire(slot).ok().map(|card| (slot, card)))
                        .for_each(|(slot, card)| events.push(Event::Clear { slot, card }));
                    match self.scores.get_mut(seat) {
                        Some(score) => {
                            *score += 1;
                            Verdict::Point(*score)
                        }
                        None => Verdict::Point(0),
                    }
                }
            };
            if !verdict.is_point() {
                table
                    .clear_markers(seat)
                    .into_iter()
                    .map(|slot| Event::Marker {
                        seat,
                        slot,
                        placed: false,
                    })
                    .for_each(|e| events.push(e));
            }
            verdict
        };
        events.push(Event::Verdict { seat, verdict });
        if let Verdict::Point(score) = verdict {
            events.push(Event::Score { seat, score });
        }
        self.publish(events);
        if verdict.is_point() {
            self.deal();
        }
        verdict
    }
    /// Where play stands, judged on one consistent snapshot of the table.
    pub fn assess(&self) -> Assessment {
        let table = self.board.cards();
        if self.validator.any_set(&table) {
            return Assessment::Playable;
        }
        let pool = table
            .into_iter()
            .chain(self.deck.cards())
            .collect::<Vec<_>>();
        if self.validator.any_set(&pool) {
            Assessment::Stuck
        } else {
            Assessment::Exhausted
        }
    }
    /// Every participant tied at the maximum score, in seat order.
    pub fn winners(&self) -> Vec<Position> {
        let best = self.scores.iter().copied().max().unwrap_or_default();
        self.scores
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == best)
            .map(|(i, _)| i)
            .collect()
    }
}

impl Round {
    fn publish(&self, events: Vec<Event>) {
        events.into_iter().for_each(|e| self.sink.emit(e));
    }
    fn hint(&self) {
        if self.hints {
            self.validator
                .find_sets(&self.board.cards(), usize::MAX)
                .iter()
                .map(|set| set.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" "))
                .for_each(|set| log::info!("[hint] {}", set));
        }
    }
}
