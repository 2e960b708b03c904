//! Live table orchestration.
//!
//! A single [`Coordinator`] task owns the deck, the scores and the round
//! clock. One [`Participant`] task per player toggles markers on the shared
//! table and submits claims; automated players are driven by an
//! [`Automaton`] running a [`Strategy`]. Everything observable leaves
//! through a [`Sink`] as [`Event`]s.
mod automaton;
mod channel;
mod claim;
mod coordinator;
mod countdown;
mod event;
mod game;
mod keypad;
mod participant;
mod phase;
mod players;
mod round;
mod sink;
mod strategy;

#[cfg(test)]
mod tests;

pub use automaton::*;
pub use channel::*;
pub use claim::*;
pub use coordinator::*;
pub use countdown::*;
pub use event::*;
pub use game::*;
pub use keypad::*;
pub use participant::*;
pub use phase::*;
pub use players::*;
pub use round::*;
pub use sink::*;
pub use strategy::*;
