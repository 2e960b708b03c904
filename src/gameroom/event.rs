use super::claim::Verdict;
use crate::Position;
use crate::Score;
use crate::Slot;
use crate::cards::Card;
use std::time::Duration;

/// Display notifications emitted by the coordinator and participants.
/// Purely observational: nothing in the game reads them back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Deal { slot: Slot, card: Card },
    Clear { slot: Slot, card: Card },
    Marker { seat: Position, slot: Slot, placed: bool },
    Verdict { seat: Position, verdict: Verdict },
    Score { seat: Position, score: Score },
    Freeze { seat: Position, remaining: Duration },
    Countdown { remaining: Duration, warning: bool },
    Stopwatch { elapsed: Duration },
    Reshuffle { deck: usize },
    Winners(Vec<Position>),
    Dispose,
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::Deal { slot, card } => write!(f, "deal {} -> [{:>2}]", card, slot),
            Event::Clear { slot, card } => write!(f, "clear {} <- [{:>2}]", card, slot),
            Event::Marker { seat, slot, placed: true } => write!(f, "P{} marks [{:>2}]", seat, slot),
            Event::Marker { seat, slot, placed: false } => write!(f, "P{} unmarks [{:>2}]", seat, slot),
            Event::Verdict { seat, verdict } => write!(f, "P{} {}", seat, verdict),
            Event::Score { seat, score } => write!(f, "P{} score {}", seat, score),
            Event::Freeze { seat, remaining } => write!(f, "P{} frozen {}s", seat, remaining.as_secs()),
            Event::Countdown { remaining, warning: false } => write!(f, "{:>4}s", remaining.as_secs()),
            Event::Countdown { remaining, warning: true } => write!(f, "{:>6.1}s", remaining.as_secs_f32()),
            Event::Stopwatch { elapsed } => write!(f, "{:>4}s elapsed", elapsed.as_secs()),
            Event::Reshuffle { deck } => write!(f, "reshuffle, {} in deck", deck),
            Event::Winners(seats) => write!(
                f,
                "winners {}",
                seats.iter().map(|s| format!("P{}", s)).collect::<Vec<_>>().join(" ")
            ),
            Event::Dispose => write!(f, "dispose"),
        }
    }
}
