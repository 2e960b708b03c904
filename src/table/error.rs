use crate::Slot;
use crate::cards::Card;

/// Rejections from table operations.
///
/// All of these are produced by races between actors (a card retired
/// between a key press and its processing, a stale inbox entry) and are
/// never fatal: callers retry or ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    SlotOccupied(Slot),
    SlotEmpty(Slot),
    MarkerAlreadyPresent(Slot),
    CandidateSetFull,
    CardInPlay(Card),
    OutOfRange(Slot),
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SlotOccupied(s) => write!(f, "slot {} is occupied", s),
            Self::SlotEmpty(s) => write!(f, "slot {} is empty", s),
            Self::MarkerAlreadyPresent(s) => write!(f, "marker already present on slot {}", s),
            Self::CandidateSetFull => write!(f, "candidate set is full"),
            Self::CardInPlay(c) => write!(f, "card {} is already on the table", c),
            Self::OutOfRange(s) => write!(f, "slot {} is out of range", s),
        }
    }
}

impl std::error::Error for TableError {}
