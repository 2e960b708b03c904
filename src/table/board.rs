use super::error::TableError;
use super::table::Table;
use super::table::Toggle;
use super::view::View;
use crate::Position;
use crate::Slot;
use crate::cards::Card;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

/// The guarded boundary around the shared [`Table`].
///
/// Every read and write goes through one mutex, held only for the bounded
/// critical section of a single operation and never across an `.await`.
/// Participants get the narrow marker API below; card mutations require
/// [`Board::lock`], which is reserved to the coordinator.
#[derive(Debug, Clone)]
pub struct Board(Arc<Mutex<Table>>);

impl Board {
    pub fn new(table: Table) -> Self {
        Self(Arc::new(Mutex::new(table)))
    }
    /// Exclusive access for the coordinator's multi-step mutations.
    /// A poisoned lock is recovered since every mutation leaves the arena consistent.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Table> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Participant-facing operations.
impl Board {
    /// Toggles a marker and reports the participant's resulting candidate
    /// set, both taken under the same lock.
    pub fn toggle(&self, pos: Position, slot: Slot) -> Result<(Toggle, Vec<Card>), TableError> {
        let mut table = self.lock();
        let toggle = table.toggle(pos, slot)?;
        Ok((toggle, table.candidate(pos)))
    }
    pub fn candidate(&self, pos: Position) -> Vec<Card> {
        self.lock().candidate(pos)
    }
    /// Private point-in-time snapshot for the given participant.
    pub fn view(&self, pos: Position) -> View {
        let table = self.lock();
        View::new(
            (0..table.size())
                .filter_map(|s| table.card(s).map(|c| (s, c)))
                .collect(),
            table.markers(pos).collect(),
        )
    }
}

/// Read-only observation.
impl Board {
    /// Point-in-time snapshot of the placed cards.
    pub fn cards(&self) -> Vec<Card> {
        self.lock().cards().collect()
    }
    pub fn card(&self, slot: Slot) -> Option<Card> {
        self.lock().card(slot)
    }
    pub fn count(&self) -> usize {
        self.lock().count()
    }
    pub fn size(&self) -> usize {
        self.lock().size()
    }
    pub fn retired(&self) -> Vec<Card> {
        self.lock().retired().to_vec()
    }
    pub fn is_consistent(&self) -> bool {
        self.lock().is_consistent()
    }
}
