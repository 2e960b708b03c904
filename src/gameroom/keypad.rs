use crate::Position;
use crate::Slot;
use tokio::sync::mpsc;

/// Input port of one participant: slot presses into its bounded inbox.
#[derive(Debug, Clone)]
pub struct Keypad {
    seat: Position,
    tx: mpsc::Sender<Slot>,
}

impl Keypad {
    /// A keypad and the inbox it feeds, holding at most `capacity` presses.
    pub fn channel(seat: Position, capacity: usize) -> (Self, mpsc::Receiver<Slot>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { seat, tx }, rx)
    }
    pub fn seat(&self) -> Position {
        self.seat
    }
    /// Never blocks: a press into a full or closed inbox is dropped.
    pub fn press(&self, slot: Slot) -> bool {
        self.tx
            .try_send(slot)
            .inspect_err(|e| log::trace!("[keypad P{}] dropped press on {}: {}", self.seat, slot, e))
            .is_ok()
    }
    /// Waits for room in the inbox. False once the participant is gone.
    pub async fn push(&self, slot: Slot) -> bool {
        self.tx.send(slot).await.is_ok()
    }
    /// Presses queued but not yet taken by the participant.
    pub fn pending(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
