use crate::Slot;
use crate::table::View;

/// Decision policy for an automated participant.
///
/// Given a private snapshot of the table, returns the slots to press next,
/// in order. The async design lets a policy think for as long as it likes
/// without blocking the table or the coordinator.
#[async_trait::async_trait]
pub trait Strategy: Send + Sync {
    async fn choose(&mut self, view: &View) -> Vec<Slot>;
}
