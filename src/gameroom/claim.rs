use crate::Position;
use crate::Score;
use crate::cards::Card;
use tokio::sync::oneshot;

/// Why a claim earned a penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    /// The cards are all present but do not form a valid combination.
    InvalidSet,
    /// Some card left the table, or lost the claimant's marker, before
    /// arbitration reached the claim.
    StaleClaim,
}

/// The coordinator's answer to a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Valid claim, carrying the claimant's new total.
    Point(Score),
    Penalty(Reason),
}

impl Verdict {
    pub fn is_point(&self) -> bool {
        matches!(self, Verdict::Point(_))
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Verdict::Point(score) => write!(f, "point ({})", score),
            Verdict::Penalty(Reason::InvalidSet) => write!(f, "penalty (not a set)"),
            Verdict::Penalty(Reason::StaleClaim) => write!(f, "penalty (stale claim)"),
        }
    }
}

/// A participant's request for arbitration of its candidate set.
///
/// The claimant blocks on the paired receiver until the coordinator
/// answers. Dropping an unanswered claim wakes the claimant with a
/// closed channel, which it reads as shutdown.
#[derive(Debug)]
pub struct Claim {
    seat: Position,
    cards: Vec<Card>,
    reply: oneshot::Sender<Verdict>,
}

impl Claim {
    pub fn new(seat: Position, cards: Vec<Card>) -> (Self, oneshot::Receiver<Verdict>) {
        let (reply, verdict) = oneshot::channel();
        (Self { seat, cards, reply }, verdict)
    }
    pub fn seat(&self) -> Position {
        self.seat
    }
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
    /// Delivers the verdict. False if the claimant is no longer listening.
    pub fn answer(self, verdict: Verdict) -> bool {
        self.reply.send(verdict).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answer_reaches_claimant() {
        let (claim, verdict) = Claim::new(2, vec![Card::from(1u16)]);
        assert_eq!(claim.seat(), 2);
        assert!(claim.answer(Verdict::Point(1)));
        assert_eq!(verdict.await, Ok(Verdict::Point(1)));
    }
    #[tokio::test]
    async fn dropped_claim_closes_reply() {
        let (claim, verdict) = Claim::new(0, vec![]);
        drop(claim);
        assert!(verdict.await.is_err());
    }
    #[test]
    fn answer_to_departed_claimant() {
        let (claim, verdict) = Claim::new(0, vec![]);
        drop(verdict);
        assert!(!claim.answer(Verdict::Penalty(Reason::InvalidSet)));
    }
}
