use super::claim::Claim;
use super::claim::Verdict;
use super::event::Event;
use super::sink::Sink;
use crate::Config;
use crate::FREEZE_TICK;
use crate::Position;
use crate::Score;
use crate::Slot;
use crate::cards::Card;
use crate::table::Board;
use crate::table::TableError;
use crate::table::Toggle;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::Receiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Which verdict a freeze is serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freeze {
    Point,
    Penalty,
}

/// Where a participant is in its press → claim → freeze cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Toggling,
    CandidateBuilding,
    AwaitingArbitration,
    Frozen(Freeze),
}

/// One participant's actor, running in its own task.
///
/// Consumes slot presses from its bounded inbox and toggles markers on the
/// shared table. When its candidate set fills it submits a claim, blocks
/// until the coordinator answers, then sits out the freeze the verdict
/// carries. Presses that arrive while it is busy are discarded.
///
/// Human and automated participants differ only in what feeds the inbox;
/// an automated participant also owns the task generating its presses.
pub struct Participant {
    seat: Position,
    board: Board,
    inbox: Receiver<Slot>,
    claims: UnboundedSender<Claim>,
    sink: Arc<dyn Sink>,
    halt: CancellationToken,
    candidate: Vec<Card>,
    score: Score,
    state: State,
    limit: usize,
    point_freeze: Duration,
    penalty_freeze: Duration,
    automaton: Option<JoinHandle<()>>,
}

impl Participant {
    pub fn new(
        seat: Position,
        config: &Config,
        board: Board,
        inbox: Receiver<Slot>,
        claims: UnboundedSender<Claim>,
        sink: Arc<dyn Sink>,
        halt: CancellationToken,
    ) -> Self {
        Self {
            seat,
            board,
            inbox,
            claims,
            sink,
            halt,
            candidate: Vec::with_capacity(config.set_size),
            score: 0,
            state: State::Idle,
            limit: config.set_size,
            point_freeze: config.point_freeze,
            penalty_freeze: config.penalty_freeze,
            automaton: None,
        }
    }
    /// Attaches the task feeding this participant's inbox.
    pub fn with_automaton(mut self, automaton: JoinHandle<()>) -> Self {
        self.automaton = Some(automaton);
        self
    }
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
    async fn run(mut self) {
        log::debug!("[participant P{}] joined", self.seat);
        loop {
            let slot = tokio::select! {
                biased;
                _ = self.halt.cancelled() => break,
                slot = self.inbox.recv() => match slot {
                    Some(slot) => slot,
                    None => break,
                },
            };
            if !self.press(slot).await {
                break;
            }
        }
        self.inbox.close();
        if let Some(automaton) = self.automaton.take() {
            if let Err(e) = automaton.await {
                log::warn!("[participant P{}] automaton failed: {}", self.seat, e);
            }
        }
        log::debug!(
            "[participant P{}] left {:?} with {} points",
            self.seat,
            self.state,
            self.score
        );
    }
}

impl Participant {
    /// Handles one press. False once the participant should stop.
    async fn press(&mut self, slot: Slot) -> bool {
        self.state = State::Toggling;
        match self.board.toggle(self.seat, slot) {
            Ok((toggle, candidate)) => {
                self.candidate = candidate;
                self.sink.emit(Event::Marker {
                    seat: self.seat,
                    slot,
                    placed: matches!(toggle, Toggle::Placed(_)),
                });
            }
            Err(TableError::CandidateSetFull) => {
                log::trace!("[participant P{}] candidate full, ignoring {}", self.seat, slot)
            }
            Err(e) => log::trace!("[participant P{}] ignoring press: {}", self.seat, e),
        }
        if self.candidate.len() < self.limit {
            self.state = match self.candidate.is_empty() {
                true => State::Idle,
                false => State::CandidateBuilding,
            };
            return true;
        }
        match self.submit().await {
            Some(verdict) => self.settle(verdict).await,
            None => false,
        }
    }
    /// Sends the candidate for arbitration and blocks for the verdict.
    async fn submit(&mut self) -> Option<Verdict> {
        self.state = State::AwaitingArbitration;
        let (claim, verdict) = Claim::new(self.seat, self.candidate.clone());
        if self.claims.send(claim).is_err() {
            log::debug!("[participant P{}] coordinator closed its claims", self.seat);
            return None;
        }
        tokio::select! {
            biased;
            _ = self.halt.cancelled() => None,
            verdict = verdict => verdict.ok(),
        }
    }
    /// Applies a verdict. False if shutdown arrived during the freeze.
    async fn settle(&mut self, verdict: Verdict) -> bool {
        self.candidate.clear();
        self.discard();
        let (freeze, duration) = match verdict {
            Verdict::Point(score) => {
                self.score = score;
                (Freeze::Point, self.point_freeze)
            }
            Verdict::Penalty(_) => (Freeze::Penalty, self.penalty_freeze),
        };
        let thawed = self.freeze(freeze, duration).await;
        self.discard();
        self.state = State::Idle;
        thawed
    }
    /// Sleeps off a freeze, reporting the remaining time every tick.
    async fn freeze(&mut self, freeze: Freeze, duration: Duration) -> bool {
        self.state = State::Frozen(freeze);
        let deadline = Instant::now() + duration;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            self.sink.emit(Event::Freeze {
                seat: self.seat,
                remaining,
            });
            if remaining.is_zero() {
                return true;
            }
            let wake = Instant::now() + remaining.min(FREEZE_TICK);
            tokio::select! {
                biased;
                _ = self.halt.cancelled() => return false,
                _ = tokio::time::sleep_until(wake) => {}
            }
        }
    }
    /// Drops presses that queued up while the participant was busy.
    fn discard(&mut self) {
        let dropped = std::iter::from_fn(|| self.inbox.try_recv().ok()).count();
        if dropped > 0 {
            log::trace!("[participant P{}] discarded {} presses", self.seat, dropped);
        }
    }
}
