use super::channel::Channel;
use super::claim::Claim;
use super::countdown::Countdown;
use super::event::Event;
use super::game::Outcome;
use super::phase::Phase;
use super::round::Assessment;
use super::round::Round;
use super::sink::Sink;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Central authority for a live table.
///
/// Owns the deck, the scores and the round clock, and is the only task
/// that places or removes cards. Claims arrive on a single channel and are
/// decided one at a time in arrival order, each answered on the claimant's
/// private reply channel.
///
/// The main loop waits on, in priority order:
/// - the external stop signal
/// - the next display tick, which also fires the forced reshuffle
///   and retries a table left stuck by an earlier reshuffle
/// - the next claim
///
/// After every table mutation the coordinator reassesses the table, and
/// either reshuffles a stuck table or ends a game with no combinations left.
pub struct Coordinator {
    round: Round,
    phase: Phase,
    countdown: Countdown,
    claims: Channel<Claim>,
    participants: Vec<JoinHandle<()>>,
    sink: Arc<dyn Sink>,
    stop: CancellationToken,
    halt: CancellationToken,
    end_pause: Duration,
}

impl Coordinator {
    pub fn new(
        round: Round,
        countdown: Countdown,
        claims: Channel<Claim>,
        sink: Arc<dyn Sink>,
        stop: CancellationToken,
        halt: CancellationToken,
        end_pause: Duration,
    ) -> Self {
        Self {
            round,
            phase: Phase::Dealing,
            countdown,
            claims,
            participants: Vec::new(),
            sink,
            stop,
            halt,
            end_pause,
        }
    }
    /// Hands over a participant task to be joined at termination.
    pub fn adopt(&mut self, participant: JoinHandle<()>) {
        self.participants.push(participant);
    }
    pub fn spawn(self) -> JoinHandle<Outcome> {
        tokio::spawn(self.run())
    }
    pub async fn run(mut self) -> Outcome {
        log::info!(
            "[coordinator] starting with {} participants, {} cards in deck",
            self.participants.len(),
            self.round.deck().len()
        );
        self.round.open();
        self.countdown.reset();
        self.display();
        self.shift(Phase::Running);
        self.settle();
        while self.phase == Phase::Running {
            let tick = self.countdown.next_tick();
            tokio::select! {
                biased;
                _ = self.stop.cancelled() => break,
                _ = tokio::time::sleep_until(tick) => self.tick(),
                claim = self.claims.rx().recv() => match claim {
                    Some(claim) => self.receive(claim),
                    None => break,
                },
            }
        }
        self.terminate().await
    }
}

impl Coordinator {
    /// Decides a claim, then catches up on a clock that ran out meanwhile.
    fn receive(&mut self, claim: Claim) {
        self.arbitrate(claim);
        if self.phase == Phase::Running && self.countdown.expired() {
            self.tick();
        }
    }
    fn arbitrate(&mut self, claim: Claim) {
        self.shift(Phase::ArbitratingClaim);
        let seat = claim.seat();
        let verdict = self.round.arbitrate(seat, claim.cards());
        log::debug!("[coordinator] P{} {}", seat, verdict);
        if !claim.answer(verdict) {
            log::warn!("[coordinator] P{} left before its verdict", seat);
        }
        self.shift(Phase::Running);
        if verdict.is_point() {
            self.settle();
        }
    }
    fn tick(&mut self) {
        self.display();
        if self.countdown.expired() {
            log::debug!("[coordinator] round clock expired");
            self.reshuffle();
        }
        self.settle();
    }
    /// Reacts to the current table: at most one reshuffle, or the end.
    fn settle(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        match self.round.assess() {
            Assessment::Playable => {}
            Assessment::Stuck => self.reshuffle(),
            Assessment::Exhausted => {
                log::info!("[coordinator] no combinations remain");
                self.shift(Phase::Ending);
            }
        }
    }
    fn reshuffle(&mut self) {
        self.shift(Phase::Reshuffling);
        self.round.reshuffle();
        self.countdown.reset();
        self.display();
        self.shift(Phase::Running);
    }
    fn display(&self) {
        if let Some(event) = self.countdown.reading() {
            self.sink.emit(event);
        }
    }
    fn shift(&mut self, next: Phase) {
        if self.phase.allows(next) {
            log::trace!("[coordinator] {} -> {}", self.phase, next);
            self.phase = next;
        } else {
            log::warn!("[coordinator] refused {} -> {}", self.phase, next);
        }
    }
}

impl Coordinator {
    /// Shuts the table down in order: no more claims, stop every
    /// participant, wait for all of them, then announce the winners.
    async fn terminate(mut self) -> Outcome {
        let natural = self.phase == Phase::Ending;
        self.claims
            .close()
            .into_iter()
            .for_each(|claim| log::debug!("[coordinator] dropping claim from P{}", claim.seat()));
        self.halt.cancel();
        futures::future::join_all(self.participants.drain(..))
            .await
            .into_iter()
            .enumerate()
            .filter_map(|(i, result)| result.err().map(|e| (i, e)))
            .for_each(|(i, e)| log::warn!("[coordinator] participant P{} failed: {}", i, e));
        let outcome = Outcome::new(self.round.scores().to_vec(), self.round.winners());
        log::info!("[coordinator] {}", outcome);
        self.sink.emit(Event::Winners(outcome.winners().to_vec()));
        if natural {
            tokio::select! {
                biased;
                _ = self.stop.cancelled() => {}
                _ = tokio::time::sleep(self.end_pause) => {}
            }
        }
        self.shift(Phase::Terminated);
        self.sink.emit(Event::Dispose);
        outcome
    }
}
