use super::automaton::Automaton;
use super::channel::Channel;
use super::coordinator::Coordinator;
use super::countdown::Countdown;
use super::keypad::Keypad;
use super::participant::Participant;
use super::players::Fish;
use super::players::Hunter;
use super::round::Round;
use super::sink::LogSink;
use super::sink::Sink;
use super::strategy::Strategy;
use crate::Config;
use crate::Position;
use crate::Score;
use crate::Skill;
use crate::cards::Deck;
use crate::cards::Rules;
use crate::cards::Validator;
use crate::table::Board;
use crate::table::Table;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Final scores and every participant tied at the top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    scores: Vec<Score>,
    winners: Vec<Position>,
}

impl Outcome {
    pub fn new(scores: Vec<Score>, winners: Vec<Position>) -> Self {
        Self { scores, winners }
    }
    pub fn scores(&self) -> &[Score] {
        &self.scores
    }
    pub fn winners(&self) -> &[Position] {
        &self.winners
    }
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "scores {:?}, winners {:?}", self.scores, self.winners)
    }
}

/// Assembles a table, its participants and its coordinator.
pub struct Game {
    config: Config,
    deck: Option<Deck>,
    validator: Option<Arc<dyn Validator>>,
    sink: Arc<dyn Sink>,
}

impl Game {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            deck: None,
            validator: None,
            sink: Arc::new(LogSink),
        }
    }
    /// Replaces the default deck of cards `0..deck_size`.
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }
    /// Replaces the default all-same-or-all-different rule.
    pub fn with_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = Some(validator);
        self
    }
    pub fn with_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = sink;
        self
    }
    /// Validates the configuration and starts every task.
    pub fn spawn(self) -> anyhow::Result<Session> {
        self.config.validate()?;
        let Self {
            config,
            deck,
            validator,
            sink,
        } = self;
        let deck = deck.unwrap_or_else(|| Deck::new(config.deck_size));
        let validator = validator
            .unwrap_or_else(|| Arc::new(Rules::new(config.shape, config.set_size)) as Arc<dyn Validator>);
        let board = Board::new(Table::new(config.table_size, config.set_size));
        let claims = Channel::default();
        let stop = CancellationToken::new();
        let halt = stop.child_token();
        let round = Round::new(&config, board.clone(), deck, validator.clone(), sink.clone());
        let mut keypads = Vec::with_capacity(config.participants());
        let mut participants = Vec::with_capacity(config.participants());
        for seat in 0..config.participants() {
            let (keypad, inbox) = Keypad::channel(seat, config.set_size);
            let participant = Participant::new(
                seat,
                &config,
                board.clone(),
                inbox,
                claims.tx().clone(),
                sink.clone(),
                halt.clone(),
            );
            let participant = match config.is_human(seat) {
                true => participant,
                false => participant.with_automaton(
                    Automaton::new(
                        keypad.clone(),
                        board.clone(),
                        Self::strategy(&config, seat, validator.clone()),
                        halt.clone(),
                        config.bot_delay,
                    )
                    .spawn(),
                ),
            };
            log::info!(
                "[game] seating {} as P{} ({})",
                config.name(seat),
                seat,
                if config.is_human(seat) { "human" } else { "computer" }
            );
            participants.push(participant.spawn());
            keypads.push(keypad);
        }
        let mut coordinator = Coordinator::new(
            round,
            Countdown::new(config.timer),
            claims,
            sink,
            stop.clone(),
            halt,
            config.end_pause,
        );
        participants
            .into_iter()
            .for_each(|p| coordinator.adopt(p));
        Ok(Session {
            keypads,
            board,
            stop,
            handle: coordinator.spawn(),
        })
    }
    fn strategy(config: &Config, seat: Position, validator: Arc<dyn Validator>) -> Box<dyn Strategy> {
        match config.skill {
            Skill::Fish => Box::new(Fish::new(match config.seed {
                Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(seat as u64)),
                None => SmallRng::from_rng(&mut rand::rng()),
            })),
            Skill::Hunter => Box::new(Hunter::new(validator)),
        }
    }
}

/// Handle to a running game.
pub struct Session {
    keypads: Vec<Keypad>,
    board: Board,
    stop: CancellationToken,
    handle: JoinHandle<Outcome>,
}

impl Session {
    pub fn keypad(&self, seat: Position) -> Option<&Keypad> {
        self.keypads.get(seat)
    }
    pub fn keypads(&self) -> &[Keypad] {
        &self.keypads
    }
    /// Read-only window on the shared table.
    pub fn board(&self) -> &Board {
        &self.board
    }
    /// Requests an early end. Idempotent.
    pub fn stop(&self) {
        self.stop.cancel();
    }
    /// A token that stops this game when cancelled, for signal handlers.
    pub fn stopper(&self) -> CancellationToken {
        self.stop.clone()
    }
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
    /// Waits for the coordinator to shut everything down.
    pub async fn join(self) -> anyhow::Result<Outcome> {
        Ok(self.handle.await?)
    }
}
