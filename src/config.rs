use crate::Position;
use crate::cards::Shape;
use crate::gameroom::TimerMode;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

/// Policy driving automated participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Skill {
    /// Presses random occupied slots.
    Fish,
    /// Looks for a valid combination and marks it.
    #[default]
    Hunter,
}

/// Immutable run configuration, shared read-only by every task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub table_size: usize,
    pub deck_size: usize,
    pub shape: Shape,
    pub set_size: usize,
    pub timer: TimerMode,
    pub point_freeze: Duration,
    pub penalty_freeze: Duration,
    pub humans: usize,
    pub computers: usize,
    pub skill: Skill,
    pub names: Vec<String>,
    pub hints: bool,
    pub end_pause: Duration,
    pub bot_delay: Duration,
    pub seed: Option<u64>,
    pub shuffle: bool,
}

impl Default for Config {
    fn default() -> Self {
        let shape = Shape::default();
        Self {
            table_size: crate::TABLE_SIZE,
            deck_size: shape.universe(),
            shape,
            set_size: crate::SET_SIZE,
            timer: TimerMode::default(),
            point_freeze: Duration::from_millis(crate::POINT_FREEZE),
            penalty_freeze: Duration::from_millis(crate::PENALTY_FREEZE),
            humans: 2,
            computers: 0,
            skill: Skill::default(),
            names: Vec::new(),
            hints: false,
            end_pause: Duration::from_millis(crate::END_PAUSE),
            bot_delay: Duration::from_millis(crate::BOT_DELAY),
            seed: None,
            shuffle: true,
        }
    }
}

impl Config {
    pub fn participants(&self) -> usize {
        self.humans + self.computers
    }
    /// Humans take the first seats, automated participants the rest.
    pub fn is_human(&self, seat: Position) -> bool {
        seat < self.humans
    }
    pub fn name(&self, seat: Position) -> String {
        self.names
            .get(seat)
            .cloned()
            .unwrap_or_else(|| match self.is_human(seat) {
                true => format!("Player {}", seat),
                false => format!("Bot {}", seat),
            })
    }
    /// Seeded when a seed is configured, otherwise drawn from the thread rng.
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        }
    }
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.participants() == 0 {
            return Err(ConfigError::NoParticipants);
        }
        if self.set_size < 2 {
            return Err(ConfigError::SetTooSmall(self.set_size));
        }
        if self.set_size > self.shape.values() {
            return Err(ConfigError::SetTooLarge {
                set: self.set_size,
                values: self.shape.values(),
            });
        }
        if self.deck_size > self.shape.universe() || self.deck_size > u16::MAX as usize {
            return Err(ConfigError::DeckTooLarge {
                deck: self.deck_size,
                universe: self.shape.universe(),
            });
        }
        if self.table_size < self.set_size {
            return Err(ConfigError::TableTooSmall {
                table: self.table_size,
                set: self.set_size,
            });
        }
        if self.table_size > crate::MAX_TABLE_SIZE {
            return Err(ConfigError::TableTooLarge(self.table_size));
        }
        Ok(())
    }
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A configuration that cannot describe a playable game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NoParticipants,
    SetTooSmall(usize),
    SetTooLarge { set: usize, values: usize },
    DeckTooLarge { deck: usize, universe: usize },
    TableTooSmall { table: usize, set: usize },
    TableTooLarge(usize),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConfigError::NoParticipants => write!(f, "at least one participant is required"),
            ConfigError::SetTooSmall(n) => write!(f, "set size {} is below 2", n),
            ConfigError::SetTooLarge { set, values } => {
                write!(f, "set size {} exceeds the {} values per feature", set, values)
            }
            ConfigError::DeckTooLarge { deck, universe } => {
                write!(f, "deck size {} exceeds the {} distinct cards", deck, universe)
            }
            ConfigError::TableTooSmall { table, set } => {
                write!(f, "table size {} cannot hold a set of {}", table, set)
            }
            ConfigError::TableTooLarge(n) => {
                write!(f, "table size {} exceeds {}", n, crate::MAX_TABLE_SIZE)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Command line surface of the `play` binary.
#[cfg(feature = "cli")]
#[derive(clap::Parser, Debug, Clone)]
#[command(author, version, about = "Real-time multiplayer Set", long_about = None)]
pub struct Args {
    /// Slots on the table
    #[arg(long, default_value_t = crate::TABLE_SIZE)]
    pub table_size: usize,
    /// Cards in the deck (defaults to every distinct card)
    #[arg(long)]
    pub deck_size: Option<usize>,
    /// Features per card
    #[arg(long, default_value_t = crate::FEATURE_COUNT)]
    pub features: usize,
    /// Values per feature
    #[arg(long, default_value_t = crate::FEATURE_SIZE)]
    pub values: usize,
    /// Cards per claim
    #[arg(long, default_value_t = crate::SET_SIZE)]
    pub set_size: usize,
    /// Seconds per round; 0 shows a stopwatch, negative hides the clock
    #[arg(long, default_value_t = crate::TURN_TIMEOUT, allow_hyphen_values = true)]
    pub turn_timeout: i64,
    /// Seconds remaining when the countdown turns to warning mode
    #[arg(long, default_value_t = crate::TURN_WARNING)]
    pub turn_warning: u64,
    /// Freeze after a valid claim, in milliseconds
    #[arg(long, default_value_t = crate::POINT_FREEZE)]
    pub point_freeze: u64,
    /// Freeze after an invalid or stale claim, in milliseconds
    #[arg(long, default_value_t = crate::PENALTY_FREEZE)]
    pub penalty_freeze: u64,
    /// Human participants (seated first)
    #[arg(long, default_value_t = 1)]
    pub humans: usize,
    /// Automated participants
    #[arg(long, default_value_t = 1)]
    pub computers: usize,
    /// Policy for automated participants
    #[arg(long, value_enum, default_value_t = Skill::Hunter)]
    pub skill: Skill,
    /// Comma separated participant names
    #[arg(long, value_delimiter = ',')]
    pub names: Vec<String>,
    /// Log every valid combination on the table after each deal
    #[arg(long)]
    pub hints: bool,
    /// Pause after announcing winners, in milliseconds
    #[arg(long, default_value_t = crate::END_PAUSE)]
    pub end_pause: u64,
    /// Delay between automated key presses, in milliseconds
    #[arg(long, default_value_t = crate::BOT_DELAY)]
    pub bot_delay: u64,
    /// Seed for deterministic shuffles
    #[arg(long)]
    pub seed: Option<u64>,
    /// Keep the deck in index order
    #[arg(long)]
    pub no_shuffle: bool,
    /// Print the final outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(feature = "cli")]
impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        let shape = Shape::new(args.features, args.values);
        Self {
            table_size: args.table_size,
            deck_size: args.deck_size.unwrap_or(shape.universe()),
            shape,
            set_size: args.set_size,
            timer: TimerMode::from_secs(args.turn_timeout, args.turn_warning),
            point_freeze: Duration::from_millis(args.point_freeze),
            penalty_freeze: Duration::from_millis(args.penalty_freeze),
            humans: args.humans,
            computers: args.computers,
            skill: args.skill,
            names: args.names.clone(),
            hints: args.hints,
            end_pause: Duration::from_millis(args.end_pause),
            bot_delay: Duration::from_millis(args.bot_delay),
            seed: args.seed,
            shuffle: !args.no_shuffle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        assert_eq!(config.deck_size, 81);
        assert_eq!(config.validate(), Ok(()));
    }
    #[test]
    fn rejects_oversized_deck() {
        let config = Config {
            deck_size: 82,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::DeckTooLarge { .. })));
    }
    #[test]
    fn rejects_impossible_set_size() {
        let config = Config {
            set_size: 4,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::SetTooLarge { .. })));
    }
    #[test]
    fn rejects_empty_room() {
        let config = Config {
            humans: 0,
            computers: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoParticipants));
    }
    #[test]
    fn rejects_bad_table() {
        let small = Config {
            table_size: 2,
            ..Config::default()
        };
        let large = Config {
            table_size: 65,
            ..Config::default()
        };
        assert!(matches!(small.validate(), Err(ConfigError::TableTooSmall { .. })));
        assert_eq!(large.validate(), Err(ConfigError::TableTooLarge(65)));
    }
    #[test]
    fn seats_and_names() {
        let config = Config {
            humans: 1,
            computers: 2,
            names: vec!["ada".into()],
            ..Config::default()
        };
        assert_eq!(config.participants(), 3);
        assert!(config.is_human(0));
        assert!(!config.is_human(1));
        assert_eq!(config.name(0), "ada");
        assert_eq!(config.name(2), "Bot 2");
    }
    #[test]
    fn json_round_trip() {
        let config = Config::default();
        let json = config.to_json().unwrap();
        assert_eq!(serde_json::from_str::<Config>(&json).unwrap(), config);
    }
}
