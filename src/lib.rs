//! Real-time multiplayer Set.
//!
//! A shared table of face-up cards, any number of concurrent participants
//! (human or automated) toggling markers on table slots, and a single
//! coordinator that arbitrates claims, runs the countdown, refills the
//! table and declares winners.
//!
//! ## Modules
//!
//! - [`cards`] — cards, decks, and the set-validity capability
//! - [`table`] — the slot arena and its guarded boundary
//! - [`gameroom`] — coordinator, participant actors, timers and display events
//! - [`config`] — immutable run configuration
pub mod cards;
pub mod config;
pub mod gameroom;
pub mod table;

pub use config::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Table position index in `0..table_size`.
pub type Slot = usize;
/// Participant index in `0..participants`.
pub type Position = usize;
/// Points awarded for valid claims.
pub type Score = u32;

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Number of features every card carries.
pub const FEATURE_COUNT: usize = 4;
/// Number of distinct values a single feature can take.
pub const FEATURE_SIZE: usize = 3;
/// Cards on a full table.
pub const TABLE_SIZE: usize = 12;
/// Cards in a claim.
pub const SET_SIZE: usize = 3;
/// Slots addressable by a table (marker sets are bounded by this).
pub const MAX_TABLE_SIZE: usize = 64;

// ============================================================================
// TIMING PARAMETERS
// ============================================================================
/// Round duration before a forced reshuffle (seconds).
pub const TURN_TIMEOUT: i64 = 60;
/// Remaining time at which the countdown enters warning mode (seconds).
pub const TURN_WARNING: u64 = 5;
/// Freeze after a valid claim (milliseconds).
pub const POINT_FREEZE: u64 = 1000;
/// Freeze after an invalid or stale claim (milliseconds).
pub const PENALTY_FREEZE: u64 = 3000;
/// Delay between automated key presses (milliseconds).
pub const BOT_DELAY: u64 = 250;
/// Pause after winners are announced (milliseconds).
pub const END_PAUSE: u64 = 2000;
/// Coordinator tick while the countdown is calm.
pub const TICK: std::time::Duration = std::time::Duration::from_secs(1);
/// Coordinator tick once the countdown is in warning mode.
pub const WARNING_TICK: std::time::Duration = std::time::Duration::from_millis(100);
/// Interval between freeze countdown updates.
pub const FREEZE_TICK: std::time::Duration = std::time::Duration::from_secs(1);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}
