use super::event::Event;
use crate::TICK;
use crate::TURN_TIMEOUT;
use crate::TURN_WARNING;
use crate::WARNING_TICK;
use std::time::Duration;
use tokio::time::Instant;

/// How the round clock is shown and whether it forces reshuffles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TimerMode {
    /// Counts down to a forced reshuffle, switching to fine-grained
    /// updates once `warning` remains.
    Countdown { duration: Duration, warning: Duration },
    /// Counts up from the last reset. Never expires.
    Stopwatch,
    /// No display and no expiry.
    Hidden,
}

impl TimerMode {
    /// Positive seconds count down, zero counts up, negative hides the clock.
    pub fn from_secs(timeout: i64, warning: u64) -> Self {
        match timeout {
            t if t > 0 => TimerMode::Countdown {
                duration: Duration::from_secs(t as u64),
                warning: Duration::from_secs(warning),
            },
            0 => TimerMode::Stopwatch,
            _ => TimerMode::Hidden,
        }
    }
}

impl Default for TimerMode {
    fn default() -> Self {
        Self::from_secs(TURN_TIMEOUT, TURN_WARNING)
    }
}

/// Round clock owned by the coordinator.
#[derive(Debug)]
pub struct Countdown {
    mode: TimerMode,
    origin: Instant,
}

impl Countdown {
    pub fn new(mode: TimerMode) -> Self {
        Self {
            mode,
            origin: Instant::now(),
        }
    }
    pub fn mode(&self) -> TimerMode {
        self.mode
    }
    pub fn reset(&mut self) {
        self.origin = Instant::now();
    }
    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
    pub fn deadline(&self) -> Option<Instant> {
        match self.mode {
            TimerMode::Countdown { duration, .. } => Some(self.origin + duration),
            _ => None,
        }
    }
    pub fn expired(&self) -> bool {
        self.deadline().map(|d| Instant::now() >= d).unwrap_or(false)
    }
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline()
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
    pub fn warning(&self) -> bool {
        match (self.mode, self.remaining()) {
            (TimerMode::Countdown { warning, .. }, Some(remaining)) => remaining <= warning,
            _ => false,
        }
    }
    /// When the coordinator should next refresh the display, never past
    /// the deadline.
    pub fn next_tick(&self) -> Instant {
        let step = if self.warning() { WARNING_TICK } else { TICK };
        let next = Instant::now() + step;
        self.deadline().map(|d| d.min(next)).unwrap_or(next)
    }
    /// The display update for this moment, if the clock is visible.
    pub fn reading(&self) -> Option<Event> {
        match self.mode {
            TimerMode::Countdown { .. } => self.remaining().map(|remaining| Event::Countdown {
                remaining,
                warning: self.warning(),
            }),
            TimerMode::Stopwatch => Some(Event::Stopwatch {
                elapsed: self.elapsed(),
            }),
            TimerMode::Hidden => None,
        }
    }
}
