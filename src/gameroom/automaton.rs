use super::keypad::Keypad;
use super::strategy::Strategy;
use crate::table::Board;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Wrapper that runs a Strategy in its own async task, feeding presses to
/// a participant's keypad like a human at the keyboard would.
///
/// - waits `delay` between decisions and between presses
/// - decides on a fresh private snapshot each time
/// - holds off while earlier presses are still queued
pub struct Automaton {
    keypad: Keypad,
    board: Board,
    strategy: Box<dyn Strategy>,
    halt: CancellationToken,
    delay: Duration,
}

impl Automaton {
    pub fn new(
        keypad: Keypad,
        board: Board,
        strategy: Box<dyn Strategy>,
        halt: CancellationToken,
        delay: Duration,
    ) -> Self {
        Self {
            keypad,
            board,
            strategy,
            halt,
            delay,
        }
    }
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
    async fn run(mut self) {
        while self.pause().await {
            if self.keypad.pending() > 0 {
                continue;
            }
            let view = self.board.view(self.keypad.seat());
            for slot in self.strategy.choose(&view).await {
                if !self.pause().await || !self.keypad.push(slot).await {
                    return;
                }
            }
        }
    }
    /// False once halted.
    async fn pause(&self) -> bool {
        tokio::select! {
            biased;
            _ = self.halt.cancelled() => false,
            _ = tokio::time::sleep(self.delay) => !self.keypad.is_closed(),
        }
    }
}
