//! Terminal Set table.
//!
//! Type `<player> <slot>` and Enter to toggle a marker, `q` to end the game
//! early. Ctrl+C also ends the game gracefully.
//!
//! Options: --humans, --computers, --skill, --turn-timeout, --seed, --json

use clap::Parser;
use colored::Colorize;
use setgame::gameroom::*;
use setgame::*;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log()?;
    let args = Args::parse();
    let config = Config::from(&args);
    log::info!("configuration {}", config.to_json()?);
    let session = Game::new(config.clone())
        .with_sink(Arc::new(Terminal(config)))
        .spawn()?;
    interrupt(session.stopper());
    keyboard(session.keypads().to_vec(), session.stopper());
    let outcome = session.join().await?;
    match args.json {
        true => println!("{}", outcome.to_json()?),
        false => println!("{}", outcome.to_string().bright_green()),
    }
    Ok(())
}

/// Ctrl+C ends the game through the same path as a natural stop.
fn interrupt(stop: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, ending the game");
            stop.cancel();
        }
    });
}

/// Reads `<player> <slot>` lines from stdin on a plain thread, since
/// presses never block.
fn keyboard(keypads: Vec<Keypad>, stop: CancellationToken) {
    std::thread::spawn(move || {
        let ref mut buffer = String::new();
        while !stop.is_cancelled() {
            buffer.clear();
            match std::io::stdin().read_line(buffer) {
                Ok(0) | Err(_) => break,
                Ok(_) if buffer.trim().eq_ignore_ascii_case("q") => {
                    log::warn!("graceful interrupt requested");
                    stop.cancel();
                }
                Ok(_) => match parse(buffer) {
                    Some((seat, slot)) => match keypads.get(seat) {
                        Some(keypad) => {
                            keypad.press(slot);
                        }
                        None => log::warn!("no player P{}", seat),
                    },
                    None => log::warn!("expected `<player> <slot>`, got {:?}", buffer.trim()),
                },
            }
        }
    });
}

fn parse(line: &str) -> Option<(Position, Slot)> {
    let mut words = line.split_whitespace();
    let seat = words.next()?.parse().ok()?;
    let slot = words.next()?.parse().ok()?;
    Some((seat, slot))
}

/// Colored terminal rendering of display events.
struct Terminal(Config);

impl Sink for Terminal {
    fn emit(&self, event: Event) {
        let line = match &event {
            Event::Deal { .. } | Event::Clear { .. } => event.to_string().dimmed(),
            Event::Marker { seat, .. } => format!("{} {}", self.0.name(*seat), event).cyan(),
            Event::Verdict { verdict, .. } if verdict.is_point() => event.to_string().green(),
            Event::Verdict { .. } => event.to_string().red(),
            Event::Score { .. } => event.to_string().bright_green(),
            Event::Countdown { warning: true, .. } => event.to_string().red(),
            Event::Freeze { remaining, .. } if !remaining.is_zero() => event.to_string().yellow(),
            Event::Freeze { .. } => return,
            Event::Reshuffle { .. } => event.to_string().magenta(),
            Event::Winners(_) => event.to_string().bold(),
            _ => event.to_string().normal(),
        };
        println!("{}", line);
    }
}
