use super::event::Event;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// Destination for display events.
///
/// Emitters never wait on a sink, so implementations must return
/// promptly and must not touch the table.
pub trait Sink: Send + Sync {
    fn emit(&self, event: Event);
}

/// Writes events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl Sink for LogSink {
    fn emit(&self, event: Event) {
        match event {
            Event::Countdown { .. } | Event::Stopwatch { .. } | Event::Freeze { .. } => {
                log::trace!("[display] {}", event)
            }
            Event::Marker { .. } | Event::Deal { .. } | Event::Clear { .. } => {
                log::debug!("[display] {}", event)
            }
            _ => log::info!("[display] {}", event),
        }
    }
}

/// Forwards events to an unbounded channel, for front ends and tests.
#[derive(Debug, Clone)]
pub struct ChannelSink(UnboundedSender<Event>);

impl ChannelSink {
    pub fn new() -> (Self, UnboundedReceiver<Event>) {
        let (tx, rx) = unbounded_channel();
        (Self(tx), rx)
    }
}

impl Sink for ChannelSink {
    fn emit(&self, event: Event) {
        // a departed listener is not the game's problem
        let _ = self.0.send(event);
    }
}
