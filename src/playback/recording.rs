use crate::error::{Error, Result};
use crate::playback::transport::{
    EventQueue, MediaTransport, SubscriptionId, TransportEvent, TransportEventKind,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Seek(f64),
    Play,
    Pause,
}

/// In-memory transport that records every command it receives.
pub struct RecordingTransport {
    pub position: f64,
    pub duration: f64,
    pub fail_play: bool,
    follow_seeks: bool,
    commands: Vec<Command>,
    events: EventQueue,
}

impl RecordingTransport {
    pub fn new(duration: f64) -> Self {
        Self {
            position: 0.0,
            duration,
            fail_play: false,
            follow_seeks: true,
            commands: Vec::new(),
            events: EventQueue::new(),
        }
    }

    /// Seeks are recorded but the position stays put, like a slow transport.
    pub fn ignore_seeks(&mut self) {
        self.follow_seeks = false;
    }

    pub fn emit(&mut self, event: TransportEvent) -> bool {
        self.events.push(event)
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn subscription_count(&self) -> usize {
        self.events.subscription_count()
    }
}

impl MediaTransport for RecordingTransport {
    fn position(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn set_position(&mut self, seconds: f64) -> Result<()> {
        self.commands.push(Command::Seek(seconds));
        if self.follow_seeks {
            self.position = seconds;
        }
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.fail_play {
            return Err(Error::gst("playback not allowed"));
        }
        self.commands.push(Command::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.commands.push(Command::Pause);
        Ok(())
    }

    fn subscribe(&mut self, kind: TransportEventKind) -> SubscriptionId {
        self.events.subscribe(kind)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.events.unsubscribe(id);
    }

    fn drain_events(&mut self) -> Vec<TransportEvent> {
        self.events.drain()
    }
}
