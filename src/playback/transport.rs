use crate::error::Result;

/// Notification kinds a transport can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportEventKind {
    PositionAdvanced,
    UserSought,
    PlaybackEnded,
    DurationKnown,
}

impl TransportEventKind {
    pub const ALL: [TransportEventKind; 4] = [
        TransportEventKind::PositionAdvanced,
        TransportEventKind::UserSought,
        TransportEventKind::PlaybackEnded,
        TransportEventKind::DurationKnown,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportEvent {
    /// Playback moved forward on its own; seconds.
    PositionAdvanced(f64),
    /// The user moved the playhead; seconds.
    UserSought(f64),
    PlaybackEnded,
    /// Seconds; `<= 0` means still unknown.
    DurationKnown(f64),
}

impl TransportEvent {
    pub fn kind(&self) -> TransportEventKind {
        match self {
            TransportEvent::PositionAdvanced(_) => TransportEventKind::PositionAdvanced,
            TransportEvent::UserSought(_) => TransportEventKind::UserSought,
            TransportEvent::PlaybackEnded => TransportEventKind::PlaybackEnded,
            TransportEvent::DurationKnown(_) => TransportEventKind::DurationKnown,
        }
    }
}

/// Handle returned by [`MediaTransport::subscribe`]; passing it back to
/// [`MediaTransport::unsubscribe`] removes exactly that subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A playable media element the confinement engine can drive.
///
/// Notifications are pulled with [`MediaTransport::drain_events`] on the
/// host's frame loop. Only kinds with a live subscription are queued.
pub trait MediaTransport {
    fn position(&self) -> f64;
    /// Seconds; `<= 0` means unknown.
    fn duration(&self) -> f64;
    fn set_position(&mut self, seconds: f64) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn subscribe(&mut self, kind: TransportEventKind) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);
    fn drain_events(&mut self) -> Vec<TransportEvent>;
}

/// Subscription bookkeeping and the pending-notification queue shared by
/// transport adapters.
#[derive(Debug, Default)]
pub struct EventQueue {
    next_id: u64,
    subscriptions: Vec<(SubscriptionId, TransportEventKind)>,
    pending: Vec<TransportEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: TransportEventKind) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscriptions.push((id, kind));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscriptions.retain(|(sub, _)| *sub != id);
        // Drop anything queued for kinds nobody listens to anymore.
        let subscriptions = &self.subscriptions;
        self.pending
            .retain(|event| subscriptions.iter().any(|(_, kind)| *kind == event.kind()));
    }

    pub fn is_subscribed(&self, kind: TransportEventKind) -> bool {
        self.subscriptions.iter().any(|(_, k)| *k == kind)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Queues `event` if anyone listens for its kind; otherwise drops it.
    pub fn push(&mut self, event: TransportEvent) -> bool {
        if self.is_subscribed(event.kind()) {
            self.pending.push(event);
            true
        } else {
            false
        }
    }

    pub fn drain(&mut self) -> Vec<TransportEvent> {
        std::mem::take(&mut self.pending)
    }
}
