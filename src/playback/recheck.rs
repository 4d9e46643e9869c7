use std::time::{Duration, Instant};

pub const DEFAULT_RECHECK_DELAY: Duration = Duration::from_millis(100);
pub const MAX_RECHECK_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingRecheck {
    target: f64,
    due: Instant,
}

/// Holds at most one delayed "did the seek land?" check.
///
/// Scheduling replaces whatever was pending, so a superseded check can never
/// fire.
#[derive(Debug, Clone)]
pub struct RecheckSlot {
    delay: Duration,
    pending: Option<PendingRecheck>,
}

impl RecheckSlot {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay: delay.min(MAX_RECHECK_DELAY),
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, target: f64, now: Instant) {
        self.pending = Some(PendingRecheck {
            target,
            due: now + self.delay,
        });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the target once the delay has elapsed, clearing the slot.
    pub fn take_due(&mut self, now: Instant) -> Option<f64> {
        match self.pending {
            Some(pending) if now >= pending.due => {
                self.pending = None;
                Some(pending.target)
            }
            _ => None,
        }
    }
}

impl Default for RecheckSlot {
    fn default() -> Self {
        Self::new(DEFAULT_RECHECK_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let now = Instant::now();
        let mut slot = RecheckSlot::default();
        slot.schedule(30.0, now);
        assert_eq!(slot.take_due(now + Duration::from_millis(50)), None);
        assert_eq!(slot.take_due(now + Duration::from_millis(100)), Some(30.0));
        assert_eq!(slot.take_due(now + Duration::from_millis(200)), None);
    }

    #[test]
    fn test_reschedule_replaces_pending() {
        let now = Instant::now();
        let mut slot = RecheckSlot::default();
        slot.schedule(10.0, now);
        slot.schedule(30.0, now + Duration::from_millis(60));
        assert_eq!(slot.take_due(now + Duration::from_millis(100)), None);
        assert_eq!(slot.take_due(now + Duration::from_millis(160)), Some(30.0));
    }

    #[test]
    fn test_cancel_clears() {
        let now = Instant::now();
        let mut slot = RecheckSlot::default();
        slot.schedule(10.0, now);
        slot.cancel();
        assert!(!slot.is_pending());
        assert_eq!(slot.take_due(now + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_delay_is_bounded() {
        let slot = RecheckSlot::new(Duration::from_secs(3));
        assert_eq!(slot.delay(), MAX_RECHECK_DELAY);
    }
}
