//! Keeps playback inside the union of the user's segments.
//!
//! The engine is single-threaded and event driven. The host drains transport
//! notifications once per frame through [`ConfinementEngine::pump`]; UI commands
//! (`set_segments`, `jump_to_segment`, `set_mode`) are called from the same
//! loop. Nothing here ever returns an error: bad input degrades to "no
//! transition" or [`EnginePhase::Idle`].

use std::time::{Duration, Instant};

use crate::playback::recheck::RecheckSlot;
use crate::playback::transport::{
    MediaTransport, SubscriptionId, TransportEvent, TransportEventKind,
};
use crate::types::confinement::{ConfinementMode, EnginePhase, EngineState};
use crate::types::segment_set::{SegmentSet, ValidSegment};

/// Distance before a segment end that playback is parked at after pausing.
pub const END_CORRECTION: f64 = 0.1;
/// How far past a segment end the playhead must be to count as having left it.
pub const PASSED_BUFFER: f64 = 0.5;
/// A seek counts as landed once the playhead is this close to the target.
pub const SEEK_TOLERANCE: f64 = 0.5;

pub struct ConfinementEngine<T: MediaTransport> {
    transport: Option<T>,
    subscriptions: Vec<SubscriptionId>,
    state: EngineState,
    /// Valid view before the media-duration bound is applied.
    unbounded: Vec<ValidSegment>,
    duration: f64,
    recheck: RecheckSlot,
    /// Target of the last engine-issued seek that hasn't been observed yet.
    pending_seek: Option<f64>,
    /// Isolated end correction already applied; cleared once the playhead is
    /// seen below the segment end again.
    isolated_settled: bool,
}

impl<T: MediaTransport> ConfinementEngine<T> {
    pub fn new(recheck_delay: Duration) -> Self {
        Self {
            transport: None,
            subscriptions: Vec::new(),
            state: EngineState::default(),
            unbounded: Vec::new(),
            duration: 0.0,
            recheck: RecheckSlot::new(recheck_delay),
            pending_seek: None,
            isolated_settled: false,
        }
    }

    /// Subscribes to every notification kind and starts confining `transport`.
    /// A previously attached transport is detached first.
    pub fn attach(&mut self, mut transport: T) {
        if self.transport.is_some() {
            log::debug!("replacing attached transport");
            self.detach();
        }

        self.subscriptions = TransportEventKind::ALL
            .iter()
            .map(|kind| transport.subscribe(*kind))
            .collect();
        self.duration = transport.duration().max(0.0);
        self.transport = Some(transport);
        self.state.current_index = None;
        self.rederive();
        log::info!(
            "transport attached (duration {:.2}s, {} segments)",
            self.duration,
            self.state.segments.len()
        );
    }

    /// Unsubscribes from all notifications, then cancels the pending re-check,
    /// then hands the transport back. No command is issued after this returns.
    pub fn detach(&mut self) -> Option<T> {
        let mut transport = self.transport.take()?;
        for id in self.subscriptions.drain(..) {
            transport.unsubscribe(id);
        }
        self.recheck.cancel();
        self.pending_seek = None;
        self.isolated_settled = false;
        self.state.current_index = None;
        self.duration = 0.0;
        log::info!("transport detached");
        Some(transport)
    }

    pub fn transport(&self) -> Option<&T> {
        self.transport.as_ref()
    }

    pub fn transport_mut(&mut self) -> Option<&mut T> {
        self.transport.as_mut()
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn phase(&self) -> EnginePhase {
        if self.transport.is_none() || self.state.segments.is_empty() {
            return EnginePhase::Idle;
        }
        match self.state.active_index() {
            Some(index) => EnginePhase::IsolatedSegment(index),
            None => EnginePhase::AutoAdvance,
        }
    }

    pub fn has_pending_recheck(&self) -> bool {
        self.recheck.is_pending()
    }

    /// Drains queued notifications in order, then fires the re-check if due.
    pub fn pump(&mut self, now: Instant) {
        let events = match self.transport.as_mut() {
            Some(transport) => transport.drain_events(),
            None => return,
        };
        for event in events {
            self.dispatch(event);
        }
        self.poll_recheck(now);
    }

    pub fn dispatch(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::PositionAdvanced(t) => self.on_position_advanced(t),
            TransportEvent::UserSought(t) => self.on_user_sought(t),
            TransportEvent::PlaybackEnded => self.on_playback_ended(),
            TransportEvent::DurationKnown(d) => self.on_duration_known(d),
        }
    }

    /// Replaces the segment view. Issues no transport command unless the
    /// isolated segment moved away from the playhead.
    pub fn set_segments(&mut self, segments: &SegmentSet) {
        self.unbounded = segments.valid_sorted_view();
        self.rederive();
    }

    /// Plays segment `index` of the sorted view on its own.
    pub fn jump_to_segment(&mut self, index: usize, now: Instant) {
        if self.transport.is_none() {
            log::warn!("jump to segment {} ignored, no media attached", index);
            return;
        }
        let Some(start) = self.state.segments.get(index).map(|s| s.start) else {
            log::warn!(
                "jump to segment {} ignored, only {} valid segments",
                index,
                self.state.segments.len()
            );
            return;
        };

        self.recheck.cancel();
        self.state.mode = ConfinementMode::IsolatedSegment {
            active_index: index,
        };
        self.state.current_index = None;
        self.isolated_settled = false;
        log::info!(
            "isolating segment {} from {:.2}s (re-check in {:?})",
            index,
            start,
            self.recheck.delay()
        );

        self.issue_seek(start);
        self.issue_play();
        self.recheck.schedule(start, now);
    }

    pub fn set_mode(&mut self, mode: ConfinementMode, now: Instant) {
        match mode {
            ConfinementMode::IsolatedSegment { active_index } => {
                self.jump_to_segment(active_index, now)
            }
            ConfinementMode::AutoAdvance => {
                self.recheck.cancel();
                self.state.mode = ConfinementMode::AutoAdvance;
                self.isolated_settled = false;
                self.state.current_index = self
                    .transport
                    .as_ref()
                    .and_then(|t| self.state.containing(t.position()));
                log::info!("auto-advance through {} segments", self.state.segments.len());
            }
        }
    }

    pub fn on_duration_known(&mut self, duration: f64) {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        if duration == self.duration {
            return;
        }
        self.duration = duration;
        log::debug!("media duration {:.2}s", duration);
        self.rederive();
    }

    pub fn on_position_advanced(&mut self, t: f64) {
        if !self.ready() {
            return;
        }
        self.note_observed(t);

        if let ConfinementMode::IsolatedSegment { active_index } = self.state.mode {
            let Some(end) = self.state.segments.get(active_index).map(|s| s.end) else {
                return;
            };
            if t >= end {
                if !self.isolated_settled {
                    self.isolated_settled = true;
                    log::debug!("segment {} reached its end at {:.2}s", active_index, t);
                    self.issue_pause();
                    self.issue_seek(end - END_CORRECTION);
                }
            } else {
                self.isolated_settled = false;
            }
            return;
        }

        if let Some(index) = self.state.containing(t) {
            self.state.current_index = Some(index);
            self.pending_seek = None;
            return;
        }

        if let Some(current) = self.state.current_index {
            let passed = self
                .state
                .segments
                .get(current)
                .is_some_and(|s| t >= s.end + PASSED_BUFFER);
            if passed {
                match self.state.segments.get(current + 1).map(|s| s.start) {
                    Some(next_start) => {
                        log::debug!("advancing from segment {} to {}", current, current + 1);
                        self.state.current_index = Some(current + 1);
                        self.seek_once(next_start);
                    }
                    None => {
                        log::debug!("last segment finished at {:.2}s", t);
                        self.state.current_index = None;
                        self.issue_pause();
                    }
                }
                return;
            }
        }

        self.resolve_outside(t);
    }

    /// Ignored while a segment is isolated: the user is exploring on purpose.
    pub fn on_user_sought(&mut self, t: f64) {
        // A manual seek supersedes any jump still waiting to be verified.
        self.recheck.cancel();
        if !self.ready() {
            return;
        }
        self.pending_seek = None;
        if matches!(self.state.mode, ConfinementMode::IsolatedSegment { .. }) {
            log::debug!("user seek to {:.2}s left alone in isolated mode", t);
            return;
        }

        match self.state.containing(t) {
            Some(index) => self.state.current_index = Some(index),
            None => self.resolve_outside(t),
        }
    }

    /// Parks playback just before the end of the last segment so the
    /// transport's own end-of-media behaviour can't restart it.
    pub fn on_playback_ended(&mut self) {
        if self.transport.is_none() {
            return;
        }
        let Some(end) = self.state.last().map(|s| s.end) else {
            return;
        };
        log::debug!("playback ended, parking at last segment end");
        self.issue_pause();
        self.issue_seek(end - END_CORRECTION);
    }

    fn ready(&self) -> bool {
        self.transport.is_some() && self.duration > 0.0 && !self.state.segments.is_empty()
    }

    /// Snap to the first segment, pause past the last one, or jump over a gap.
    fn resolve_outside(&mut self, t: f64) {
        let (Some(first), Some(last)) = (self.state.first(), self.state.last()) else {
            return;
        };
        let (first_start, last_end) = (first.start, last.end);

        if t < first_start {
            self.state.current_index = Some(0);
            self.seek_once(first_start);
        } else if t >= last_end + PASSED_BUFFER {
            self.state.current_index = None;
            self.issue_pause();
        } else if let Some(next) = self.state.next_after(t) {
            let start = self.state.segments[next].start;
            self.state.current_index = Some(next);
            self.seek_once(start);
        }
    }

    fn rederive(&mut self) {
        let duration = self.duration;
        let segments: Vec<ValidSegment> = self
            .unbounded
            .iter()
            .filter(|s| duration <= 0.0 || s.end <= duration)
            .cloned()
            .collect();
        let previous = std::mem::replace(&mut self.state.segments, segments);

        let unchanged = previous.len() == self.state.segments.len()
            && previous
                .iter()
                .zip(&self.state.segments)
                .all(|(a, b)| a.same_bounds(b));
        if unchanged {
            return;
        }
        log::debug!(
            "segment view changed: {} -> {} valid",
            previous.len(),
            self.state.segments.len()
        );

        let position = self.transport.as_ref().map(|t| t.position());
        self.state.current_index = position.and_then(|t| self.state.containing(t));

        let ConfinementMode::IsolatedSegment { active_index } = self.state.mode else {
            return;
        };
        let Some(active) = self.state.segments.get(active_index) else {
            log::info!("isolated segment {} no longer exists, auto-advancing", active_index);
            self.state.mode = ConfinementMode::AutoAdvance;
            self.isolated_settled = false;
            self.recheck.cancel();
            return;
        };

        let moved = previous
            .get(active_index)
            .is_none_or(|old| !old.same_bounds(active));
        if !moved {
            return;
        }
        self.isolated_settled = false;
        let (start, end) = (active.start, active.end);
        if let Some(t) = position {
            if self.duration > 0.0 && (t < start || t > end) {
                self.seek_once(start);
            }
        }
    }

    fn note_observed(&mut self, t: f64) {
        if let Some(target) = self.pending_seek {
            if (t - target).abs() <= SEEK_TOLERANCE {
                self.pending_seek = None;
            }
        }
    }

    fn poll_recheck(&mut self, now: Instant) {
        let Some(target) = self.recheck.take_due(now) else {
            return;
        };
        let Some(position) = self.transport.as_ref().map(|t| t.position()) else {
            return;
        };
        if (position - target).abs() > SEEK_TOLERANCE {
            log::debug!(
                "seek to {:.2}s not reached (at {:.2}s), seeking again",
                target,
                position
            );
            self.issue_seek(target);
        }
    }

    /// Seeks unless the same seek is still in flight.
    fn seek_once(&mut self, target: f64) {
        let target = target.max(0.0);
        if self.pending_seek.is_some_and(|p| (p - target).abs() < f64::EPSILON) {
            return;
        }
        self.issue_seek(target);
    }

    fn issue_seek(&mut self, target: f64) {
        let target = target.max(0.0);
        if let Some(transport) = self.transport.as_mut() {
            if let Err(err) = transport.set_position(target) {
                log::warn!("seek to {:.2}s failed: {}", target, err);
            }
            self.pending_seek = Some(target);
        }
    }

    fn issue_play(&mut self) {
        if let Some(transport) = self.transport.as_mut() {
            if let Err(err) = transport.play() {
                log::warn!("play request failed: {}", err);
            }
        }
    }

    fn issue_pause(&mut self) {
        if let Some(transport) = self.transport.as_mut() {
            if let Err(err) = transport.pause() {
                log::warn!("pause request failed: {}", err);
            }
        }
    }
}

impl<T: MediaTransport> Default for ConfinementEngine<T> {
    fn default() -> Self {
        Self::new(crate::playback::recheck::DEFAULT_RECHECK_DELAY)
    }
}
