use crate::types::segment_set::ValidSegment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfinementMode {
    /// Play every valid segment in time order, skipping the gaps.
    #[default]
    AutoAdvance,
    /// Stay inside one segment of the sorted view.
    IsolatedSegment { active_index: usize },
}

/// What the engine is doing right now, as reported to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    /// No transport attached, or nothing valid to confine to.
    Idle,
    AutoAdvance,
    IsolatedSegment(usize),
}

#[derive(Debug, Clone, Default)]
pub struct EngineState {
    pub mode: ConfinementMode,
    /// Segment the playhead was last seen inside while auto-advancing.
    pub current_index: Option<usize>,
    pub segments: Vec<ValidSegment>,
}

impl EngineState {
    pub fn active_index(&self) -> Option<usize> {
        match self.mode {
            ConfinementMode::IsolatedSegment { active_index } => Some(active_index),
            ConfinementMode::AutoAdvance => None,
        }
    }

    pub fn containing(&self, time: f64) -> Option<usize> {
        self.segments.iter().position(|segment| segment.contains(time))
    }

    pub fn first(&self) -> Option<&ValidSegment> {
        self.segments.first()
    }

    pub fn last(&self) -> Option<&ValidSegment> {
        self.segments.last()
    }

    /// First segment starting after `time`, in sorted order.
    pub fn next_after(&self, time: f64) -> Option<usize> {
        self.segments.iter().position(|segment| segment.start > time)
    }
}
