/// Last observed transport status, kept by adapters between polls.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub playhead: f64,
    /// Zero until the media reports a duration.
    pub duration: f64,
    pub is_playing: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            playhead: 0.0,
            duration: 0.0,
            is_playing: false,
        }
    }

    pub fn duration_known(&self) -> bool {
        self.duration > 0.0
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}
