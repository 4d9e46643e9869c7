pub mod confinement;
pub mod playback_state;
pub mod segment_set;
pub mod session;
pub mod time_range;
