pub mod app;
pub mod segment_bar;
pub mod segment_panel;
pub mod video_player;
