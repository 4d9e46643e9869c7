use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui;

use crate::config::AppConfig;
use crate::playback::confinement::ConfinementEngine;
use crate::playback::gst_transport::GstTransport;
use crate::playback::transport::MediaTransport;
use crate::types::confinement::ConfinementMode;
use crate::types::session::SourceContext;
use crate::ui::segment_bar::segment_bar;
use crate::ui::segment_panel::{SegmentPanelEvent, segment_panel};
use crate::ui::video_player::VideoPlayer;

pub struct AppState {
    pub source: SourceContext,
    pub engine: ConfinementEngine<GstTransport>,
    pub video_player: VideoPlayer,
    pub status: String,
}

impl Drop for AppState {
    fn drop(&mut self) {
        // Unsubscribe before the pipeline is torn down.
        self.engine.detach();
    }
}

pub struct RangePlayApp {
    pub state: AppState,
    repaint_interval: Duration,
}

impl RangePlayApp {
    pub fn new(config: &AppConfig, source: SourceContext) -> Self {
        let mut engine = ConfinementEngine::new(config.recheck_delay());
        engine.set_segments(&source.segments);

        let (width, height) = config.preview_size;
        Self {
            state: AppState {
                source,
                engine,
                video_player: VideoPlayer::new(width, height),
                status: String::new(),
            },
            repaint_interval: config.repaint_interval(),
        }
    }

    pub fn open_media(&mut self, path: PathBuf) {
        match GstTransport::open(&path) {
            Ok(transport) => {
                // The old pipeline is dropped only after the engine let go of it.
                drop(self.state.engine.detach());
                self.state.video_player.clear();
                self.state.status = format!("Opened {}", transport.path().display());
                self.state.engine.attach(transport);
                self.state.source.media_path = Some(path);
            }
            Err(err) => {
                log::error!("could not open {}: {}", path.display(), err);
                self.state.status = format!("Could not open {}: {}", path.display(), err);
            }
        }
    }

    fn handle_panel_event(&mut self, event: SegmentPanelEvent, now: Instant) {
        let state = &mut self.state;
        match event {
            SegmentPanelEvent::Added => {}
            SegmentPanelEvent::Edited => state.engine.set_segments(&state.source.segments),
            SegmentPanelEvent::Removed(index) => {
                state.source.segments.remove(index);
                state.engine.set_segments(&state.source.segments);
            }
            SegmentPanelEvent::Jump(index) => state.engine.jump_to_segment(index, now),
            SegmentPanelEvent::PlayAll => {
                state.engine.set_mode(ConfinementMode::AutoAdvance, now);
                if let Some(transport) = state.engine.transport_mut() {
                    if let Err(err) = transport.play() {
                        log::warn!("play request failed: {}", err);
                    }
                }
            }
        }
    }
}

impl eframe::App for RangePlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.state.engine.pump(now);

        if let Some(transport) = self.state.engine.transport_mut() {
            self.state.video_player.update_texture(ctx, transport);
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open media…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Media", &["mp4", "mov", "mkv", "webm", "avi", "mp3", "wav"])
                        .pick_file()
                    {
                        self.open_media(path);
                    }
                }
                match self.state.source.media_name() {
                    Some(name) => ui.label(name),
                    None => ui.label("No media"),
                };
                if !self.state.status.is_empty() {
                    ui.separator();
                    ui.label(egui::RichText::new(&self.state.status).color(egui::Color32::GRAY));
                }
            });
        });

        let mut panel_events = Vec::new();
        egui::SidePanel::right("segment_panel")
            .resizable(true)
            .min_width(360.0)
            .show(ctx, |ui| {
                let state = &mut self.state;
                panel_events = segment_panel(
                    ui,
                    &mut state.source.segments,
                    &state.engine.state().segments,
                    state.engine.phase(),
                );
            });
        for event in panel_events {
            self.handle_panel_event(event, now);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &mut self.state;
            let phase = state.engine.phase();
            let (playhead, duration) = state
                .engine
                .transport()
                .map(|t| (t.position(), t.duration()))
                .unwrap_or((0.0, 0.0));

            state
                .video_player
                .show(ui, state.engine.transport_mut());
            ui.add_space(8.0);

            let clicked = segment_bar(ui, &state.engine.state().segments, phase, playhead, duration);
            if let (Some(time), Some(transport)) = (clicked, state.engine.transport_mut()) {
                if let Err(err) = transport.user_seek(time) {
                    log::warn!("{}", err);
                }
            }
        });

        if self.state.engine.has_pending_recheck() {
            // The re-check only fires from `pump`, so keep frames coming until it does.
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(self.repaint_interval);
        }
    }
}
