use eframe::egui;

use crate::ops::timecode;
use crate::playback::gst_transport::GstTransport;
use crate::playback::transport::MediaTransport;

/// Preview of the opened media plus play/pause and a scrubber.
pub struct VideoPlayer {
    pub texture: Option<egui::TextureHandle>,
    pub width: u32,
    pub height: u32,
}

impl VideoPlayer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            texture: None,
            width,
            height,
        }
    }

    pub fn clear(&mut self) {
        self.texture = None;
    }

    /// Upload the newest decoded frame, if there is one.
    pub fn update_texture(&mut self, ctx: &egui::Context, transport: &mut GstTransport) {
        let Some(frame) = transport.latest_frame() else {
            return;
        };
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize],
            &frame.data,
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::default()),
            None => {
                self.texture =
                    Some(ctx.load_texture("video_frame", image, egui::TextureOptions::default()));
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, transport: Option<&mut GstTransport>) {
        ui.vertical(|ui| {
            let size = egui::vec2(self.width as f32, self.height as f32);
            match &self.texture {
                Some(texture) => {
                    ui.add(egui::Image::new(texture).fit_to_exact_size(size));
                }
                None => {
                    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                    ui.painter().rect_filled(rect, 4.0, egui::Color32::from_gray(20));
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "No media loaded",
                        egui::FontId::proportional(14.0),
                        egui::Color32::GRAY,
                    );
                }
            }

            let Some(transport) = transport else {
                return;
            };

            ui.horizontal(|ui| {
                let playing = transport.is_playing();
                if ui.button(if playing { "Pause" } else { "Play" }).clicked() {
                    let result = if playing {
                        transport.pause()
                    } else {
                        transport.play()
                    };
                    if let Err(err) = result {
                        log::warn!("play/pause failed: {}", err);
                    }
                }

                let duration = transport.duration();
                let mut position = transport.position();
                ui.label(format!(
                    "{} / {}",
                    timecode::format(position),
                    timecode::format(duration)
                ));

                if duration > 0.0 {
                    let slider = egui::Slider::new(&mut position, 0.0..=duration).show_value(false);
                    if ui.add(slider).changed() {
                        if let Err(err) = transport.user_seek(position) {
                            log::warn!("{}", err);
                        }
                    }
                }
            });
        });
    }
}
