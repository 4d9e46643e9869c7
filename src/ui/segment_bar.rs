use eframe::egui;

use crate::types::confinement::EnginePhase;
use crate::types::segment_set::ValidSegment;

const BAR_HEIGHT: f32 = 28.0;

/// Draws the valid segments over the media timeline with the playhead on top.
/// Returns the time the user clicked, if any.
pub fn segment_bar(
    ui: &mut egui::Ui,
    view: &[ValidSegment],
    phase: EnginePhase,
    playhead: f64,
    duration: f64,
) -> Option<f64> {
    let width = ui.available_width().max(1.0);
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(width, BAR_HEIGHT), egui::Sense::click());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, egui::Color32::from_gray(35));

    if duration <= 0.0 {
        return None;
    }

    let time_to_x = |time: f64| rect.left() + time_fraction(time, duration) * rect.width();

    for (i, segment) in view.iter().enumerate() {
        let isolated = phase == EnginePhase::IsolatedSegment(i);
        let color = if isolated {
            egui::Color32::from_rgb(120, 220, 120)
        } else if phase == EnginePhase::Idle {
            egui::Color32::from_gray(90)
        } else {
            egui::Color32::from_rgb(100, 180, 255)
        };
        let seg_rect = egui::Rect::from_x_y_ranges(
            time_to_x(segment.start)..=time_to_x(segment.end),
            rect.top() + 4.0..=rect.bottom() - 4.0,
        );
        painter.rect_filled(seg_rect, 3.0, color);
        painter.text(
            seg_rect.center(),
            egui::Align2::CENTER_CENTER,
            format!("{}", segment.source_index + 1),
            egui::FontId::proportional(11.0),
            egui::Color32::BLACK,
        );
    }

    let x = time_to_x(playhead);
    painter.line_segment(
        [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
        egui::Stroke::new(2.0, egui::Color32::from_rgb(255, 80, 80)),
    );

    if response.clicked() {
        let pos = response.interact_pointer_pos()?;
        let fraction = ((pos.x - rect.left()) / rect.width()).clamp(0.0, 1.0);
        return Some(fraction as f64 * duration);
    }
    None
}

fn time_fraction(time: f64, duration: f64) -> f32 {
    (time / duration).clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_fraction_clamps() {
        assert_eq!(time_fraction(25.0, 100.0), 0.25);
        assert_eq!(time_fraction(-4.0, 100.0), 0.0);
        assert_eq!(time_fraction(150.0, 100.0), 1.0);
    }
}
