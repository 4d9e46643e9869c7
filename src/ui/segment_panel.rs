use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::types::confinement::EnginePhase;
use crate::types::segment_set::{SegmentSet, ValidSegment};
use crate::types::time_range::{RangeField, TimeRange};

#[derive(Debug, Clone, PartialEq)]
pub enum SegmentPanelEvent {
    /// A start/end/label field changed.
    Edited,
    Added,
    Removed(usize),
    /// Play this segment alone; index into the sorted view.
    Jump(usize),
    PlayAll,
}

/// Table of the user's segments in insertion order, with editing controls.
pub fn segment_panel(
    ui: &mut egui::Ui,
    segments: &mut SegmentSet,
    view: &[ValidSegment],
    phase: EnginePhase,
) -> Vec<SegmentPanelEvent> {
    let mut events = Vec::new();

    ui.heading("Segments");
    ui.label(phase_text(phase, view));
    ui.horizontal(|ui| {
        if ui.button("➕ Add segment").clicked() {
            segments.add();
            events.push(SegmentPanelEvent::Added);
        }
        if ui
            .add_enabled(!view.is_empty(), egui::Button::new("▶ Play all"))
            .clicked()
        {
            events.push(SegmentPanelEvent::PlayAll);
        }
    });
    ui.separator();

    if segments.is_empty() {
        ui.label(egui::RichText::new("No segments yet").color(egui::Color32::GRAY));
        return events;
    }

    let active_source = match phase {
        EnginePhase::IsolatedSegment(i) => view.get(i).map(|s| s.source_index),
        _ => None,
    };

    let mut edits: Vec<(usize, RangeField, String)> = Vec::new();
    let rows: Vec<TimeRange> = segments.ranges().to_vec();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(24.0))
        .column(Column::initial(80.0).at_least(60.0))
        .column(Column::initial(80.0).at_least(60.0))
        .column(Column::remainder().at_least(80.0))
        .column(Column::exact(28.0))
        .column(Column::exact(28.0))
        .header(20.0, |mut header| {
            for title in ["#", "Start", "End", "Label", "", ""] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (i, range) in rows.iter().enumerate() {
                let sorted_index = view.iter().position(|s| s.source_index == i);
                body.row(24.0, |mut row| {
                    row.col(|ui| {
                        let number = egui::RichText::new(format!("{}", i + 1));
                        if active_source == Some(i) {
                            ui.label(number.strong().color(egui::Color32::LIGHT_GREEN));
                        } else if range.is_valid() {
                            ui.label(number);
                        } else {
                            ui.label(number.weak())
                                .on_hover_text("Incomplete or invalid range");
                        }
                    });
                    row.col(|ui| {
                        if let Some(text) = time_field(ui, range, RangeField::Start) {
                            edits.push((i, RangeField::Start, text));
                        }
                    });
                    row.col(|ui| {
                        if let Some(text) = time_field(ui, range, RangeField::End) {
                            edits.push((i, RangeField::End, text));
                        }
                    });
                    row.col(|ui| {
                        let mut label = range.label.clone();
                        let edit = egui::TextEdit::singleline(&mut label)
                            .id_salt((range.id, "label"))
                            .hint_text("label");
                        if ui.add(edit).changed() {
                            edits.push((i, RangeField::Label, label));
                        }
                    });
                    row.col(|ui| {
                        let play = ui
                            .add_enabled(sorted_index.is_some(), egui::Button::new("▶"))
                            .on_hover_text("Play only this segment");
                        if play.clicked() {
                            if let Some(index) = sorted_index {
                                events.push(SegmentPanelEvent::Jump(index));
                            }
                        }
                    });
                    row.col(|ui| {
                        if ui.button("✖").on_hover_text("Delete segment").clicked() {
                            events.push(SegmentPanelEvent::Removed(i));
                        }
                    });
                });
            }
        });

    if !edits.is_empty() {
        for (index, field, text) in edits {
            segments.update(index, field, &text);
        }
        events.push(SegmentPanelEvent::Edited);
    }

    events
}

/// Text field for a time code; tinted when the text doesn't parse.
fn time_field(ui: &mut egui::Ui, range: &TimeRange, field: RangeField) -> Option<String> {
    let (mut text, parsed, salt) = match field {
        RangeField::Start => (range.raw_start.clone(), range.start_seconds, "start"),
        _ => (range.raw_end.clone(), range.end_seconds, "end"),
    };
    let unparsed = !text.trim().is_empty() && parsed.is_none();
    let mut edit = egui::TextEdit::singleline(&mut text)
        .id_salt((range.id, salt))
        .hint_text("mm:ss");
    if unparsed {
        edit = edit.text_color(egui::Color32::LIGHT_RED);
    }
    let changed = ui.add(edit).changed();
    changed.then_some(text)
}

fn phase_text(phase: EnginePhase, view: &[ValidSegment]) -> String {
    match phase {
        EnginePhase::Idle => "Idle".to_string(),
        EnginePhase::AutoAdvance => format!("Playing through {} segments", view.len()),
        EnginePhase::IsolatedSegment(i) => match view.get(i) {
            Some(segment) if !segment.label.is_empty() => {
                format!("Playing segment {} ({})", segment.source_index + 1, segment.label)
            }
            Some(segment) => format!("Playing segment {}", segment.source_index + 1),
            None => "Isolated".to_string(),
        },
    }
}
