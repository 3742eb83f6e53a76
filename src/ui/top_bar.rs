//! Top bar UI: app title, status line and tally.

use super::colors;
use crate::quiz::CORRECT_MESSAGE;
use crate::state::{AppState, LoadPhase};
use eframe::egui::{self, Color32, RichText};

pub fn render_top_bar(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(
                    RichText::new("Export Atlas")
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                ui.separator();

                if state.phase == LoadPhase::Loading {
                    ui.spinner();
                }
                ui.label(
                    RichText::new(state.status_message())
                        .size(13.0)
                        .color(status_color(state)),
                );

                if let Some(tally) = state.quiz.as_ref().and_then(|q| q.surface.tally()) {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("Correct: {}", tally))
                                .strong()
                                .size(13.0)
                                .color(colors::ui::ACTIVE),
                        );
                    });
                }
            });
        });
}

fn status_color(state: &AppState) -> Color32 {
    match &state.phase {
        LoadPhase::Failed(_) => colors::ui::ERROR,
        _ if state.status_message() == CORRECT_MESSAGE => colors::ui::SUCCESS,
        _ => Color32::GRAY,
    }
}
