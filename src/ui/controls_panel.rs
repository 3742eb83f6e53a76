//! Left panel UI: country and export pickers, submit and view controls.

use super::colors;
use crate::data::categories::ExportEntry;
use crate::map::parse_css_color;
use crate::quiz::SelectionSource;
use crate::state::{ActiveQuiz, AppState, LoadPhase};
use eframe::egui::{self, RichText};

pub fn render_controls_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::left("controls_panel")
        .resizable(true)
        .default_width(250.0)
        .min_width(200.0)
        .max_width(400.0)
        .show(ctx, |ui| {
            ui.heading("Main Exports");
            ui.separator();

            let AppState {
                config,
                phase,
                view,
                quiz,
                ..
            } = state;

            let Some(quiz) = quiz.as_mut() else {
                if let LoadPhase::Failed(message) = phase {
                    ui.label(RichText::new(message.as_str()).color(colors::ui::ERROR));
                } else {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading quiz data...");
                    });
                }
                return;
            };

            if config.show_country_picker {
                render_country_picker(ui, quiz);
                ui.add_space(10.0);
            }

            render_export_picker(ui, quiz, config.group_exports_by_category);
            ui.add_space(10.0);

            let submit = ui.add_enabled(
                quiz.surface.submit_enabled(),
                egui::Button::new("Submit").min_size(egui::vec2(ui.available_width(), 28.0)),
            );
            if submit.clicked() {
                quiz.submit();
            }

            ui.add_space(20.0);
            ui.separator();

            let reset = ui.add_enabled(
                !view.is_reset(),
                egui::Button::new(format!(
                    "{} Reset map",
                    egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE
                )),
            );
            if reset.clicked() {
                view.reset();
            }
            ui.label(
                RichText::new("Drag to pan, scroll to zoom, double-click to reset.")
                    .small()
                    .color(colors::ui::LABEL),
            );
        });
}

/// Dropdown of every country on the map; picking one selects it.
fn render_country_picker(ui: &mut egui::Ui, quiz: &mut ActiveQuiz) {
    let countries: Vec<(String, String)> = quiz
        .controller
        .pickable_countries()
        .into_iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect();
    let pending = quiz.controller.pending().map(str::to_string);

    let selected_text = pending
        .as_deref()
        .and_then(|id| countries.iter().find(|(c, _)| c == id))
        .map(|(_, name)| name.as_str())
        .unwrap_or("Choose a country");

    let mut picked = pending.clone();
    ui.label(RichText::new("Country").color(colors::ui::LABEL));
    egui::ComboBox::from_id_salt("country_picker")
        .selected_text(selected_text)
        .width(ui.available_width())
        .height(400.0)
        .show_ui(ui, |ui| {
            for (id, name) in &countries {
                ui.selectable_value(&mut picked, Some(id.clone()), name);
            }
        });

    if picked != pending {
        if let Some(id) = picked {
            quiz.select(&id, SelectionSource::Picker);
        }
    }
}

/// One choice in the export dropdown.
struct ExportChoice {
    normalized: String,
    display: String,
}

impl From<&ExportEntry> for ExportChoice {
    fn from(entry: &ExportEntry) -> Self {
        Self {
            normalized: entry.normalized.clone(),
            display: entry.display.clone(),
        }
    }
}

/// Dropdown of exports, flat and sorted or grouped under category headings.
fn render_export_picker(ui: &mut egui::Ui, quiz: &mut ActiveQuiz, grouped: bool) {
    let exports = quiz.controller.exports();
    let groups: Vec<(Option<(String, egui::Color32)>, Vec<ExportChoice>)> = if grouped {
        exports
            .grouped()
            .into_iter()
            .map(|(category, entries)| {
                let color = entries
                    .first()
                    .map(|e| parse_css_color(&e.color))
                    .unwrap_or(colors::map::FALLBACK);
                let choices = entries.into_iter().map(ExportChoice::from).collect();
                (Some((category.to_string(), color)), choices)
            })
            .collect()
    } else {
        let choices = exports.sorted().into_iter().map(ExportChoice::from).collect();
        vec![(None, choices)]
    };

    let chosen = quiz.controller.chosen_export().map(str::to_string);
    let selected_text = chosen
        .as_deref()
        .and_then(|n| exports.display_name(n))
        .unwrap_or("No exports")
        .to_string();

    let mut picked = chosen.clone();
    ui.label(RichText::new("Main export").color(colors::ui::LABEL));
    egui::ComboBox::from_id_salt("export_picker")
        .selected_text(selected_text)
        .width(ui.available_width())
        .height(400.0)
        .show_ui(ui, |ui| {
            for (heading, choices) in &groups {
                if let Some((category, color)) = heading {
                    ui.label(RichText::new(category).strong().color(*color));
                }
                for choice in choices {
                    let text = if heading.is_some() {
                        format!("  {}", choice.display)
                    } else {
                        choice.display.clone()
                    };
                    ui.selectable_value(&mut picked, Some(choice.normalized.clone()), text);
                }
            }
        });

    if picked != chosen {
        if let Some(normalized) = picked {
            quiz.choose_export(&normalized);
        }
    }
}
