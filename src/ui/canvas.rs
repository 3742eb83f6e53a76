//! Central canvas UI: the map itself.

use super::colors;
use crate::map::{Highlight, MapPainter, MapProjection};
use crate::quiz::{RegionStyle, SelectionSource, UNKNOWN_COUNTRY};
use crate::state::{ActiveQuiz, AppState, MapView};
use eframe::egui::{self, CursorIcon, Rect, Sense};

pub fn render_canvas(ctx: &egui::Context, state: &mut AppState, map_painter: &mut MapPainter) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(colors::map::OCEAN))
        .show(ctx, |ui| {
            let available_size = ui.available_size();

            // Allocate the full available space for the canvas
            let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
            let rect = response.rect;

            let Some(quiz) = state.quiz.as_mut() else {
                state.hovered_region = None;
                return;
            };

            let mut projection = MapProjection::new(quiz.map.bounds);
            projection.update(state.view.zoom, state.view.pan_offset, rect);

            state.hovered_region = response
                .hover_pos()
                .and_then(|pos| quiz.map.region_at(projection.screen_to_map(pos)))
                .map(|region| region.id.clone());

            map_painter.paint(
                &painter,
                &quiz.map,
                &quiz.surface,
                &projection,
                Highlight {
                    selected: quiz.controller.pending(),
                    hovered: state.hovered_region.as_deref(),
                },
            );

            if let Some(id) = state.hovered_region.as_deref() {
                show_hover_feedback(&response, quiz, id);
                if response.clicked() {
                    quiz.select(id, SelectionSource::Map);
                }
            }

            handle_canvas_interaction(&response, &rect, &mut state.view);
        });
}

/// Cursor shape and tooltip for the region under the pointer.
fn show_hover_feedback(response: &egui::Response, quiz: &ActiveQuiz, region_id: &str) {
    let interactive = quiz.surface.is_interactive(region_id);
    if !response.dragged() {
        response.ctx.set_cursor_icon(if interactive {
            CursorIcon::PointingHand
        } else {
            CursorIcon::NotAllowed
        });
    }

    let country = quiz.controller.countries().get(region_id);
    let name = country.map(|c| c.name.as_str()).unwrap_or(UNKNOWN_COUNTRY);
    let text = match (quiz.surface.style(region_id), country) {
        (RegionStyle::Filled(_), Some(c)) => match c.raw_export.as_deref() {
            Some(export) => format!("{}: {}", name, export.trim()),
            None => name.to_string(),
        },
        (RegionStyle::NoData, _) => format!("{} (no data)", name),
        _ => name.to_string(),
    };
    response.clone().on_hover_text_at_pointer(text);
}

fn handle_canvas_interaction(response: &egui::Response, rect: &Rect, view: &mut MapView) {
    // Handle dragging for panning
    if response.dragged() {
        view.pan_offset += response.drag_delta();
        response.ctx.set_cursor_icon(CursorIcon::Grabbing);
    }

    // Handle scroll for zooming relative to cursor position
    if response.hovered() {
        let scroll_delta = response.ctx.input(|i| i.raw_scroll_delta);
        if scroll_delta.y != 0.0 {
            let zoom_factor = 1.0 + scroll_delta.y * 0.001;
            let cursor_rel = response
                .hover_pos()
                .map(|pos| pos - rect.center())
                .unwrap_or_default();
            view.zoom_around(zoom_factor, cursor_rel);
        }
    }

    // Reset view on double-click
    if response.double_clicked() {
        view.reset();
    }
}
