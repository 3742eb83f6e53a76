//! UI modules for the Export Atlas application.
//!
//! The UI is split into distinct panels:
//! - Top bar: Title, status line and tally
//! - Left panel: Country and export pickers, submit, view reset
//! - Central canvas: The map

mod canvas;
pub mod colors;
mod controls_panel;
mod top_bar;

pub use canvas::render_canvas;
pub use controls_panel::render_controls_panel;
pub use top_bar::render_top_bar;
