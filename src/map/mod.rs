//! World map: graphic parsing, projection and rendering.
//!
//! The map graphic is an SVG whose element ids match the country dataset.
//! Regions are drawn on the egui canvas rather than injected into a page.

mod projection;
mod renderer;
mod svg;

pub use projection::MapProjection;
pub use renderer::{parse_css_color, Highlight, MapPainter};
pub use svg::{MapGraphic, Region};
