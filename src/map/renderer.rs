//! Map rendering.
//!
//! Paints region fills, the "no data" stripes, outlines and the hover and
//! selection highlights onto the egui canvas.

use super::{MapGraphic, MapProjection, Region};
use crate::quiz::{MapSurface, RegionStyle};
use crate::ui::colors::map as colors;
use eframe::egui::{
    self, epaint::Vertex, Color32, ColorImage, Mesh, Painter, Pos2, Shape, Stroke, TextureHandle,
    TextureId, TextureOptions,
};
use std::str::FromStr;

/// Side of the square "no data" tile in pixels.
const STRIPE_TILE: usize = 4;

/// Parses a CSS color (`#rgb`, `#rrggbb`, `rgb(...)`, named colors).
///
/// Anything unparsable falls back to the neutral category gray.
pub fn parse_css_color(css: &str) -> Color32 {
    match svgtypes::Color::from_str(css.trim()) {
        Ok(c) => Color32::from_rgba_unmultiplied(c.red, c.green, c.blue, c.alpha),
        Err(_) => {
            log::debug!("Unparsable color '{}', using gray", css);
            colors::FALLBACK
        }
    }
}

/// Pixels of the "no data" tile: gray with one white diagonal.
fn stripe_tile() -> ColorImage {
    let mut rgba = Vec::with_capacity(STRIPE_TILE * STRIPE_TILE * 4);
    for y in 0..STRIPE_TILE {
        for x in 0..STRIPE_TILE {
            let color = if x + y == STRIPE_TILE - 1 {
                colors::NO_DATA_STRIPE
            } else {
                colors::NO_DATA_BACKGROUND
            };
            rgba.extend_from_slice(&color.to_array());
        }
    }
    ColorImage::from_rgba_unmultiplied([STRIPE_TILE, STRIPE_TILE], &rgba)
}

/// Which regions get extra emphasis this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Highlight<'a> {
    pub selected: Option<&'a str>,
    pub hovered: Option<&'a str>,
}

/// Paints the map; owns the GPU texture for the stripe pattern.
#[derive(Default)]
pub struct MapPainter {
    stripes: Option<TextureHandle>,
}

impl MapPainter {
    pub fn new() -> Self {
        Self::default()
    }

    fn stripe_texture(&mut self, ctx: &egui::Context) -> TextureId {
        self.stripes
            .get_or_insert_with(|| {
                ctx.load_texture("no-data-stripes", stripe_tile(), TextureOptions::NEAREST_REPEAT)
            })
            .id()
    }

    /// Draws every visible region, back to front.
    pub fn paint(
        &mut self,
        painter: &Painter,
        map: &MapGraphic,
        surface: &MapSurface,
        projection: &MapProjection,
        highlight: Highlight<'_>,
    ) {
        let stripes = self.stripe_texture(painter.ctx());

        // Solid fills share one untextured mesh, stripes one textured mesh.
        let mut fills = Mesh::default();
        let mut patterned = Mesh::with_texture(stripes);
        let mut outlines = Vec::new();
        let mut drawn = 0usize;
        let outline = Stroke::new(0.5, colors::OUTLINE);

        for region in &map.regions {
            if !projection.bbox_visible(&region.bounds) {
                continue;
            }
            drawn += 1;

            match surface.style(&region.id) {
                RegionStyle::Default => add_fill(&mut fills, region, projection, colors::LAND),
                RegionStyle::Filled(css) => {
                    add_fill(&mut fills, region, projection, parse_css_color(css))
                }
                RegionStyle::NoData => add_pattern(&mut patterned, region, projection),
            }
            outlines.extend(outline_shapes(region, projection, outline));
        }

        painter.add(Shape::mesh(fills));
        painter.add(Shape::mesh(patterned));
        painter.extend(outlines);

        if let Some(region) = highlight
            .hovered
            .filter(|id| Some(*id) != highlight.selected)
            .and_then(|id| map.region(id))
        {
            painter.extend(outline_shapes(region, projection, Stroke::new(1.5, colors::HOVER)));
        }
        if let Some(region) = highlight.selected.and_then(|id| map.region(id)) {
            painter.extend(outline_shapes(region, projection, Stroke::new(2.5, colors::SELECTED)));
        }

        log::trace!("Painted {}/{} regions", drawn, map.regions.len());
    }
}

fn add_fill(mesh: &mut Mesh, region: &Region, projection: &MapProjection, color: Color32) {
    for triangle in &region.triangles {
        let base = mesh.vertices.len() as u32;
        for coord in triangle {
            mesh.colored_vertex(projection.map_to_screen(*coord), color);
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }
}

/// Stripe fill; texture coordinates follow screen pixels so the tile
/// repeats at a fixed size whatever the zoom.
fn add_pattern(mesh: &mut Mesh, region: &Region, projection: &MapProjection) {
    let tile = STRIPE_TILE as f32;
    for triangle in &region.triangles {
        let base = mesh.vertices.len() as u32;
        for coord in triangle {
            let pos = projection.map_to_screen(*coord);
            mesh.vertices.push(Vertex {
                pos,
                uv: Pos2::new(pos.x / tile, pos.y / tile),
                color: Color32::WHITE,
            });
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }
}

fn outline_shapes(region: &Region, projection: &MapProjection, stroke: Stroke) -> Vec<Shape> {
    region
        .rings()
        .filter_map(|ring| {
            let points: Vec<Pos2> = ring.coords().map(|c| projection.map_to_screen(*c)).collect();
            (points.len() >= 3).then(|| Shape::closed_line(points, stroke))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_css_color() {
        assert_eq!(parse_css_color("#ff0000"), Color32::from_rgb(255, 0, 0));
        assert_eq!(parse_css_color(" #0f0 "), Color32::from_rgb(0, 255, 0));
        assert_eq!(parse_css_color("rgb(0, 0, 255)"), Color32::from_rgb(0, 0, 255));
        assert_eq!(parse_css_color("teal"), Color32::from_rgb(0, 128, 128));
    }

    #[test]
    fn test_bad_color_falls_back_to_gray() {
        assert_eq!(parse_css_color("not-a-color"), colors::FALLBACK);
        assert_eq!(parse_css_color(""), colors::FALLBACK);
    }

    #[test]
    fn test_stripe_tile() {
        let tile = stripe_tile();
        assert_eq!(tile.size, [STRIPE_TILE, STRIPE_TILE]);
        let white = tile.pixels.iter().filter(|p| **p == colors::NO_DATA_STRIPE).count();
        assert_eq!(white, STRIPE_TILE);
        // bottom-left to top-right diagonal
        assert_eq!(tile.pixels[(STRIPE_TILE - 1) * STRIPE_TILE], colors::NO_DATA_STRIPE);
        assert_eq!(tile.pixels[0], colors::NO_DATA_BACKGROUND);
    }
}
