//! Map projection and coordinate transformation.
//!
//! Handles converting between map coordinates (SVG user space, y down) and
//! screen coordinates for rendering on the canvas.

use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::{Coord, Rect as MapRect};

/// Projection for converting map to screen coordinates.
#[derive(Debug, Clone)]
pub struct MapProjection {
    /// Area of map space fitted into the screen at zoom 1
    pub map_bounds: MapRect<f64>,
    /// Current zoom level
    pub zoom: f32,
    /// Pan offset in screen pixels
    pub pan_offset: Vec2,
    /// Screen rectangle for the canvas
    pub screen_rect: Rect,
}

impl MapProjection {
    /// Creates a projection that fits `map_bounds` into the canvas.
    pub fn new(map_bounds: MapRect<f64>) -> Self {
        Self {
            map_bounds,
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
            screen_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)),
        }
    }

    /// Updates the projection with current view state.
    pub fn update(&mut self, zoom: f32, pan_offset: Vec2, screen_rect: Rect) {
        self.zoom = zoom;
        self.pan_offset = pan_offset;
        self.screen_rect = screen_rect;
    }

    /// Screen pixels per map unit at zoom 1.
    ///
    /// The whole map stays visible and keeps its aspect ratio (`meet`).
    fn fit_scale(&self) -> f64 {
        let width = self.map_bounds.width();
        let height = self.map_bounds.height();
        if width <= 0.0 || height <= 0.0 {
            return 1.0;
        }
        let sx = self.screen_rect.width() as f64 / width;
        let sy = self.screen_rect.height() as f64 / height;
        sx.min(sy)
    }

    fn scale(&self) -> f64 {
        self.fit_scale() * self.zoom as f64
    }

    /// Converts map coordinates to screen position.
    pub fn map_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let map_center = self.map_bounds.center();
        let scale = self.scale();
        let center = self.screen_rect.center() + self.pan_offset;

        Pos2::new(
            center.x + ((coord.x - map_center.x) * scale) as f32,
            center.y + ((coord.y - map_center.y) * scale) as f32,
        )
    }

    /// Converts screen position to map coordinates.
    pub fn screen_to_map(&self, pos: Pos2) -> Coord<f64> {
        let map_center = self.map_bounds.center();
        let scale = self.scale();
        let center = self.screen_rect.center() + self.pan_offset;

        Coord {
            x: map_center.x + (pos.x - center.x) as f64 / scale,
            y: map_center.y + (pos.y - center.y) as f64 / scale,
        }
    }

    /// Checks if a map-space bounding box intersects the visible screen area.
    pub fn bbox_visible(&self, bounds: &MapRect<f64>) -> bool {
        let min = self.map_to_screen(bounds.min());
        let max = self.map_to_screen(bounds.max());
        Rect::from_two_pos(min, max).intersects(self.screen_rect)
    }
}
