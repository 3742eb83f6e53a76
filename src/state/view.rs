//! Map view state: zoom and pan of the canvas.

use eframe::egui::Vec2;

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 40.0;

/// Visualization state for the map canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    /// Current zoom level (1.0 = whole map fitted)
    pub zoom: f32,

    /// Current pan offset from center, in screen pixels
    pub pan_offset: Vec2,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
        }
    }
}

impl MapView {
    /// Back to the fitted, centered map.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_reset(&self) -> bool {
        *self == Self::default()
    }

    /// Zooms by `factor` keeping the map point under `cursor_rel` fixed.
    ///
    /// `cursor_rel` is the cursor position relative to the canvas center.
    pub fn zoom_around(&mut self, factor: f32, cursor_rel: Vec2) {
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = new_zoom / self.zoom;
        self.pan_offset = cursor_rel * (1.0 - ratio) + self.pan_offset * ratio;
        self.zoom = new_zoom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_keeps_cursor_point() {
        let mut view = MapView::default();
        let cursor = Vec2::new(100.0, -50.0);
        view.zoom_around(2.0, cursor);
        assert_eq!(view.zoom, 2.0);
        // Map point under cursor was at `cursor / 1`; now at `cursor / 2` relative to pan.
        let map_before = cursor;
        let map_after = (cursor - view.pan_offset) / view.zoom;
        assert!((map_before - map_after).length() < 1e-4);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut view = MapView::default();
        view.zoom_around(1000.0, Vec2::ZERO);
        assert_eq!(view.zoom, MAX_ZOOM);
        view.zoom_around(0.0001, Vec2::ZERO);
        assert_eq!(view.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_reset() {
        let mut view = MapView::default();
        view.zoom_around(3.0, Vec2::new(10.0, 10.0));
        view.pan_offset += Vec2::new(5.0, 0.0);
        assert!(!view.is_reset());
        view.reset();
        assert!(view.is_reset());
    }
}
