//! Rendering interface between the quiz logic and the UI.
//!
//! The controller never touches egui directly; it only describes how regions
//! and controls should look through [`QuizSurface`].

use std::collections::{HashMap, HashSet};

/// How a map region is painted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RegionStyle {
    /// Base land color, no override.
    #[default]
    Default,
    /// Striped gray "no data" pattern.
    NoData,
    /// Solid fill with a CSS color string (e.g. `#ff0000`).
    Filled(String),
}

/// Everything the quiz can change about what the user sees.
pub trait QuizSurface {
    fn set_region_style(&mut self, region_id: &str, style: RegionStyle);
    fn set_region_interactive(&mut self, region_id: &str, interactive: bool);
    fn set_submit_enabled(&mut self, enabled: bool);
    fn set_status(&mut self, message: &str);
    fn set_tally(&mut self, tally: u32);
}

/// In-memory surface read by the canvas and panels every frame.
#[derive(Debug, Default)]
pub struct MapSurface {
    styles: HashMap<String, RegionStyle>,
    interactive: HashSet<String>,
    submit_enabled: bool,
    status: String,
    tally: Option<u32>,
}

impl MapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self, region_id: &str) -> &RegionStyle {
        static DEFAULT: RegionStyle = RegionStyle::Default;
        self.styles.get(region_id).unwrap_or(&DEFAULT)
    }

    pub fn is_interactive(&self, region_id: &str) -> bool {
        self.interactive.contains(region_id)
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Tally to display, `None` until the quiz publishes one.
    pub fn tally(&self) -> Option<u32> {
        self.tally
    }
}

impl QuizSurface for MapSurface {
    fn set_region_style(&mut self, region_id: &str, style: RegionStyle) {
        if style == RegionStyle::Default {
            self.styles.remove(region_id);
        } else {
            self.styles.insert(region_id.to_string(), style);
        }
    }

    fn set_region_interactive(&mut self, region_id: &str, interactive: bool) {
        if interactive {
            self.interactive.insert(region_id.to_string());
        } else {
            self.interactive.remove(region_id);
        }
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_status(&mut self, message: &str) {
        self.status = message.to_string();
    }

    fn set_tally(&mut self, tally: u32) {
        self.tally = Some(tally);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unstyled_regions_use_default() {
        let mut surface = MapSurface::new();
        assert_eq!(surface.style("A1"), &RegionStyle::Default);

        surface.set_region_style("A1", RegionStyle::Filled("#ff0000".into()));
        assert_eq!(surface.style("A1"), &RegionStyle::Filled("#ff0000".into()));

        surface.set_region_style("A1", RegionStyle::Default);
        assert_eq!(surface.style("A1"), &RegionStyle::Default);
    }

    #[test]
    fn test_interactive_toggle() {
        let mut surface = MapSurface::new();
        surface.set_region_interactive("A1", true);
        assert!(surface.is_interactive("A1"));
        surface.set_region_interactive("A1", false);
        assert!(!surface.is_interactive("A1"));
    }
}
