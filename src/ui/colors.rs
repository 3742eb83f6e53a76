//! Centralized color constants for the UI.
//!
//! This module provides consistent colors across panels and the map.

use eframe::egui::Color32;

/// General UI colors for labels and values.
pub mod ui {
    use super::Color32;

    /// Muted gray for labels.
    pub const LABEL: Color32 = Color32::from_rgb(140, 140, 140);
    /// Emphasized color for the tally.
    pub const ACTIVE: Color32 = Color32::from_rgb(100, 180, 255);
    /// Correct answer.
    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    /// Load failures.
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
}

/// Colors for the map canvas.
pub mod map {
    use super::Color32;

    /// Canvas background behind the regions.
    pub const OCEAN: Color32 = Color32::from_rgb(24, 36, 52);
    /// Unsolved regions.
    pub const LAND: Color32 = Color32::from_rgb(214, 208, 190);
    /// Region borders.
    pub const OUTLINE: Color32 = Color32::from_rgb(70, 70, 70);
    /// Border of the region under the pointer.
    pub const HOVER: Color32 = Color32::from_rgb(255, 255, 255);
    /// Border of the pending selection.
    pub const SELECTED: Color32 = Color32::from_rgb(255, 200, 40);
    /// "No data" tile background, `#808080`.
    pub const NO_DATA_BACKGROUND: Color32 = Color32::from_rgb(128, 128, 128);
    /// "No data" tile diagonal.
    pub const NO_DATA_STRIPE: Color32 = Color32::WHITE;
    /// Unparsable category colors.
    pub const FALLBACK: Color32 = Color32::from_rgb(128, 128, 128);
}
