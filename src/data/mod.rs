//! Reference data for the quiz.
//!
//! ## Datasets
//! - `countries`: one record per country with its (normalized) main export
//! - `categories`: colored export categories, flattened into an [`ExportTable`]
//!
//! ## Loading
//! `loader` fetches `countries_and_exports.json`, `categorized_exports.json`
//! and `map.svg` in that order and hands the result to the UI thread.
//!
//! Normalized export names (trimmed, lower-cased) are the join key between
//! countries and category products.

pub mod categories;
pub mod countries;
pub mod loader;

pub use categories::{ExportTable, FALLBACK_COLOR};
pub use countries::{compare_display_names, CountryIndex};
pub use loader::{AssetLoadChannel, QuizAssets};
