//! Export categories and the flattened export table built from them.

use super::countries::{compare_display_names, normalize_export};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;

/// Color used for a correct guess when the export has no registered color.
pub const FALLBACK_COLOR: &str = "#808080";

/// Category details as they appear in `categorized_exports.json`.
#[derive(Debug, Clone, Deserialize)]
struct RawCategory {
    color: String,
    #[serde(default)]
    products: Vec<String>,
}

/// A labeled, colored grouping of export products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub color: String,
    pub products: Vec<String>,
}

/// Parses the category dataset, keeping the categories in file order.
pub fn parse_categories(json: &str) -> Result<Vec<Category>, serde_json::Error> {
    let raw: IndexMap<String, RawCategory> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .map(|(name, details)| Category {
            name,
            color: details.color,
            products: details.products,
        })
        .collect())
}

/// One selectable export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    /// Join key (trimmed, lower-cased).
    pub normalized: String,
    /// Product name as first seen, trimmed.
    pub display: String,
    /// Color of the first category listing this product.
    pub color: String,
    /// Name of the first category listing this product.
    pub category: String,
}

/// De-duplicated view of every product across all categories.
///
/// Each normalized product name maps to exactly one entry; when a product is
/// listed by several categories, the first occurrence (in file order) wins.
#[derive(Debug, Clone, Default)]
pub struct ExportTable {
    entries: Vec<ExportEntry>,
    by_name: HashMap<String, usize>,
    category_order: Vec<String>,
}

impl ExportTable {
    pub fn from_categories(categories: &[Category]) -> Self {
        let mut table = Self::default();

        for category in categories {
            table.category_order.push(category.name.clone());

            for product in &category.products {
                let Some(normalized) = normalize_export(product) else {
                    continue;
                };
                if table.by_name.contains_key(&normalized) {
                    log::debug!(
                        "Export '{}' in category '{}' already registered, keeping first",
                        product.trim(),
                        category.name
                    );
                    continue;
                }

                table.by_name.insert(normalized.clone(), table.entries.len());
                table.entries.push(ExportEntry {
                    normalized,
                    display: product.trim().to_string(),
                    color: category.color.clone(),
                    category: category.name.clone(),
                });
            }
        }

        table
    }

    pub fn get(&self, normalized: &str) -> Option<&ExportEntry> {
        self.by_name.get(normalized).map(|&idx| &self.entries[idx])
    }

    /// Category color registered for an export, if any.
    pub fn color_for(&self, normalized: &str) -> Option<&str> {
        self.get(normalized).map(|e| e.color.as_str())
    }

    pub fn display_name(&self, normalized: &str) -> Option<&str> {
        self.get(normalized).map(|e| e.display.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by display name, as shown in the flat export picker.
    pub fn sorted(&self) -> Vec<&ExportEntry> {
        let mut sorted: Vec<&ExportEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| compare_display_names(&a.display, &b.display));
        sorted
    }

    /// Entries grouped by category (file order), each group sorted by display name.
    ///
    /// A product appears only under the category it was first registered with;
    /// categories left without products are omitted.
    pub fn grouped(&self) -> Vec<(&str, Vec<&ExportEntry>)> {
        self.category_order
            .iter()
            .filter_map(|category| {
                let mut products: Vec<&ExportEntry> = self
                    .entries
                    .iter()
                    .filter(|e| &e.category == category)
                    .collect();
                if products.is_empty() {
                    return None;
                }
                products.sort_by(|a, b| compare_display_names(&a.display, &b.display));
                Some((category.as_str(), products))
            })
            .collect()
    }
}
