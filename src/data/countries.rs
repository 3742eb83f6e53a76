//! Country dataset: one record per map region with its main export.

use serde::Deserialize;
use std::collections::HashMap;

/// Country record as it appears in `countries_and_exports.json`.
#[derive(Debug, Clone, Deserialize)]
struct RawCountry {
    #[serde(rename = "ISO_A3")]
    id: String,
    #[serde(rename = "Final Display Name", default)]
    name: Option<String>,
    /// Usually a string, but any JSON value is tolerated (null, numbers, ...).
    #[serde(rename = "Main Exports", default)]
    main_exports: Option<serde_json::Value>,
}

/// A country and its (normalized) main export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRecord {
    /// Region identifier (ISO A3 code), shared with the map graphic.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Main export exactly as given in the dataset.
    pub raw_export: Option<String>,
    /// Trimmed, lower-cased main export. `None` means no export data.
    pub normalized_export: Option<String>,
}

impl CountryRecord {
    pub fn new(id: &str, name: &str, raw_export: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            raw_export: raw_export.map(str::to_string),
            normalized_export: raw_export.and_then(normalize_export),
        }
    }

    /// Whether the country can take part in the quiz.
    pub fn has_export(&self) -> bool {
        self.normalized_export.is_some()
    }
}

/// Canonical join key between countries and category products.
///
/// Returns `None` for blank strings so they are treated as missing data.
pub fn normalize_export(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// All country records with lookup by region identifier.
#[derive(Debug, Clone, Default)]
pub struct CountryIndex {
    records: Vec<CountryRecord>,
    by_id: HashMap<String, usize>,
}

impl CountryIndex {
    /// Builds the index; the first record wins when an id repeats.
    pub fn new(records: Vec<CountryRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            by_id.entry(record.id.clone()).or_insert(idx);
        }
        Self { records, by_id }
    }

    /// Parses the JSON country dataset.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: Vec<RawCountry> = serde_json::from_str(json)?;

        let records = raw
            .into_iter()
            .map(|country| {
                let raw_export = match &country.main_exports {
                    Some(serde_json::Value::String(s)) => Some(s.as_str()),
                    _ => None,
                };
                let name = country.name.as_deref().unwrap_or(&country.id);
                CountryRecord::new(&country.id, name, raw_export)
            })
            .collect();

        Ok(Self::new(records))
    }

    pub fn get(&self, id: &str) -> Option<&CountryRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    /// Normalized export for a region, `None` when the region is unknown or has no data.
    pub fn export_of(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(|c| c.normalized_export.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Display-name ordering used by every picker: case-insensitive, ties by raw string.
pub fn compare_display_names(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
