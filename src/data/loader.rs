//! Asset loading pipeline.
//!
//! The three quiz assets are fetched one after another, each step depending
//! on the previous one. The first failure ends the chain and is handed back
//! to the UI instead of leaving it half initialized.
//!
//! Uses channel-based communication to bridge the async loader
//! with egui's synchronous update loop.

use super::categories::{parse_categories, ExportTable};
use super::countries::CountryIndex;
use crate::error::LoadError;
use crate::map::MapGraphic;
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};

pub const COUNTRIES_ASSET: &str = "countries_and_exports.json";
pub const CATEGORIES_ASSET: &str = "categorized_exports.json";
pub const MAP_ASSET: &str = "map.svg";

/// Reference data for one quiz, immutable once loaded.
pub struct QuizAssets {
    pub countries: CountryIndex,
    pub exports: ExportTable,
    pub map: MapGraphic,
}

pub type LoadResult = Result<QuizAssets, LoadError>;

/// Somewhere asset text can be read from.
#[allow(async_fn_in_trait)] // Only used with concrete types
pub trait AssetSource {
    async fn fetch_text(&self, asset: &str) -> Result<String, LoadError>;
}

/// Step 1: country dataset with normalized exports.
pub async fn load_countries<S: AssetSource>(source: &S) -> Result<CountryIndex, LoadError> {
    let json = source.fetch_text(COUNTRIES_ASSET).await?;
    let countries =
        CountryIndex::from_json(&json).map_err(|e| LoadError::parse(COUNTRIES_ASSET, e))?;

    let with_exports = countries.iter().filter(|c| c.has_export()).count();
    log::info!(
        "Loaded {} countries ({} with export data)",
        countries.len(),
        with_exports
    );
    Ok(countries)
}

/// Step 2: categories flattened into the export table.
pub async fn load_exports<S: AssetSource>(source: &S) -> Result<ExportTable, LoadError> {
    let json = source.fetch_text(CATEGORIES_ASSET).await?;
    let categories = parse_categories(&json).map_err(|e| LoadError::parse(CATEGORIES_ASSET, e))?;
    let exports = ExportTable::from_categories(&categories);

    log::info!(
        "Loaded {} categories, {} distinct exports",
        categories.len(),
        exports.len()
    );
    if exports.is_empty() {
        log::warn!("Category dataset lists no products; every answer will be wrong");
    }
    Ok(exports)
}

/// Step 3: the map graphic; country ids decide which groups are regions.
pub async fn load_map<S: AssetSource>(
    source: &S,
    countries: &CountryIndex,
) -> Result<MapGraphic, LoadError> {
    let svg = source.fetch_text(MAP_ASSET).await?;
    let map = MapGraphic::parse(&svg, |id| countries.get(id).is_some())?;
    log::info!("Loaded map with {} regions", map.regions.len());
    Ok(map)
}

/// Runs the whole chain: countries, then categories, then the map.
pub async fn load_assets<S: AssetSource>(source: &S) -> LoadResult {
    let start = web_time::Instant::now();

    let countries = load_countries(source).await?;
    let exports = load_exports(source).await?;
    let map = load_map(source, &countries).await?;

    log::info!("Assets loaded in {:.0?}", start.elapsed());
    Ok(QuizAssets {
        countries,
        exports,
        map,
    })
}

/// Fetches assets over HTTP relative to a base URL.
#[cfg(target_arch = "wasm32")]
pub struct HttpSource {
    base: String,
}

#[cfg(target_arch = "wasm32")]
impl HttpSource {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl AssetSource for HttpSource {
    async fn fetch_text(&self, asset: &str) -> Result<String, LoadError> {
        use gloo_net::http::Request;

        // Relative URLs resolve against the page, which works under Trunk and static hosting.
        let url = asset_location(&self.base, asset);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| LoadError::fetch(asset, e.to_string()))?;

        if !response.ok() {
            return Err(LoadError::fetch(
                asset,
                format!("HTTP {} for {}", response.status(), url),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| LoadError::fetch(asset, e.to_string()))
    }
}

/// Reads assets from a local directory.
#[cfg(not(target_arch = "wasm32"))]
pub struct DirSource {
    root: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirSource {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AssetSource for DirSource {
    async fn fetch_text(&self, asset: &str) -> Result<String, LoadError> {
        let path = asset_location(&self.root, asset);
        std::fs::read_to_string(&path).map_err(|source| LoadError::Io { path, source })
    }
}

/// Joins a base URL prefix and an asset name.
pub fn asset_location(base: &str, asset: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() || base == "." {
        asset.to_string()
    } else {
        format!("{}/{}", base, asset)
    }
}

/// Channel-based loader for the quiz assets.
///
/// Loading is async but egui's update() is synchronous.
/// This struct provides a channel to pass the result from the async
/// loading task back to the UI thread.
pub struct AssetLoadChannel {
    sender: Sender<LoadResult>,
    receiver: Receiver<LoadResult>,
}

impl Default for AssetLoadChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetLoadChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Spawns the loading chain.
    ///
    /// On WASM: fetches relative to `asset_base` with spawn_local.
    /// On native: reads from the `asset_base` directory on a new thread.
    ///
    /// When loading completes (or fails), the result is sent through
    /// the channel and ctx.request_repaint() is called to trigger a UI update.
    pub fn load(&self, ctx: egui::Context, asset_base: String) {
        let sender = self.sender.clone();
        log::info!("Loading quiz assets from '{}'", asset_base);

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                let result = load_assets(&HttpSource::new(&asset_base)).await;
                let _ = sender.send(result);
                ctx.request_repaint();
            });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            std::thread::spawn(move || {
                let result = pollster::block_on(load_assets(&DirSource::new(&asset_base)));
                let _ = sender.send(result);
                ctx.request_repaint();
            });
        }
    }

    /// Non-blocking check for a completed load.
    ///
    /// Returns Some(result) once loading finished,
    /// None if no result is ready yet.
    pub fn try_recv(&self) -> Option<LoadResult> {
        self.receiver.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory assets that remember the order they were requested in.
    struct MemorySource {
        files: HashMap<&'static str, &'static str>,
        requested: RefCell<Vec<String>>,
    }

    impl MemorySource {
        fn new(files: &[(&'static str, &'static str)]) -> Self {
            Self {
                files: files.iter().copied().collect(),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl AssetSource for MemorySource {
        async fn fetch_text(&self, asset: &str) -> Result<String, LoadError> {
            self.requested.borrow_mut().push(asset.to_string());
            self.files
                .get(asset)
                .map(|s| s.to_string())
                .ok_or_else(|| LoadError::fetch(asset, "HTTP 404"))
        }
    }

    const COUNTRIES: &str = r#"[
        {"ISO_A3": "A1", "Final Display Name": "Alphaland", "Main Exports": "Oil"},
        {"ISO_A3": "B2", "Final Display Name": "Betastan", "Main Exports": null}
    ]"#;
    const CATEGORIES: &str = r##"{"Energy": {"color": "#ff0000", "products": ["Oil"]}}"##;
    const MAP: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 10">
        <path id="A1" d="M0 0 H10 V10 H0 Z"/>
        <path id="B2" d="M10 0 H20 V10 H10 Z"/>
    </svg>"#;

    #[test]
    fn test_loads_in_order() {
        let source = MemorySource::new(&[
            (COUNTRIES_ASSET, COUNTRIES),
            (CATEGORIES_ASSET, CATEGORIES),
            (MAP_ASSET, MAP),
        ]);

        let assets = pollster::block_on(load_assets(&source)).unwrap();
        assert_eq!(assets.countries.len(), 2);
        assert_eq!(assets.exports.color_for("oil"), Some("#ff0000"));
        assert_eq!(assets.map.regions.len(), 2);
        assert_eq!(
            *source.requested.borrow(),
            vec![COUNTRIES_ASSET, CATEGORIES_ASSET, MAP_ASSET]
        );
    }

    #[test]
    fn test_stops_at_first_failure() {
        let source = MemorySource::new(&[(COUNTRIES_ASSET, COUNTRIES), (MAP_ASSET, MAP)]);

        let err = pollster::block_on(load_assets(&source)).err().unwrap();
        assert!(matches!(err, LoadError::Fetch { ref asset, .. } if asset == CATEGORIES_ASSET));
        // The map is never requested once categories fail
        assert_eq!(
            *source.requested.borrow(),
            vec![COUNTRIES_ASSET, CATEGORIES_ASSET]
        );
    }

    #[test]
    fn test_parse_failure_names_asset() {
        let source = MemorySource::new(&[(COUNTRIES_ASSET, "{ not json")]);

        let err = pollster::block_on(load_assets(&source)).err().unwrap();
        assert!(matches!(err, LoadError::Parse { ref asset, .. } if asset == COUNTRIES_ASSET));
    }

    #[test]
    fn test_bad_map_is_reported() {
        let source = MemorySource::new(&[
            (COUNTRIES_ASSET, COUNTRIES),
            (CATEGORIES_ASSET, CATEGORIES),
            (MAP_ASSET, "<svg xmlns=\"http://www.w3.org/2000/svg\"/>"),
        ]);

        let err = pollster::block_on(load_assets(&source)).err().unwrap();
        assert!(matches!(err, LoadError::Map(_)));
    }

    #[test]
    fn test_country_groups_become_regions() {
        let map = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 10">
            <g id="A1">
                <path id="A1-mainland" d="M0 0 H8 V10 H0 Z"/>
                <path id="A1-island" d="M9 0 H10 V1 H9 Z"/>
            </g>
            <path id="B2" d="M10 0 H20 V10 H10 Z"/>
        </svg>"#;
        let source = MemorySource::new(&[
            (COUNTRIES_ASSET, COUNTRIES),
            (CATEGORIES_ASSET, CATEGORIES),
            (MAP_ASSET, map),
        ]);

        let assets = pollster::block_on(load_assets(&source)).unwrap();
        let ids: Vec<&str> = assets.map.ids().collect();
        assert_eq!(ids, vec!["A1", "B2"]);
    }

    #[test]
    fn test_asset_location() {
        assert_eq!(asset_location("", MAP_ASSET), "map.svg");
        assert_eq!(asset_location(".", MAP_ASSET), "map.svg");
        assert_eq!(asset_location("assets/", MAP_ASSET), "assets/map.svg");
        assert_eq!(
            asset_location("https://example.org/quiz", MAP_ASSET),
            "https://example.org/quiz/map.svg"
        );
    }

    #[test]
    fn test_loads_bundled_assets() {
        let source = DirSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"));
        let assets = pollster::block_on(load_assets(&source)).unwrap();

        assert_eq!(assets.countries.export_of("CAN"), Some("crude oil"));
        assert_eq!(assets.exports.color_for("crude oil"), Some("#d62728"));
        assert!(assets.map.region("AUS").is_some());
        // Every country in the bundled dataset has a region
        for country in assets.countries.iter() {
            assert!(assets.map.region(&country.id).is_some(), "{}", country.id);
        }
    }

    #[test]
    fn test_dir_source_missing_file() {
        let source = DirSource::new("/nonexistent-export-atlas-assets");
        let err = pollster::block_on(source.fetch_text(MAP_ASSET)).err().unwrap();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
