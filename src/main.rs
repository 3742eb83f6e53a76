#![warn(clippy::all)]

//! Export Atlas - a world map quiz about what countries sell.
//!
//! Click a country, guess its main export, and a correct answer paints the
//! country in the color of the export's category. Runs in the browser (WASM)
//! or as a native window reading its assets from a local directory.

mod data;
mod error;
mod map;
mod quiz;
mod state;
mod ui;

use data::AssetLoadChannel;
use eframe::egui;
use map::MapPainter;
use state::AppState;

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Export Atlas",
        native_options,
        Box::new(|cc| Ok(Box::new(QuizApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(QuizApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct QuizApp {
    /// Application state containing all sub-states
    state: AppState,

    /// Channel delivering the loaded assets (or the first load error)
    asset_channel: AssetLoadChannel,

    /// Map painter holding the "no data" pattern texture
    map_painter: MapPainter,
}

impl QuizApp {
    /// Creates the app and starts loading the quiz assets.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let config = state::url_state::load_config();
        log::info!("Starting quiz with {:?}", config);

        let asset_channel = AssetLoadChannel::new();
        asset_channel.load(cc.egui_ctx.clone(), config.asset_base.clone());

        Self {
            state: AppState::new(config),
            asset_channel,
            map_painter: MapPainter::new(),
        }
    }
}

impl eframe::App for QuizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed asset loading
        if let Some(result) = self.asset_channel.try_recv() {
            match result {
                Ok(assets) => self.state.start_quiz(assets),
                Err(e) => {
                    log::error!("Asset loading failed: {}", e);
                    self.state.fail(e.to_string());
                }
            }
        }

        // Side and top/bottom panels must be rendered before CentralPanel
        ui::render_top_bar(ctx, &self.state);
        ui::render_controls_panel(ctx, &mut self.state);
        ui::render_canvas(ctx, &mut self.state, &mut self.map_painter);
    }
}
