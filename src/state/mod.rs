//! Application state management.
//!
//! State is organized into logical groupings: startup configuration, the
//! loading phase, the map view, and the running quiz once assets are in.

mod config;
pub mod url_state;
mod view;

pub use config::QuizConfig;
pub use view::MapView;

use crate::data::QuizAssets;
use crate::map::MapGraphic;
use crate::quiz::{MapSurface, QuizController, SelectionSource, SubmitOutcome};

/// Where asset loading stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Loading,
    Ready,
    /// Loading failed; holds the message shown to the user.
    Failed(String),
}

/// A quiz in progress together with what it is drawn on.
pub struct ActiveQuiz {
    pub controller: QuizController,
    pub surface: MapSurface,
    pub map: MapGraphic,
}

impl ActiveQuiz {
    /// Wires loaded assets into a controller and decorates the map.
    pub fn new(assets: QuizAssets, config: &QuizConfig) -> Self {
        let QuizAssets {
            countries,
            exports,
            map,
        } = assets;

        let mut controller = QuizController::new(countries, exports).with_tally(config.show_tally);
        let mut surface = MapSurface::new();
        controller.initialize(map.ids(), &mut surface);

        Self {
            controller,
            surface,
            map,
        }
    }

    pub fn select(&mut self, region_id: &str, source: SelectionSource) -> bool {
        self.controller.select(region_id, source, &mut self.surface)
    }

    pub fn choose_export(&mut self, normalized: &str) {
        self.controller.choose_export(normalized);
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.controller.submit(&mut self.surface);
        if let SubmitOutcome::Correct { .. } = outcome {
            log::info!("Correct answer, {} so far", self.controller.tally());
        }
        outcome
    }
}

/// Root application state containing all sub-states.
#[derive(Default)]
pub struct AppState {
    /// Startup switches
    pub config: QuizConfig,

    /// Asset loading progress
    pub phase: LoadPhase,

    /// Canvas zoom/pan
    pub view: MapView,

    /// Region under the pointer, refreshed every frame
    pub hovered_region: Option<String>,

    /// The quiz, once assets are loaded
    pub quiz: Option<ActiveQuiz>,
}

impl AppState {
    pub fn new(config: QuizConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Status line for the top bar.
    pub fn status_message(&self) -> &str {
        match (&self.phase, &self.quiz) {
            (LoadPhase::Failed(message), _) => message,
            (_, Some(quiz)) => quiz.surface.status(),
            _ => "Loading quiz data...",
        }
    }

    /// Installs freshly loaded assets.
    pub fn start_quiz(&mut self, assets: QuizAssets) {
        self.quiz = Some(ActiveQuiz::new(assets, &self.config));
        self.phase = LoadPhase::Ready;
        self.view.reset();
    }

    pub fn fail(&mut self, message: String) {
        self.quiz = None;
        self.phase = LoadPhase::Failed(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::categories::parse_categories;
    use crate::data::{CountryIndex, ExportTable};
    use crate::quiz::RegionStyle;

    fn assets() -> QuizAssets {
        let countries = CountryIndex::from_json(
            r#"[
                {"ISO_A3": "A1", "Final Display Name": "Alphaland", "Main Exports": "Oil"},
                {"ISO_A3": "B2", "Final Display Name": "Betastan", "Main Exports": null}
            ]"#,
        )
        .unwrap();
        let categories =
            parse_categories(r##"{"Energy": {"color": "#ff0000", "products": ["Oil"]}}"##)
                .unwrap();
        let map = MapGraphic::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 10">
                <path id="A1" d="M0 0 H10 V10 H0 Z"/>
                <path id="B2" d="M10 0 H20 V10 H10 Z"/>
            </svg>"#,
            |id| countries.get(id).is_some(),
        )
        .unwrap();
        QuizAssets {
            countries,
            exports: ExportTable::from_categories(&categories),
            map,
        }
    }

    #[test]
    fn test_status_follows_phase() {
        let mut state = AppState::new(QuizConfig::default());
        assert_eq!(state.status_message(), "Loading quiz data...");

        state.start_quiz(assets());
        assert_eq!(state.phase, LoadPhase::Ready);
        assert_eq!(
            state.status_message(),
            "Select a country by clicking on the map."
        );

        state.fail("Failed to load map.svg".to_string());
        assert!(state.quiz.is_none());
        assert_eq!(state.status_message(), "Failed to load map.svg");
    }

    #[test]
    fn test_active_quiz_decorates_map() {
        let mut quiz = ActiveQuiz::new(assets(), &QuizConfig::default());
        assert!(quiz.surface.is_interactive("A1"));
        assert_eq!(quiz.surface.style("B2"), &RegionStyle::NoData);
        assert_eq!(quiz.surface.tally(), None);

        assert!(quiz.select("A1", SelectionSource::Map));
        assert_eq!(
            quiz.submit(),
            SubmitOutcome::Correct {
                color: "#ff0000".to_string()
            }
        );
    }

    #[test]
    fn test_extended_config_publishes_tally() {
        let config = QuizConfig::from_params([("variant", "extended")]);
        let quiz = ActiveQuiz::new(assets(), &config);
        assert_eq!(quiz.surface.tally(), Some(0));
    }
}
