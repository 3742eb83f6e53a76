//! The quiz controller: map decoration, selection and answer scoring.

use super::session::QuizSession;
use super::surface::{QuizSurface, RegionStyle};
use crate::data::countries::normalize_export;
use crate::data::{compare_display_names, CountryIndex, ExportTable, FALLBACK_COLOR};
use std::collections::HashSet;

pub const PROMPT_MESSAGE: &str = "Select a country by clicking on the map.";
pub const CORRECT_MESSAGE: &str = "Correct!";
pub const INCORRECT_MESSAGE: &str = "Incorrect, try again.";
pub const NO_DATA_MESSAGE: &str = "No data for this country.";
pub const UNKNOWN_COUNTRY: &str = "Unknown Country";

/// Where a selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    /// Click on the map; only interactive regions can be picked.
    Map,
    /// Country picker; any region on the map can be picked.
    Picker,
}

/// Result of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was selected; nothing changed.
    NoSelection,
    /// The selected country has no export data.
    NoData,
    /// Right answer; the region now has `color`.
    Correct { color: String },
    /// Wrong answer; the region is unchanged.
    Incorrect,
}

/// Counts from map decoration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecorationSummary {
    pub interactive: usize,
    pub no_data: usize,
}

/// Drives one quiz over loaded reference data.
pub struct QuizController {
    countries: CountryIndex,
    exports: ExportTable,
    session: QuizSession,
    /// Regions present on the map.
    regions: HashSet<String>,
    /// Regions that accept map clicks.
    interactive: HashSet<String>,
    show_tally: bool,
}

impl QuizController {
    pub fn new(countries: CountryIndex, exports: ExportTable) -> Self {
        Self {
            countries,
            exports,
            session: QuizSession::new(),
            regions: HashSet::new(),
            interactive: HashSet::new(),
            show_tally: false,
        }
    }

    /// Publishes the running tally to the surface.
    pub fn with_tally(mut self, show_tally: bool) -> Self {
        self.show_tally = show_tally;
        self
    }

    /// Decorates the map and puts the controls in their initial state.
    ///
    /// Regions without a country record, or whose country has no export, get
    /// the "no data" pattern and stay non-interactive. The export picker starts
    /// on the first export in display order.
    pub fn initialize<'a, S: QuizSurface>(
        &mut self,
        region_ids: impl IntoIterator<Item = &'a str>,
        surface: &mut S,
    ) -> DecorationSummary {
        let mut summary = DecorationSummary::default();

        for id in region_ids {
            self.regions.insert(id.to_string());
            if self.countries.export_of(id).is_some() {
                surface.set_region_style(id, RegionStyle::Default);
                surface.set_region_interactive(id, true);
                self.interactive.insert(id.to_string());
                summary.interactive += 1;
            } else {
                surface.set_region_style(id, RegionStyle::NoData);
                surface.set_region_interactive(id, false);
                summary.no_data += 1;
            }
        }

        let unmapped = self
            .countries
            .iter()
            .filter(|c| c.has_export() && !self.regions.contains(&c.id))
            .count();
        if unmapped > 0 {
            log::warn!("{} countries with export data have no map region", unmapped);
        }

        if let Some(first) = self.exports.sorted().first() {
            self.session.choose_export(Some(first.normalized.clone()));
        }

        surface.set_submit_enabled(false);
        surface.set_status(PROMPT_MESSAGE);
        if self.show_tally {
            surface.set_tally(self.session.tally());
        }

        log::info!(
            "Map decorated: {} interactive regions, {} without data",
            summary.interactive,
            summary.no_data
        );
        summary
    }

    /// Makes `region_id` the pending selection, replacing any previous one.
    ///
    /// Returns false (and changes nothing) when the region cannot be selected
    /// from `source`.
    pub fn select<S: QuizSurface>(
        &mut self,
        region_id: &str,
        source: SelectionSource,
        surface: &mut S,
    ) -> bool {
        let allowed = match source {
            SelectionSource::Map => self.interactive.contains(region_id),
            SelectionSource::Picker => self.regions.contains(region_id),
        };
        if !allowed {
            return false;
        }

        self.session.select(region_id);
        surface.set_submit_enabled(true);

        let name = self
            .countries
            .get(region_id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_COUNTRY);
        surface.set_status(&format!("Selected Country: {}", name));
        true
    }

    /// Sets the export currently chosen in the picker.
    ///
    /// The choice is normalized like the country data; a blank choice clears it.
    pub fn choose_export(&mut self, choice: &str) {
        self.session.choose_export(normalize_export(choice));
    }

    /// Scores the chosen export against the pending selection.
    ///
    /// The selection is consumed and submit disabled whatever the outcome;
    /// a wrong answer needs a fresh selection before it can be retried.
    pub fn submit<S: QuizSurface>(&mut self, surface: &mut S) -> SubmitOutcome {
        let Some(region_id) = self.session.take_pending() else {
            return SubmitOutcome::NoSelection;
        };
        let chosen = self.session.chosen_export().unwrap_or_default().to_string();

        let outcome = match self.countries.export_of(&region_id) {
            None => {
                surface.set_region_style(&region_id, RegionStyle::NoData);
                surface.set_status(NO_DATA_MESSAGE);
                SubmitOutcome::NoData
            }
            Some(answer) if answer == chosen => {
                let color = self
                    .exports
                    .color_for(answer)
                    .unwrap_or(FALLBACK_COLOR)
                    .to_string();
                surface.set_region_style(&region_id, RegionStyle::Filled(color.clone()));
                let tally = self.session.record_correct();
                if self.show_tally {
                    surface.set_tally(tally);
                }
                surface.set_status(CORRECT_MESSAGE);
                SubmitOutcome::Correct { color }
            }
            Some(_) => {
                surface.set_status(INCORRECT_MESSAGE);
                SubmitOutcome::Incorrect
            }
        };

        surface.set_submit_enabled(false);
        log::debug!("Answer '{}' for {}: {:?}", chosen, region_id, outcome);
        outcome
    }

    pub fn pending(&self) -> Option<&str> {
        self.session.pending()
    }

    pub fn chosen_export(&self) -> Option<&str> {
        self.session.chosen_export()
    }

    pub fn tally(&self) -> u32 {
        self.session.tally()
    }

    pub fn countries(&self) -> &CountryIndex {
        &self.countries
    }

    pub fn exports(&self) -> &ExportTable {
        &self.exports
    }

    /// Countries offered by the country picker: on the map, sorted by name.
    pub fn pickable_countries(&self) -> Vec<(&str, &str)> {
        let mut seen = HashSet::new();
        let mut countries: Vec<(&str, &str)> = self
            .countries
            .iter()
            .filter(|c| self.regions.contains(&c.id) && seen.insert(c.id.as_str()))
            .map(|c| (c.id.as_str(), c.name.as_str()))
            .collect();
        countries.sort_by(|a, b| compare_display_names(a.1, b.1));
        countries
    }
}
