//! Quiz configuration.
//!
//! The two quiz flavors share one controller; these switches pick between
//! them. Values come from URL query parameters (web) or environment
//! variables (native), see `url_state`.

/// Where the assets live unless `assets` says otherwise.
pub const DEFAULT_ASSET_BASE: &str = "assets";

/// Preset combinations of the quiz switches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum QuizVariant {
    /// Click a country on the map, pick its export.
    #[default]
    Simple,
    /// Adds a country dropdown and a running tally of correct answers.
    Extended,
}

impl QuizVariant {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "simple" => Some(QuizVariant::Simple),
            "extended" => Some(QuizVariant::Extended),
            _ => None,
        }
    }
}

/// Startup configuration of the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    /// Show the auxiliary country dropdown
    pub show_country_picker: bool,

    /// Show the running count of correct answers
    pub show_tally: bool,

    /// Group the export picker by category instead of one sorted list
    pub group_exports_by_category: bool,

    /// URL prefix (web) or directory (native) holding the assets
    pub asset_base: String,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::for_variant(QuizVariant::Simple)
    }
}

impl QuizConfig {
    pub fn for_variant(variant: QuizVariant) -> Self {
        let extended = variant == QuizVariant::Extended;
        Self {
            show_country_picker: extended,
            show_tally: extended,
            group_exports_by_category: false,
            asset_base: DEFAULT_ASSET_BASE.to_string(),
        }
    }

    /// Builds a configuration from key/value pairs.
    ///
    /// `variant` is applied first so the individual switches can override it.
    /// Unknown keys and unparsable values are ignored.
    pub fn from_params<'a>(params: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let params: Vec<(&str, &str)> = params.into_iter().collect();

        let variant = params
            .iter()
            .filter(|(key, _)| *key == "variant")
            .filter_map(|(_, value)| QuizVariant::parse(value))
            .last()
            .unwrap_or_default();
        let mut config = Self::for_variant(variant);

        for (key, value) in params {
            match key {
                "countries" => set_flag(&mut config.show_country_picker, key, value),
                "tally" => set_flag(&mut config.show_tally, key, value),
                "grouped" => set_flag(&mut config.group_exports_by_category, key, value),
                "assets" if !value.trim().is_empty() => {
                    config.asset_base = value.trim().to_string();
                }
                _ => {}
            }
        }

        config
    }
}

fn set_flag(flag: &mut bool, key: &str, value: &str) {
    match parse_flag(value) {
        Some(parsed) => *flag = parsed,
        None => log::warn!("Ignoring '{}={}': expected a boolean", key, value),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
