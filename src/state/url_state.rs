//! Startup parameters from the page URL (web) or the environment (native).
//!
//! Both sources answer the same keys, e.g.
//! `?variant=extended&grouped=1&assets=data` or
//! `EXPORT_ATLAS_VARIANT=extended EXPORT_ATLAS_GROUPED=1 EXPORT_ATLAS_ASSETS=data`.

use super::config::QuizConfig;

/// Parameters understood by [`QuizConfig::from_params`].
const KEYS: &[&str] = &["variant", "countries", "tally", "grouped", "assets"];

/// Looks up every known key, keeping the ones that are present.
fn collect_params(lookup: impl Fn(&str) -> Option<String>) -> Vec<(&'static str, String)> {
    KEYS.iter()
        .filter_map(|&key| lookup(key).map(|value| (key, value)))
        .collect()
}

fn config_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> QuizConfig {
    let params = collect_params(lookup);
    QuizConfig::from_params(params.iter().map(|(k, v)| (*k, v.as_str())))
}

/// Read configuration from the current browser URL.
///
/// Decoding is left to `URLSearchParams`; a key given without a value
/// (`?grouped`) reads as an empty string, which counts as "on".
#[cfg(target_arch = "wasm32")]
pub fn load_config() -> QuizConfig {
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    match web_sys::UrlSearchParams::new_with_str(&search) {
        Ok(params) => config_from_lookup(|key| params.get(key)),
        Err(e) => {
            log::warn!("Ignoring unreadable query string: {:?}", e);
            QuizConfig::default()
        }
    }
}

/// Read configuration from `EXPORT_ATLAS_*` environment variables.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> QuizConfig {
    config_from_lookup(|key| {
        let var = format!("EXPORT_ATLAS_{}", key.to_ascii_uppercase());
        std::env::var(var).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(values: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn test_only_known_keys_are_read() {
        let params = collect_params(lookup_in(&[
            ("grouped", ""),
            ("zoom", "3"),
            ("variant", "extended"),
        ]));
        assert_eq!(
            params,
            vec![("variant", "extended".to_string()), ("grouped", String::new())]
        );
    }

    #[test]
    fn test_config_from_lookup() {
        let config = config_from_lookup(lookup_in(&[
            ("countries", "1"),
            ("grouped", ""),
            ("assets", "static"),
        ]));
        assert!(config.show_country_picker);
        assert!(!config.show_tally);
        assert!(config.group_exports_by_category);
        assert_eq!(config.asset_base, "static");
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        assert_eq!(config_from_lookup(|_| None), QuizConfig::default());
    }
}
