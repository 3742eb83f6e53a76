//! Error types for asset loading.

use thiserror::Error;

/// Failure of one step of the asset loading chain.
///
/// Loading stops at the first error; the message is shown in the status line.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The asset could not be retrieved (network error, bad HTTP status).
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    #[error("Failed to fetch {asset}: {reason}")]
    Fetch { asset: String, reason: String },

    /// The asset was retrieved but is not valid JSON of the expected shape.
    #[error("Failed to parse {asset}: {source}")]
    Parse {
        asset: String,
        #[source]
        source: serde_json::Error,
    },

    /// The map graphic is malformed or has no usable regions.
    #[error("Invalid map graphic: {0}")]
    Map(String),

    /// Reading a local asset file failed (native builds).
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn fetch(asset: &str, reason: impl Into<String>) -> Self {
        Self::Fetch {
            asset: asset.to_string(),
            reason: reason.into(),
        }
    }

    pub fn parse(asset: &str, source: serde_json::Error) -> Self {
        Self::Parse {
            asset: asset.to_string(),
            source,
        }
    }
}

impl From<roxmltree::Error> for LoadError {
    fn from(err: roxmltree::Error) -> Self {
        Self::Map(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_message() {
        let err = LoadError::fetch("map.svg", "HTTP 404");
        assert_eq!(err.to_string(), "Failed to fetch map.svg: HTTP 404");
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = LoadError::parse("countries_and_exports.json", source);
        assert!(err
            .to_string()
            .starts_with("Failed to parse countries_and_exports.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
