//! Optional `vizlink.toml` configuration.
//!
//! Every key is optional and overrides the library default:
//!
//! ```toml
//! [inference]
//! sample_size = 10
//! identifier_ratio = 0.5
//! identifier_min_unique = 20
//!
//! [normalize]
//! max_depth = 2
//!
//! [colors]
//! palette = ["#1f77b4", "#ff7f0e"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use vizlink::DashboardConfig;

pub const DEFAULT_CONFIG_FILE: &str = "vizlink.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    inference: RawInference,
    #[serde(default)]
    normalize: RawNormalize,
    #[serde(default)]
    colors: RawColors,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawInference {
    sample_size: Option<usize>,
    identifier_ratio: Option<f64>,
    identifier_min_unique: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNormalize {
    max_depth: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawColors {
    palette: Option<Vec<String>>,
}

impl RawConfig {
    fn into_dashboard_config(self) -> DashboardConfig {
        let mut config = DashboardConfig::default();

        let inference = &mut config.inference;
        if let Some(sample_size) = self.inference.sample_size {
            inference.sample_size = sample_size;
        }
        if let Some(ratio) = self.inference.identifier_ratio {
            inference.identifier_ratio = ratio;
        }
        if let Some(min_unique) = self.inference.identifier_min_unique {
            inference.identifier_min_unique = min_unique;
        }
        if let Some(max_depth) = self.normalize.max_depth {
            config.normalize.max_depth = max_depth;
        }
        if let Some(palette) = self.colors.palette {
            config.palette = palette;
        }

        config
    }
}

/// Load the dashboard configuration.
///
/// An explicit path must exist. Without one, `./vizlink.toml` is used when
/// present and the defaults otherwise. Values are validated later, when the
/// dashboard is built.
pub fn load(explicit: Option<&Path>) -> Result<DashboardConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.exists() {
                debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                return Ok(DashboardConfig::default());
            }
            fallback
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config = parse(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

fn parse(content: &str) -> Result<DashboardConfig, toml::de::Error> {
    let raw: RawConfig = toml::from_str(content)?;
    Ok(raw.into_dashboard_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vizlink::Dashboard;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.inference.sample_size, 10);
        assert_eq!(config.normalize.max_depth, 2);
        assert_eq!(config.palette, vizlink::color::default_palette());
    }

    #[test]
    fn test_overrides() {
        let config = parse(
            r##"
            [inference]
            sample_size = 25
            identifier_ratio = 0.8

            [normalize]
            max_depth = 1

            [colors]
            palette = ["#000000", "#ffffff"]
            "##,
        )
        .unwrap();

        assert_eq!(config.inference.sample_size, 25);
        assert_eq!(config.inference.identifier_ratio, 0.8);
        assert_eq!(config.inference.identifier_min_unique, 20);
        assert_eq!(config.normalize.max_depth, 1);
        assert_eq!(config.palette, vec!["#000000", "#ffffff"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse("[inference]\nsample = 3\n").is_err());
    }

    #[test]
    fn test_empty_palette_fails_validation() {
        let config = parse("[colors]\npalette = []\n").unwrap();
        assert!(Dashboard::with_config(config).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_io_error() {
        let dir = std::env::temp_dir().join("vizlink-config-test-missing");
        let result = load(Some(&dir.join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
