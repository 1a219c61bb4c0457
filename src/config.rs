//! Application configuration
//!
//! Read once at startup from a JSON file. Every field is optional; a
//! missing file means defaults.
//!
//! Location:
//! - `$POSTER_LIST_CONFIG` if set
//! - otherwise `~/.config/poster-list/config.json` on Linux

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::images::PosterCache;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "POSTER_LIST_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Prefix joined with each row's image path to build poster references
    pub image_base: String,
    /// JSON catalog to load instead of the built-in one
    pub catalog: Option<PathBuf>,
    /// Poster tier cache; `None` picks the platform cache directory
    pub cache_dir: Option<PathBuf>,
    /// Fallback log filter when `RUST_LOG` is not set
    pub log_level: String,
    pub theme: ThemeChoice,
    /// Shared-element transition length in milliseconds
    pub transition_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_base: default_image_base(),
            catalog: None,
            cache_dir: None,
            log_level: "info".to_string(),
            theme: ThemeChoice::Dark,
            transition_ms: 300,
        }
    }
}

/// ~/.local/share/poster-list/posters on Linux
fn default_image_base() -> String {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .map(|path| path.join("poster-list").join("posters"))
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|| "posters".to_string())
}

impl Config {
    /// Where the config file is expected
    pub fn path() -> Option<PathBuf> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::config_dir().map(|dir| dir.join("poster-list").join("config.json")),
        }
    }

    /// Load from the default location, falling back to defaults if absent
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Poster cache to use, if any cache directory can be determined
    pub fn poster_cache(&self) -> Option<PosterCache> {
        self.cache_dir
            .clone()
            .or_else(PosterCache::default_root)
            .map(PosterCache::new)
    }
}
