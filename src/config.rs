//! User settings persisted between runs.
//!
//! Settings live in `~/.config/focalstat/settings.json` (platform config
//! directory) unless `--config` / `FOCALSTAT_CONFIG` points elsewhere:
//!
//! ```json
//! {
//!   "crop_factors": { "X100V": 1.5 },
//!   "ranges": "16-35, 50, 70-200, other"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::stats::{CropFactorTable, DEFAULT_RANGES};

pub const SETTINGS_FILENAME: &str = "settings.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to determine config directory")]
    NoConfigDir,
}

/// Persistent user settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-model overrides on top of the built-in crop factors
    pub crop_factors: CropFactorTable,
    /// Range list used when none is given on the command line
    pub ranges: Option<String>,
}

impl Settings {
    /// Load settings, returning defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write settings, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json + "\n").map_err(write_err)?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Built-in crop factors with the user's overrides applied
    pub fn crop_table(&self) -> CropFactorTable {
        let mut table = CropFactorTable::with_defaults();
        table.merge(&self.crop_factors);
        table
    }

    /// Configured range list, or the built-in default
    pub fn ranges_or_default(&self) -> &str {
        self.ranges
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(DEFAULT_RANGES)
    }
}

/// Default settings file location
pub fn default_settings_path() -> Result<PathBuf, ConfigError> {
    directories::ProjectDirs::from("", "", "focalstat")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILENAME))
        .ok_or(ConfigError::NoConfigDir)
}
