//! Settings and configuration utilities.
//!
//! This module reads optional settings from $HOME/.git-commit-mklog/settings.json
//! (or the file named by `GIT_COMMIT_MKLOG_SETTINGS`). Variables listed under
//! `env` act as fallbacks for the `git commit` child environment.

use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::MklogError;

/// Environment variable overriding the settings file location.
pub const SETTINGS_PATH_VAR: &str = "GIT_COMMIT_MKLOG_SETTINGS";

/// Settings loaded from $HOME/.git-commit-mklog/settings.json.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Fallback variables for the child environment.
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Shell used to interpret the `git commit` command line.
    #[serde(default)]
    pub shell: Option<String>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self, MklogError> {
        match Self::get_settings_path() {
            Some(path) => Self::load_from_path(path),
            None => {
                debug!("No home directory; using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Loads settings from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, MklogError> {
        let path = path.as_ref();

        // If file doesn't exist, return default settings
        if !path.exists() {
            debug!(path = %path.display(), "Settings file not found");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| MklogError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;

        let settings =
            serde_json::from_str::<Self>(&content).map_err(|source| MklogError::SettingsParse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), fallbacks = settings.env.len(), "Loaded settings");
        Ok(settings)
    }

    /// Returns the settings path, honouring `GIT_COMMIT_MKLOG_SETTINGS`.
    pub fn get_settings_path() -> Option<PathBuf> {
        settings_path_from(env::var_os(SETTINGS_PATH_VAR), dirs::home_dir())
    }
}

fn settings_path_from(explicit: Option<OsString>, home_dir: Option<PathBuf>) -> Option<PathBuf> {
    match explicit {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => home_dir.map(|home| home.join(".git-commit-mklog").join("settings.json")),
    }
}
