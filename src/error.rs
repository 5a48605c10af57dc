//! Error types for the commit wrapper.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while preparing or running the wrapped `git commit`.
#[derive(Error, Debug)]
pub enum MklogError {
    /// The shell could not be launched or waited on.
    #[error("Failed to run `{command}` through {shell}")]
    Spawn {
        /// Shell program used to interpret the command line.
        shell: String,
        /// The rendered command line.
        command: String,
        /// Underlying launch failure.
        #[source]
        source: io::Error,
    },

    /// The settings file exists but could not be read.
    #[error("Failed to read settings file: {}", path.display())]
    SettingsRead {
        /// Location of the settings file.
        path: PathBuf,
        /// Underlying read failure.
        #[source]
        source: io::Error,
    },

    /// The settings file is not valid JSON for [`Settings`](crate::utils::Settings).
    #[error("Failed to parse settings file: {}", path.display())]
    SettingsParse {
        /// Location of the settings file.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}
