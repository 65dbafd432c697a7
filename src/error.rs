//! Error types for settings persistence.
//!
//! The simulation core never fails; only reading and writing the settings
//! file can.

use thiserror::Error;

/// Errors that can occur when loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File could not be read or written.
    #[error("Settings I/O failed for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed.
    #[error("Invalid settings in '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
