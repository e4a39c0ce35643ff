//! Error types for typist configuration.
//!
//! The stepper itself has no failure modes; everything here comes from
//! loading or validating configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error (including negative durations).
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value that cannot be clamped into range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
