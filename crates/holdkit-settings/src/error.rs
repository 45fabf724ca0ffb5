//! Errors raised while loading, saving or validating an [`EngineConfig`].
//!
//! [`EngineConfig`]: crate::EngineConfig

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to get an engine config on or off disk.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Cannot read engine config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write engine config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Cannot encode config as TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    /// The file parsed but its values are unusable.
    #[error("Invalid engine config: {0}")]
    Invalid(#[from] ConfigError),
}

/// A config value, or a combination of values, the engine cannot work with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unsupported config extension '{0}' (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("'{key}' = {value} is out of range")]
    ValueOutOfRange { key: String, value: f64 },

    /// e.g. a minimum above its maximum
    #[error("Inconsistent settings: {0}")]
    Inconsistent(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

pub type ConfigResult<T> = Result<T, ConfigError>;
