//! HoldKit Settings Crate
//!
//! Handles engine configuration: defaults, validation and JSON/TOML persistence.

pub mod config;
pub mod error;

pub use config::{ClampPolicy, EngineConfig, RadiusCurve};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
