//! Engine configuration for HoldKit
//!
//! Holds every tunable the wall engine recognizes: zoom limits, fit margin,
//! pan clamping, hit target sizing, outline dimensions and hold editing
//! bounds. Field names serialize in camelCase so a config written by the app
//! (`minScale`, `coverFactor`, ...) loads unchanged. Files may be JSON or TOML.

use std::fmt;
use std::path::Path;

use holdkit_core::constants::{
    DEFAULT_COVER_FACTOR, DEFAULT_HOLD_RADIUS, DEFAULT_HULL_POINT_RADIUS, DEFAULT_MAX_SCALE,
    DEFAULT_MIN_PIXEL_RADIUS, DEFAULT_MIN_SCALE, DEFAULT_TWO_POINT_THICKNESS, MAX_HOLD_RADIUS,
    MIN_HOLD_RADIUS,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// How far content may be dragged past the container edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ClampPolicy {
    /// Content edges stop at the container edges; smaller content stays centered
    HardEdge,
    /// Allow dragging past the edges by `fraction` of the smaller of the
    /// container and scaled content extents. Must be in `[0, 1)`.
    Overscroll { fraction: f64 },
}

impl Default for ClampPolicy {
    fn default() -> Self {
        Self::HardEdge
    }
}

impl fmt::Display for ClampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HardEdge => write!(f, "hard edge"),
            Self::Overscroll { fraction } => write!(f, "overscroll {:.0}%", fraction * 100.0),
        }
    }
}

/// Growth curve of hold hit targets with zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RadiusCurve {
    /// Hit radius grows proportionally with zoom
    Linear,
    /// Hit radius grows with the square root of zoom
    SquareRoot,
}

impl Default for RadiusCurve {
    fn default() -> Self {
        Self::Linear
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Lower zoom bound (a smaller fit scale overrides it until the next fit)
    pub min_scale: f64,
    /// Upper zoom bound
    pub max_scale: f64,
    /// Multiplier applied to the natural fit scale
    pub cover_factor: f64,
    /// Smallest on-screen hit radius in pixels
    pub min_pixel_radius: f64,
    /// Radius of the single-hold outline polygon (canonical units)
    pub hull_point_radius: f64,
    /// Half-thickness of the two-hold outline strip (canonical units)
    pub two_point_thickness: f64,
    /// Radius given to newly placed holds
    pub default_hold_radius: f64,
    /// Smallest radius a resize may produce
    pub min_hold_radius: f64,
    /// Largest radius a resize may produce
    pub max_hold_radius: f64,
    /// Hit target growth curve
    pub radius_curve: RadiusCurve,
    /// Pan clamping policy
    pub clamp_policy: ClampPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            cover_factor: DEFAULT_COVER_FACTOR,
            min_pixel_radius: DEFAULT_MIN_PIXEL_RADIUS,
            hull_point_radius: DEFAULT_HULL_POINT_RADIUS,
            two_point_thickness: DEFAULT_TWO_POINT_THICKNESS,
            default_hold_radius: DEFAULT_HOLD_RADIUS,
            min_hold_radius: MIN_HOLD_RADIUS,
            max_hold_radius: MAX_HOLD_RADIUS,
            radius_curve: RadiusCurve::default(),
            clamp_policy: ClampPolicy::default(),
        }
    }
}

fn positive(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value,
        })
    }
}

impl EngineConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        positive("minScale", self.min_scale)?;
        positive("maxScale", self.max_scale)?;
        positive("coverFactor", self.cover_factor)?;
        positive("minPixelRadius", self.min_pixel_radius)?;
        positive("hullPointRadius", self.hull_point_radius)?;
        positive("twoPointThickness", self.two_point_thickness)?;
        positive("defaultHoldRadius", self.default_hold_radius)?;
        positive("minHoldRadius", self.min_hold_radius)?;
        positive("maxHoldRadius", self.max_hold_radius)?;

        if self.min_scale > self.max_scale {
            return Err(ConfigError::Inconsistent(format!(
                "minScale {} exceeds maxScale {}",
                self.min_scale, self.max_scale
            )));
        }

        if self.min_hold_radius > self.max_hold_radius {
            return Err(ConfigError::Inconsistent(format!(
                "minHoldRadius {} exceeds maxHoldRadius {}",
                self.min_hold_radius, self.max_hold_radius
            )));
        }

        if !(self.min_hold_radius..=self.max_hold_radius).contains(&self.default_hold_radius) {
            return Err(ConfigError::Inconsistent(format!(
                "defaultHoldRadius {} outside [{}, {}]",
                self.default_hold_radius, self.min_hold_radius, self.max_hold_radius
            )));
        }

        if let ClampPolicy::Overscroll { fraction } = self.clamp_policy {
            // A fraction of 1 or more would let content leave the container entirely.
            if !(0.0..1.0).contains(&fraction) {
                return Err(ConfigError::ValueOutOfRange {
                    key: "clampPolicy.fraction".to_string(),
                    value: fraction,
                });
            }
        }

        Ok(())
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match extension(path).as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        config.validate()?;
        tracing::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults if the file is missing
    /// or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default engine config: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Saved engine config to {}", path.display());

        Ok(())
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
