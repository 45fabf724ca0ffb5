//! # HoldKit
//!
//! Coordinate transforms and hold geometry for climbing wall maps:
//! - Screen ⇄ image mapping under pan and pinch-zoom
//! - Homography rectification of photographed walls
//! - Convex outlines around holds and clusters
//! - Zoom-aware hold hit testing
//!
//! ## Architecture
//!
//! HoldKit is organized as a workspace with multiple crates:
//!
//! 1. **holdkit-core** - Vector/matrix primitives, hold model, errors
//! 2. **holdkit-settings** - Engine configuration and persistence
//! 3. **holdkit-wall** - Viewport, homography, outlines, hit testing, sessions
//! 4. **holdkit** - Command-line front end that integrates all crates

pub mod cli;
pub mod commands;

pub use holdkit_core::{
    Error, GeometryError, Hold, HoldGeometry, HoldRole, InputContractError, Matrix3, Result, Size,
    Vec2,
};

pub use holdkit_settings::{ClampPolicy, ConfigError, EngineConfig, RadiusCurve, SettingsError};

pub use holdkit_wall::{
    convex_hull, create_cluster_outline, create_hold_outline, create_rectify_homography,
    compute_homography, screen_radius, CoordinateMapper, FitMode, GestureEvent, HitTester,
    Homography, Outline, OutlineStyle, ViewportState, ViewportTransform, WallSession,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Pretty formatting on stderr (stdout carries command output)
/// - RUST_LOG environment variable support
/// - `default_level` when RUST_LOG is unset
pub fn init_logging(default_level: tracing::Level) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
