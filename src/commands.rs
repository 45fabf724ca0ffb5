//! Subcommand implementations. Each reads its JSON input, runs the engine
//! and returns a serializable report; printing is left to `main`.

use std::path::Path;

use anyhow::{bail, Context};
use holdkit_core::{Hold, Size, Vec2};
use holdkit_settings::EngineConfig;
use holdkit_wall::{
    create_cluster_outline, create_hold_outline, create_rectify_homography, CoordinateMapper,
    HitTester, Outline, OutlineStyle, ViewportState,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RectifyReport {
    /// Row-major, normalized so the last entry is 1 where possible
    pub homography: [f64; 9],
    pub inverse: [f64; 9],
    /// The input corners after rectification, for checking the fit
    pub mapped_corners: Vec<Vec2>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineReport {
    pub hold_count: usize,
    pub outline: Outline,
    pub area: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HitReport {
    pub canonical: Vec2,
    pub hold_ids: Vec<String>,
    pub closest: Option<String>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Loads the engine config, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load_from_file(path)
            .with_context(|| format!("Invalid config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

pub fn rectify(corners: &Path, width: f64, height: f64) -> anyhow::Result<RectifyReport> {
    let corners: Vec<Vec2> = read_json(corners)?;
    let homography = create_rectify_homography(&corners, width, height)
        .context("Could not rectify wall corners")?;
    let inverse = homography.invert()?;
    let mapped_corners = homography.apply_all(&corners)?;
    tracing::info!("Rectified {} corners onto {}x{}", corners.len(), width, height);
    Ok(RectifyReport {
        homography: homography.to_array(),
        inverse: inverse.to_array(),
        mapped_corners,
    })
}

pub fn outline(
    holds: &Path,
    cluster: Option<&str>,
    config: &EngineConfig,
) -> anyhow::Result<OutlineReport> {
    let holds: Vec<Hold> = read_json(holds)?;
    let style = OutlineStyle::from_config(config);
    let (hold_count, outline) = match cluster {
        Some(id) => (
            holds.iter().filter(|h| h.in_cluster(id)).count(),
            create_cluster_outline(&holds, id, &style),
        ),
        None => (holds.len(), create_hold_outline(&holds, &style)),
    };
    Ok(OutlineReport {
        hold_count,
        area: outline.area(),
        outline,
    })
}

pub fn hit(
    holds: &Path,
    point: Vec2,
    viewport: ViewportState,
    content: Size,
    config: &EngineConfig,
) -> anyhow::Result<HitReport> {
    if !content.is_positive() {
        bail!("Content size must be positive, got {}", content);
    }
    if !(viewport.scale.is_finite() && viewport.scale > 0.0) {
        bail!("Viewport scale must be positive, got {}", viewport.scale);
    }
    let holds: Vec<Hold> = read_json(holds)?;
    let tester = HitTester::from_config(CoordinateMapper::new(content), config);
    let hold_ids = tester
        .holds_at_point(point, &holds, &viewport)
        .into_iter()
        .map(|h| h.id.clone())
        .collect();
    let closest = tester
        .closest_hold_at(point, &holds, &viewport)
        .map(|h| h.id.clone());
    Ok(HitReport {
        canonical: tester.mapper().screen_to_normalized(point, &viewport),
        hold_ids,
        closest,
    })
}
