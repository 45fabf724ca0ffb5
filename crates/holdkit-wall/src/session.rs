//! Per-session editor state for one wall.
//!
//! A `WallSession` is created when a wall view opens and dropped when it
//! closes. It owns the viewport, the current hold snapshot and the outlines
//! derived from it; screens hold a reference to the session instead of
//! reaching for shared global state.
//!
//! Hold edits are two-step: `drag_hold`/`resize_hold` return the proposed
//! [`HoldGeometry`] for the caller to persist, and `commit_geometry` applies it
//! to the local snapshot once accepted.

use std::collections::HashMap;

use holdkit_core::{Hold, HoldGeometry, InputContractError, Result, Size, Vec2};
use holdkit_settings::{ConfigResult, EngineConfig};

use crate::gesture::{GestureEvent, GestureTracker};
use crate::hit_test::HitTester;
use crate::homography::{create_rectify_homography, Homography};
use crate::mapper::{CoordinateMapper, ViewportState};
use crate::outline::{create_cluster_outline, create_hold_outline, Outline, OutlineStyle};
use crate::viewport::ViewportTransform;

/// Holds hit by one tap.
#[derive(Debug, Clone, PartialEq)]
pub struct TapHits {
    /// Tap position in screen pixels
    pub point: Vec2,
    /// Tap position in normalized image coordinates
    pub canonical: Vec2,
    /// Ids of the hit holds, in hold order
    pub hold_ids: Vec<String>,
}

/// Result of one gesture frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUpdate {
    pub state: ViewportState,
    pub taps: Vec<TapHits>,
}

#[derive(Debug, Default)]
struct OutlineCache {
    revision: u64,
    all: Option<Outline>,
    clusters: HashMap<String, Outline>,
}

/// Editor/viewer session for a single wall image.
#[derive(Debug)]
pub struct WallSession {
    config: EngineConfig,
    viewport: ViewportTransform,
    gestures: GestureTracker,
    content: Size,
    holds: Vec<Hold>,
    revision: u64,
    outlines: OutlineCache,
}

impl WallSession {
    /// Creates a session with validated configuration. Until the first
    /// [`resize`](Self::resize) the content is the unit square.
    pub fn new(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            viewport: ViewportTransform::new(&config),
            config,
            gestures: GestureTracker::new(),
            content: Size::new(1.0, 1.0),
            holds: Vec::new(),
            revision: 0,
            outlines: OutlineCache::default(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    pub fn state(&self) -> ViewportState {
        self.viewport.state()
    }

    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.content)
    }

    pub fn hit_tester(&self) -> HitTester {
        HitTester::from_config(self.mapper(), &self.config)
    }

    /// Container or image size changed: refit.
    pub fn resize(&mut self, container: Size, content: Size) -> ViewportState {
        if content.is_positive() {
            self.content = content;
        }
        self.viewport.fit_to_container(container, content)
    }

    pub fn reset_view(&mut self) -> ViewportState {
        self.viewport.reset_transform()
    }

    pub fn holds(&self) -> &[Hold] {
        &self.holds
    }

    pub fn hold(&self, id: &str) -> Option<&Hold> {
        self.holds.iter().find(|h| h.id == id)
    }

    /// Replaces the hold snapshot, e.g. after a sync from storage.
    pub fn set_holds(&mut self, holds: Vec<Hold>) {
        self.holds = holds;
        self.bump_revision();
    }

    /// Changes every time the hold snapshot changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn begin_gesture(&mut self) {
        self.gestures.begin();
    }

    pub fn end_gesture(&mut self) {
        self.gestures.end();
    }

    /// Applies one frame of gesture events and resolves its taps to holds.
    pub fn handle_frame(&mut self, events: &[GestureEvent]) -> SessionUpdate {
        let outcome = self.gestures.apply_frame(&mut self.viewport, events);
        let tester = self.hit_tester();
        let mapper = self.mapper();
        let taps = outcome
            .taps
            .iter()
            .map(|tap| TapHits {
                point: tap.point,
                canonical: mapper.screen_to_normalized(tap.point, &tap.viewport),
                hold_ids: tester
                    .holds_at_point(tap.point, &self.holds, &tap.viewport)
                    .into_iter()
                    .map(|h| h.id.clone())
                    .collect(),
            })
            .collect();
        SessionUpdate {
            state: outcome.state,
            taps,
        }
    }

    /// Holds under a screen point with the current viewport, in hold order.
    pub fn holds_at(&self, screen_point: Vec2) -> Vec<&Hold> {
        self.hit_tester()
            .holds_at_point(screen_point, &self.holds, &self.viewport.state())
    }

    /// Outline around all holds, recomputed only when the holds change.
    pub fn outline(&mut self) -> &Outline {
        self.sync_outline_cache();
        let style = OutlineStyle::from_config(&self.config);
        let holds = &self.holds;
        self.outlines
            .all
            .get_or_insert_with(|| create_hold_outline(holds, &style))
    }

    /// Outline around one cluster, memoized like [`outline`](Self::outline).
    pub fn cluster_outline(&mut self, cluster_id: &str) -> &Outline {
        self.sync_outline_cache();
        let style = OutlineStyle::from_config(&self.config);
        let holds = &self.holds;
        self.outlines
            .clusters
            .entry(cluster_id.to_string())
            .or_insert_with(|| create_cluster_outline(holds, cluster_id, &style))
    }

    /// Adds a hold with the default radius under a screen point.
    pub fn place_hold(&mut self, screen_point: Vec2) -> Result<Hold> {
        let p = self
            .mapper()
            .screen_to_normalized(screen_point, &self.viewport.state());
        if !(0.0..=1.0).contains(&p.x) || !(0.0..=1.0).contains(&p.y) {
            return Err(InputContractError::OutOfBounds { x: p.x, y: p.y }.into());
        }
        let hold = Hold::new(p.x, p.y, self.config.default_hold_radius);
        tracing::debug!("Placed hold {} at {}", hold.id, p);
        self.holds.push(hold.clone());
        self.bump_revision();
        Ok(hold)
    }

    /// Proposed geometry after dragging a hold by a screen-space delta.
    /// The center is kept inside the image.
    pub fn drag_hold(&self, id: &str, dx: f64, dy: f64) -> Result<HoldGeometry> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(InputContractError::NonFinite {
                what: "drag delta".to_string(),
            }
            .into());
        }
        let hold = self.find(id)?;
        let delta = self
            .mapper()
            .screen_delta_to_normalized(Vec2::new(dx, dy), &self.viewport.state());
        Ok(HoldGeometry {
            x: hold.x + delta.x,
            y: hold.y + delta.y,
            radius: hold.radius,
        }
        .clamped_to_canvas())
    }

    /// Proposed geometry after scaling a hold's radius by `factor`, kept
    /// within the configured radius bounds.
    pub fn resize_hold(&self, id: &str, factor: f64) -> Result<HoldGeometry> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(InputContractError::NonFinite {
                what: "resize factor".to_string(),
            }
            .into());
        }
        let hold = self.find(id)?;
        Ok(HoldGeometry {
            radius: (hold.radius * factor)
                .clamp(self.config.min_hold_radius, self.config.max_hold_radius),
            ..hold.geometry()
        })
    }

    /// Applies an accepted geometry to the local snapshot.
    pub fn commit_geometry(&mut self, id: &str, geometry: HoldGeometry) -> Result<&Hold> {
        let index = self.index_of(id)?;
        self.holds[index] = self.holds[index].with_geometry(geometry);
        self.bump_revision();
        Ok(&self.holds[index])
    }

    pub fn remove_hold(&mut self, id: &str) -> Result<Hold> {
        let index = self.index_of(id)?;
        let removed = self.holds.remove(index);
        self.bump_revision();
        Ok(removed)
    }

    /// Homography rectifying the photographed wall `corners` onto this
    /// session's image rectangle.
    pub fn rectify(&self, corners: &[Vec2]) -> Result<Homography> {
        create_rectify_homography(corners, self.content.width, self.content.height)
    }

    fn find(&self, id: &str) -> Result<&Hold> {
        self.hold(id).ok_or_else(|| {
            InputContractError::UnknownHold {
                id: id.to_string(),
            }
            .into()
        })
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.holds.iter().position(|h| h.id == id).ok_or_else(|| {
            InputContractError::UnknownHold {
                id: id.to_string(),
            }
            .into()
        })
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn sync_outline_cache(&mut self) {
        if self.outlines.revision != self.revision {
            self.outlines = OutlineCache {
                revision: self.revision,
                ..OutlineCache::default()
            };
        }
    }
}
