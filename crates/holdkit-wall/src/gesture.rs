//! Gesture frames from the UI layer.
//!
//! The gesture recognizer delivers ordered events once per UI frame. A frame
//! is applied to a scratch copy of the viewport and committed as a whole, so
//! anything reading the viewport sees either the state before the frame or
//! the state after it, never a half-applied pinch.

use holdkit_core::Vec2;
use serde::{Deserialize, Serialize};

use crate::mapper::ViewportState;
use crate::viewport::ViewportTransform;

/// A single recognized gesture update, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GestureEvent {
    /// Incremental drag
    #[serde(rename_all = "camelCase")]
    Pan { delta_x: f64, delta_y: f64 },
    /// Pinch with `scale` measured from the start of the pinch
    #[serde(rename_all = "camelCase")]
    Pinch {
        scale: f64,
        focal_x: f64,
        focal_y: f64,
    },
    /// Single tap
    #[serde(rename_all = "camelCase")]
    Tap { screen_x: f64, screen_y: f64 },
}

/// A tap together with the viewport it landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapEvent {
    pub point: Vec2,
    pub viewport: ViewportState,
}

/// What a committed frame produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub state: ViewportState,
    pub taps: Vec<TapEvent>,
}

/// Tracks per-gesture state across frames (the running pinch scale).
///
/// The running scale is the pinch scale that corresponds to the current
/// viewport zoom. It only advances by the zoom the viewport accepted.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    last_pinch_scale: Option<f64>,
    active: bool,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a gesture; cumulative pinch tracking restarts at 1.0.
    pub fn begin(&mut self) {
        self.active = true;
        self.last_pinch_scale = None;
    }

    pub fn end(&mut self) {
        self.active = false;
        self.last_pinch_scale = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Applies `events` in order and commits the result to `viewport`.
    pub fn apply_frame(
        &mut self,
        viewport: &mut ViewportTransform,
        events: &[GestureEvent],
    ) -> FrameOutcome {
        let mut scratch = viewport.clone();
        let mut taps = Vec::new();

        for event in events {
            match *event {
                GestureEvent::Pan { delta_x, delta_y } => scratch.pan(delta_x, delta_y),
                GestureEvent::Pinch {
                    scale,
                    focal_x,
                    focal_y,
                } => {
                    if !(scale.is_finite() && scale > 0.0) {
                        tracing::warn!("Ignoring pinch with scale {}", scale);
                        continue;
                    }
                    let previous = self.last_pinch_scale.unwrap_or(1.0);
                    let before = scratch.scale();
                    scratch.zoom(scale / previous, focal_x, focal_y);
                    // Advance only by the zoom actually applied.
                    self.last_pinch_scale = Some(previous * scratch.scale() / before);
                }
                GestureEvent::Tap { screen_x, screen_y } => taps.push(TapEvent {
                    point: Vec2::new(screen_x, screen_y),
                    viewport: scratch.state(),
                }),
            }
        }

        *viewport = scratch;
        FrameOutcome {
            state: viewport.state(),
            taps,
        }
    }
}
