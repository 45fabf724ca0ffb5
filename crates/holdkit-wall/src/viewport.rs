//! Interactive pan/zoom state for a wall image.
//!
//! Owns the `{scale, tx, ty}` triple and the container/content sizes it was
//! fitted to. Every pan and zoom ends with a bounds clamp so the scaled image
//! always overlaps the container on both axes.

use holdkit_core::constants::{DEFAULT_COVER_FACTOR, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE};
use holdkit_core::{InputContractError, Size, Vec2};
use holdkit_settings::{ClampPolicy, EngineConfig};

use crate::mapper::{screen_to_canonical, ViewportState};

/// How content is fitted into the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Whole image visible, scaled by the cover factor
    #[default]
    Contain,
    /// Container filled, image may be cropped
    Cover,
}

/// Pan/zoom state machine for one wall view.
#[derive(Debug, Clone)]
pub struct ViewportTransform {
    state: ViewportState,
    min_scale: f64,
    max_scale: f64,
    effective_min_scale: f64,
    effective_max_scale: f64,
    cover_factor: f64,
    clamp_policy: ClampPolicy,
    fit_mode: FitMode,
    container: Option<Size>,
    content: Option<Size>,
}

impl ViewportTransform {
    /// Creates an unfitted transform at identity using the limits in `config`.
    ///
    /// `config` need not have been validated: reversed zoom limits are
    /// swapped, and unusable limits, cover factors or clamp policies fall
    /// back to the defaults.
    pub fn new(config: &EngineConfig) -> Self {
        let (min_scale, max_scale) = zoom_range(config.min_scale, config.max_scale)
            .unwrap_or_else(|| {
                tracing::warn!(
                    "Invalid zoom limits {}..{}, using defaults",
                    config.min_scale,
                    config.max_scale
                );
                (DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE)
            });
        let cover_factor = if is_positive_finite(config.cover_factor) {
            config.cover_factor
        } else {
            tracing::warn!("Invalid cover factor {}, using default", config.cover_factor);
            DEFAULT_COVER_FACTOR
        };
        let clamp_policy = if is_valid_policy(config.clamp_policy) {
            config.clamp_policy
        } else {
            tracing::warn!("Invalid clamp policy {}, using hard edge", config.clamp_policy);
            ClampPolicy::HardEdge
        };
        Self {
            state: ViewportState::IDENTITY,
            min_scale,
            max_scale,
            effective_min_scale: min_scale,
            effective_max_scale: max_scale,
            cover_factor,
            clamp_policy,
            fit_mode: FitMode::default(),
            container: None,
            content: None,
        }
    }

    /// Current `{scale, tx, ty}`.
    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn scale(&self) -> f64 {
        self.state.scale
    }

    /// Zoom range in force, widened to include the last fit scale.
    pub fn scale_limits(&self) -> (f64, f64) {
        (self.effective_min_scale, self.effective_max_scale)
    }

    pub fn container_size(&self) -> Option<Size> {
        self.container
    }

    pub fn content_size(&self) -> Option<Size> {
        self.content
    }

    pub fn clamp_policy(&self) -> ClampPolicy {
        self.clamp_policy
    }

    /// Switches the clamp policy and re-clamps. Overscroll fractions outside
    /// `[0, 1)` are ignored.
    pub fn set_clamp_policy(&mut self, policy: ClampPolicy) {
        if !is_valid_policy(policy) {
            tracing::warn!("Ignoring clamp policy {}", policy);
            return;
        }
        if self.clamp_policy != policy {
            self.clamp_policy = policy;
            self.clamp_to_bounds();
        }
    }

    pub fn fit_mode(&self) -> FitMode {
        self.fit_mode
    }

    /// Sets the mode used by [`fit_to_container`](Self::fit_to_container) and
    /// [`reset_transform`](Self::reset_transform).
    pub fn set_fit_mode(&mut self, mode: FitMode) {
        self.fit_mode = mode;
    }

    /// Sets the configured zoom range. The pair is normalized so that
    /// `min <= max`, and the current scale is clamped into the new range.
    pub fn set_zoom_limits(&mut self, min_scale: f64, max_scale: f64) {
        let Some((lo, hi)) = zoom_range(min_scale, max_scale) else {
            tracing::warn!("Ignoring zoom limits {}..{}", min_scale, max_scale);
            return;
        };
        self.min_scale = lo;
        self.max_scale = hi;
        self.effective_min_scale = lo;
        self.effective_max_scale = hi;
        // Keep the fitted scale reachable.
        if let Some(fit) = self.natural_fit_scale() {
            self.effective_min_scale = lo.min(fit);
            self.effective_max_scale = hi.max(fit);
        }
        let clamped = self
            .state
            .scale
            .clamp(self.effective_min_scale, self.effective_max_scale);
        self.rescale_about_center(clamped);
        self.clamp_to_bounds();
    }

    /// Fits `content` into `container` with the current fit mode.
    ///
    /// Zero, negative or non-finite sizes leave the transform at identity
    /// instead of failing; layout sizes are often zero while a view mounts.
    pub fn fit_to_container(&mut self, container: Size, content: Size) -> ViewportState {
        self.fit_to_container_with(container, content, self.fit_mode)
    }

    /// Fits with an explicit mode, remembering it for later resets.
    pub fn fit_to_container_with(
        &mut self,
        container: Size,
        content: Size,
        mode: FitMode,
    ) -> ViewportState {
        self.fit_mode = mode;
        if !container.is_positive() || !content.is_positive() {
            tracing::debug!(
                "Skipping fit for container {} / content {}; using identity",
                container,
                content
            );
            self.state = ViewportState::IDENTITY;
            self.container = None;
            self.content = None;
            self.effective_min_scale = self.min_scale;
            self.effective_max_scale = self.max_scale;
            return self.state;
        }

        self.container = Some(container);
        self.content = Some(content);

        let scale = self
            .natural_fit_scale()
            .unwrap_or(ViewportState::IDENTITY.scale);
        self.effective_min_scale = self.min_scale.min(scale);
        self.effective_max_scale = self.max_scale.max(scale);

        self.state = ViewportState {
            scale,
            tx: (container.width - content.width * scale) / 2.0,
            ty: (container.height - content.height * scale) / 2.0,
        };

        tracing::debug!(
            "Fitted {} content into {} container ({:?}): {}",
            content,
            container,
            mode,
            self.state
        );
        self.state
    }

    /// Strict variant of [`fit_to_container`](Self::fit_to_container) that
    /// reports invalid sizes.
    pub fn try_fit_to_container(
        &mut self,
        container: Size,
        content: Size,
    ) -> Result<ViewportState, InputContractError> {
        for (what, size) in [("container", container), ("content", content)] {
            if !size.is_positive() {
                return Err(InputContractError::NonPositiveSize {
                    what: what.to_string(),
                    width: size.width,
                    height: size.height,
                });
            }
        }
        Ok(self.fit_to_container(container, content))
    }

    /// Re-fits with the last known sizes, or returns to identity if never fitted.
    pub fn reset_transform(&mut self) -> ViewportState {
        match (self.container, self.content) {
            (Some(container), Some(content)) => {
                self.fit_to_container_with(container, content, self.fit_mode)
            }
            _ => {
                self.state = ViewportState::IDENTITY;
                self.state
            }
        }
    }

    /// Translates by a screen-space delta. Never changes the scale.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            tracing::warn!("Ignoring non-finite pan delta ({}, {})", dx, dy);
            return;
        }
        self.state.tx += dx;
        self.state.ty += dy;
        self.clamp_to_bounds();
    }

    /// Multiplies the scale by `factor` keeping the screen point
    /// `(focal_x, focal_y)` fixed, then clamps.
    pub fn zoom(&mut self, factor: f64, focal_x: f64, focal_y: f64) {
        if !is_positive_finite(factor) || !focal_x.is_finite() || !focal_y.is_finite() {
            return;
        }
        let old_scale = self.state.scale;
        let new_scale =
            (old_scale * factor).clamp(self.effective_min_scale, self.effective_max_scale);
        if new_scale == old_scale {
            return;
        }
        let ratio = new_scale / old_scale;
        self.state.tx = focal_x - (focal_x - self.state.tx) * ratio;
        self.state.ty = focal_y - (focal_y - self.state.ty) * ratio;
        self.state.scale = new_scale;
        self.clamp_to_bounds();
    }

    /// Restores a previously saved state, clamping it to the current limits.
    pub fn set_state(&mut self, state: ViewportState) {
        if !is_positive_finite(state.scale) || !state.tx.is_finite() || !state.ty.is_finite() {
            tracing::warn!("Ignoring invalid viewport state {}", state);
            return;
        }
        self.state = ViewportState {
            scale: state
                .scale
                .clamp(self.effective_min_scale, self.effective_max_scale),
            ..state
        };
        self.clamp_to_bounds();
    }

    /// Keeps the scaled content overlapping the container on both axes.
    ///
    /// Idempotent: a second call never moves the state.
    pub fn clamp_to_bounds(&mut self) {
        let (Some(container), Some(content)) = (self.container, self.content) else {
            return;
        };
        let scale = self.state.scale;
        let tx = clamp_axis(
            self.state.tx,
            container.width,
            content.width * scale,
            self.clamp_policy,
        );
        let ty = clamp_axis(
            self.state.ty,
            container.height,
            content.height * scale,
            self.clamp_policy,
        );
        if tx != self.state.tx || ty != self.state.ty {
            tracing::trace!(
                "Clamped offset ({:.1}, {:.1}) -> ({:.1}, {:.1})",
                self.state.tx,
                self.state.ty,
                tx,
                ty
            );
            self.state.tx = tx;
            self.state.ty = ty;
        }
    }

    /// Part of the content (in content-space pixels) currently on screen,
    /// as `(min, max)` corners. `None` before the first successful fit.
    pub fn visible_content_rect(&self) -> Option<(Vec2, Vec2)> {
        let (container, content) = (self.container?, self.content?);
        let top_left = screen_to_canonical(Vec2::ZERO, &self.state);
        let bottom_right = screen_to_canonical(container.to_vec2(), &self.state);
        let min = Vec2::new(top_left.x.max(0.0), top_left.y.max(0.0));
        let max = Vec2::new(
            bottom_right.x.min(content.width),
            bottom_right.y.min(content.height),
        );
        (min.x < max.x && min.y < max.y).then_some((min, max))
    }

    fn natural_fit_scale(&self) -> Option<f64> {
        let (container, content) = (self.container?, self.content?);
        let sx = container.width / content.width;
        let sy = container.height / content.height;
        Some(match self.fit_mode {
            FitMode::Contain => sx.min(sy) * self.cover_factor,
            FitMode::Cover => sx.max(sy),
        })
    }

    fn rescale_about_center(&mut self, new_scale: f64) {
        if new_scale == self.state.scale {
            return;
        }
        let focal = self
            .container
            .map(|c| c.to_vec2() / 2.0)
            .unwrap_or(Vec2::ZERO);
        let ratio = new_scale / self.state.scale;
        self.state.tx = focal.x - (focal.x - self.state.tx) * ratio;
        self.state.ty = focal.y - (focal.y - self.state.ty) * ratio;
        self.state.scale = new_scale;
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

/// Clamps one axis offset.
///
/// The allowed band is centered on the offset that centers the content,
/// with half-width equal to the content overhang plus the overscroll allowance.
fn clamp_axis(offset: f64, container: f64, scaled: f64, policy: ClampPolicy) -> f64 {
    let centered = (container - scaled) / 2.0;
    let slack = ((scaled - container) / 2.0).max(0.0);
    let overscroll = match policy {
        ClampPolicy::HardEdge => 0.0,
        ClampPolicy::Overscroll { fraction } if fraction.is_finite() => {
            fraction.clamp(0.0, MAX_OVERSCROLL_FRACTION) * container.min(scaled)
        }
        ClampPolicy::Overscroll { .. } => 0.0,
    };
    let limit = slack + overscroll;
    if offset > centered + limit {
        centered + limit
    } else if offset < centered - limit {
        centered - limit
    } else {
        offset
    }
}

fn is_positive_finite(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Zoom range ordered low to high, or `None` if either bound is not a
/// positive finite number.
fn zoom_range(min_scale: f64, max_scale: f64) -> Option<(f64, f64)> {
    if !is_positive_finite(min_scale) || !is_positive_finite(max_scale) {
        return None;
    }
    Some((min_scale.min(max_scale), min_scale.max(max_scale)))
}

fn is_valid_policy(policy: ClampPolicy) -> bool {
    match policy {
        ClampPolicy::HardEdge => true,
        ClampPolicy::Overscroll { fraction } => (0.0..1.0).contains(&fraction),
    }
}

// Strictly below 1 so some content always stays on screen.
const MAX_OVERSCROLL_FRACTION: f64 = 0.95;
