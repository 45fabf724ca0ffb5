//! Screen ⇄ canonical coordinate conversion.
//!
//! A [`ViewportState`] maps content space (image pixels before zoom) to
//! screen pixels:
//!
//! ```text
//! screen = content * scale + (tx, ty)
//! content = (screen - (tx, ty)) / scale
//! ```
//!
//! Holds are stored normalized to the image (`0..1` on both axes), so the
//! [`CoordinateMapper`] additionally carries the content size and converts
//! between normalized coordinates and screen pixels.

use std::fmt;

use holdkit_core::{Matrix3, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Uniform zoom plus translation from content space to screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
}

impl ViewportState {
    pub const IDENTITY: ViewportState = ViewportState {
        scale: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn new(scale: f64, tx: f64, ty: f64) -> Self {
        Self { scale, tx, ty }
    }

    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.tx, self.ty)
    }

    /// Content-to-screen transform as a matrix, for renderers that want one.
    pub fn to_matrix(&self) -> Matrix3 {
        Matrix3::translation(self.tx, self.ty) * Matrix3::scaling(self.scale, self.scale)
    }

    pub fn approx_eq(&self, other: &ViewportState, tolerance: f64) -> bool {
        (self.scale - other.scale).abs() <= tolerance
            && (self.tx - other.tx).abs() <= tolerance
            && (self.ty - other.ty).abs() <= tolerance
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for ViewportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scale: {:.3}x | Offset: ({:.1}, {:.1})",
            self.scale, self.tx, self.ty
        )
    }
}

/// Screen point to content space. `v.scale` must be positive.
pub fn screen_to_canonical(p: Vec2, v: &ViewportState) -> Vec2 {
    Vec2::new((p.x - v.tx) / v.scale, (p.y - v.ty) / v.scale)
}

/// Content-space point to screen.
pub fn canonical_to_screen(p: Vec2, v: &ViewportState) -> Vec2 {
    Vec2::new(p.x * v.scale + v.tx, p.y * v.scale + v.ty)
}

/// Converts between normalized hold coordinates and screen pixels for one
/// wall image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    content_size: Size,
}

impl CoordinateMapper {
    pub fn new(content_size: Size) -> Self {
        Self { content_size }
    }

    /// Mapper whose content space is the unit square, so normalized and
    /// content coordinates coincide.
    pub fn unit() -> Self {
        Self::new(Size::new(1.0, 1.0))
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn normalized_to_screen(&self, p: Vec2, v: &ViewportState) -> Vec2 {
        canonical_to_screen(p.mul_elem(self.content_size.to_vec2()), v)
    }

    pub fn screen_to_normalized(&self, p: Vec2, v: &ViewportState) -> Vec2 {
        screen_to_canonical(p, v).div_elem(self.content_size.to_vec2())
    }

    /// Length in normalized width units to screen pixels.
    pub fn normalized_length_to_screen(&self, len: f64, v: &ViewportState) -> f64 {
        len * self.content_size.width * v.scale
    }

    /// Screen-space displacement to a normalized displacement.
    pub fn screen_delta_to_normalized(&self, delta: Vec2, v: &ViewportState) -> Vec2 {
        (delta / v.scale).div_elem(self.content_size.to_vec2())
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::unit()
    }
}
