//! Plain value types and matrix algebra for 2D affine and projective work.

mod matrix3;
mod size;
mod vec2;

pub use matrix3::Matrix3;
pub use size::Size;
pub use vec2::{orient, Vec2};
