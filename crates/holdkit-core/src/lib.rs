//! # HoldKit Core
//!
//! Core types, math primitives and errors for HoldKit.
//! Provides the value types shared by the wall engine, the settings crate
//! and the binary: points, sizes, 3x3 matrices, holds and the error taxonomy.

pub mod constants;
pub mod error;
pub mod hold;
pub mod math;

pub use error::{Error, GeometryError, InputContractError, Result};
pub use hold::{Hold, HoldGeometry, HoldRole};
pub use math::{orient, Matrix3, Size, Vec2};
