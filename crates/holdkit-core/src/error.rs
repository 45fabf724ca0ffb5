//! Error handling for HoldKit
//!
//! Provides error types for the geometry engine:
//! - Geometry errors (degenerate or non-invertible projective maps)
//! - Input contract errors (wrong point counts, empty layout sizes, unknown holds)
//!
//! All error types use `thiserror` for ergonomic error handling. Every error is
//! local to a single call; none of them leave engine state half-updated.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a projective computation has no well-defined answer for
/// otherwise well-formed input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Three of the four correspondence points are collinear, or two coincide
    #[error("Degenerate {side} quad: points {indices:?} are collinear or coincident")]
    DegenerateCorrespondence {
        /// Which quad was degenerate ("source" or "destination").
        side: String,
        /// Indices of the offending points.
        indices: Vec<usize>,
    },

    /// The DLT system does not have a one-dimensional null space
    #[error("Rank-deficient homography system (singular values {smallest:e} / {second:e})")]
    RankDeficient {
        /// The smallest singular value.
        smallest: f64,
        /// The second smallest singular value.
        second: f64,
    },

    /// Matrix determinant is (numerically) zero
    #[error("Matrix is not invertible (determinant {determinant:e})")]
    SingularMatrix {
        /// The computed determinant.
        determinant: f64,
    },

    /// Homogeneous coordinate is zero, the point maps to infinity
    #[error("Point ({x}, {y}) maps to infinity")]
    PointAtInfinity {
        /// X coordinate of the input point.
        x: f64,
        /// Y coordinate of the input point.
        y: f64,
    },

    /// Linear solver did not produce the requested decomposition
    #[error("Solver failed: {reason}")]
    Solver {
        /// Why the solver failed.
        reason: String,
    },
}

/// Input contract error type
///
/// Raised when the caller passes input the engine cannot interpret at all.
/// These are caller bugs (or transient layout states); retrying the same call
/// will fail the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputContractError {
    /// Wrong number of points
    #[error("Expected {expected} points, got {actual}")]
    WrongPointCount {
        /// The required number of points.
        expected: usize,
        /// The number of points supplied.
        actual: usize,
    },

    /// A size that must be positive is zero, negative or not finite
    #[error("{what} size must be positive, got {width}x{height}")]
    NonPositiveSize {
        /// Which size was invalid.
        what: String,
        /// The supplied width.
        width: f64,
        /// The supplied height.
        height: f64,
    },

    /// A coordinate or factor is NaN or infinite
    #[error("{what} must be finite")]
    NonFinite {
        /// Which value was not finite.
        what: String,
    },

    /// A point lies outside the canonical image
    #[error("Point ({x}, {y}) is outside the canonical image")]
    OutOfBounds {
        /// Canonical X coordinate.
        x: f64,
        /// Canonical Y coordinate.
        y: f64,
    },

    /// No hold with this id exists in the session
    #[error("Unknown hold: {id}")]
    UnknownHold {
        /// The requested hold id.
        id: String,
    },
}

/// Main error type for HoldKit
///
/// A unified error type that can represent any engine error.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Input contract error
    #[error(transparent)]
    InputContract(#[from] InputContractError),
}

impl Error {
    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is an input contract error
    pub fn is_input_contract_error(&self) -> bool {
        matches!(self, Error::InputContract(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
