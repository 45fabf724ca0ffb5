//! Shared constants and engine defaults.

/// Lowest zoom factor relative to the fitted content (before fit overrides it).
pub const DEFAULT_MIN_SCALE: f64 = 1.0;

/// Highest zoom factor.
pub const DEFAULT_MAX_SCALE: f64 = 4.0;

/// Fraction of the container used when fitting content ("fit with margin").
pub const DEFAULT_COVER_FACTOR: f64 = 0.9;

/// Smallest tappable hold radius on screen, in pixels.
pub const DEFAULT_MIN_PIXEL_RADIUS: f64 = 12.0;

/// Radius of the polygon drawn around a single hold, in canonical units.
pub const DEFAULT_HULL_POINT_RADIUS: f64 = 0.02;

/// Half-thickness of the strip drawn between two holds, in canonical units.
pub const DEFAULT_TWO_POINT_THICKNESS: f64 = 0.01;

/// Radius given to newly placed holds, as a fraction of canonical width.
pub const DEFAULT_HOLD_RADIUS: f64 = 0.025;

/// Radius bounds applied when resizing holds.
pub const MIN_HOLD_RADIUS: f64 = 0.005;
pub const MAX_HOLD_RADIUS: f64 = 0.2;

/// Number of vertices in the single-hold outline.
pub const SINGLE_HOLD_SEGMENTS: usize = 12;

/// Tolerance below which lengths, determinants and homogeneous weights count as zero.
pub const GEOMETRY_EPSILON: f64 = 1e-12;

/// Relative tolerance for collinearity checks (area relative to squared extent).
pub const COLLINEAR_TOLERANCE: f64 = 1e-9;
