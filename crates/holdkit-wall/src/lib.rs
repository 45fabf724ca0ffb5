//! # HoldKit Wall
//!
//! Coordinate and geometry engine for climbing wall images.
//!
//! ## Core Components
//!
//! - **Mapper**: screen ⇄ canonical conversion under a `{scale, tx, ty}` viewport
//! - **Viewport**: pan, focal-point zoom, fit-to-container and bounds clamping
//! - **Homography**: DLT/SVD rectification of a photographed wall
//! - **Outline**: convex hulls and stand-in shapes around hold groups
//! - **Hit testing**: zoom-aware tap targets for holds
//! - **Gestures / Session**: per-frame gesture application and the editor session
//!
//! ## Architecture
//!
//! ```text
//! gesture events ──► ViewportTransform (clamped)
//!                          │
//!                          ▼
//!                   CoordinateMapper ──► HitTester / hold editing
//!                                              │
//!                                              ▼
//!                                         HullOutline
//!
//! wall corners ──► Homography (independent)
//! ```
//!
//! Everything here is synchronous and single-threaded; the session owns its
//! viewport and is mutated through `&mut` only.
//!
//! ## Usage
//!
//! ```rust
//! use holdkit_core::{Hold, Size, Vec2};
//! use holdkit_settings::EngineConfig;
//! use holdkit_wall::WallSession;
//!
//! let mut session = WallSession::new(EngineConfig::default()).unwrap();
//! session.resize(Size::new(300.0, 400.0), Size::new(1000.0, 800.0));
//! session.set_holds(vec![Hold::with_id("a", 0.5, 0.5, 0.02)]);
//!
//! let center = session.mapper().normalized_to_screen(Vec2::new(0.5, 0.5), &session.state());
//! assert_eq!(session.holds_at(center).len(), 1);
//! ```

pub mod gesture;
pub mod homography;
pub mod mapper;
pub mod outline;
pub mod session;
pub mod viewport;

pub use gesture::{FrameOutcome, GestureEvent, GestureTracker, TapEvent};
pub use hit_test::{screen_radius, HitTester};
pub use homography::{
    apply_homography, canonical_rectangle_corners, compute_homography, create_rectify_homography,
    invert_homography, Homography,
};
pub use mapper::{canonical_to_screen, screen_to_canonical, CoordinateMapper, ViewportState};
pub use outline::{convex_hull, create_cluster_outline, create_hold_outline, Outline, OutlineStyle};
pub use session::{SessionUpdate, TapHits, WallSession};
pub use viewport::{FitMode, ViewportTransform};
