use holdkit_core::{InputContractError, Size, Vec2};
use holdkit_settings::{ClampPolicy, EngineConfig};
use holdkit_wall::{
    canonical_to_screen, screen_to_canonical, FitMode, ViewportState, ViewportTransform,
};

const EPS: f64 = 1e-9;

fn fitted() -> ViewportTransform {
    let mut vp = ViewportTransform::new(&EngineConfig::default());
    vp.fit_to_container(Size::new(300.0, 400.0), Size::new(1000.0, 800.0));
    vp
}

/// Scaled content rectangle intersects the container on both axes.
fn overlaps(vp: &ViewportTransform) -> bool {
    let container = vp.container_size().unwrap();
    let content = vp.content_size().unwrap();
    let s = vp.state();
    let (w, h) = (content.width * s.scale, content.height * s.scale);
    s.tx < container.width && s.tx + w > 0.0 && s.ty < container.height && s.ty + h > 0.0
}

#[test]
fn test_fit_to_container_scenario() {
    let vp = fitted();
    let s = vp.state();
    assert!((s.scale - 0.27).abs() < EPS);
    assert!((s.tx - 15.0).abs() < EPS);
    assert!((s.ty - 92.0).abs() < EPS);
}

#[test]
fn test_pan_after_fit_keeps_content_on_screen() {
    let mut vp = fitted();
    vp.pan(1000.0, 1000.0);
    assert!(overlaps(&vp));
    // Content narrower than the container stays centered with hard edges
    assert!((vp.state().tx - 15.0).abs() < EPS);
    assert!((vp.state().ty - 92.0).abs() < EPS);
    assert!((vp.scale() - 0.27).abs() < EPS);
}

#[test]
fn test_fit_scale_lowers_min_scale() {
    let mut vp = fitted();
    let (min, max) = vp.scale_limits();
    assert!((min - 0.27).abs() < EPS);
    assert_eq!(max, 4.0);

    let before = vp.state();
    vp.zoom(0.5, 150.0, 200.0);
    assert_eq!(vp.state(), before);
}

#[test]
fn test_zoom_keeps_focal_point_fixed() {
    let mut vp = fitted();
    let focal = Vec2::new(150.0, 200.0);
    let before = vp.state();
    vp.zoom(2.0, focal.x, focal.y);
    let after = vp.state();

    assert!((after.scale - 0.54).abs() < EPS);
    let under_finger = screen_to_canonical(focal, &before);
    assert!(canonical_to_screen(under_finger, &after).approx_eq(focal, 1e-6));
}

#[test]
fn test_zoom_clamps_to_max_scale() {
    let mut vp = fitted();
    vp.zoom(100.0, 150.0, 200.0);
    assert_eq!(vp.scale(), 4.0);
    assert!(overlaps(&vp));
}

#[test]
fn test_zoom_ignores_bad_factors() {
    let mut vp = fitted();
    let before = vp.state();
    vp.zoom(0.0, 150.0, 200.0);
    vp.zoom(-2.0, 150.0, 200.0);
    vp.zoom(f64::NAN, 150.0, 200.0);
    vp.zoom(2.0, f64::INFINITY, 200.0);
    assert_eq!(vp.state(), before);
}

#[test]
fn test_pan_when_zoomed_stops_at_edges() {
    let mut vp = fitted();
    vp.zoom(4.0, 150.0, 200.0);
    let s = vp.state();
    assert!((s.scale - 1.08).abs() < EPS);
    assert!((s.tx + 390.0).abs() < 1e-6);
    assert!((s.ty + 232.0).abs() < 1e-6);

    vp.pan(500.0, 500.0);
    assert!(vp.state().tx.abs() < 1e-6);
    assert!(vp.state().ty.abs() < 1e-6);

    vp.pan(-5000.0, -5000.0);
    assert!((vp.state().tx + 780.0).abs() < 1e-6);
    assert!((vp.state().ty + 464.0).abs() < 1e-6);
    assert!(overlaps(&vp));
}

#[test]
fn test_clamp_is_idempotent() {
    let mut vp = fitted();
    vp.zoom(3.0, 40.0, 380.0);
    vp.pan(-2000.0, 750.0);
    let once = vp.state();
    vp.clamp_to_bounds();
    assert_eq!(vp.state(), once);
}

#[test]
fn test_zero_sizes_yield_identity() {
    let mut vp = fitted();
    let state = vp.fit_to_container(Size::new(0.0, 400.0), Size::new(1000.0, 800.0));
    assert_eq!(state, ViewportState::IDENTITY);
    assert!(vp.container_size().is_none());

    // Without sizes there is nothing to clamp against
    vp.pan(10.0, 20.0);
    assert_eq!(vp.state(), ViewportState::new(1.0, 10.0, 20.0));

    let err = vp
        .try_fit_to_container(Size::new(300.0, 400.0), Size::new(-1.0, 800.0))
        .unwrap_err();
    assert!(matches!(
        err,
        InputContractError::NonPositiveSize { ref what, .. } if what == "content"
    ));
}

#[test]
fn test_reset_transform_refits() {
    let mut vp = fitted();
    let initial = vp.state();
    vp.zoom(2.5, 10.0, 10.0);
    vp.pan(-40.0, 15.0);
    assert_ne!(vp.state(), initial);

    assert_eq!(vp.reset_transform(), initial);
}

#[test]
fn test_cover_fit_fills_container() {
    let mut vp = ViewportTransform::new(&EngineConfig::default());
    let s = vp.fit_to_container_with(
        Size::new(300.0, 400.0),
        Size::new(1000.0, 800.0),
        FitMode::Cover,
    );
    assert!((s.scale - 0.5).abs() < EPS);
    assert!((s.tx + 100.0).abs() < EPS);
    assert!(s.ty.abs() < EPS);

    vp.pan(1000.0, 0.0);
    assert!(vp.state().tx.abs() < EPS);
    assert_eq!(vp.fit_mode(), FitMode::Cover);
}

#[test]
fn test_overscroll_allows_small_drift() {
    let mut vp = fitted();
    vp.set_clamp_policy(ClampPolicy::Overscroll { fraction: 0.1 });
    vp.pan(1000.0, 0.0);
    // centered at 15 plus 10% of the 270px wide content
    assert!((vp.state().tx - 42.0).abs() < 1e-6);
    assert!(overlaps(&vp));
}

#[test]
fn test_set_zoom_limits_normalizes_order() {
    let mut vp = fitted();
    vp.set_zoom_limits(3.0, 2.0);
    let (min, max) = vp.scale_limits();
    assert!((min - 0.27).abs() < EPS);
    assert_eq!(max, 3.0);
    vp.zoom(100.0, 150.0, 200.0);
    assert_eq!(vp.scale(), 3.0);
}

#[test]
fn test_set_state_is_clamped() {
    let mut vp = fitted();
    vp.set_state(ViewportState::new(10.0, 5000.0, 5000.0));
    assert_eq!(vp.scale(), 4.0);
    assert!(vp.state().tx.abs() < EPS);
    assert!(vp.state().ty.abs() < EPS);

    let before = vp.state();
    vp.set_state(ViewportState::new(0.0, 1.0, 1.0));
    assert_eq!(vp.state(), before);
}

#[test]
fn test_visible_content_rect() {
    let mut vp = fitted();
    let (min, max) = vp.visible_content_rect().unwrap();
    assert!(min.approx_eq(Vec2::ZERO, 1e-9));
    assert!(max.approx_eq(Vec2::new(1000.0, 800.0), 1e-9));

    vp.zoom(4.0, 150.0, 200.0);
    let (min, max) = vp.visible_content_rect().unwrap();
    assert!(max.x - min.x < 1000.0);
    assert!(max.y - min.y < 800.0);
}

#[test]
fn test_reversed_config_limits_are_swapped() {
    let config = EngineConfig {
        min_scale: 5.0,
        max_scale: 4.0,
        ..EngineConfig::default()
    };
    let mut vp = ViewportTransform::new(&config);
    assert_eq!(vp.scale_limits(), (4.0, 5.0));

    vp.zoom(2.0, 0.0, 0.0);
    assert_eq!(vp.scale(), 4.0);
    vp.set_state(ViewportState::new(10.0, 0.0, 0.0));
    assert_eq!(vp.scale(), 5.0);
}

#[test]
fn test_unusable_config_falls_back_to_defaults() {
    let config = EngineConfig {
        min_scale: f64::NAN,
        max_scale: -1.0,
        cover_factor: 0.0,
        clamp_policy: ClampPolicy::Overscroll { fraction: f64::NAN },
        ..EngineConfig::default()
    };
    let mut vp = ViewportTransform::new(&config);
    assert_eq!(vp.scale_limits(), (1.0, 4.0));
    assert_eq!(vp.clamp_policy(), ClampPolicy::HardEdge);

    let s = vp.fit_to_container(Size::new(300.0, 400.0), Size::new(1000.0, 800.0));
    assert!((s.scale - 0.27).abs() < EPS);
    vp.zoom(2.0, 150.0, 200.0);
    assert!((vp.scale() - 0.54).abs() < EPS);
}

#[test]
fn test_invalid_overscroll_is_ignored() {
    let mut vp = fitted();
    for fraction in [f64::NAN, f64::INFINITY, 1.0, -0.1] {
        vp.set_clamp_policy(ClampPolicy::Overscroll { fraction });
        assert_eq!(vp.clamp_policy(), ClampPolicy::HardEdge);
    }

    vp.pan(1e5, 1e5);
    assert!(overlaps(&vp));
    assert!((vp.state().tx - 15.0).abs() < EPS);
    assert!((vp.state().ty - 92.0).abs() < EPS);
}
