use holdkit_core::{Size, Vec2};
use holdkit_wall::{canonical_to_screen, screen_to_canonical, CoordinateMapper, ViewportState};

#[test]
fn test_screen_to_canonical_inverts_viewport() {
    let v = ViewportState::new(2.0, 10.0, -20.0);
    let screen = Vec2::new(110.0, 80.0);
    let canonical = screen_to_canonical(screen, &v);
    assert_eq!(canonical, Vec2::new(50.0, 50.0));
    assert_eq!(canonical_to_screen(canonical, &v), screen);
}

#[test]
fn test_identity_viewport_is_passthrough() {
    let p = Vec2::new(12.5, -3.25);
    assert_eq!(screen_to_canonical(p, &ViewportState::IDENTITY), p);
    assert_eq!(canonical_to_screen(p, &ViewportState::IDENTITY), p);
}

#[test]
fn test_viewport_matrix_matches_formula() {
    let v = ViewportState::new(0.27, 15.0, 92.0);
    let p = Vec2::new(1000.0, 800.0);
    let via_matrix = v.to_matrix().transform_point(p).unwrap();
    assert!(via_matrix.approx_eq(canonical_to_screen(p, &v), 1e-9));
    assert!(via_matrix.approx_eq(Vec2::new(285.0, 308.0), 1e-9));
}

#[test]
fn test_normalized_mapping_uses_content_size() {
    let mapper = CoordinateMapper::new(Size::new(1000.0, 800.0));
    let v = ViewportState::new(0.27, 15.0, 92.0);

    let center = mapper.normalized_to_screen(Vec2::new(0.5, 0.5), &v);
    assert!(center.approx_eq(Vec2::new(150.0, 200.0), 1e-9));

    let back = mapper.screen_to_normalized(center, &v);
    assert!(back.approx_eq(Vec2::new(0.5, 0.5), 1e-12));
}

#[test]
fn test_lengths_and_deltas() {
    let mapper = CoordinateMapper::new(Size::new(1000.0, 800.0));
    let v = ViewportState::new(0.5, 3.0, 4.0);

    assert!((mapper.normalized_length_to_screen(0.02, &v) - 10.0).abs() < 1e-12);

    // Translation does not affect deltas
    let delta = mapper.screen_delta_to_normalized(Vec2::new(50.0, 40.0), &v);
    assert!(delta.approx_eq(Vec2::new(0.1, 0.1), 1e-12));
}

#[test]
fn test_unit_mapper_is_default() {
    let mapper = CoordinateMapper::default();
    assert_eq!(mapper, CoordinateMapper::unit());
    assert_eq!(mapper.content_size(), Size::new(1.0, 1.0));
}
