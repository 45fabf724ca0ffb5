use holdkit_core::{Hold, Size, Vec2};
use holdkit_settings::{EngineConfig, RadiusCurve};
use holdkit_wall::{CoordinateMapper, HitTester, ViewportState};

fn tester() -> HitTester {
    HitTester::new(
        CoordinateMapper::new(Size::new(1000.0, 800.0)),
        12.0,
        RadiusCurve::Linear,
    )
}

#[test]
fn test_hit_inside_scaled_radius() {
    let hold = Hold::with_id("a", 0.5, 0.5, 0.02);
    let v = ViewportState::IDENTITY;

    // 0.02 of a 1000px wide image is 20px
    assert!(tester().hit_test(Vec2::new(515.0, 400.0), &hold, &v));
    assert!(tester().hit_test(Vec2::new(500.0, 420.0), &hold, &v));
    assert!(!tester().hit_test(Vec2::new(525.0, 400.0), &hold, &v));
}

#[test]
fn test_floor_keeps_small_holds_tappable() {
    let hold = Hold::with_id("a", 0.5, 0.5, 0.02);
    let v = ViewportState::new(0.27, 15.0, 92.0);
    let (center, r) = tester().screen_disk(&hold, &v);

    assert!(center.approx_eq(Vec2::new(150.0, 200.0), 1e-9));
    assert_eq!(r, 12.0);
    assert!(tester().hit_test(Vec2::new(161.0, 200.0), &hold, &v));
    assert!(!tester().hit_test(Vec2::new(163.0, 200.0), &hold, &v));
}

#[test]
fn test_zooming_in_never_shrinks_target() {
    let hold = Hold::with_id("a", 0.5, 0.5, 0.01);
    let mut last = 0.0;
    for step in 1..=40 {
        let v = ViewportState::new(step as f64 * 0.1, 0.0, 0.0);
        let (_, r) = tester().screen_disk(&hold, &v);
        assert!(r >= last);
        assert!(r >= 12.0);
        last = r;
    }
}

#[test]
fn test_holds_at_point_keeps_input_order() {
    let holds = vec![
        Hold::with_id("b", 0.505, 0.5, 0.02),
        Hold::with_id("far", 0.9, 0.9, 0.02),
        Hold::with_id("a", 0.495, 0.5, 0.02),
    ];
    let hits = tester().holds_at_point(Vec2::new(500.0, 400.0), &holds, &ViewportState::IDENTITY);
    let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn test_closest_hold_wins() {
    let holds = vec![
        Hold::with_id("b", 0.51, 0.5, 0.02),
        Hold::with_id("a", 0.495, 0.5, 0.02),
    ];
    let closest = tester().closest_hold_at(Vec2::new(500.0, 400.0), &holds, &ViewportState::IDENTITY);
    assert_eq!(closest.map(|h| h.id.as_str()), Some("a"));

    let none = tester().closest_hold_at(Vec2::new(10.0, 10.0), &holds, &ViewportState::IDENTITY);
    assert!(none.is_none());
}

#[test]
fn test_square_root_curve_grows_slower() {
    let config = EngineConfig {
        radius_curve: RadiusCurve::SquareRoot,
        ..EngineConfig::default()
    };
    let mapper = CoordinateMapper::new(Size::new(1000.0, 800.0));
    let sqrt_tester = HitTester::from_config(mapper, &config);
    let hold = Hold::with_id("a", 0.5, 0.5, 0.05);
    let v = ViewportState::new(4.0, 0.0, 0.0);

    let (_, linear) = tester().screen_disk(&hold, &v);
    let (_, sqrt) = sqrt_tester.screen_disk(&hold, &v);
    assert!((linear - 200.0).abs() < 1e-9);
    assert!((sqrt - 100.0).abs() < 1e-9);
}
