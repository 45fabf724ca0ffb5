use holdkit_core::{Hold, Vec2};
use holdkit_wall::{convex_hull, create_cluster_outline, create_hold_outline, Outline, OutlineStyle};

fn hold(id: &str, x: f64, y: f64) -> Hold {
    Hold::with_id(id, x, y, 0.02)
}

#[test]
fn test_empty_holds_give_empty_outline() {
    let outline = create_hold_outline(&[], &OutlineStyle::default());
    assert!(outline.is_empty());
    assert_eq!(outline.area(), 0.0);
}

#[test]
fn test_single_hold_gets_circle() {
    let style = OutlineStyle::default();
    let outline = create_hold_outline(&[hold("a", 0.4, 0.6)], &style);

    assert_eq!(outline.len(), 12);
    for p in outline.points() {
        assert!((p.distance(Vec2::new(0.4, 0.6)) - style.point_radius).abs() < 1e-12);
    }
    assert!(outline.signed_area() > 0.0);
    assert!(outline.contains(Vec2::new(0.4, 0.6)));
}

#[test]
fn test_two_holds_get_strip() {
    let style = OutlineStyle::default();
    let outline = create_hold_outline(&[hold("a", 0.2, 0.5), hold("b", 0.6, 0.5)], &style);

    assert_eq!(outline.len(), 4);
    let expected = 0.4 * 2.0 * style.thickness;
    assert!((outline.area() - expected).abs() < 1e-12);
    assert!(outline.contains(Vec2::new(0.4, 0.5)));
    assert!(!outline.contains(Vec2::new(0.4, 0.5 + 2.0 * style.thickness)));
}

#[test]
fn test_coincident_pair_falls_back_to_circle() {
    let outline = create_hold_outline(
        &[hold("a", 0.3, 0.3), hold("b", 0.3, 0.3)],
        &OutlineStyle::default(),
    );
    assert_eq!(outline.len(), 12);
}

#[test]
fn test_collinear_holds_get_strip_between_extremes() {
    let style = OutlineStyle::default();
    let holds = [hold("a", 0.2, 0.2), hold("b", 0.1, 0.1), hold("c", 0.3, 0.3)];
    let outline = create_hold_outline(&holds, &style);

    assert_eq!(outline.len(), 4);
    let length = Vec2::new(0.1, 0.1).distance(Vec2::new(0.3, 0.3));
    assert!((outline.area() - length * 2.0 * style.thickness).abs() < 1e-12);
}

#[test]
fn test_many_holds_get_hull() {
    let holds = [
        hold("a", 0.1, 0.1),
        hold("b", 0.9, 0.1),
        hold("c", 0.5, 0.4),
        hold("d", 0.9, 0.9),
        hold("e", 0.1, 0.9),
    ];
    let outline = create_hold_outline(&holds, &OutlineStyle::default());
    assert_eq!(outline.len(), 4);
    assert!(!outline.points().contains(&Vec2::new(0.5, 0.4)));
    assert!((outline.area() - 0.64).abs() < 1e-12);
}

#[test]
fn test_hull_contains_inputs_and_is_convex() {
    let pts: Vec<Vec2> = (0..40)
        .map(|i| {
            let t = i as f64 * 0.37;
            Vec2::new(0.5 + 0.4 * t.sin() * (i % 7) as f64 / 7.0, 0.5 + 0.3 * (t * 1.3).cos())
        })
        .collect();
    let hull = convex_hull(&pts);
    let n = hull.len();
    assert!(n >= 3);

    for i in 0..n {
        let (a, b, c) = (hull[i], hull[(i + 1) % n], hull[(i + 2) % n]);
        assert!((b - a).cross(c - b) > 0.0, "hull turns clockwise at {}", b);
    }
    for p in &pts {
        for i in 0..n {
            let (a, b) = (hull[i], hull[(i + 1) % n]);
            assert!((b - a).cross(*p - a) >= -1e-12);
        }
    }
}

#[test]
fn test_hull_is_order_independent() {
    let mut pts = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.2),
        Vec2::new(0.4, 1.0),
        Vec2::new(0.5, 0.5),
    ];
    let first = convex_hull(&pts);
    pts.reverse();
    assert_eq!(convex_hull(&pts), first);
}

#[test]
fn test_cluster_outline_filters_members() {
    let style = OutlineStyle::default();
    let holds = [
        hold("a", 0.1, 0.1).cluster("left"),
        hold("b", 0.2, 0.4).cluster("left"),
        hold("c", 0.8, 0.8).cluster("right"),
        hold("d", 0.5, 0.5),
    ];

    let right = create_cluster_outline(&holds, "right", &style);
    assert_eq!(right.len(), 12);

    let left = create_cluster_outline(&holds, "left", &style);
    assert_eq!(left.len(), 4);
    assert!(!left.contains(Vec2::new(0.8, 0.8)));

    assert!(create_cluster_outline(&holds, "missing", &style).is_empty());
}

#[test]
fn test_outline_serializes_as_point_list() {
    let outline = Outline::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]);
    let json = serde_json::to_string(&outline).unwrap();
    assert!(json.starts_with('['));
    let back: Outline = serde_json::from_str(&json).unwrap();
    assert_eq!(back, outline);
}

#[test]
fn test_convex_polygon_from_any_start_is_kept() {
    let ccw = [
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(3.0, 0.0),
        Vec2::new(4.0, 2.0),
        Vec2::new(2.0, 4.0),
    ];

    for start in 0..ccw.len() {
        let mut rotated = ccw.to_vec();
        rotated.rotate_left(start);
        assert_eq!(convex_hull(&rotated), ccw);

        // Clockwise input comes back counter-clockwise
        rotated.reverse();
        let hull = convex_hull(&rotated);
        assert_eq!(hull, ccw);
        let n = hull.len();
        for i in 0..n {
            let (a, b, c) = (hull[i], hull[(i + 1) % n], hull[(i + 2) % n]);
            assert!((b - a).cross(c - b) > 0.0);
        }
    }
}
