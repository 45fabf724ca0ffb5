//! Polygon outlines around groups of holds.
//!
//! Route and cluster highlights are drawn as a closed polygon around the
//! hold centers. A convex hull needs at least three non-collinear points, so
//! smaller sets get a stand-in shape: a small circle-like polygon for one
//! hold and a thin strip for two.

use std::cmp::Ordering;
use std::f64::consts::TAU;

use holdkit_core::constants::SINGLE_HOLD_SEGMENTS;
use holdkit_core::{orient, Hold, Vec2};
use holdkit_settings::EngineConfig;
use serde::{Deserialize, Serialize};

/// Dimensions of the stand-in shapes for one and two holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineStyle {
    /// Radius of the single-hold polygon, canonical units
    pub point_radius: f64,
    /// Half-thickness of the two-hold strip, canonical units
    pub thickness: f64,
}

impl OutlineStyle {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            point_radius: config.hull_point_radius,
            thickness: config.two_point_thickness,
        }
    }
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// Closed, simple polygon in canonical space. The closing edge from the last
/// vertex back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outline {
    points: Vec<Vec2>,
}

impl Outline {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Vec2> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace area; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        (0..n)
            .map(|i| self.points[i].cross(self.points[(i + 1) % n]))
            .sum::<f64>()
            / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Point-in-polygon by ray casting; points on an edge may land either way.
    pub fn contains(&self, p: Vec2) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (self.points[i], self.points[j]);
            if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

impl From<Vec<Vec2>> for Outline {
    fn from(points: Vec<Vec2>) -> Self {
        Self::new(points)
    }
}

/// Convex hull by Andrew's monotone chain, counter-clockwise, without
/// repeating the first vertex.
///
/// Points are sorted by `x` then `y`, so duplicates and collinear runs give
/// a stable result: collinear interior points are dropped, and a fully
/// collinear input yields its two extreme points.
pub fn convex_hull(points: &[Vec2]) -> Vec<Vec2> {
    let mut pts: Vec<Vec2> = points.to_vec();
    pts.sort_by(|a, b| match a.x.total_cmp(&b.x) {
        Ordering::Equal => a.y.total_cmp(&b.y),
        o => o,
    });
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut lower: Vec<Vec2> = Vec::with_capacity(pts.len());
    for &p in &pts {
        while lower.len() >= 2 && orient(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Vec2> = Vec::with_capacity(pts.len());
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && orient(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(p);
    }

    // Each chain ends where the other begins.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Regular polygon approximating a circle around `center`.
fn circle_outline(center: Vec2, radius: f64) -> Outline {
    (0..SINGLE_HOLD_SEGMENTS)
        .map(|k| {
            let angle = TAU * k as f64 / SINGLE_HOLD_SEGMENTS as f64;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect::<Vec<_>>()
        .into()
}

/// Rectangle along `a -> b`, `thickness` to either side, counter-clockwise.
/// Falls back to a circle when the points coincide.
fn strip_outline(a: Vec2, b: Vec2, style: &OutlineStyle) -> Outline {
    match (b - a).normalized() {
        Some(dir) => {
            let n = dir.perp() * style.thickness;
            Outline::new(vec![a - n, b - n, b + n, a + n])
        }
        None => circle_outline(a, style.point_radius),
    }
}

/// Outline around hold centers, dispatching on how many there are.
pub fn create_hold_outline(holds: &[Hold], style: &OutlineStyle) -> Outline {
    let centers: Vec<Vec2> = holds.iter().map(Hold::center).collect();
    match centers.as_slice() {
        [] => Outline::default(),
        [only] => circle_outline(*only, style.point_radius),
        [a, b] => strip_outline(*a, *b, style),
        _ => {
            let hull = convex_hull(&centers);
            match hull.as_slice() {
                [only] => circle_outline(*only, style.point_radius),
                // All centers collinear: outline the extremes like a pair.
                [a, b] => strip_outline(*a, *b, style),
                _ => Outline::new(hull),
            }
        }
    }
}

/// Outline around the holds tagged with `cluster_id`.
pub fn create_cluster_outline(holds: &[Hold], cluster_id: &str, style: &OutlineStyle) -> Outline {
    let members: Vec<Hold> = holds
        .iter()
        .filter(|h| h.in_cluster(cluster_id))
        .cloned()
        .collect();
    create_hold_outline(&members, style)
}
