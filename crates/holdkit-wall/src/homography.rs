//! Planar homographies for wall photo rectification.
//!
//! A homography maps one quadrilateral onto another in homogeneous
//! coordinates. Given the four corners of a wall as photographed, the
//! rectifying homography maps them onto an axis-aligned rectangle so holds
//! can be placed in a consistent frame regardless of camera angle.
//!
//! The solver is the Direct Linear Transform: each correspondence
//! `(x, y) -> (u, v)` contributes two rows
//!
//! ```text
//! [ -x  -y  -1   0   0   0   u*x  u*y  u ]
//! [  0   0   0  -x  -y  -1   v*x  v*y  v ]
//! ```
//!
//! and `h` is the null vector of the stacked 8x9 system, taken as the right
//! singular vector of the smallest singular value. Points are Hartley
//! normalized first (centroid at the origin, mean distance √2) so the system
//! stays well conditioned for photo-sized pixel coordinates.

use std::fmt;

use holdkit_core::constants::{COLLINEAR_TOLERANCE, GEOMETRY_EPSILON};
use holdkit_core::{orient, GeometryError, InputContractError, Matrix3, Result, Size, Vec2};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

const CORRESPONDENCES: usize = 4;
const SVD_MAX_ITERATIONS: usize = 500;
const RANK_TOLERANCE: f64 = 1e-10;

/// An invertible 3x3 projective transform, normalized so `h8 == 1` whenever
/// `h8` is not (numerically) zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Matrix3", into = "Matrix3")]
pub struct Homography {
    m: Matrix3,
}

impl Homography {
    pub const IDENTITY: Homography = Homography {
        m: Matrix3::IDENTITY,
    };

    /// Wraps a matrix, normalizing it and rejecting singular ones.
    pub fn from_matrix(m: Matrix3) -> std::result::Result<Self, GeometryError> {
        if !m.is_finite() {
            return Err(GeometryError::Solver {
                reason: "matrix has non-finite entries".to_string(),
            });
        }
        let m = normalize(m);
        // inverse() performs the relative determinant check
        m.inverse()?;
        Ok(Self { m })
    }

    pub fn matrix(&self) -> Matrix3 {
        self.m
    }

    /// Row-major `[h0..h8]`.
    pub fn to_array(&self) -> [f64; 9] {
        self.m.0
    }

    pub fn apply(&self, p: Vec2) -> std::result::Result<Vec2, GeometryError> {
        apply_homography(self, p)
    }

    pub fn apply_all(&self, points: &[Vec2]) -> std::result::Result<Vec<Vec2>, GeometryError> {
        points.iter().map(|&p| self.apply(p)).collect()
    }

    pub fn invert(&self) -> std::result::Result<Homography, GeometryError> {
        invert_homography(self)
    }

    /// `self` followed by `next`.
    pub fn then(&self, next: &Homography) -> std::result::Result<Homography, GeometryError> {
        Homography::from_matrix(next.m * self.m)
    }

    /// Whether both matrices describe the same projective map (equal up to a
    /// non-zero scale factor), compared after scaling to unit Frobenius norm.
    pub fn is_equivalent(&self, other: &Homography, tolerance: f64) -> bool {
        let a = self.m.scaled(1.0 / self.m.frobenius_norm());
        let b = other.m.scaled(1.0 / other.m.frobenius_norm());
        let dot: f64 = a.0.iter().zip(b.0.iter()).map(|(x, y)| x * y).sum();
        let b = if dot < 0.0 { b.scaled(-1.0) } else { b };
        a.0.iter()
            .zip(b.0.iter())
            .all(|(x, y)| (x - y).abs() <= tolerance)
    }
}

impl Default for Homography {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<Matrix3> for Homography {
    type Error = GeometryError;

    fn try_from(m: Matrix3) -> std::result::Result<Self, Self::Error> {
        Homography::from_matrix(m)
    }
}

impl From<Homography> for Matrix3 {
    fn from(h: Homography) -> Self {
        h.m
    }
}

impl fmt::Display for Homography {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.m)
    }
}

/// Computes the homography taking each `src[i]` to `dst[i]`.
///
/// Requires exactly four correspondences with no three points collinear on
/// either side.
pub fn compute_homography(src: &[Vec2], dst: &[Vec2]) -> Result<Homography> {
    for points in [src, dst] {
        if points.len() != CORRESPONDENCES {
            return Err(InputContractError::WrongPointCount {
                expected: CORRESPONDENCES,
                actual: points.len(),
            }
            .into());
        }
        if !points.iter().all(|p| p.is_finite()) {
            return Err(InputContractError::NonFinite {
                what: "correspondence point".to_string(),
            }
            .into());
        }
    }

    check_general_position(src, "source")?;
    check_general_position(dst, "destination")?;

    let src_norm = hartley_normalization(src);
    let dst_norm = hartley_normalization(dst);

    // 8 equations padded with a zero row so the SVD yields the full 9x9
    // right singular basis, including the null vector.
    let mut a = DMatrix::<f64>::zeros(9, 9);
    for i in 0..CORRESPONDENCES {
        let s = src_norm.apply(src[i]);
        let d = dst_norm.apply(dst[i]);
        let (x, y, u, v) = (s.x, s.y, d.x, d.y);

        let r = 2 * i;
        a[(r, 0)] = -x;
        a[(r, 1)] = -y;
        a[(r, 2)] = -1.0;
        a[(r, 6)] = u * x;
        a[(r, 7)] = u * y;
        a[(r, 8)] = u;

        a[(r + 1, 3)] = -x;
        a[(r + 1, 4)] = -y;
        a[(r + 1, 5)] = -1.0;
        a[(r + 1, 6)] = v * x;
        a[(r + 1, 7)] = v * y;
        a[(r + 1, 8)] = v;
    }

    let svd = nalgebra::SVD::try_new(a, false, true, f64::EPSILON, SVD_MAX_ITERATIONS)
        .ok_or_else(|| GeometryError::Solver {
            reason: "SVD did not converge".to_string(),
        })?;
    let v_t = svd.v_t.ok_or_else(|| GeometryError::Solver {
        reason: "SVD did not produce right singular vectors".to_string(),
    })?;

    let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
    order.sort_by(|&i, &j| svd.singular_values[i].total_cmp(&svd.singular_values[j]));
    let smallest = svd.singular_values[order[0]];
    let second = svd.singular_values[order[1]];
    let largest = svd.singular_values[order[order.len() - 1]];
    if second <= RANK_TOLERANCE * largest {
        tracing::warn!(
            "Homography system is rank deficient (σ = {:e}, {:e})",
            smallest,
            second
        );
        return Err(GeometryError::RankDeficient { smallest, second }.into());
    }

    let null = v_t.row(order[0]);
    let mut h = [0.0; 9];
    for (k, value) in h.iter_mut().enumerate() {
        *value = null[k];
    }

    let denormalized = dst_norm.inverse() * Matrix3::from_array(h) * src_norm.matrix();
    let homography = Homography::from_matrix(denormalized)?;
    tracing::debug!("Computed homography:\n{}", homography);
    Ok(homography)
}

/// Maps `p` through `h`, failing when `p` maps to infinity.
pub fn apply_homography(h: &Homography, p: Vec2) -> std::result::Result<Vec2, GeometryError> {
    h.m.transform_point(p)
}

/// Inverse homography via adjugate and determinant.
pub fn invert_homography(h: &Homography) -> std::result::Result<Homography, GeometryError> {
    Homography::from_matrix(h.m.inverse()?)
}

/// Corners of the `width` x `height` target rectangle in the order
/// top-left, top-right, bottom-right, bottom-left.
pub fn canonical_rectangle_corners(width: f64, height: f64) -> [Vec2; 4] {
    [
        Vec2::new(0.0, 0.0),
        Vec2::new(width, 0.0),
        Vec2::new(width, height),
        Vec2::new(0.0, height),
    ]
}

/// Homography taking the photographed wall `corners` (top-left, top-right,
/// bottom-right, bottom-left) onto the `width` x `height` rectangle.
pub fn create_rectify_homography(corners: &[Vec2], width: f64, height: f64) -> Result<Homography> {
    let target = Size::new(width, height);
    if !target.is_positive() {
        return Err(InputContractError::NonPositiveSize {
            what: "rectification target".to_string(),
            width,
            height,
        }
        .into());
    }
    compute_homography(corners, &canonical_rectangle_corners(width, height))
}

/// Rejects quads where any three points are collinear (which includes
/// coincident points). The area test is relative to the quad's extent.
fn check_general_position(points: &[Vec2], side: &str) -> std::result::Result<(), GeometryError> {
    let extent = points
        .iter()
        .flat_map(|a| points.iter().map(move |b| (*a - *b).length_squared()))
        .fold(0.0, f64::max);

    let degenerate = |indices: Vec<usize>| {
        tracing::debug!("Degenerate {} quad at {:?}", side, indices);
        GeometryError::DegenerateCorrespondence {
            side: side.to_string(),
            indices,
        }
    };

    if extent <= GEOMETRY_EPSILON {
        return Err(degenerate((0..points.len()).collect()));
    }

    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    for [i, j, k] in TRIPLES {
        if orient(points[i], points[j], points[k]).abs() <= COLLINEAR_TOLERANCE * extent {
            return Err(degenerate(vec![i, j, k]));
        }
    }
    Ok(())
}

/// Similarity that moves the centroid to the origin and scales the mean
/// distance from it to √2.
struct Normalization {
    scale: f64,
    centroid: Vec2,
}

impl Normalization {
    fn apply(&self, p: Vec2) -> Vec2 {
        (p - self.centroid) * self.scale
    }

    fn matrix(&self) -> Matrix3 {
        Matrix3::scaling(self.scale, self.scale)
            * Matrix3::translation(-self.centroid.x, -self.centroid.y)
    }

    fn inverse(&self) -> Matrix3 {
        Matrix3::translation(self.centroid.x, self.centroid.y)
            * Matrix3::scaling(1.0 / self.scale, 1.0 / self.scale)
    }
}

fn hartley_normalization(points: &[Vec2]) -> Normalization {
    let n = points.len() as f64;
    let centroid = points.iter().fold(Vec2::ZERO, |acc, &p| acc + p) / n;
    let mean_distance = points.iter().map(|&p| p.distance(centroid)).sum::<f64>() / n;
    // check_general_position guarantees a non-zero spread
    let scale = std::f64::consts::SQRT_2 / mean_distance;
    Normalization { scale, centroid }
}

/// Scales `m` so that `h8 == 1`, or to unit Frobenius norm when `h8` is zero.
fn normalize(m: Matrix3) -> Matrix3 {
    let h8 = m.0[8];
    let norm = m.frobenius_norm();
    if norm <= GEOMETRY_EPSILON {
        m
    } else if h8.abs() > GEOMETRY_EPSILON * norm {
        m.scaled(1.0 / h8)
    } else {
        m.scaled(1.0 / norm)
    }
}
