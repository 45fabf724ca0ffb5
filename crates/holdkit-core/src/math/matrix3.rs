//! Row-major 3x3 matrix for affine and projective 2D transforms.

use std::fmt;
use std::ops::Mul;

use serde::{Deserialize, Serialize};

use super::Vec2;
use crate::constants::GEOMETRY_EPSILON;
use crate::error::GeometryError;

/// 3x3 matrix stored row-major as `[m00, m01, m02, m10, ..., m22]`.
///
/// Points are treated as column vectors `(x, y, 1)`, so `a * b` applies `b`
/// first and then `a`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3(pub [f64; 9]);

impl Matrix3 {
    pub const IDENTITY: Matrix3 = Matrix3([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    pub const fn from_array(m: [f64; 9]) -> Self {
        Self(m)
    }

    pub fn from_rows(r0: [f64; 3], r1: [f64; 3], r2: [f64; 3]) -> Self {
        Self([
            r0[0], r0[1], r0[2], r1[0], r1[1], r1[2], r2[0], r2[1], r2[2],
        ])
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::from_rows([1.0, 0.0, tx], [0.0, 1.0, ty], [0.0, 0.0, 1.0])
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::from_rows([sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0])
    }

    pub fn as_array(&self) -> &[f64; 9] {
        &self.0
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0[row * 3 + col]
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    /// Transpose of the cofactor matrix.
    pub fn adjugate(&self) -> Self {
        let m = &self.0;
        Self([
            m[4] * m[8] - m[5] * m[7],
            m[2] * m[7] - m[1] * m[8],
            m[1] * m[5] - m[2] * m[4],
            m[5] * m[6] - m[3] * m[8],
            m[0] * m[8] - m[2] * m[6],
            m[2] * m[3] - m[0] * m[5],
            m[3] * m[7] - m[4] * m[6],
            m[1] * m[6] - m[0] * m[7],
            m[0] * m[4] - m[1] * m[3],
        ])
    }

    pub fn frobenius_norm(&self) -> f64 {
        self.0.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = self.0;
        for v in &mut out {
            *v *= factor;
        }
        Self(out)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Inverse via adjugate / determinant.
    ///
    /// The singularity test is relative to the matrix magnitude so that a
    /// homography scaled by 1e-6 is not rejected just for being small.
    pub fn inverse(&self) -> Result<Self, GeometryError> {
        let det = self.determinant();
        let norm = self.frobenius_norm();
        if !det.is_finite() || norm <= GEOMETRY_EPSILON || det.abs() <= GEOMETRY_EPSILON * norm.powi(3) {
            return Err(GeometryError::SingularMatrix { determinant: det });
        }
        Ok(self.adjugate().scaled(1.0 / det))
    }

    /// Applies the matrix to `(x, y, 1)` and divides by the homogeneous weight.
    pub fn transform_point(&self, p: Vec2) -> Result<Vec2, GeometryError> {
        let m = &self.0;
        let w = m[6] * p.x + m[7] * p.y + m[8];
        if !w.is_finite() || w.abs() <= GEOMETRY_EPSILON {
            return Err(GeometryError::PointAtInfinity { x: p.x, y: p.y });
        }
        Ok(Vec2::new(
            (m[0] * p.x + m[1] * p.y + m[2]) / w,
            (m[3] * p.x + m[4] * p.y + m[5]) / w,
        ))
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: Matrix3) -> Matrix3 {
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = (0..3).map(|k| self.get(row, k) * rhs.get(k, col)).sum();
            }
        }
        Matrix3(out)
    }
}

impl From<Matrix3> for nalgebra::Matrix3<f64> {
    fn from(m: Matrix3) -> Self {
        nalgebra::Matrix3::from_row_slice(&m.0)
    }
}

impl From<nalgebra::Matrix3<f64>> for Matrix3 {
    fn from(m: nalgebra::Matrix3<f64>) -> Self {
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = m[(row, col)];
            }
        }
        Matrix3(out)
    }
}

impl fmt::Display for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            writeln!(
                f,
                "[{:>12.6} {:>12.6} {:>12.6}]",
                self.get(row, 0),
                self.get(row, 1),
                self.get(row, 2)
            )?;
        }
        Ok(())
    }
}
