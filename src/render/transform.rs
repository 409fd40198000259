// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! 3x3 affine matrix shared by object placement and the camera.
//!
//! Stored row-major:
//!
//! ```text
//! | a00 a01 a02 |
//! | a10 a11 a12 |
//! | a20 a21 a22 |
//! ```
//!
//! Points are column vectors, so `combine(other)` applies `other` first.

use crate::util::{deg_to_rad, FloatRect, Vector2f};
use std::ops::{Mul, MulAssign};

const DEGENERATE_DET: f32 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    m: [f32; 9],
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        a00: f32,
        a01: f32,
        a02: f32,
        a10: f32,
        a11: f32,
        a12: f32,
        a20: f32,
        a21: f32,
        a22: f32,
    ) -> Self {
        Self {
            m: [a00, a01, a02, a10, a11, a12, a20, a21, a22],
        }
    }

    pub fn matrix(&self) -> &[f32; 9] {
        &self.m
    }

    pub fn transform_point(&self, p: Vector2f) -> Vector2f {
        let m = &self.m;
        Vector2f::new(
            m[0] * p.x + m[1] * p.y + m[2],
            m[3] * p.x + m[4] * p.y + m[5],
        )
    }

    /// Axis-aligned bounding box of the four mapped corners.
    pub fn transform_rect(&self, r: &FloatRect) -> FloatRect {
        let corners = [
            self.transform_point(Vector2f::new(r.left, r.top)),
            self.transform_point(Vector2f::new(r.left, r.top + r.height)),
            self.transform_point(Vector2f::new(r.left + r.width, r.top)),
            self.transform_point(Vector2f::new(r.left + r.width, r.top + r.height)),
        ];
        let (mut l, mut t) = (corners[0].x, corners[0].y);
        let (mut rr, mut b) = (l, t);
        for c in &corners[1..] {
            l = l.min(c.x);
            t = t.min(c.y);
            rr = rr.max(c.x);
            b = b.max(c.y);
        }
        FloatRect::new(l, t, rr - l, b - t)
    }

    /// `self = self * other`
    pub fn combine(&mut self, other: &Transform) -> &mut Self {
        let a = &self.m;
        let b = &other.m;
        let mut r = [0.0f32; 9];
        for row in 0..3 {
            for col in 0..3 {
                r[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }
        self.m = r;
        self
    }

    pub fn translate(&mut self, x: f32, y: f32) -> &mut Self {
        let t = Transform::new(1.0, 0.0, x, 0.0, 1.0, y, 0.0, 0.0, 1.0);
        self.combine(&t)
    }

    /// Rotate by `angle` degrees about the origin.
    pub fn rotate(&mut self, angle: f32) -> &mut Self {
        let rad = deg_to_rad(angle);
        let (sin, cos) = rad.sin_cos();
        let r = Transform::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0);
        self.combine(&r)
    }

    /// Rotate about `(cx, cy)`: translate, rotate, translate back.
    pub fn rotate_around(&mut self, angle: f32, cx: f32, cy: f32) -> &mut Self {
        self.translate(cx, cy).rotate(angle).translate(-cx, -cy)
    }

    pub fn scale(&mut self, sx: f32, sy: f32) -> &mut Self {
        let s = Transform::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0);
        self.combine(&s)
    }

    pub fn scale_around(&mut self, sx: f32, sy: f32, cx: f32, cy: f32) -> &mut Self {
        self.translate(cx, cy).scale(sx, sy).translate(-cx, -cy)
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    /// Adjugate over determinant; identity when the matrix is degenerate.
    pub fn get_inverse(&self) -> Transform {
        let det = self.determinant();
        if det.abs() < DEGENERATE_DET {
            return Transform::IDENTITY;
        }
        let m = &self.m;
        Transform::new(
            (m[4] * m[8] - m[5] * m[7]) / det,
            (m[2] * m[7] - m[1] * m[8]) / det,
            (m[1] * m[5] - m[2] * m[4]) / det,
            (m[5] * m[6] - m[3] * m[8]) / det,
            (m[0] * m[8] - m[2] * m[6]) / det,
            (m[2] * m[3] - m[0] * m[5]) / det,
            (m[3] * m[7] - m[4] * m[6]) / det,
            (m[1] * m[6] - m[0] * m[7]) / det,
            (m[0] * m[4] - m[1] * m[3]) / det,
        )
    }
}

impl Mul for Transform {
    type Output = Transform;
    fn mul(mut self, rhs: Transform) -> Transform {
        self.combine(&rhs);
        self
    }
}

impl MulAssign for Transform {
    fn mul_assign(&mut self, rhs: Transform) {
        self.combine(&rhs);
    }
}

impl Mul<Vector2f> for Transform {
    type Output = Vector2f;
    fn mul(self, rhs: Vector2f) -> Vector2f {
        self.transform_point(rhs)
    }
}
