// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! 2D camera.
//!
//! A view shows the world rect of `size` centred on `center`, rotated by
//! `rotation` degrees, into the `viewport` fraction of the render target.
//! Its transform maps world coordinates into normalized device coordinates
//! `[-1, 1]²` with y pointing up. The pixel side of the mapping lives on the
//! canvas because it needs the target size.

use crate::{
    render::transform::Transform,
    util::{deg_to_rad, wrap_degrees, FloatRect, Vector2f},
};
use std::cell::Cell;

#[derive(Debug, Clone)]
pub struct View {
    center: Vector2f,
    size: Vector2f,
    rotation: f32,
    viewport: FloatRect,
    transform: Cell<Option<Transform>>,
    inverse_transform: Cell<Option<Transform>>,
}

impl Default for View {
    fn default() -> Self {
        Self::new(Vector2f::new(0.0, 0.0), Vector2f::new(100.0, 100.0))
    }
}

impl PartialEq for View {
    fn eq(&self, other: &Self) -> bool {
        self.center == other.center
            && self.size == other.size
            && self.rotation == other.rotation
            && self.viewport == other.viewport
    }
}

impl View {
    pub fn new(center: Vector2f, size: Vector2f) -> Self {
        Self {
            center,
            size,
            rotation: 0.0,
            viewport: FloatRect::new(0.0, 0.0, 1.0, 1.0),
            transform: Cell::new(None),
            inverse_transform: Cell::new(None),
        }
    }

    pub fn from_rect(rect: FloatRect) -> Self {
        Self::new(
            Vector2f::new(rect.left + rect.width / 2.0, rect.top + rect.height / 2.0),
            Vector2f::new(rect.width, rect.height),
        )
    }

    fn invalidate(&mut self) {
        self.transform.set(None);
        self.inverse_transform.set(None);
    }

    pub fn set_center(&mut self, center: Vector2f) {
        self.center = center;
        self.invalidate();
    }

    pub fn center(&self) -> Vector2f {
        self.center
    }

    pub fn set_size(&mut self, size: Vector2f) {
        self.size = size;
        self.invalidate();
    }

    pub fn size(&self) -> Vector2f {
        self.size
    }

    pub fn set_rotation(&mut self, angle: f32) {
        self.rotation = wrap_degrees(angle);
        self.invalidate();
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Fraction of the target this view renders to, `[0, 1]²`.
    pub fn set_viewport(&mut self, viewport: FloatRect) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> FloatRect {
        self.viewport
    }

    /// Show exactly `rect`, clearing rotation.
    pub fn reset(&mut self, rect: FloatRect) {
        self.center = Vector2f::new(rect.left + rect.width / 2.0, rect.top + rect.height / 2.0);
        self.size = Vector2f::new(rect.width, rect.height);
        self.rotation = 0.0;
        self.invalidate();
    }

    pub fn move_by(&mut self, offset: Vector2f) {
        self.set_center(self.center + offset);
    }

    pub fn rotate(&mut self, angle: f32) {
        self.set_rotation(self.rotation + angle);
    }

    /// `factor > 1` shows more of the world.
    pub fn zoom(&mut self, factor: f32) {
        self.set_size(self.size * factor);
    }

    /// World to NDC, recomputed after any change.
    pub fn transform(&self) -> Transform {
        if let Some(t) = self.transform.get() {
            return t;
        }
        // rotate by +rotation around the center, then scale half-extents to [-1, 1], y up
        let (sin, cos) = deg_to_rad(self.rotation).sin_cos();
        let (cx, cy) = (self.center.x, self.center.y);
        let tx = -(cx * cos - cy * sin);
        let ty = -(cx * sin + cy * cos);

        let a = 2.0 / self.size.x;
        let b = -2.0 / self.size.y;

        let t = Transform::new(
            a * cos,
            -a * sin,
            a * tx,
            b * sin,
            b * cos,
            b * ty,
            0.0,
            0.0,
            1.0,
        );
        self.transform.set(Some(t));
        t
    }

    /// NDC to world.
    pub fn inverse_transform(&self) -> Transform {
        if let Some(t) = self.inverse_transform.get() {
            return t;
        }
        let t = self.transform().get_inverse();
        self.inverse_transform.set(Some(t));
        t
    }
}
