// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! Drawable capability and object placement.
//!
//! Anything that can render itself onto a [`RenderTarget`] implements
//! [`Drawable`]. Shapes carry a [`Transformable`] to place themselves in world
//! space. Per-frame z-ordering lives in the [`layer`] submodule.

use crate::{
    render::{target::RenderTarget, transform::Transform},
    util::{wrap_degrees, Vector2f},
};

mod layer;
pub use layer::{Layer, RenderQueue};

/// An object that knows how to draw itself.
pub trait Drawable {
    fn draw(&self, target: &mut dyn RenderTarget);
}

impl<T: Drawable + ?Sized> Drawable for &T {
    fn draw(&self, target: &mut dyn RenderTarget) {
        (**self).draw(target)
    }
}

impl<T: Drawable + ?Sized> Drawable for Box<T> {
    fn draw(&self, target: &mut dyn RenderTarget) {
        (**self).draw(target)
    }
}

/// Position, rotation, scale and origin.
///
/// The origin is the local point that sits at `position` and around which
/// rotation and scale apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformable {
    position: Vector2f,
    rotation: f32,
    scale: Vector2f,
    origin: Vector2f,
}

impl Default for Transformable {
    fn default() -> Self {
        Self {
            position: Vector2f::new(0.0, 0.0),
            rotation: 0.0,
            scale: Vector2f::new(1.0, 1.0),
            origin: Vector2f::new(0.0, 0.0),
        }
    }
}

impl Transformable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_position(&mut self, position: Vector2f) {
        self.position = position;
    }

    pub fn position(&self) -> Vector2f {
        self.position
    }

    /// Degrees, wrapped into [0, 360).
    pub fn set_rotation(&mut self, angle: f32) {
        self.rotation = wrap_degrees(angle);
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_scale(&mut self, scale: Vector2f) {
        self.scale = scale;
    }

    pub fn scale(&self) -> Vector2f {
        self.scale
    }

    pub fn set_origin(&mut self, origin: Vector2f) {
        self.origin = origin;
    }

    pub fn origin(&self) -> Vector2f {
        self.origin
    }

    pub fn move_by(&mut self, offset: Vector2f) {
        self.position += offset;
    }

    pub fn rotate(&mut self, angle: f32) {
        self.set_rotation(self.rotation + angle);
    }

    pub fn scale_by(&mut self, factor: Vector2f) {
        self.scale = Vector2f::new(self.scale.x * factor.x, self.scale.y * factor.y);
    }

    /// Local to world: `translate(position) * rotate * scale * translate(-origin)`.
    pub fn transform(&self) -> Transform {
        let mut t = Transform::IDENTITY;
        t.translate(self.position.x, self.position.y)
            .rotate(self.rotation)
            .scale(self.scale.x, self.scale.y)
            .translate(-self.origin.x, -self.origin.y);
        t
    }

    pub fn inverse_transform(&self) -> Transform {
        self.transform().get_inverse()
    }

    pub fn transform_point(&self, local: Vector2f) -> Vector2f {
        self.transform().transform_point(local)
    }

    pub fn inverse_transform_point(&self, world: Vector2f) -> Vector2f {
        self.inverse_transform().transform_point(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: Vector2f, b: Vector2f) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn origin_lands_on_position() {
        let mut t = Transformable::new();
        t.set_origin(Vector2f::new(5.0, 5.0));
        t.set_position(Vector2f::new(100.0, 50.0));
        t.set_rotation(90.0);
        t.set_scale(Vector2f::new(2.0, 2.0));
        assert!(near(t.transform_point(Vector2f::new(5.0, 5.0)), Vector2f::new(100.0, 50.0)));
        // (1,0) from the origin, scaled then turned a quarter
        assert!(near(t.transform_point(Vector2f::new(6.0, 5.0)), Vector2f::new(100.0, 52.0)));
    }

    #[test]
    fn inverse_point() {
        let mut t = Transformable::new();
        t.move_by(Vector2f::new(3.0, 4.0));
        t.rotate(-45.0);
        t.scale_by(Vector2f::new(0.5, 3.0));
        assert!((t.rotation() - 315.0).abs() < 1e-4);
        let p = Vector2f::new(7.0, -2.0);
        assert!(near(t.inverse_transform_point(t.transform_point(p)), p));
    }
}
