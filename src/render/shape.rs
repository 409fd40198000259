// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! Ready-made drawables.
//!
//! A shape is a closed polygon in local coordinates placed by its
//! [`Transformable`], which every shape derefs to:
//!
//! ```no_run
//! use term_raster::{CircleShape, Color, Vector2f};
//! use term_raster::render::shape::Shape;
//!
//! let mut c = CircleShape::new(10.0);
//! c.set_fill_color(Color::CYAN);
//! c.set_position(Vector2f::new(40.0, 20.0));
//! ```

use crate::{
    render::{
        sprite::{Drawable, Transformable},
        style::Color,
        target::RenderTarget,
    },
    util::{FloatRect, Vector2f, PI},
};
use std::ops::{Deref, DerefMut};

pub const DEFAULT_CIRCLE_POINTS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub fill_color: Color,
    pub outline_color: Color,
    pub outline_thickness: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::WHITE,
            outline_color: Color::TRANSPARENT,
            outline_thickness: 0.0,
        }
    }
}

/// A closed polygon with fill and outline.
pub trait Shape {
    fn point_count(&self) -> usize;

    /// Vertex `index` in local coordinates.
    fn point(&self, index: usize) -> Vector2f;

    fn style(&self) -> &ShapeStyle;

    fn style_mut(&mut self) -> &mut ShapeStyle;

    fn transformable(&self) -> &Transformable;

    /// Whether the scanline convex fill is safe for this shape.
    fn is_convex(&self) -> bool {
        true
    }

    fn set_fill_color(&mut self, color: Color) {
        self.style_mut().fill_color = color;
    }

    fn fill_color(&self) -> Color {
        self.style().fill_color
    }

    fn set_outline_color(&mut self, color: Color) {
        self.style_mut().outline_color = color;
    }

    fn outline_color(&self) -> Color {
        self.style().outline_color
    }

    fn set_outline_thickness(&mut self, thickness: f32) {
        self.style_mut().outline_thickness = thickness;
    }

    fn outline_thickness(&self) -> f32 {
        self.style().outline_thickness
    }

    fn local_bounds(&self) -> FloatRect {
        bounds_of((0..self.point_count()).map(|i| self.point(i)))
    }

    fn global_bounds(&self) -> FloatRect {
        self.transformable()
            .transform()
            .transform_rect(&self.local_bounds())
    }

    fn world_points(&self) -> Vec<Vector2f> {
        let t = self.transformable().transform();
        (0..self.point_count())
            .map(|i| t.transform_point(self.point(i)))
            .collect()
    }

    /// Fill then outline, each skipped when fully transparent.
    fn paint(&self, target: &mut dyn RenderTarget) {
        let pts = self.world_points();
        let style = *self.style();
        if style.fill_color.a > 0 {
            if self.is_convex() {
                target.fill_convex_polygon(&pts, style.fill_color);
            } else {
                target.fill_polygon(&pts, style.fill_color);
            }
        }
        if style.outline_thickness > 0.0 && style.outline_color.a > 0 && pts.len() > 1 {
            let thickness = style.outline_thickness.round() as i32;
            for (i, p1) in pts.iter().enumerate() {
                let (a, b) = (p1.to_i32(), pts[(i + 1) % pts.len()].to_i32());
                target.draw_thick_line(a.x, a.y, b.x, b.y, style.outline_color, thickness);
            }
        }
    }
}

fn bounds_of(mut points: impl Iterator<Item = Vector2f>) -> FloatRect {
    let Some(first) = points.next() else {
        return FloatRect::default();
    };
    let (min, max) = points.fold((first, first), |(lo, hi), p| {
        (
            Vector2f::new(lo.x.min(p.x), lo.y.min(p.y)),
            Vector2f::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    });
    FloatRect::from_corners(min, max)
}

macro_rules! shape_common {
    ($t:ty) => {
        impl Deref for $t {
            type Target = Transformable;
            fn deref(&self) -> &Transformable {
                &self.transformable
            }
        }

        impl DerefMut for $t {
            fn deref_mut(&mut self) -> &mut Transformable {
                &mut self.transformable
            }
        }

        impl Drawable for $t {
            fn draw(&self, target: &mut dyn RenderTarget) {
                self.paint(target);
            }
        }
    };
}

/// Regular polygon approximating a circle. Local bounds are `(0, 0, 2r, 2r)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    radius: f32,
    point_count: usize,
    style: ShapeStyle,
    transformable: Transformable,
}

impl CircleShape {
    pub fn new(radius: f32) -> Self {
        Self::with_points(radius, DEFAULT_CIRCLE_POINTS)
    }

    pub fn with_points(radius: f32, point_count: usize) -> Self {
        Self {
            radius,
            point_count: point_count.max(3),
            style: ShapeStyle::default(),
            transformable: Transformable::default(),
        }
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// At least 3.
    pub fn set_point_count(&mut self, count: usize) {
        self.point_count = count.max(3);
    }
}

impl Shape for CircleShape {
    fn point_count(&self) -> usize {
        self.point_count
    }

    /// Vertex 0 is at the top, winding clockwise on screen.
    fn point(&self, index: usize) -> Vector2f {
        let angle = index as f32 / self.point_count as f32 * 2.0 * PI - PI / 2.0;
        let (sin, cos) = angle.sin_cos();
        Vector2f::new(self.radius + cos * self.radius, self.radius + sin * self.radius)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transformable(&self) -> &Transformable {
        &self.transformable
    }
}

shape_common!(CircleShape);

#[derive(Debug, Clone, PartialEq)]
pub struct RectangleShape {
    size: Vector2f,
    style: ShapeStyle,
    transformable: Transformable,
}

impl RectangleShape {
    pub fn new(size: Vector2f) -> Self {
        Self {
            size,
            style: ShapeStyle::default(),
            transformable: Transformable::default(),
        }
    }

    pub fn set_size(&mut self, size: Vector2f) {
        self.size = size;
    }

    pub fn size(&self) -> Vector2f {
        self.size
    }
}

impl Shape for RectangleShape {
    fn point_count(&self) -> usize {
        4
    }

    fn point(&self, index: usize) -> Vector2f {
        match index % 4 {
            0 => Vector2f::new(0.0, 0.0),
            1 => Vector2f::new(self.size.x, 0.0),
            2 => Vector2f::new(self.size.x, self.size.y),
            _ => Vector2f::new(0.0, self.size.y),
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transformable(&self) -> &Transformable {
        &self.transformable
    }
}

shape_common!(RectangleShape);

/// Polygon from user supplied points.
///
/// Convexity is not checked, so the fill uses the even-odd path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConvexShape {
    points: Vec<Vector2f>,
    style: ShapeStyle,
    transformable: Transformable,
}

impl ConvexShape {
    pub fn new(point_count: usize) -> Self {
        Self {
            points: vec![Vector2f::default(); point_count],
            ..Default::default()
        }
    }

    pub fn from_points(points: Vec<Vector2f>) -> Self {
        Self {
            points,
            ..Default::default()
        }
    }

    /// New points start at the local origin.
    pub fn set_point_count(&mut self, count: usize) {
        self.points.resize(count, Vector2f::default());
    }

    /// Out of range indices are ignored.
    pub fn set_point(&mut self, index: usize, point: Vector2f) {
        if let Some(p) = self.points.get_mut(index) {
            *p = point;
        }
    }
}

impl Shape for ConvexShape {
    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn point(&self, index: usize) -> Vector2f {
        self.points.get(index).copied().unwrap_or_default()
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transformable(&self) -> &Transformable {
        &self.transformable
    }

    fn is_convex(&self) -> bool {
        false
    }
}

shape_common!(ConvexShape);

/// Straight segment, thickness above 1 is drawn as a filled quad.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    start: Vector2f,
    end: Vector2f,
    color: Color,
    thickness: f32,
    transformable: Transformable,
}

impl Default for Line {
    fn default() -> Self {
        Self::new(Vector2f::default(), Vector2f::default(), Color::WHITE)
    }
}

impl Line {
    pub fn new(start: Vector2f, end: Vector2f, color: Color) -> Self {
        Self {
            start,
            end,
            color,
            thickness: 1.0,
            transformable: Transformable::default(),
        }
    }

    pub fn set_start(&mut self, p: Vector2f) {
        self.start = p;
    }

    pub fn start(&self) -> Vector2f {
        self.start
    }

    pub fn set_end(&mut self, p: Vector2f) {
        self.end = p;
    }

    pub fn end(&self) -> Vector2f {
        self.end
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.thickness = thickness;
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }

    pub fn local_bounds(&self) -> FloatRect {
        FloatRect::from_corners(self.start, self.end)
    }

    pub fn global_bounds(&self) -> FloatRect {
        let t = self.transformable.transform();
        FloatRect::from_corners(t.transform_point(self.start), t.transform_point(self.end))
    }
}

impl Deref for Line {
    type Target = Transformable;
    fn deref(&self) -> &Transformable {
        &self.transformable
    }
}

impl DerefMut for Line {
    fn deref_mut(&mut self) -> &mut Transformable {
        &mut self.transformable
    }
}

impl Drawable for Line {
    fn draw(&self, target: &mut dyn RenderTarget) {
        let t = self.transformable.transform();
        let a = t.transform_point(self.start).to_i32();
        let b = t.transform_point(self.end).to_i32();
        target.draw_thick_line(a.x, a.y, b.x, b.y, self.color, self.thickness.round() as i32);
    }
}
