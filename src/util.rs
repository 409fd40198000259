// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! Utilities for points, rects and angles.

use num_traits::{Float, Num, NumCast};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

pub const PI: f32 = std::f32::consts::PI;

#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * PI / 180.0
}

/// Wrap an angle in degrees into [0, 360).
pub fn wrap_degrees(deg: f32) -> f32 {
    let r = deg % 360.0;
    if r < 0.0 {
        // -1e-6 % 360 + 360 rounds to 360.0
        let w = r + 360.0;
        if w >= 360.0 {
            0.0
        } else {
            w
        }
    } else {
        r
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

pub type Vector2f = Vector2<f32>;
pub type Vector2i = Vector2<i32>;
pub type Vector2u = Vector2<u32>;

impl<T> Vector2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: NumCast + Copy> Vector2<T> {
    /// Numeric cast of both components, `None` when a component does not fit.
    pub fn cast<U: NumCast>(self) -> Option<Vector2<U>> {
        Some(Vector2 {
            x: U::from(self.x)?,
            y: U::from(self.y)?,
        })
    }
}

impl<T: Num + Copy> Vector2<T> {
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }
}

impl<T: Float> Vector2<T> {
    pub fn length(self) -> T {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == T::zero() {
            self
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }
}

impl Vector2f {
    /// Truncating conversion, matches how float geometry lands on the pixel grid.
    pub fn to_i32(self) -> Vector2i {
        Vector2i::new(self.x as i32, self.y as i32)
    }
}

impl From<Vector2i> for Vector2f {
    fn from(v: Vector2i) -> Self {
        Vector2f::new(v.x as f32, v.y as f32)
    }
}

impl<T: Num> Add for Vector2<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Num> Sub for Vector2<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Num + Copy> Mul<T> for Vector2<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Num + Copy> Div<T> for Vector2<T> {
    type Output = Self;
    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl<T: Num + Neg<Output = T>> Neg for Vector2<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<T: Num + Copy> AddAssign for Vector2<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Num + Copy> SubAssign for Vector2<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// Axis aligned rectangle, `left/top` is the minimum corner.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect<T> {
    pub left: T,
    pub top: T,
    pub width: T,
    pub height: T,
}

pub type FloatRect = Rect<f32>;
pub type IntRect = Rect<i32>;

impl<T: Num + PartialOrd + Copy> Rect<T> {
    pub const fn new(left: T, top: T, width: T, height: T) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_corners(a: Vector2<T>, b: Vector2<T>) -> Self {
        let (l, r) = if a.x < b.x { (a.x, b.x) } else { (b.x, a.x) };
        let (t, bm) = if a.y < b.y { (a.y, b.y) } else { (b.y, a.y) };
        Self::new(l, t, r - l, bm - t)
    }

    pub fn right(&self) -> T {
        self.left + self.width
    }

    pub fn bottom(&self) -> T {
        self.top + self.height
    }

    pub fn position(&self) -> Vector2<T> {
        Vector2::new(self.left, self.top)
    }

    pub fn size(&self) -> Vector2<T> {
        Vector2::new(self.width, self.height)
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, p: Vector2<T>) -> bool {
        p.x >= self.left && p.x < self.right() && p.y >= self.top && p.y < self.bottom()
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let l = max_of(self.left, other.left);
        let t = max_of(self.top, other.top);
        let r = min_of(self.right(), other.right());
        let b = min_of(self.bottom(), other.bottom());
        if l < r && t < b {
            Some(Self::new(l, t, r - l, b - t))
        } else {
            None
        }
    }
}

fn max_of<T: PartialOrd>(a: T, b: T) -> T {
    if a > b {
        a
    } else {
        b
    }
}

fn min_of<T: PartialOrd>(a: T, b: T) -> T {
    if a < b {
        a
    } else {
        b
    }
}
