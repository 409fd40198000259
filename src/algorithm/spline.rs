// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! Uniform Catmull-Rom spline.

use crate::util::Vector2f;
use itertools::Itertools;

fn catmull_rom_point(p0: Vector2f, p1: Vector2f, p2: Vector2f, p3: Vector2f, t: f32) -> Vector2f {
    let t2 = t * t;
    let t3 = t2 * t;
    (p1 * 2.0
        + (p2 - p0) * t
        + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
        + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * t3)
        * 0.5
}

/// Sample the curve through `points[1] ..= points[len-2]`.
///
/// The first and last points only steer the tangents. Fewer than 4 points
/// yields an empty polyline.
pub fn catmull_rom(points: &[Vector2f], segments: usize) -> Vec<Vector2f> {
    if points.len() < 4 {
        return vec![];
    }
    let n = segments.max(1);
    let mut out = Vec::with_capacity((points.len() - 3) * n + 1);
    for (p0, p1, p2, p3) in points.iter().copied().tuple_windows() {
        if out.is_empty() {
            out.push(p1);
        }
        for i in 1..=n {
            out.push(catmull_rom_point(p0, p1, p2, p3, i as f32 / n as f32));
        }
    }
    out
}
